//! Buffered HTTP request

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use percent_encoding::percent_decode_str;

/// An HTTP request with its body fully read into memory.
///
/// Query parameters are parsed (and percent-decoded) eagerly; path
/// parameters are filled in by the router when a pattern with
/// placeholders matches.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub path_params: HashMap<String, String>,
	pub query_params: HashMap<String, String>,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	/// Create a request from its parts, parsing query parameters.
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			path_params: HashMap::new(),
			query_params,
			remote_addr: None,
		}
	}

	/// Builder for constructing requests in tests.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/entry/abc123")
	///     .build();
	/// assert_eq!(request.path(), "/entry/abc123");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// The request path without the query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Look up a path parameter extracted by the router.
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}

	/// Set a path parameter (called by the router during matching).
	pub fn set_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(name.into(), value.into());
	}

	/// Look up a query parameter.
	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query_params.get(name).map(String::as_str)
	}

	/// Parse the body as `application/x-www-form-urlencoded` data.
	///
	/// `+` is decoded as a space and percent-escapes are resolved; values
	/// keep any literal `=` beyond the first separator. A non-UTF-8 body
	/// yields an empty map.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .uri("/forms")
	///     .body("name=Alice+Smith&email=a%40b.com")
	///     .build();
	///
	/// let form = request.form_data();
	/// assert_eq!(form.get("name"), Some(&"Alice Smith".to_string()));
	/// assert_eq!(form.get("email"), Some(&"a@b.com".to_string()));
	/// ```
	pub fn form_data(&self) -> HashMap<String, String> {
		let Ok(body) = std::str::from_utf8(&self.body) else {
			return HashMap::new();
		};
		body.split('&')
			.filter(|pair| !pair.is_empty())
			.filter_map(|pair| {
				// Split on the first '=' only so values may contain '='
				let mut parts = pair.splitn(2, '=');
				let key = Self::decode_component(parts.next()?);
				let value = Self::decode_component(parts.next().unwrap_or(""));
				Some((key, value))
			})
			.collect()
	}

	fn decode_component(raw: &str) -> String {
		let plus_decoded = raw.replace('+', " ");
		percent_decode_str(&plus_decoded)
			.decode_utf8_lossy()
			.to_string()
	}

	fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter(|pair| !pair.is_empty())
					.filter_map(|pair| {
						let mut parts = pair.splitn(2, '=');
						Some((
							Self::decode_component(parts.next()?),
							Self::decode_component(parts.next().unwrap_or("")),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}
}

/// Builder used to assemble a [`Request`] piece by piece.
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Method,
	uri: String,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn new() -> Self {
		Self {
			method: Method::GET,
			uri: "/".to_string(),
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Build the request. An unparseable URI falls back to `/`.
	pub fn build(self) -> Request {
		let uri: Uri = self.uri.parse().unwrap_or_else(|_| Uri::from_static("/"));
		Request::new(self.method, uri, Version::HTTP_11, self.headers, self.body)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn query_params_preserve_equals_in_value() {
		let request = Request::builder().uri("/test?token=abc==").build();
		assert_eq!(request.query_param("token"), Some("abc=="));
	}

	#[rstest]
	fn query_params_are_percent_decoded() {
		let request = Request::builder().uri("/test?name=John%20Doe").build();
		assert_eq!(request.query_param("name"), Some("John Doe"));
	}

	#[rstest]
	fn missing_query_string_yields_no_params() {
		let request = Request::builder().uri("/test").build();
		assert!(request.query_params.is_empty());
	}

	#[rstest]
	fn form_data_decodes_plus_and_percent_escapes() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/forms")
			.body("email=a%40b.com&name=Alice+Smith&mobile=1234567890")
			.build();

		let form = request.form_data();
		assert_eq!(form.get("email"), Some(&"a@b.com".to_string()));
		assert_eq!(form.get("name"), Some(&"Alice Smith".to_string()));
		assert_eq!(form.get("mobile"), Some(&"1234567890".to_string()));
	}

	#[rstest]
	fn form_data_keeps_equals_in_values() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/forms")
			.body("note=a=b=c")
			.build();
		assert_eq!(request.form_data().get("note"), Some(&"a=b=c".to_string()));
	}

	#[rstest]
	fn form_data_on_empty_body_is_empty() {
		let request = Request::builder().method(Method::POST).uri("/forms").build();
		assert!(request.form_data().is_empty());
	}

	#[rstest]
	fn path_params_round_trip() {
		let mut request = Request::builder().uri("/entry/42").build();
		request.set_path_param("id", "42");
		assert_eq!(request.path_param("id"), Some("42"));
	}
}
