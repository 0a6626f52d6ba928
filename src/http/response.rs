//! HTTP response representation

use bytes::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use hyper::{HeaderMap, StatusCode};

/// An HTTP response: status, headers, and a buffered body.
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a response with the given status and an empty body.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// HTTP 200 OK.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// HTTP 500 Internal Server Error.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// HTTP 302 Found pointing at `location`.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::temporary_redirect("/all");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(response.headers.get("location").unwrap(), "/all");
	/// ```
	pub fn temporary_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	/// An HTML page response (200 unless overridden via [`with_status`]).
	///
	/// The body is emitted as-is; rendering goes through Tera which
	/// auto-escapes interpolated values.
	///
	/// [`with_status`]: Response::with_status
	pub fn html(body: impl Into<Bytes>) -> Self {
		Self::ok()
			.with_body(body)
			.with_typed_header(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))
	}

	/// A plain-text response with the given status.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::text(StatusCode::BAD_REQUEST, "All fields are required.");
	/// assert_eq!(response.status, StatusCode::BAD_REQUEST);
	/// assert_eq!(response.body, "All fields are required.".as_bytes());
	/// ```
	pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
		Self::new(status)
			.with_body(body)
			.with_typed_header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))
	}

	/// Replace the response status.
	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = status;
		self
	}

	/// Set the response body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header, ignoring invalid names or values.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Add a header using typed name and value.
	pub fn with_typed_header(
		mut self,
		name: hyper::header::HeaderName,
		value: HeaderValue,
	) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Add a Location header.
	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = HeaderValue::from_str(location) {
			self.headers.insert(LOCATION, value);
		}
		self
	}
}
