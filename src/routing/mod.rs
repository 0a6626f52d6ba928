//! Method + path routing
//!
//! Each request maps to exactly one handler. The router is stateless and
//! request-scoped: it matches method and path, fills in path parameters,
//! and converts handler errors into plain-text responses. Unmatched
//! requests go to the fallback handler (static files) when one is set.

mod pattern;

pub use pattern::PathPattern;

use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use tracing::{error, warn};

use crate::Error;
use crate::http::{Handler, Request, Response};

/// One route: a method, a compiled path pattern, and its handler.
pub struct Route {
	method: Method,
	pattern: PathPattern,
	handler: Arc<dyn Handler>,
}

impl Route {
	/// Create a route for an arbitrary method.
	pub fn new(method: Method, pattern: &str, handler: Arc<dyn Handler>) -> Self {
		Self {
			method,
			pattern: PathPattern::new(pattern),
			handler,
		}
	}

	/// Create a GET route.
	pub fn get(pattern: &str, handler: Arc<dyn Handler>) -> Self {
		Self::new(Method::GET, pattern, handler)
	}

	/// Create a POST route.
	pub fn post(pattern: &str, handler: Arc<dyn Handler>) -> Self {
		Self::new(Method::POST, pattern, handler)
	}

	/// Create a DELETE route.
	pub fn delete(pattern: &str, handler: Arc<dyn Handler>) -> Self {
		Self::new(Method::DELETE, pattern, handler)
	}
}

/// Dispatches requests to routes; itself a [`Handler`] so the server can
/// hold it behind `Arc<dyn Handler>`.
#[derive(Default)]
pub struct Router {
	routes: Vec<Route>,
	fallback: Option<Arc<dyn Handler>>,
}

impl Router {
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			fallback: None,
		}
	}

	/// Add a route (builder style).
	pub fn with_route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Set the handler for requests no route matches.
	pub fn with_fallback(mut self, handler: Arc<dyn Handler>) -> Self {
		self.fallback = Some(handler);
		self
	}

	/// Resolve the effective method, honoring the `_method` override.
	///
	/// HTML forms can only submit GET and POST, so the delete form posts
	/// with `?_method=DELETE` and the router rewrites the method before
	/// matching. Only POST may be overridden.
	fn effective_method(request: &Request) -> Method {
		if request.method == Method::POST
			&& let Some(raw) = request.query_param("_method")
			&& let Ok(method) = raw.to_uppercase().parse::<Method>()
		{
			return method;
		}
		request.method.clone()
	}

	async fn dispatch(&self, mut request: Request) -> Response {
		let method = Self::effective_method(&request);
		let path = request.path().to_string();

		for route in &self.routes {
			if route.method != method {
				continue;
			}
			let Some(params) = route.pattern.matches(&path) else {
				continue;
			};
			for (name, value) in params {
				request.set_path_param(name, value);
			}
			return match route.handler.handle(request).await {
				Ok(response) => response,
				Err(err) => Self::error_response(&method, &path, err),
			};
		}

		if let Some(fallback) = &self.fallback {
			return match fallback.handle(request).await {
				Ok(response) => response,
				Err(err) => Self::error_response(&method, &path, err),
			};
		}

		Response::text(hyper::StatusCode::NOT_FOUND, "Not found")
	}

	/// Convert a handler error into its plain-text response.
	///
	/// Validation failures are expected traffic and logged at warn; store
	/// and template faults are operator-facing and logged at error.
	fn error_response(method: &Method, path: &str, err: Error) -> Response {
		match &err {
			Error::Validation(errors) => {
				warn!(%method, path, %errors, "rejected invalid submission");
			}
			_ => {
				error!(%method, path, %err, "request failed");
			}
		}
		let body = match &err {
			Error::Validation(errors) => errors.to_string(),
			Error::Store(_) => "Error talking to the data store".to_string(),
			Error::Template(_) => "Error rendering the page".to_string(),
		};
		Response::text(err.status_code(), body)
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> crate::Result<Response> {
		Ok(self.dispatch(request).await)
	}
}
