//! Static asset passthrough
//!
//! Router fallback serving files from the public directory. Untyped
//! beyond an extension-based content type; anything the directory does
//! not contain is a 404.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use hyper::{Method, StatusCode};
use percent_encoding::percent_decode_str;

use crate::http::{Handler, Request, Response};

/// Serves files from a root directory for unmatched GET requests.
pub struct StaticFiles {
	root: PathBuf,
}

impl StaticFiles {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Resolve a request path inside the root, rejecting traversal.
	///
	/// Only plain file-name components are accepted; `..`, absolute
	/// paths, and prefix components all resolve to `None`.
	fn resolve(&self, request_path: &str) -> Option<PathBuf> {
		let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
		let relative = decoded.trim_start_matches('/');
		if relative.is_empty() {
			return None;
		}

		let candidate = Path::new(relative);
		if !candidate
			.components()
			.all(|c| matches!(c, Component::Normal(_)))
		{
			return None;
		}

		Some(self.root.join(candidate))
	}

	fn content_type(path: &Path) -> &'static str {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("html") => "text/html; charset=utf-8",
			Some("css") => "text/css; charset=utf-8",
			Some("js") => "text/javascript; charset=utf-8",
			Some("json") => "application/json",
			Some("png") => "image/png",
			Some("jpg") | Some("jpeg") => "image/jpeg",
			Some("gif") => "image/gif",
			Some("svg") => "image/svg+xml",
			Some("ico") => "image/x-icon",
			Some("txt") => "text/plain; charset=utf-8",
			_ => "application/octet-stream",
		}
	}
}

#[async_trait]
impl Handler for StaticFiles {
	async fn handle(&self, request: Request) -> crate::Result<Response> {
		if request.method != Method::GET {
			return Ok(Response::text(StatusCode::NOT_FOUND, "Not found"));
		}

		let Some(path) = self.resolve(request.path()) else {
			return Ok(Response::text(StatusCode::NOT_FOUND, "Not found"));
		};

		match tokio::fs::read(&path).await {
			Ok(contents) => Ok(Response::ok()
				.with_body(contents)
				.with_header("content-type", Self::content_type(&path))),
			Err(_) => Ok(Response::text(StatusCode::NOT_FOUND, "Not found")),
		}
	}
}
