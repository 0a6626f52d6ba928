//! HTTP request/response types and the handler seam
//!
//! Thin wrappers over hyper's types: a buffered [`Request`] with parsed
//! query and path parameters, a [`Response`] built through chained
//! constructors, and the async [`Handler`] trait every route implements.

mod request;
mod response;

pub use request::{Request, RequestBuilder};
pub use response::Response;

use async_trait::async_trait;

use crate::Result;

/// The unit of logic bound to one route.
///
/// Handlers are shared behind `Arc<dyn Handler>` and must be usable from
/// any connection task.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}
