//! HTTP server
//!
//! A hyper http1 accept loop over tokio: one task per connection, the
//! shared handler (the router) invoked per request. Store operations
//! inside a handler suspend only that request's task; other connections
//! keep being accepted and served.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

use crate::http::{Handler, Request, Response};

/// HTTP server owning the root handler.
pub struct HttpServer {
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	/// Create a new server with the given handler.
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Accept connections on `addr` until the process is terminated.
	pub async fn listen(self, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		info!("server listening on http://{}", addr);

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let handler = self.handler.clone();

			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, remote_addr, handler).await {
					error!(%remote_addr, "error handling connection: {:?}", err);
				}
			});
		}
	}

	/// Accept connections until ctrl-c is received.
	///
	/// In-flight connections run on their own tasks and are given no
	/// drain period; the process exits once the accept loop stops.
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
	) -> Result<(), Box<dyn std::error::Error>> {
		let listener = TcpListener::bind(addr).await?;
		info!("server listening on http://{}", addr);

		loop {
			tokio::select! {
				accepted = listener.accept() => {
					let (stream, remote_addr) = accepted?;
					let handler = self.handler.clone();

					tokio::task::spawn(async move {
						if let Err(err) =
							Self::handle_connection(stream, remote_addr, handler).await
						{
							error!(%remote_addr, "error handling connection: {:?}", err);
						}
					});
				}
				_ = tokio::signal::ctrl_c() => {
					info!("shutdown signal received, stopping server");
					break;
				}
			}
		}

		Ok(())
	}

	async fn handle_connection(
		stream: TcpStream,
		remote_addr: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr,
		};

		http1::Builder::new().serve_connection(io, service).await?;

		Ok(())
	}
}

/// Service implementation bridging hyper and the [`Handler`] trait.
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let mut request = Request::new(
				parts.method,
				parts.uri,
				parts.version,
				parts.headers,
				body_bytes,
			);
			request.remote_addr = Some(remote_addr);

			// The router maps handler errors itself; an Err here means
			// something escaped it, which is still a plain 500
			let response = handler
				.handle(request)
				.await
				.unwrap_or_else(|_| Response::internal_server_error());

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (name, value) in response.headers.iter() {
				hyper_response = hyper_response.header(name, value);
			}

			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}
