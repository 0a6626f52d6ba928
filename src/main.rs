use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use formbox::AppConfig;
use formbox::handlers::app_router;
use formbox::render::Renderer;
use formbox::server::HttpServer;
use formbox::store::{EntryStore, MongoEntryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let config = AppConfig::default();

	let store = MongoEntryStore::builder()
		.url(&config.mongodb_url)
		.database(&config.database)
		.collection(&config.collection)
		.build()
		.await?;
	store.ping().await?;
	info!(url = %config.mongodb_url, database = %config.database, "connected to MongoDB");

	let store: Arc<dyn EntryStore> = Arc::new(store);
	let renderer = Arc::new(Renderer::new()?);
	let router = app_router(store, renderer, &config.public_dir);

	HttpServer::new(Arc::new(router))
		.listen_with_shutdown(config.bind_addr)
		.await
}
