//! Application configuration
//!
//! All values are compiled-in defaults; nothing is read from the
//! environment. The config is constructed once in `main` and threaded
//! through explicitly.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Configuration for the server and its store connection.
#[derive(Debug, Clone)]
pub struct AppConfig {
	/// Address the HTTP server binds to
	pub bind_addr: SocketAddr,
	/// MongoDB connection string
	pub mongodb_url: String,
	/// Database holding the entry collection
	pub database: String,
	/// Collection the entries are stored in
	pub collection: String,
	/// Directory static assets are served from
	pub public_dir: PathBuf,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
			mongodb_url: "mongodb://127.0.0.1:27017".to_string(),
			database: "test-data-store".to_string(),
			collection: "formdatas".to_string(),
			public_dir: PathBuf::from("public"),
		}
	}
}

impl AppConfig {
	/// Create a config with the default values.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::AppConfig;
	///
	/// let config = AppConfig::new();
	/// assert_eq!(config.bind_addr.port(), 8080);
	/// assert_eq!(config.database, "test-data-store");
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Override the bind address.
	pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
		self.bind_addr = addr;
		self
	}

	/// Override the MongoDB connection string.
	///
	/// # Examples
	///
	/// ```
	/// use formbox::AppConfig;
	///
	/// let config = AppConfig::new().with_mongodb_url("mongodb://db.internal:27017");
	/// assert_eq!(config.mongodb_url, "mongodb://db.internal:27017");
	/// ```
	pub fn with_mongodb_url(mut self, url: impl Into<String>) -> Self {
		self.mongodb_url = url.into();
		self
	}

	/// Override the database name.
	pub fn with_database(mut self, database: impl Into<String>) -> Self {
		self.database = database.into();
		self
	}

	/// Override the collection name.
	pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
		self.collection = collection.into();
		self
	}

	/// Override the static asset directory.
	pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.public_dir = dir.into();
		self
	}
}
