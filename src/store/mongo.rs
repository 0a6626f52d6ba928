//! MongoDB entry store
//!
//! Stores entries in a single collection, wire-compatible with the
//! pre-existing schema: `_id` ObjectId, camelCase field names, and BSON
//! datetimes for `createdAt`/`updatedAt`.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::forms::ValidSubmission;
use crate::models::Entry;

use super::{EntryStore, StoreError};

/// On-disk document shape for one entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument {
	#[serde(rename = "_id")]
	id: ObjectId,
	email: String,
	name: String,
	mobile: String,
	created_at: bson::DateTime,
	updated_at: bson::DateTime,
}

impl From<EntryDocument> for Entry {
	fn from(doc: EntryDocument) -> Self {
		Entry {
			id: doc.id.to_hex(),
			email: doc.email,
			name: doc.name,
			mobile: doc.mobile,
			created_at: to_chrono(doc.created_at),
			updated_at: to_chrono(doc.updated_at),
		}
	}
}

fn to_chrono(datetime: bson::DateTime) -> DateTime<Utc> {
	DateTime::from_timestamp_millis(datetime.timestamp_millis()).unwrap_or(DateTime::UNIX_EPOCH)
}

fn to_bson(datetime: DateTime<Utc>) -> bson::DateTime {
	bson::DateTime::from_millis(datetime.timestamp_millis())
}

/// MongoDB-backed [`EntryStore`].
///
/// The client pools connections internally; the store is cheap to clone
/// and is shared behind an `Arc<dyn EntryStore>` by the handlers.
#[derive(Clone)]
pub struct MongoEntryStore {
	collection: Collection<EntryDocument>,
	client: Client,
	database_name: String,
}

/// Builder for configuring the MongoDB connection.
///
/// # Examples
///
/// ```rust,no_run
/// use formbox::store::MongoEntryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MongoEntryStore::builder()
///     .url("mongodb://127.0.0.1:27017")
///     .database("test-data-store")
///     .collection("formdatas")
///     .build()
///     .await?;
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```
pub struct MongoEntryStoreBuilder {
	url: String,
	database: String,
	collection: String,
}

impl Default for MongoEntryStoreBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl MongoEntryStoreBuilder {
	pub fn new() -> Self {
		Self {
			url: "mongodb://127.0.0.1:27017".to_string(),
			database: "test-data-store".to_string(),
			collection: "formdatas".to_string(),
		}
	}

	/// Set the MongoDB connection string.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}

	/// Set the database name.
	pub fn database(mut self, database: impl Into<String>) -> Self {
		self.database = database.into();
		self
	}

	/// Set the collection name.
	pub fn collection(mut self, collection: impl Into<String>) -> Self {
		self.collection = collection.into();
		self
	}

	/// Connect and build the store.
	pub async fn build(self) -> Result<MongoEntryStore, StoreError> {
		let client = Client::with_uri_str(&self.url)
			.await
			.map_err(|e| StoreError::Connection(e.to_string()))?;
		let collection = client
			.database(&self.database)
			.collection::<EntryDocument>(&self.collection);

		Ok(MongoEntryStore {
			collection,
			client,
			database_name: self.database,
		})
	}
}

impl MongoEntryStore {
	/// Create a builder for configuring the connection.
	pub fn builder() -> MongoEntryStoreBuilder {
		MongoEntryStoreBuilder::new()
	}

	/// Verify database connectivity with a ping.
	///
	/// Called once at startup so a dead database fails the process
	/// immediately instead of on the first request.
	pub async fn ping(&self) -> Result<(), StoreError> {
		self.client
			.database(&self.database_name)
			.run_command(doc! { "ping": 1 })
			.await
			.map_err(|e| StoreError::Connection(format!("ping failed: {}", e)))?;
		Ok(())
	}
}

#[async_trait]
impl EntryStore for MongoEntryStore {
	async fn create(&self, submission: ValidSubmission) -> Result<Entry, StoreError> {
		let now = Utc::now();
		let document = EntryDocument {
			id: ObjectId::new(),
			email: submission.email,
			name: submission.name,
			mobile: submission.mobile,
			created_at: to_bson(now),
			updated_at: to_bson(now),
		};

		self.collection
			.insert_one(&document)
			.await
			.map_err(|e| StoreError::Query(e.to_string()))?;

		Ok(document.into())
	}

	async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
		// ObjectIds embed the creation time, so descending _id is
		// newest-first
		let cursor = self
			.collection
			.find(doc! {})
			.sort(doc! { "_id": -1 })
			.await
			.map_err(|e| StoreError::Query(e.to_string()))?;

		let documents: Vec<EntryDocument> = cursor
			.try_collect()
			.await
			.map_err(|e| StoreError::Serialization(e.to_string()))?;

		Ok(documents.into_iter().map(Entry::from).collect())
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError> {
		let Ok(oid) = ObjectId::parse_str(id) else {
			return Ok(None);
		};

		let document = self
			.collection
			.find_one(doc! { "_id": oid })
			.await
			.map_err(|e| StoreError::Query(e.to_string()))?;

		Ok(document.map(Entry::from))
	}

	async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
		let Ok(oid) = ObjectId::parse_str(id) else {
			return Ok(false);
		};

		let result = self
			.collection
			.delete_one(doc! { "_id": oid })
			.await
			.map_err(|e| StoreError::Query(e.to_string()))?;

		Ok(result.deleted_count > 0)
	}
}
