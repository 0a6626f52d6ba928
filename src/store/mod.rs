//! Entry persistence
//!
//! The [`EntryStore`] trait is the seam between the handlers and the
//! database: handlers hold an `Arc<dyn EntryStore>` constructed once at
//! startup. [`MongoEntryStore`] is the production backend;
//! [`MemoryEntryStore`] backs the tests.
//!
//! NotFound is not a fault at this layer: `find_by_id` returns `None` and
//! `delete_by_id` returns `false` for ids that resolve to nothing,
//! including ids the backend cannot even parse — a malformed id cannot
//! address any record.

mod memory;
mod mongo;

pub use memory::MemoryEntryStore;
pub use mongo::{MongoEntryStore, MongoEntryStoreBuilder};

use async_trait::async_trait;

use crate::forms::ValidSubmission;
use crate::models::Entry;

/// Errors surfaced by a store backend. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// The database could not be reached
	#[error("connection error: {0}")]
	Connection(String),

	/// An operation failed after the connection was established
	#[error("query error: {0}")]
	Query(String),

	/// A stored document could not be converted to an [`Entry`]
	#[error("serialization error: {0}")]
	Serialization(String),
}

/// Persistent collection of contact form entries.
///
/// `create` takes a [`ValidSubmission`]: validation happens at the
/// handler layer and malformed input never reaches a backend.
#[async_trait]
pub trait EntryStore: Send + Sync {
	/// Persist a new entry, returning it with its generated id and
	/// timestamps.
	async fn create(&self, submission: ValidSubmission) -> Result<Entry, StoreError>;

	/// Every stored entry, newest first.
	async fn list_all(&self) -> Result<Vec<Entry>, StoreError>;

	/// Fetch one entry; `None` when the id is unknown or malformed.
	async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError>;

	/// Delete one entry; returns whether a record existed. Deleting an
	/// unknown or malformed id is a no-op success.
	async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
