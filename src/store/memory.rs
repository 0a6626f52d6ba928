//! In-memory entry store
//!
//! Backs the unit and integration tests with the same observable
//! semantics as the MongoDB store: newest-first listing, NotFound as
//! `None`/`false`, idempotent deletes.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::forms::ValidSubmission;
use crate::models::Entry;

use super::{EntryStore, StoreError};

/// Entry store holding everything in process memory.
#[derive(Default)]
pub struct MemoryEntryStore {
	entries: RwLock<Vec<Entry>>,
	next_id: AtomicU64,
}

impl MemoryEntryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
	async fn create(&self, submission: ValidSubmission) -> Result<Entry, StoreError> {
		let now = Utc::now();
		// Zero-padded so lexicographic id order matches creation order
		let id = format!("mem{:016x}", self.next_id.fetch_add(1, Ordering::Relaxed));
		let entry = Entry {
			id,
			email: submission.email,
			name: submission.name,
			mobile: submission.mobile,
			created_at: now,
			updated_at: now,
		};
		self.entries.write().await.push(entry.clone());
		Ok(entry)
	}

	async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
		let entries = self.entries.read().await;
		Ok(entries.iter().rev().cloned().collect())
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, StoreError> {
		let entries = self.entries.read().await;
		Ok(entries.iter().find(|entry| entry.id == id).cloned())
	}

	async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
		let mut entries = self.entries.write().await;
		let before = entries.len();
		entries.retain(|entry| entry.id != id);
		Ok(entries.len() < before)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn submission(name: &str) -> ValidSubmission {
		ValidSubmission {
			email: format!("{}@example.com", name.to_lowercase()),
			name: name.to_string(),
			mobile: "1234567890".to_string(),
		}
	}

	#[tokio::test]
	async fn created_entries_are_retrievable_by_id() {
		let store = MemoryEntryStore::new();
		let entry = store.create(submission("Alice")).await.unwrap();
		let found = store.find_by_id(&entry.id).await.unwrap();
		assert_eq!(found, Some(entry));
	}

	#[tokio::test]
	async fn list_all_is_newest_first() {
		let store = MemoryEntryStore::new();
		for name in ["Alice", "Bob", "Carol"] {
			store.create(submission(name)).await.unwrap();
		}
		let names: Vec<_> = store
			.list_all()
			.await
			.unwrap()
			.into_iter()
			.map(|e| e.name)
			.collect();
		assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
	}

	#[tokio::test]
	async fn delete_removes_the_entry() {
		let store = MemoryEntryStore::new();
		let entry = store.create(submission("Alice")).await.unwrap();
		assert!(store.delete_by_id(&entry.id).await.unwrap());
		assert!(store.list_all().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_of_unknown_id_is_a_noop_success() {
		let store = MemoryEntryStore::new();
		assert!(!store.delete_by_id("does-not-exist").await.unwrap());
	}

	#[tokio::test]
	async fn find_of_unknown_id_is_none() {
		let store = MemoryEntryStore::new();
		assert_eq!(store.find_by_id("nope").await.unwrap(), None);
	}
}
