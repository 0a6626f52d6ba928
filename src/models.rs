//! Domain model
//!
//! A single flat entity with no relationships. Storage-specific document
//! shapes (BSON ids, BSON datetimes) live in the store backends and are
//! converted to this type at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact form submission.
///
/// `id` is opaque to everything above the store: the MongoDB backend uses
/// hex-encoded ObjectIds, the in-memory backend uses its own scheme.
/// Entries are immutable once created; there is no edit route, so
/// `updated_at` always equals `created_at` in practice. Both are kept to
/// stay wire-compatible with the existing collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
	pub id: String,
	pub email: String,
	pub name: String,
	pub mobile: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}
