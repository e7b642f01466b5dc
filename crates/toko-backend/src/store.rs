//! Document store contract

use crate::binding::LiveBinding;
use crate::document::{Document, Fields};
use crate::error::RemoteError;
use crate::path::{CollectionPath, DocumentPath};
use async_trait::async_trait;

/// Remote document database.
///
/// Reads are live: a binding receives a fresh snapshot after every change
/// to what it watches, including changes made through this same store.
/// Writes are last-write-wins; there is no version check.
#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Watch one document. A loaded snapshot with no data means the
	/// document does not exist.
	fn document(&self, path: &DocumentPath) -> LiveBinding<Document>;

	/// Watch every document directly under `path`, ordered by id.
	fn collection(&self, path: &CollectionPath) -> LiveBinding<Vec<Document>>;

	/// Write `fields` to `path`. With `merge` the fields are merged into the
	/// existing document; otherwise they replace it.
	async fn write_document(
		&self,
		path: &DocumentPath,
		fields: Fields,
		merge: bool,
	) -> Result<(), RemoteError>;

	/// Delete `path`. Deleting a missing document succeeds.
	async fn delete_document(&self, path: &DocumentPath) -> Result<(), RemoteError>;
}
