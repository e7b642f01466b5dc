//! In-memory document store
//!
//! Every write or delete immediately redelivers a snapshot to the bindings of
//! the touched document and of its parent collection. With
//! [`MemoryDocumentStore::manual_delivery`] nothing is delivered until
//! [`MemoryDocumentStore::flush`], which lets tests observe the loading state
//! and interleave remote changes with local edits.

use super::{CallLog, ScriptedFailures};
use crate::binding::{LiveBinding, Publisher};
use crate::document::{Document, Fields, merge_fields};
use crate::error::RemoteError;
use crate::ops;
use crate::path::{CollectionPath, DocumentPath};
use crate::store::DocumentStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A recorded `write_document` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
	pub path: DocumentPath,
	pub fields: Fields,
	pub merge: bool,
}

#[derive(Debug, Default)]
struct State {
	documents: BTreeMap<DocumentPath, Fields>,
	document_watchers: HashMap<DocumentPath, Publisher<Document>>,
	collection_watchers: HashMap<CollectionPath, Publisher<Vec<Document>>>,
	writes: Vec<WriteCall>,
	deletes: Vec<DocumentPath>,
	manual: bool,
}

impl State {
	fn document(&self, path: &DocumentPath) -> Option<Document> {
		self.documents
			.get(path)
			.map(|fields| Document::new(path.id(), fields.clone()))
	}

	fn collection(&self, path: &CollectionPath) -> Vec<Document> {
		let mut documents: Vec<Document> = self
			.documents
			.iter()
			.filter(|(doc, _)| doc.parent() == *path)
			.map(|(doc, fields)| Document::new(doc.id(), fields.clone()))
			.collect();
		documents.sort_by(|a, b| a.id.cmp(&b.id));
		documents
	}

	fn deliver(&self, path: &DocumentPath) {
		if self.manual {
			return;
		}
		if let Some(publisher) = self.document_watchers.get(path) {
			publisher.publish(self.document(path));
		}
		let parent = path.parent();
		if let Some(publisher) = self.collection_watchers.get(&parent) {
			publisher.publish(Some(self.collection(&parent)));
		}
	}

	fn deliver_all(&self) {
		for (path, publisher) in &self.document_watchers {
			publisher.publish(self.document(path));
		}
		for (path, publisher) in &self.collection_watchers {
			publisher.publish(Some(self.collection(path)));
		}
	}
}

/// Thread-safe, cloneable in-memory [`DocumentStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
	state: Arc<Mutex<State>>,
	calls: CallLog,
	failures: ScriptedFailures,
}

impl MemoryDocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Hold every delivery until [`flush`](Self::flush) is called.
	pub fn manual_delivery(self) -> Self {
		self.state.lock().manual = true;
		self
	}

	/// Deliver the current state to every binding.
	pub fn flush(&self) {
		self.state.lock().deliver_all();
	}

	/// Seed a document without recording a write.
	pub fn insert(&self, path: &DocumentPath, fields: Fields) {
		let mut state = self.state.lock();
		state.documents.insert(path.clone(), fields);
		state.deliver(path);
	}

	pub fn get(&self, path: &DocumentPath) -> Option<Document> {
		self.state.lock().document(path)
	}

	/// Deliver a read error to the bindings of `path`.
	pub fn fail_document(&self, path: &DocumentPath, error: RemoteError) {
		if let Some(publisher) = self.state.lock().document_watchers.get(path) {
			publisher.fail(error);
		}
	}

	pub fn fail_collection(&self, path: &CollectionPath, error: RemoteError) {
		if let Some(publisher) = self.state.lock().collection_watchers.get(path) {
			publisher.fail(error);
		}
	}

	/// Make the next call to `operation` fail with `error`.
	pub fn fail_next(&self, operation: &'static str, error: RemoteError) {
		self.failures.push(operation, error);
	}

	pub fn calls(&self, operation: &str) -> usize {
		self.calls.count(operation)
	}

	pub fn writes(&self) -> Vec<WriteCall> {
		self.state.lock().writes.clone()
	}

	pub fn deletes(&self) -> Vec<DocumentPath> {
		self.state.lock().deletes.clone()
	}

	fn enter(&self, operation: &'static str) -> Result<(), RemoteError> {
		self.calls.record(operation);
		match self.failures.take(operation) {
			Some(error) => {
				tracing::debug!(operation, code = %error.code, "scripted store failure");
				Err(error)
			}
			None => Ok(()),
		}
	}
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
	fn document(&self, path: &DocumentPath) -> LiveBinding<Document> {
		let mut state = self.state.lock();
		if !state.document_watchers.contains_key(path) {
			let publisher = Publisher::new();
			if !state.manual {
				publisher.publish(state.document(path));
			}
			state.document_watchers.insert(path.clone(), publisher);
		}
		state.document_watchers[path].subscribe()
	}

	fn collection(&self, path: &CollectionPath) -> LiveBinding<Vec<Document>> {
		let mut state = self.state.lock();
		if !state.collection_watchers.contains_key(path) {
			let publisher = Publisher::new();
			if !state.manual {
				publisher.publish(Some(state.collection(path)));
			}
			state.collection_watchers.insert(path.clone(), publisher);
		}
		state.collection_watchers[path].subscribe()
	}

	async fn write_document(
		&self,
		path: &DocumentPath,
		fields: Fields,
		merge: bool,
	) -> Result<(), RemoteError> {
		{
			let mut state = self.state.lock();
			state.writes.push(WriteCall {
				path: path.clone(),
				fields: fields.clone(),
				merge,
			});
		}
		self.enter(ops::WRITE_DOCUMENT)?;

		let mut state = self.state.lock();
		match state.documents.get_mut(path) {
			Some(existing) if merge => merge_fields(existing, fields),
			_ => {
				state.documents.insert(path.clone(), fields);
			}
		}
		tracing::info!(path = %path, merge, "document written");
		state.deliver(path);
		Ok(())
	}

	async fn delete_document(&self, path: &DocumentPath) -> Result<(), RemoteError> {
		self.state.lock().deletes.push(path.clone());
		self.enter(ops::DELETE_DOCUMENT)?;

		let mut state = self.state.lock();
		if state.documents.remove(path).is_some() {
			tracing::info!(path = %path, "document deleted");
		}
		state.deliver(path);
		Ok(())
	}
}
