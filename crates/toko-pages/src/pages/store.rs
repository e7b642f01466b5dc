//! Store profile page
//!
//! The form is seeded from the live `toko/{uid}` document and keeps taking
//! remote values for every field the user has not touched. Saving merges the
//! four fields into the document; the store then redelivers it.

use crate::controller::{FieldView, FormController, Outcome};
use crate::navigation::NavigationGuard;
use crate::rules;
use crate::tables::{self, SAVE_STORE};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use toko_backend::{
	CollectionPath, Document, DocumentPath, DocumentStore, Fields, LiveBinding, PathError,
	RemoteError, Snapshot,
};
use toko_conf::PromptSettings;
use toko_forms::{FieldSet, FormResult};
use toko_messages::NotificationSink;

pub const FIELDS: [&str; 4] = ["nama", "alamat", "telepon", "website"];

/// Top-level collection holding one profile document per user.
pub const COLLECTION: &str = "toko";

pub struct StoreSettingsPage {
	form: FormController,
	store: Arc<dyn DocumentStore>,
	path: DocumentPath,
	binding: Mutex<LiveBinding<Document>>,
	navigation: Arc<dyn NavigationGuard>,
	unsaved_prompt: String,
}

impl StoreSettingsPage {
	/// Subscribe to the profile of `uid` and seed the form from whatever
	/// has already been delivered.
	pub fn new(
		uid: &str,
		store: Arc<dyn DocumentStore>,
		sink: Arc<dyn NotificationSink>,
		navigation: Arc<dyn NavigationGuard>,
		prompts: &PromptSettings,
	) -> Result<Self, PathError> {
		let path = CollectionPath::parse(COLLECTION)?.doc(uid)?;
		let binding = store.document(&path);
		let page = Self {
			form: FormController::new(
				FieldSet::new(FIELDS),
				rules::store(),
				sink,
				Arc::new(tables::store()),
			),
			store,
			path,
			binding: Mutex::new(binding),
			navigation,
			unsaved_prompt: prompts.unsaved_changes.clone(),
		};
		page.sync();
		Ok(page)
	}

	pub fn form(&self) -> &FormController {
		&self.form
	}

	pub fn path(&self) -> &DocumentPath {
		&self.path
	}

	/// View of `name` after applying any pending delivery.
	pub fn field(&self, name: &str) -> FieldView {
		self.sync();
		self.form.field(name)
	}

	/// Latest snapshot. A pending delivery is applied to the form first so
	/// the fields never lag behind what this reports.
	pub fn snapshot(&self) -> Snapshot<Document> {
		self.sync();
		self.binding.lock().current()
	}

	/// True until the first snapshot, successful or not, has arrived.
	pub fn loading(&self) -> bool {
		self.snapshot().loading
	}

	pub fn load_error(&self) -> Option<RemoteError> {
		self.snapshot().error
	}

	/// The save action is enabled only with unsaved edits and no save in
	/// flight.
	pub fn can_submit(&self) -> bool {
		self.form.can_save()
	}

	/// Apply a pending delivery, if any. Returns whether one was applied.
	pub fn sync(&self) -> bool {
		let update = self.binding.lock().take_update();
		match update {
			Some(snapshot) => {
				self.apply(&snapshot);
				true
			}
			None => false,
		}
	}

	/// Wait for the next delivery and apply it.
	pub async fn next_delivery(&self) -> Option<Snapshot<Document>> {
		let mut binding = self.binding.lock().clone();
		let snapshot = binding.changed().await.ok()?;
		*self.binding.lock() = binding;
		self.apply(&snapshot);
		Some(snapshot)
	}

	/// Apply a user edit. The first edit after a save blocks navigation.
	pub fn handle_change(&self, name: &str, value: impl Into<String>) -> FormResult<bool> {
		let became_dirty = self.form.handle_change(name, value)?;
		if became_dirty {
			self.navigation.update(true, &self.unsaved_prompt);
		}
		Ok(became_dirty)
	}

	/// Merge the four fields into the profile document.
	pub async fn submit(&self) -> Outcome<()> {
		if !self.form.is_dirty() && !self.form.is_submitting() {
			tracing::debug!(path = %self.path, "nothing to save");
			return Outcome::Unchanged;
		}

		let store = &self.store;
		let path = &self.path;
		let outcome = self
			.form
			.submit(SAVE_STORE, tables::messages::STORE_SAVED, |values| async move {
				store.write_document(path, to_fields(&values), true).await
			})
			.await;

		if outcome.is_success() {
			self.navigation.update(false, &self.unsaved_prompt);
			self.sync();
		}
		outcome
	}

	fn apply(&self, snapshot: &Snapshot<Document>) {
		let Some(document) = &snapshot.data else {
			return;
		};
		let applied = self
			.form
			.apply_remote(FIELDS.iter().map(|name| (*name, document.get_str(name))));
		tracing::debug!(path = %self.path, applied, "applied store snapshot");
	}
}

fn to_fields(values: &FieldSet) -> Fields {
	values
		.iter()
		.map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::navigation::NavigationPrompt;
	use rstest::rstest;
	use serde_json::json;
	use toko_backend::{MemoryDocumentStore, codes, ops};
	use toko_messages::{Level, Message, MessagesContainer};

	struct Harness {
		store: MemoryDocumentStore,
		messages: MessagesContainer,
		prompt: NavigationPrompt,
	}

	impl Harness {
		fn new(store: MemoryDocumentStore) -> Self {
			Self {
				store,
				messages: MessagesContainer::default(),
				prompt: NavigationPrompt::new(),
			}
		}

		fn page(&self) -> StoreSettingsPage {
			StoreSettingsPage::new(
				"uid-1",
				Arc::new(self.store.clone()),
				Arc::new(self.messages.clone()),
				Arc::new(self.prompt.clone()),
				&PromptSettings::default(),
			)
			.unwrap()
		}
	}

	fn profile() -> Fields {
		match json!({
			"nama": "Toko Sejahtera",
			"alamat": "Jl. Merdeka 1",
			"telepon": "0812",
			"website": "tokoku.id",
		}) {
			Value::Object(map) => map,
			_ => unreachable!(),
		}
	}

	fn path() -> DocumentPath {
		DocumentPath::parse("toko/uid-1").unwrap()
	}

	#[rstest]
	fn test_seeded_from_existing_document() {
		let store = MemoryDocumentStore::new();
		store.insert(&path(), profile());
		let harness = Harness::new(store);

		let page = harness.page();

		assert!(!page.loading());
		assert_eq!(page.field("nama").value, "Toko Sejahtera");
		assert!(!page.can_submit());
	}

	#[rstest]
	fn test_loading_until_first_delivery() {
		// Arrange
		let store = MemoryDocumentStore::new().manual_delivery();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();

		// Act
		let before = (page.loading(), page.field("nama").value);
		harness.store.flush();
		let applied = page.sync();

		// Assert
		assert_eq!(before, (true, String::new()));
		assert!(applied);
		assert!(!page.loading());
		assert_eq!(page.field("website").value, "tokoku.id");
	}

	#[rstest]
	fn test_views_apply_pending_delivery() {
		// Arrange
		let store = MemoryDocumentStore::new().manual_delivery();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();
		harness.store.flush();

		// Act
		let loaded = (page.loading(), page.field("nama").value);
		let mut remote = profile();
		remote.insert("alamat".into(), json!("Jl. Sudirman 2"));
		harness.store.insert(&path(), remote);
		harness.store.flush();
		let alamat = page.field("alamat").value;

		// Assert
		assert_eq!(loaded, (false, "Toko Sejahtera".to_string()));
		assert_eq!(alamat, "Jl. Sudirman 2");
		assert!(!page.sync());
		assert!(!page.can_submit());
	}

	#[rstest]
	fn test_snapshot_and_fields_agree() {
		let store = MemoryDocumentStore::new().manual_delivery();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();
		harness.store.flush();

		let snapshot = page.snapshot();

		assert_eq!(snapshot.data.unwrap().get_str("telepon"), "0812");
		assert_eq!(page.form().value("telepon"), "0812");
	}

	#[rstest]
	fn test_remote_change_keeps_local_edit() {
		// Arrange
		let store = MemoryDocumentStore::new();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();
		page.handle_change("nama", "Toko Baru").unwrap();

		// Act
		let mut remote = profile();
		remote.insert("nama".into(), json!("Dari Perangkat Lain"));
		remote.insert("alamat".into(), json!("Jl. Sudirman 2"));
		harness.store.insert(&path(), remote);
		page.sync();

		// Assert
		assert_eq!(page.field("nama").value, "Toko Baru");
		assert_eq!(page.field("alamat").value, "Jl. Sudirman 2");
	}

	#[rstest]
	fn test_first_edit_blocks_navigation() {
		let harness = Harness::new(MemoryDocumentStore::new());
		let page = harness.page();

		page.handle_change("nama", "A").unwrap();
		page.handle_change("alamat", "B").unwrap();

		let state = harness.prompt.state();
		assert!(state.should_block);
		assert_eq!(state.updates, 1);
		assert_eq!(state.message, PromptSettings::default().unsaved_changes);
	}

	#[rstest]
	#[tokio::test]
	async fn test_submit_without_edits_is_unchanged() {
		let store = MemoryDocumentStore::new();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();

		let outcome = page.submit().await;

		assert_eq!(outcome, Outcome::Unchanged);
		assert!(harness.store.writes().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_submit_merges_and_unblocks_navigation() {
		// Arrange
		let store = MemoryDocumentStore::new();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();
		page.handle_change("telepon", "0813").unwrap();

		// Act
		let outcome = page.submit().await;

		// Assert
		assert!(outcome.is_success());
		let writes = harness.store.writes();
		assert_eq!(writes.len(), 1);
		assert!(writes[0].merge);
		assert_eq!(writes[0].fields["telepon"], json!("0813"));
		assert!(!page.form().is_dirty());
		assert!(!harness.prompt.should_block());
		assert_eq!(
			harness.messages.get_messages(),
			vec![Message::success("Data Toko berhasil di simpan")]
		);
		assert_eq!(harness.store.get(&path()).unwrap().get_str("telepon"), "0813");
	}

	#[rstest]
	#[tokio::test]
	async fn test_permission_denied_lands_on_nama() {
		// Arrange
		let store = MemoryDocumentStore::new();
		store.insert(&path(), profile());
		store.fail_next(
			ops::WRITE_DOCUMENT,
			RemoteError::from_code(codes::PERMISSION_DENIED),
		);
		let harness = Harness::new(store);
		let page = harness.page();
		page.handle_change("nama", "Toko Baru").unwrap();

		// Act
		let outcome = page.submit().await;

		// Assert
		assert!(matches!(outcome, Outcome::Failure(_)));
		assert_eq!(
			page.field("nama").error,
			"Anda tidak memiliki akses untuk menyimpan data toko"
		);
		assert_eq!(harness.messages.last().unwrap().level, Level::Error);
		assert!(page.form().is_dirty());
		assert!(harness.prompt.should_block());
	}

	#[rstest]
	fn test_read_error_ends_loading() {
		let store = MemoryDocumentStore::new().manual_delivery();
		let harness = Harness::new(store);
		let page = harness.page();

		harness
			.store
			.fail_document(&path(), RemoteError::from_code(codes::PERMISSION_DENIED));

		assert!(!page.loading());
		assert_eq!(page.load_error().unwrap().code, codes::PERMISSION_DENIED);
	}

	#[rstest]
	#[tokio::test]
	async fn test_next_delivery_applies_remote_values() {
		// Arrange
		let store = MemoryDocumentStore::new().manual_delivery();
		store.insert(&path(), profile());
		let harness = Harness::new(store);
		let page = harness.page();

		// Act
		let (snapshot, ()) = tokio::join!(page.next_delivery(), async {
			harness.store.flush()
		});

		// Assert
		assert!(snapshot.unwrap().data.is_some());
		assert_eq!(page.field("alamat").value, "Jl. Merdeka 1");
	}

	#[rstest]
	fn test_empty_uid_is_rejected() {
		let harness = Harness::new(MemoryDocumentStore::new());

		let result = StoreSettingsPage::new(
			"",
			Arc::new(harness.store.clone()),
			Arc::new(harness.messages.clone()),
			Arc::new(harness.prompt.clone()),
			&PromptSettings::default(),
		);

		assert!(result.is_err());
	}
}
