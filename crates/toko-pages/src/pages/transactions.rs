//! Transaction list and detail
//!
//! The list is the live `toko/{uid}/transaksi` collection. Deleting a
//! transaction only calls the store; the row disappears when the collection
//! is redelivered. The detail view is the open id looked up in the latest
//! snapshot, so it follows remote edits and closes itself once the record is
//! gone.

use crate::controller::{FormController, Outcome};
use crate::navigation::Confirmation;
use crate::tables::{self, DELETE_TRANSACTION};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer};
use serde_json::Number;
use std::collections::BTreeMap;
use std::sync::Arc;
use toko_backend::{
	CollectionPath, Document, DocumentStore, LiveBinding, PathError, RemoteError, Snapshot,
};
use toko_conf::PromptSettings;
use toko_forms::{FieldSet, ValidationRules};
use toko_messages::NotificationSink;

/// Sub-collection of the store profile holding its transactions.
pub const COLLECTION: &str = "transaksi";

/// One sold product line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineItem {
	pub nama: String,
	pub harga: i64,
	pub jumlah: i64,
	pub subtotal: i64,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
	#[serde(skip)]
	pub id: String,
	/// Receipt number, stored either as text or as a number.
	#[serde(default, deserialize_with = "text_or_number")]
	pub no: String,
	#[serde(default)]
	pub total: i64,
	#[serde(with = "chrono::serde::ts_milliseconds")]
	pub timestamp: DateTime<Utc>,
	#[serde(default, deserialize_with = "line_items")]
	pub items: Vec<LineItem>,
}

impl Transaction {
	pub fn from_document(document: &Document) -> Result<Self, serde_json::Error> {
		let mut transaction: Transaction = document.decode()?;
		transaction.id = document.id.clone();
		Ok(transaction)
	}
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(Number),
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::Text(text) => text,
		Raw::Number(number) => number.to_string(),
	})
}

/// Items are written either as a list or as a map keyed by position.
fn line_items<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		List(Vec<LineItem>),
		Map(BTreeMap<String, LineItem>),
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::List(items) => items,
		Raw::Map(items) => {
			let mut keyed: Vec<(String, LineItem)> = items.into_iter().collect();
			keyed.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
				(Ok(a), Ok(b)) => a.cmp(&b),
				_ => a.cmp(b),
			});
			keyed.into_iter().map(|(_, item)| item).collect()
		}
	})
}

pub struct TransactionsPage {
	form: FormController,
	store: Arc<dyn DocumentStore>,
	path: CollectionPath,
	binding: Mutex<LiveBinding<Vec<Document>>>,
	confirmation: Arc<dyn Confirmation>,
	delete_prompt: String,
	open: Mutex<Option<String>>,
}

impl TransactionsPage {
	pub fn new(
		uid: &str,
		store: Arc<dyn DocumentStore>,
		sink: Arc<dyn NotificationSink>,
		confirmation: Arc<dyn Confirmation>,
		prompts: &PromptSettings,
	) -> Result<Self, PathError> {
		let path = CollectionPath::parse(super::store::COLLECTION)?
			.doc(uid)?
			.collection(COLLECTION)?;
		let binding = store.collection(&path);
		Ok(Self {
			form: FormController::new(
				FieldSet::new(std::iter::empty::<&str>()),
				ValidationRules::new(),
				sink,
				Arc::new(tables::transactions()),
			),
			store,
			path,
			binding: Mutex::new(binding),
			confirmation,
			delete_prompt: prompts.delete_transaction.clone(),
			open: Mutex::new(None),
		})
	}

	pub fn path(&self) -> &CollectionPath {
		&self.path
	}

	pub fn snapshot(&self) -> Snapshot<Vec<Document>> {
		self.binding.lock().current()
	}

	pub fn loading(&self) -> bool {
		self.snapshot().loading
	}

	pub fn load_error(&self) -> Option<RemoteError> {
		self.snapshot().error
	}

	/// Every transaction in the latest snapshot, ordered by id. Records that
	/// do not decode are skipped.
	pub fn transactions(&self) -> Vec<Transaction> {
		self.snapshot()
			.data
			.unwrap_or_default()
			.iter()
			.filter_map(|document| match Transaction::from_document(document) {
				Ok(transaction) => Some(transaction),
				Err(error) => {
					tracing::warn!(id = %document.id, %error, "skipping malformed transaction");
					None
				}
			})
			.collect()
	}

	/// Loaded, and nothing to show.
	pub fn is_empty(&self) -> bool {
		let snapshot = self.snapshot();
		!snapshot.loading && snapshot.data.is_none_or(|documents| documents.is_empty())
	}

	/// Placeholder text for an empty list.
	pub fn empty_message(&self) -> Option<&'static str> {
		self.is_empty().then_some(tables::messages::NO_TRANSACTIONS)
	}

	/// Wait for the next delivery of the collection.
	pub async fn next_delivery(&self) -> Option<Snapshot<Vec<Document>>> {
		let mut binding = self.binding.lock().clone();
		let snapshot = binding.changed().await.ok()?;
		*self.binding.lock() = binding;
		Some(snapshot)
	}

	pub fn open_detail(&self, id: &str) {
		*self.open.lock() = Some(id.to_string());
	}

	pub fn close_detail(&self) {
		*self.open.lock() = None;
	}

	/// The open transaction as it is in the latest snapshot.
	pub fn detail(&self) -> Option<Transaction> {
		let id = self.open.lock().clone()?;
		self.transactions().into_iter().find(|t| t.id == id)
	}

	pub fn is_deleting(&self, id: &str) -> bool {
		self.form.is_field_submitting(id)
	}

	/// Ask for confirmation, then delete one transaction.
	///
	/// A second delete of the same id while one is in flight is
	/// [`Outcome::Busy`] and asks nothing.
	pub async fn delete(&self, id: &str) -> Outcome<()> {
		if self.is_deleting(id) {
			return Outcome::Busy;
		}
		if !self.confirmation.confirm(&self.delete_prompt) {
			tracing::debug!(id, "transaction delete declined");
			return Outcome::Declined;
		}

		let store = &self.store;
		let path = self.path.doc(id);
		self.form
			.run(id, DELETE_TRANSACTION, "", || async move {
				store.delete_document(&path?).await
			})
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::{Value, json};
	use std::sync::atomic::{AtomicUsize, Ordering};
	use toko_backend::{Fields, MemoryDocumentStore, codes, ops};
	use toko_messages::{Level, MessagesContainer};

	fn fields(value: Value) -> Fields {
		match value {
			Value::Object(map) => map,
			_ => panic!("expected an object"),
		}
	}

	fn transaksi() -> CollectionPath {
		CollectionPath::parse("toko/uid-1/transaksi").unwrap()
	}

	fn seed(store: &MemoryDocumentStore, id: &str, no: Value) {
		store.insert(
			&transaksi().doc(id).unwrap(),
			fields(json!({
				"no": no,
				"total": 30000,
				"timestamp": 1_700_000_000_000_i64,
				"items": [
					{ "nama": "Kopi", "harga": 10000, "jumlah": 3, "subtotal": 30000 },
				],
			})),
		);
	}

	fn page(
		store: &MemoryDocumentStore,
		messages: &MessagesContainer,
		answer: bool,
	) -> TransactionsPage {
		TransactionsPage::new(
			"uid-1",
			Arc::new(store.clone()),
			Arc::new(messages.clone()),
			Arc::new(move |_: &str| answer),
			&PromptSettings::default(),
		)
		.unwrap()
	}

	#[rstest]
	fn test_decodes_list_and_map_items() {
		// Arrange
		let listed = Document::new(
			"trx-1",
			fields(json!({
				"no": 17,
				"total": 5000,
				"timestamp": 1_700_000_000_000_i64,
				"items": [{ "nama": "Teh", "harga": 5000, "jumlah": 1, "subtotal": 5000 }],
			})),
		);
		let keyed = Document::new(
			"trx-2",
			fields(json!({
				"no": "TRX-002",
				"timestamp": 1_700_000_000_000_i64,
				"items": {
					"10": { "nama": "Gula" },
					"2": { "nama": "Teh" },
				},
			})),
		);

		// Act
		let listed = Transaction::from_document(&listed).unwrap();
		let keyed = Transaction::from_document(&keyed).unwrap();

		// Assert
		assert_eq!(listed.id, "trx-1");
		assert_eq!(listed.no, "17");
		assert_eq!(listed.items[0].subtotal, 5000);
		assert_eq!(listed.timestamp.timestamp_millis(), 1_700_000_000_000);
		assert_eq!(keyed.no, "TRX-002");
		assert_eq!(keyed.total, 0);
		let names: Vec<_> = keyed.items.iter().map(|i| i.nama.as_str()).collect();
		assert_eq!(names, vec!["Teh", "Gula"]);
	}

	#[rstest]
	fn test_empty_collection() {
		let store = MemoryDocumentStore::new();
		let messages = MessagesContainer::default();

		let page = page(&store, &messages, true);

		assert!(!page.loading());
		assert!(page.is_empty());
		assert_eq!(page.empty_message(), Some("Belum ada data transaksi"));
	}

	#[rstest]
	fn test_loading_is_not_empty() {
		let store = MemoryDocumentStore::new().manual_delivery();
		let messages = MessagesContainer::default();

		let page = page(&store, &messages, true);

		assert!(page.loading());
		assert!(!page.is_empty());
		assert!(page.empty_message().is_none());
	}

	#[rstest]
	fn test_malformed_records_are_skipped() {
		// Arrange
		let store = MemoryDocumentStore::new();
		seed(&store, "trx-1", json!("001"));
		store.insert(
			&transaksi().doc("trx-2").unwrap(),
			fields(json!({ "no": "002" })),
		);
		let messages = MessagesContainer::default();

		// Act
		let page = page(&store, &messages, true);

		// Assert
		let ids: Vec<_> = page.transactions().into_iter().map(|t| t.id).collect();
		assert_eq!(ids, vec!["trx-1"]);
		assert!(!page.is_empty());
	}

	#[rstest]
	fn test_detail_follows_remote_edits() {
		// Arrange
		let store = MemoryDocumentStore::new();
		seed(&store, "trx-1", json!("001"));
		let messages = MessagesContainer::default();
		let page = page(&store, &messages, true);
		page.open_detail("trx-1");

		// Act
		seed(&store, "trx-1", json!("001-revisi"));

		// Assert
		assert_eq!(page.detail().unwrap().no, "001-revisi");
		page.close_detail();
		assert!(page.detail().is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_declined_delete_never_calls_store() {
		// Arrange
		let store = MemoryDocumentStore::new();
		seed(&store, "trx-1", json!("001"));
		let messages = MessagesContainer::default();
		let page = page(&store, &messages, false);

		// Act
		let outcome = page.delete("trx-1").await;

		// Assert
		assert_eq!(outcome, Outcome::Declined);
		assert_eq!(store.calls(ops::DELETE_DOCUMENT), 0);
		assert!(messages.is_empty());
		assert_eq!(page.transactions().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_confirmed_delete_reconciles_through_binding() {
		// Arrange
		let store = MemoryDocumentStore::new();
		seed(&store, "trx-1", json!("001"));
		seed(&store, "trx-2", json!("002"));
		let messages = MessagesContainer::default();
		let page = page(&store, &messages, true);
		page.open_detail("trx-1");

		// Act
		let outcome = page.delete("trx-1").await;

		// Assert
		assert!(outcome.is_success());
		assert_eq!(store.deletes(), vec![transaksi().doc("trx-1").unwrap()]);
		let ids: Vec<_> = page.transactions().into_iter().map(|t| t.id).collect();
		assert_eq!(ids, vec!["trx-2"]);
		assert!(page.detail().is_none());
		assert!(messages.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_failed_delete_keeps_row_and_notifies() {
		// Arrange
		let store = MemoryDocumentStore::new();
		seed(&store, "trx-1", json!("001"));
		store.fail_next(
			ops::DELETE_DOCUMENT,
			RemoteError::from_code(codes::PERMISSION_DENIED),
		);
		let messages = MessagesContainer::default();
		let page = page(&store, &messages, true);

		// Act
		let outcome = page.delete("trx-1").await;

		// Assert
		assert!(matches!(outcome, Outcome::Failure(_)));
		assert_eq!(page.transactions().len(), 1);
		let notified = messages.last().unwrap();
		assert_eq!(notified.level, Level::Error);
		assert_eq!(
			notified.text,
			"Anda tidak memiliki akses untuk menghapus transaksi"
		);
		assert!(!page.is_deleting("trx-1"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_delete_in_flight_is_busy_without_asking() {
		// Arrange
		let store = MemoryDocumentStore::new();
		let asked = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&asked);
		let page = TransactionsPage::new(
			"uid-1",
			Arc::new(store.clone()),
			Arc::new(MessagesContainer::default()),
			Arc::new(move |_: &str| {
				counter.fetch_add(1, Ordering::SeqCst);
				true
			}),
			&PromptSettings::default(),
		)
		.unwrap();
		let gate = tokio::sync::Notify::new();
		let held = page.form.run("trx-1", DELETE_TRANSACTION, "", || async {
			gate.notified().await;
			Ok(())
		});
		let second = async {
			let outcome = page.delete("trx-1").await;
			gate.notify_one();
			outcome
		};

		// Act
		let (_, outcome) = tokio::join!(held, second);

		// Assert
		assert_eq!(outcome, Outcome::Busy);
		assert_eq!(asked.load(Ordering::SeqCst), 0);
		assert_eq!(store.calls(ops::DELETE_DOCUMENT), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_id_is_classified() {
		let store = MemoryDocumentStore::new();
		let messages = MessagesContainer::default();
		let page = page(&store, &messages, true);

		let outcome = page.delete("").await;

		assert!(matches!(outcome, Outcome::Failure(_)));
		assert_eq!(store.calls(ops::DELETE_DOCUMENT), 0);
		assert_eq!(messages.len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_nested_id_never_reaches_store() {
		// Arrange
		let store = MemoryDocumentStore::new();
		let messages = MessagesContainer::default();
		let nested = transaksi().doc("a").unwrap().collection("b").unwrap().doc("c").unwrap();
		store.insert(&nested, fields(json!({ "no": "001" })));
		let page = page(&store, &messages, true);

		// Act
		let outcome = page.delete("a/b/c").await;

		// Assert
		assert!(matches!(outcome, Outcome::Failure(_)));
		assert_eq!(store.calls(ops::DELETE_DOCUMENT), 0);
		assert!(store.deletes().is_empty());
		assert!(store.get(&nested).is_some());
		assert_eq!(messages.last().unwrap().level, Level::Error);
	}
}
