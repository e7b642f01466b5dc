//! In-memory notification container
//!
//! ```rust
//! use toko_messages::{Message, MessagesContainer, NotificationSink};
//!
//! let container = MessagesContainer::new(vec![]);
//! container.notify(Message::success("Data Toko berhasil di simpan"));
//! container.notify(Message::warning("Password lemah"));
//!
//! assert_eq!(container.get_messages().len(), 2);
//! ```

use crate::message::Message;
use crate::sink::NotificationSink;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, append-only list of notifications.
///
/// Clones share the same storage, so a page can hand one clone to its
/// controller and keep another to render toasts from.
#[derive(Debug, Clone, Default)]
pub struct MessagesContainer {
	messages: Arc<Mutex<Vec<Message>>>,
}

impl MessagesContainer {
	pub fn new(messages: Vec<Message>) -> Self {
		Self {
			messages: Arc::new(Mutex::new(messages)),
		}
	}

	pub fn add(&self, message: Message) {
		self.messages.lock().push(message);
	}

	/// Snapshot of every message, oldest first.
	pub fn get_messages(&self) -> Vec<Message> {
		self.messages.lock().clone()
	}

	/// Take every message out of the container.
	pub fn drain(&self) -> Vec<Message> {
		std::mem::take(&mut *self.messages.lock())
	}

	pub fn last(&self) -> Option<Message> {
		self.messages.lock().last().cloned()
	}

	pub fn len(&self) -> usize {
		self.messages.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.lock().is_empty()
	}

	pub fn clear(&self) {
		self.messages.lock().clear();
	}
}

impl NotificationSink for MessagesContainer {
	fn notify(&self, message: Message) {
		self.add(message);
	}
}
