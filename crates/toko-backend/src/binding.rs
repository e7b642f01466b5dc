//! Live read bindings
//!
//! A [`Publisher`] owns the latest [`Snapshot`] of a remote document or
//! collection; every [`LiveBinding`] subscribed to it observes each new
//! snapshot. Only the latest value matters to a form, so deliveries that
//! arrive faster than the reader consumes them collapse into one.
//!
//! ## Example
//!
//! ```rust
//! use toko_backend::binding;
//!
//! let (publisher, mut binding) = binding::channel::<String>();
//! assert!(binding.current().loading);
//!
//! publisher.publish(Some("Toko Sejahtera".to_string()));
//!
//! let snapshot = binding.take_update().unwrap();
//! assert!(!snapshot.loading);
//! assert_eq!(snapshot.data.as_deref(), Some("Toko Sejahtera"));
//! assert!(binding.take_update().is_none());
//! ```

use crate::error::{BindingClosed, RemoteError};
use tokio::sync::watch;

/// What a binding currently knows about the remote value.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
	/// True until the first delivery, successful or not.
	pub loading: bool,
	/// The value, once loaded. `None` after loading means "does not exist".
	pub data: Option<T>,
	pub error: Option<RemoteError>,
}

impl<T> Snapshot<T> {
	pub fn loading() -> Self {
		Self {
			loading: true,
			data: None,
			error: None,
		}
	}

	pub fn ready(data: Option<T>) -> Self {
		Self {
			loading: false,
			data,
			error: None,
		}
	}

	pub fn failed(error: RemoteError) -> Self {
		Self {
			loading: false,
			data: None,
			error: Some(error),
		}
	}
}

impl<T> Default for Snapshot<T> {
	fn default() -> Self {
		Self::loading()
	}
}

/// Create a publisher and a first binding, starting in the loading state.
pub fn channel<T>() -> (Publisher<T>, LiveBinding<T>) {
	let (tx, rx) = watch::channel(Snapshot::loading());
	(Publisher { tx }, LiveBinding { rx })
}

/// Write side of a binding.
#[derive(Debug)]
pub struct Publisher<T> {
	tx: watch::Sender<Snapshot<T>>,
}

impl<T> Publisher<T> {
	pub fn new() -> Self {
		channel().0
	}

	/// Deliver a successful snapshot. Stored even with no subscribers.
	pub fn publish(&self, data: Option<T>) {
		self.tx.send_replace(Snapshot::ready(data));
	}

	/// Deliver a failed read.
	pub fn fail(&self, error: RemoteError) {
		tracing::warn!(code = %error.code, "live binding delivered an error");
		self.tx.send_replace(Snapshot::failed(error));
	}

	/// Whether anything has been delivered yet.
	pub fn has_delivered(&self) -> bool {
		!self.tx.borrow().loading
	}

	/// A new binding that starts from the latest snapshot.
	pub fn subscribe(&self) -> LiveBinding<T> {
		let mut rx = self.tx.subscribe();
		if self.has_delivered() {
			rx.mark_changed();
		}
		LiveBinding { rx }
	}

	pub fn subscriber_count(&self) -> usize {
		self.tx.receiver_count()
	}
}

impl<T> Default for Publisher<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Read side of a binding.
#[derive(Debug, Clone)]
pub struct LiveBinding<T> {
	rx: watch::Receiver<Snapshot<T>>,
}

impl<T: Clone> LiveBinding<T> {
	/// The latest snapshot, without marking it as seen.
	pub fn current(&self) -> Snapshot<T> {
		self.rx.borrow().clone()
	}

	/// The latest snapshot if one arrived since the last take.
	pub fn take_update(&mut self) -> Option<Snapshot<T>> {
		match self.rx.has_changed() {
			Ok(true) => Some(self.rx.borrow_and_update().clone()),
			_ => None,
		}
	}

	/// Wait for the next delivery.
	pub async fn changed(&mut self) -> Result<Snapshot<T>, BindingClosed> {
		self.rx.changed().await.map_err(|_| BindingClosed)?;
		Ok(self.rx.borrow_and_update().clone())
	}
}
