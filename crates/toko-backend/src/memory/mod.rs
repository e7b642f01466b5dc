//! In-memory backends
//!
//! Both backends record every call and accept scripted one-shot failures,
//! which is what page tests need to count remote calls and drive error paths.

mod auth;
mod store;

pub use auth::{MemoryAuthService, VerificationEmail};
pub use store::{MemoryDocumentStore, WriteCall};

use crate::error::RemoteError;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Per-operation call counter.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog {
	counts: Arc<Mutex<HashMap<&'static str, usize>>>,
}

impl CallLog {
	pub(crate) fn record(&self, operation: &'static str) {
		*self.counts.lock().entry(operation).or_default() += 1;
	}

	pub(crate) fn count(&self, operation: &str) -> usize {
		self.counts.lock().get(operation).copied().unwrap_or_default()
	}
}

/// Queued failures, consumed in order per operation.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedFailures {
	queue: Arc<Mutex<HashMap<&'static str, VecDeque<RemoteError>>>>,
}

impl ScriptedFailures {
	pub(crate) fn push(&self, operation: &'static str, error: RemoteError) {
		self.queue
			.lock()
			.entry(operation)
			.or_default()
			.push_back(error);
	}

	pub(crate) fn take(&self, operation: &str) -> Option<RemoteError> {
		self.queue.lock().get_mut(operation)?.pop_front()
	}
}
