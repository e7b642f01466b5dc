//! Single-flight submission guard
//!
//! A [`SubmissionGuard`] admits at most one attempt at a time. An attempt is
//! represented by an [`Attempt`] handle; dropping the handle always returns
//! the guard to [`Phase::Idle`], so an error path, an early return or a
//! future dropped mid-flight can never leave a form stuck in `Submitting`.
//!
//! [`KeyedGuards`] hands out one independent guard per key, for forms whose
//! fields commit on their own (one key per field). Guards for short-lived
//! keys such as record ids are dropped again with
//! [`KeyedGuards::release`].

use crate::field_set::ErrorSet;
use crate::machine::{Event, Phase, SubmissionState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::Arc;

/// Result of [`SubmissionGuard::try_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempted<T, E> {
	/// Another attempt was already in flight; nothing was run.
	Busy,
	/// Validation failed; the mutation was not run.
	Invalid(ErrorSet),
	/// The mutation ran and succeeded.
	Succeeded(T),
	/// The mutation ran and failed.
	Failed(E),
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
	phase: Arc<Mutex<Phase>>,
}

impl SubmissionGuard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn phase(&self) -> Phase {
		*self.phase.lock()
	}

	pub fn state(&self) -> SubmissionState {
		self.phase().submission_state()
	}

	pub fn is_submitting(&self) -> bool {
		self.state() == SubmissionState::Submitting
	}

	/// Start an attempt, or `None` when one is already running.
	///
	/// # Examples
	///
	/// ```
	/// use toko_forms::{SubmissionGuard, SubmissionState};
	///
	/// let guard = SubmissionGuard::new();
	/// let attempt = guard.begin().unwrap();
	/// assert!(guard.begin().is_none());
	///
	/// drop(attempt);
	/// assert_eq!(guard.state(), SubmissionState::Idle);
	/// ```
	pub fn begin(&self) -> Option<Attempt> {
		let mut phase = self.phase.lock();
		let next = phase.next(Event::Begin).ok()?;
		*phase = next;
		Some(Attempt {
			phase: Arc::clone(&self.phase),
		})
	}

	/// Validate, then run `perform` if validation passed.
	///
	/// While `perform` is pending the guard reports `Submitting` and any
	/// other call returns [`Attempted::Busy`] without running anything.
	/// Whatever the outcome, the guard is back to `Idle` when this returns.
	pub async fn try_submit<V, P, Fut, T, E>(&self, validate: V, perform: P) -> Attempted<T, E>
	where
		V: FnOnce() -> ErrorSet,
		P: FnOnce() -> Fut,
		Fut: Future<Output = Result<T, E>>,
	{
		let Some(mut attempt) = self.begin() else {
			tracing::debug!("submission rejected: another attempt is in flight");
			return Attempted::Busy;
		};

		let errors = validate();
		if errors.has_errors() {
			attempt.advance(Event::Validated { valid: false });
			return Attempted::Invalid(errors);
		}
		attempt.advance(Event::Validated { valid: true });

		let result = perform().await;
		attempt.advance(Event::Completed {
			ok: result.is_ok(),
		});

		match result {
			Ok(value) => Attempted::Succeeded(value),
			Err(error) => Attempted::Failed(error),
		}
	}
}

/// One admitted attempt. Returns the guard to `Idle` when dropped.
#[derive(Debug)]
pub struct Attempt {
	phase: Arc<Mutex<Phase>>,
}

impl Attempt {
	pub fn phase(&self) -> Phase {
		*self.phase.lock()
	}

	/// Feed `event` to the state machine and return the resulting phase.
	///
	/// An event that does not fit the current phase is logged and ignored.
	pub fn advance(&mut self, event: Event) -> Phase {
		let mut phase = self.phase.lock();
		match phase.next(event) {
			Ok(next) => {
				tracing::debug!(from = %*phase, to = %next, "submission transition");
				*phase = next;
			}
			Err(error) => {
				tracing::error!(%error, "rejected submission transition");
			}
		}
		*phase
	}
}

impl Drop for Attempt {
	fn drop(&mut self) {
		let mut phase = self.phase.lock();
		match phase.next(Event::Settle) {
			Ok(next) => *phase = next,
			Err(_) => {
				tracing::debug!(phase = %*phase, "submission attempt dropped before completing");
				*phase = Phase::Idle;
			}
		}
	}
}

/// Independent guards addressed by key.
#[derive(Debug, Clone, Default)]
pub struct KeyedGuards {
	guards: Arc<Mutex<HashMap<String, SubmissionGuard>>>,
}

impl KeyedGuards {
	pub fn new() -> Self {
		Self::default()
	}

	/// The guard for `key`, created on first use.
	pub fn guard(&self, key: &str) -> SubmissionGuard {
		self.guards
			.lock()
			.entry(key.to_string())
			.or_default()
			.clone()
	}

	pub fn is_submitting(&self, key: &str) -> bool {
		self.guards
			.lock()
			.get(key)
			.is_some_and(SubmissionGuard::is_submitting)
	}

	pub fn any_submitting(&self) -> bool {
		self.guards.lock().values().any(SubmissionGuard::is_submitting)
	}

	/// Drop the guard for `key` once nothing else holds it.
	///
	/// A guard still referenced by a caller or an attempt is kept, so the
	/// next [`guard`](Self::guard) for a busy key still sees it in flight.
	pub fn release(&self, key: &str) -> bool {
		let mut guards = self.guards.lock();
		if let Entry::Occupied(entry) = guards.entry(key.to_string())
			&& Arc::strong_count(&entry.get().phase) == 1
		{
			entry.remove();
			return true;
		}
		false
	}

	pub fn len(&self) -> usize {
		self.guards.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.guards.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use tokio::sync::Notify;

	fn clean() -> ErrorSet {
		ErrorSet::new(["email"])
	}

	fn dirty() -> ErrorSet {
		let mut errors = ErrorSet::new(["email"]);
		errors.set("email", "Email wajib diisi").unwrap();
		errors
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_input_never_runs_perform() {
		// Arrange
		let guard = SubmissionGuard::new();
		let calls = AtomicUsize::new(0);

		// Act
		let outcome: Attempted<(), ()> = guard
			.try_submit(dirty, || async {
				calls.fetch_add(1, Ordering::SeqCst);
				Ok(())
			})
			.await;

		// Assert
		assert_eq!(outcome, Attempted::Invalid(dirty()));
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(guard.state(), SubmissionState::Idle);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failure_returns_to_idle() {
		let guard = SubmissionGuard::new();

		let outcome: Attempted<(), &str> = guard
			.try_submit(clean, || async { Err("auth/wrong-password") })
			.await;

		assert_eq!(outcome, Attempted::Failed("auth/wrong-password"));
		assert_eq!(guard.phase(), Phase::Idle);
	}

	#[rstest]
	#[tokio::test]
	async fn test_second_submit_while_in_flight_is_a_no_op() {
		// Arrange
		let guard = SubmissionGuard::new();
		let gate = Notify::new();
		let calls = AtomicUsize::new(0);

		let first = guard.try_submit(clean, || async {
			calls.fetch_add(1, Ordering::SeqCst);
			gate.notified().await;
			Ok::<_, ()>("first")
		});
		let second = async {
			let observed = guard.state();
			let outcome = guard
				.try_submit(clean, || async {
					calls.fetch_add(1, Ordering::SeqCst);
					Ok::<_, ()>("second")
				})
				.await;
			gate.notify_one();
			(observed, outcome)
		};

		// Act
		let (first, (observed, second)) = tokio::join!(first, second);

		// Assert
		assert_eq!(observed, SubmissionState::Submitting);
		assert_eq!(second, Attempted::Busy);
		assert_eq!(first, Attempted::Succeeded("first"));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(guard.state(), SubmissionState::Idle);
	}

	#[rstest]
	fn test_dropping_attempt_mid_flight_resets_guard() {
		// Arrange
		let guard = SubmissionGuard::new();
		let mut attempt = guard.begin().unwrap();
		attempt.advance(Event::Validated { valid: true });
		assert_eq!(guard.phase(), Phase::Submitting);

		// Act
		drop(attempt);

		// Assert
		assert_eq!(guard.phase(), Phase::Idle);
		assert!(guard.begin().is_some());
	}

	#[rstest]
	fn test_out_of_order_event_is_ignored() {
		let guard = SubmissionGuard::new();
		let mut attempt = guard.begin().unwrap();

		let phase = attempt.advance(Event::Completed { ok: true });

		assert_eq!(phase, Phase::Validating);
	}

	#[rstest]
	fn test_keyed_guards_are_independent() {
		// Arrange
		let guards = KeyedGuards::new();
		let email = guards.guard("email");
		let _attempt = email.begin().unwrap();

		// Act
		let password = guards.guard("password").begin();

		// Assert
		assert!(password.is_some());
		assert!(guards.is_submitting("email"));
		assert!(guards.guard("email").begin().is_none());
		assert!(!guards.is_submitting("displayName"));
		assert!(guards.any_submitting());
	}

	#[rstest]
	fn test_release_keeps_held_guards() {
		// Arrange
		let guards = KeyedGuards::new();
		let attempt = guards.guard("trx-1").begin().unwrap();
		let _ = guards.guard("trx-2");

		// Act
		let busy_released = guards.release("trx-1");
		let idle_released = guards.release("trx-2");

		// Assert
		assert!(!busy_released);
		assert!(idle_released);
		assert!(guards.is_submitting("trx-1"));
		assert!(guards.guard("trx-1").begin().is_none());
		assert_eq!(guards.len(), 1);

		drop(attempt);
		assert!(guards.release("trx-1"));
		assert!(guards.is_empty());
		assert!(!guards.release("trx-1"));
	}
}
