//! Submission state machine
//!
//! ```text
//! Idle ──Begin──▶ Validating ──Validated(false)──▶ Invalid ──Settle──▶ Idle
//!                     │
//!                     └──Validated(true)──▶ Submitting ──Completed(true)──▶ Succeeded ──Settle──▶ Idle
//!                                               │
//!                                               └──Completed(false)──▶ Failed ──Settle──▶ Idle
//! ```
//!
//! Transitions are a pure function of `(Phase, Event)` so they can be
//! tested without any rendering or async runtime.

use std::fmt;

/// Where one submission attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
	#[default]
	Idle,
	Validating,
	Invalid,
	Submitting,
	Succeeded,
	Failed,
}

/// Inputs that drive a [`Phase`] forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	/// A submit or blur event arrived.
	Begin,
	/// Local validation finished.
	Validated { valid: bool },
	/// The remote mutation finished.
	Completed { ok: bool },
	/// The outcome has been published; go back to rest.
	Settle,
}

/// The coarse state the presentation layer gates inputs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event {event:?} is not valid in phase {phase}")]
pub struct TransitionError {
	pub phase: Phase,
	pub event: Event,
}

impl Phase {
	/// Apply `event` to this phase.
	///
	/// # Examples
	///
	/// ```
	/// use toko_forms::machine::{Event, Phase};
	///
	/// let phase = Phase::Idle.next(Event::Begin).unwrap();
	/// assert_eq!(phase, Phase::Validating);
	/// assert!(Phase::Submitting.next(Event::Begin).is_err());
	/// ```
	pub fn next(self, event: Event) -> Result<Phase, TransitionError> {
		let next = match (self, event) {
			(Phase::Idle, Event::Begin) => Phase::Validating,
			(Phase::Validating, Event::Validated { valid: false }) => Phase::Invalid,
			(Phase::Validating, Event::Validated { valid: true }) => Phase::Submitting,
			(Phase::Submitting, Event::Completed { ok: true }) => Phase::Succeeded,
			(Phase::Submitting, Event::Completed { ok: false }) => Phase::Failed,
			(Phase::Invalid | Phase::Succeeded | Phase::Failed, Event::Settle) => Phase::Idle,
			(phase, event) => return Err(TransitionError { phase, event }),
		};
		Ok(next)
	}

	/// Whether a new attempt must be turned away.
	pub fn is_busy(self) -> bool {
		!matches!(self, Phase::Idle)
	}

	pub fn submission_state(self) -> SubmissionState {
		match self {
			Phase::Idle => SubmissionState::Idle,
			_ => SubmissionState::Submitting,
		}
	}
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Phase::Idle => "idle",
			Phase::Validating => "validating",
			Phase::Invalid => "invalid",
			Phase::Submitting => "submitting",
			Phase::Succeeded => "succeeded",
			Phase::Failed => "failed",
		};
		f.write_str(name)
	}
}
