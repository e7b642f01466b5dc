//! Form state for the storefront admin pages
//!
//! This crate holds the parts of a form-bound page that do not depend on any
//! backend:
//! - Fixed-key field values and per-field error messages
//! - Declarative validation with first-failure-wins semantics
//! - An explicit submission state machine
//! - A single-flight submission guard, per form or per field key
//! - Unsaved-change tracking

pub mod dirty;
pub mod field_set;
pub mod guard;
pub mod machine;
pub mod validators;

pub use dirty::DirtyTracker;
pub use field_set::{ErrorSet, FieldSet, FormError, FormResult};
pub use guard::{Attempt, Attempted, KeyedGuards, SubmissionGuard};
pub use machine::{Event, Phase, SubmissionState, TransitionError};
pub use validators::{Check, FieldRules, Rule, ValidationRules, validate, validate_field};
