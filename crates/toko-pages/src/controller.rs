//! Form controller
//!
//! Ties field state, validation, the submission guard, dirty tracking and
//! error classification together for one form instance. Pages own a
//! controller and add the entity-specific parts: which backend call to make,
//! which messages to show and what to do with live snapshots.
//!
//! Two commit styles are supported:
//!
//! - [`FormController::submit`]: whole-form submit behind one guard
//! - [`FormController::commit_field`]: per-field commit-on-blur, one guard per
//!   field, so different fields may be in flight at the same time

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use toko_backend::{Classification, RemoteError, RemoteErrorMap};
use toko_forms::{
	Attempted, DirtyTracker, ErrorSet, FieldSet, FormResult, KeyedGuards, SubmissionGuard,
	SubmissionState, ValidationRules,
};
use toko_messages::{Message, NotificationSink};

/// What the presentation layer needs to render one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
	pub value: String,
	pub error: String,
	pub disabled: bool,
}

/// Result of a submit, commit or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
	/// An attempt for the same form or field was already in flight.
	Busy,
	/// Local validation failed; the backend was not called.
	Invalid(ErrorSet),
	Success(T),
	/// The backend failed; the classification has been shown.
	Failure(Classification),
	/// Nothing to persist; the backend was not called.
	Unchanged,
	/// The user declined a confirmation; the backend was not called.
	Declined,
}

impl<T> Outcome<T> {
	pub fn is_success(&self) -> bool {
		matches!(self, Outcome::Success(_))
	}

	pub fn success(self) -> Option<T> {
		match self {
			Outcome::Success(value) => Some(value),
			_ => None,
		}
	}
}

pub struct FormController {
	fields: Mutex<FieldSet>,
	errors: Mutex<ErrorSet>,
	rules: ValidationRules,
	guard: SubmissionGuard,
	field_guards: KeyedGuards,
	dirty: Mutex<DirtyTracker>,
	sink: Arc<dyn NotificationSink>,
	error_map: Arc<RemoteErrorMap>,
}

impl FormController {
	pub fn new(
		fields: FieldSet,
		rules: ValidationRules,
		sink: Arc<dyn NotificationSink>,
		error_map: Arc<RemoteErrorMap>,
	) -> Self {
		let errors = ErrorSet::for_fields(&fields);
		Self {
			fields: Mutex::new(fields),
			errors: Mutex::new(errors),
			rules,
			guard: SubmissionGuard::new(),
			field_guards: KeyedGuards::new(),
			dirty: Mutex::new(DirtyTracker::new()),
			sink,
			error_map,
		}
	}

	pub fn value(&self, name: &str) -> String {
		self.fields.lock().value(name).to_string()
	}

	pub fn values(&self) -> FieldSet {
		self.fields.lock().clone()
	}

	pub fn error(&self, name: &str) -> String {
		self.errors.lock().message(name).to_string()
	}

	pub fn errors(&self) -> ErrorSet {
		self.errors.lock().clone()
	}

	pub fn field(&self, name: &str) -> FieldView {
		FieldView {
			value: self.value(name),
			error: self.error(name),
			disabled: self.is_field_disabled(name),
		}
	}

	/// State of the whole-form guard.
	pub fn state(&self) -> SubmissionState {
		self.guard.state()
	}

	/// True while any submit or field commit is in flight.
	pub fn is_submitting(&self) -> bool {
		self.guard.is_submitting() || self.field_guards.any_submitting()
	}

	pub fn is_field_submitting(&self, name: &str) -> bool {
		self.field_guards.is_submitting(name)
	}

	pub fn is_field_disabled(&self, name: &str) -> bool {
		self.guard.is_submitting() || self.field_guards.is_submitting(name)
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty.lock().is_dirty()
	}

	pub fn is_field_dirty(&self, name: &str) -> bool {
		self.dirty.lock().is_field_dirty(name)
	}

	/// Whether a whole-form save would do anything.
	pub fn can_save(&self) -> bool {
		!self.guard.is_submitting() && self.is_dirty()
	}

	/// Apply a user edit.
	///
	/// Clears that field's error and marks it dirty. Edits to a disabled
	/// field are ignored. Returns `true` when this edit made the form dirty.
	pub fn handle_change(&self, name: &str, value: impl Into<String>) -> FormResult<bool> {
		if self.is_field_disabled(name) {
			tracing::debug!(field = name, "ignoring edit of a disabled field");
			return Ok(false);
		}
		self.fields.lock().set(name, value)?;
		self.errors.lock().clear(name);
		Ok(self.dirty.lock().mark_dirty(name))
	}

	/// Take remote values for every field the user is not editing.
	///
	/// Unknown names are skipped. Returns how many fields were updated.
	pub fn apply_remote<'a, I>(&self, values: I) -> usize
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let dirty = self.dirty.lock();
		let mut fields = self.fields.lock();
		let mut applied = 0;
		for (name, value) in values {
			if dirty.is_field_dirty(name) || self.field_guards.is_submitting(name) {
				continue;
			}
			if fields.get(name).is_some_and(|current| current != value)
				&& fields.set(name, value).is_ok()
			{
				applied += 1;
			}
		}
		applied
	}

	/// Validate every field and publish the result.
	pub fn validate(&self) -> ErrorSet {
		let errors = toko_forms::validate(&self.fields.lock(), &self.rules);
		*self.errors.lock() = errors.clone();
		errors
	}

	/// Validate one field and publish its message.
	pub fn validate_field(&self, name: &str) -> String {
		let message = toko_forms::validate_field(&self.fields.lock(), &self.rules, name);
		if let Err(error) = self.errors.lock().set(name, message.clone()) {
			tracing::warn!(%error, "validated a field the form does not have");
		}
		message
	}

	/// Validate the whole form, then run `perform` with a copy of the values.
	///
	/// On success the form becomes clean and `success` is notified. On
	/// failure the error is classified under `operation`.
	pub async fn submit<T, P, Fut>(&self, operation: &str, success: &str, perform: P) -> Outcome<T>
	where
		P: FnOnce(FieldSet) -> Fut,
		Fut: Future<Output = Result<T, RemoteError>>,
	{
		let attempted = self
			.guard
			.try_submit(|| self.validate(), || perform(self.values()))
			.await;

		match attempted {
			Attempted::Busy => Outcome::Busy,
			Attempted::Invalid(errors) => Outcome::Invalid(errors),
			Attempted::Succeeded(value) => {
				self.dirty.lock().clear();
				self.notify_success(operation, success);
				Outcome::Success(value)
			}
			Attempted::Failed(error) => Outcome::Failure(self.publish_failure(operation, &error)),
		}
	}

	/// Validate one field, then run `perform` with its value.
	///
	/// Serialized per field: a second commit of the same field while one is
	/// in flight is [`Outcome::Busy`]. Other fields are unaffected.
	pub async fn commit_field<T, P, Fut>(
		&self,
		name: &str,
		operation: &str,
		success: &str,
		perform: P,
	) -> Outcome<T>
	where
		P: FnOnce(String) -> Fut,
		Fut: Future<Output = Result<T, RemoteError>>,
	{
		let guard = self.field_guards.guard(name);
		let attempted = guard
			.try_submit(
				|| ErrorSet::single(name, self.validate_field(name)),
				|| perform(self.value(name)),
			)
			.await;

		match attempted {
			Attempted::Busy => Outcome::Busy,
			Attempted::Invalid(errors) => Outcome::Invalid(errors),
			Attempted::Succeeded(value) => {
				self.dirty.lock().clear_field(name);
				self.notify_success(operation, success);
				Outcome::Success(value)
			}
			Attempted::Failed(error) => Outcome::Failure(self.publish_failure(operation, &error)),
		}
	}

	/// Run `perform` behind the guard for `key`, without validation.
	///
	/// For actions that are not field edits, such as deleting a record or
	/// sending a mail. An empty `success` message notifies nothing. The guard
	/// for `key` is released once the attempt settles.
	pub async fn run<T, P, Fut>(
		&self,
		key: &str,
		operation: &str,
		success: &str,
		perform: P,
	) -> Outcome<T>
	where
		P: FnOnce() -> Fut,
		Fut: Future<Output = Result<T, RemoteError>>,
	{
		let attempted = self
			.field_guards
			.guard(key)
			.try_submit(ErrorSet::default, perform)
			.await;
		self.field_guards.release(key);
		match attempted {
			Attempted::Busy => Outcome::Busy,
			Attempted::Invalid(errors) => Outcome::Invalid(errors),
			Attempted::Succeeded(value) => {
				self.notify_success(operation, success);
				Outcome::Success(value)
			}
			Attempted::Failed(error) => Outcome::Failure(self.publish_failure(operation, &error)),
		}
	}

	/// Forget the edit of `name` without persisting it, for example when the
	/// user typed the stored value back in.
	pub fn mark_field_clean(&self, name: &str) {
		self.dirty.lock().clear_field(name);
	}

	/// Send a notification on behalf of the page.
	pub fn notify(&self, message: Message) {
		self.sink.notify(message);
	}

	/// Classify `error`, put the message under its field and notify it.
	///
	/// The field message and the notification are produced separately from
	/// the classification. A field the form does not have only gets the
	/// notification.
	pub fn publish_failure(&self, operation: &str, error: &RemoteError) -> Classification {
		let classification = self.error_map.classify_error(operation, error);
		tracing::warn!(
			operation,
			code = %error.code,
			field = %classification.field,
			"remote operation failed"
		);

		let mut errors = self.errors.lock();
		if errors.contains(&classification.field) {
			let _ = errors.set(&classification.field, classification.message.clone());
		}
		drop(errors);

		self.sink.notify(classification.notification());
		classification
	}

	fn notify_success(&self, operation: &str, message: &str) {
		tracing::info!(operation, "remote operation succeeded");
		if !message.is_empty() {
			self.sink.notify(Message::success(message));
		}
	}
}
