//! Unsaved-change tracking

use std::collections::HashSet;

/// Remembers which fields were edited since the last successful persist.
///
/// The form is dirty while at least one field is. Remote snapshots should
/// only overwrite fields for which [`DirtyTracker::is_field_dirty`] is false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
	fields: HashSet<String>,
}

impl DirtyTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a mutation of `field`. Returns `true` when the form was clean
	/// before this call.
	pub fn mark_dirty(&mut self, field: &str) -> bool {
		let was_clean = self.fields.is_empty();
		self.fields.insert(field.to_string());
		was_clean
	}

	pub fn is_dirty(&self) -> bool {
		!self.fields.is_empty()
	}

	pub fn is_field_dirty(&self, field: &str) -> bool {
		self.fields.contains(field)
	}

	/// Forget the edit of one field, after that field alone was persisted.
	pub fn clear_field(&mut self, field: &str) {
		self.fields.remove(field);
	}

	/// Forget every edit. Returns `true` when the form was dirty.
	pub fn clear(&mut self) -> bool {
		let was_dirty = self.is_dirty();
		self.fields.clear();
		was_dirty
	}
}
