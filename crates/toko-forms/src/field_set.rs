//! Field values and per-field error messages
//!
//! A form has a fixed set of field names decided when it is created. Both
//! [`FieldSet`] and [`ErrorSet`] keep exactly that key set for their whole
//! life: writes to an unknown key are rejected instead of growing the map.

use indexmap::IndexMap;

/// Errors raised when a caller addresses a field the form does not have.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Current string values of every input in a form.
///
/// # Examples
///
/// ```
/// use toko_forms::FieldSet;
///
/// let mut fields = FieldSet::new(["email", "password"]);
/// assert_eq!(fields.value("email"), "");
///
/// fields.set("email", "budi@tokoku.id").unwrap();
/// assert_eq!(fields.value("email"), "budi@tokoku.id");
/// assert!(fields.set("phone", "0812").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
	values: IndexMap<String, String>,
}

impl FieldSet {
	/// Create a field set where every field holds the empty string.
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			values: names
				.into_iter()
				.map(|name| (name.into(), String::new()))
				.collect(),
		}
	}

	/// Create a field set from `(name, value)` pairs.
	///
	/// The pairs define the key set, so this is how a form seeded from a
	/// remote snapshot is built.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			values: pairs
				.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		}
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Value of `name`, or the empty string when the form has no such field.
	pub fn value(&self, name: &str) -> &str {
		self.get(name).unwrap_or_default()
	}

	pub fn set(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
		match self.values.get_mut(name) {
			Some(slot) => {
				*slot = value.into();
				Ok(())
			}
			None => Err(FormError::UnknownField(name.to_string())),
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// One message per field; the empty string means "no error".
///
/// An `ErrorSet` built with [`ErrorSet::for_fields`] mirrors the key set of
/// its [`FieldSet`], so every field always has an entry to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
	messages: IndexMap<String, String>,
}

impl ErrorSet {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			messages: names
				.into_iter()
				.map(|name| (name.into(), String::new()))
				.collect(),
		}
	}

	/// An error set covering a single field.
	pub fn single(name: impl Into<String>, message: impl Into<String>) -> Self {
		let mut messages = IndexMap::new();
		messages.insert(name.into(), message.into());
		Self { messages }
	}

	/// An error set with an empty message for every field of `fields`.
	pub fn for_fields(fields: &FieldSet) -> Self {
		Self::new(fields.names())
	}

	/// Message for `name`, or the empty string when there is none.
	pub fn message(&self, name: &str) -> &str {
		self.messages
			.get(name)
			.map(String::as_str)
			.unwrap_or_default()
	}

	pub fn set(&mut self, name: &str, message: impl Into<String>) -> FormResult<()> {
		match self.messages.get_mut(name) {
			Some(slot) => {
				*slot = message.into();
				Ok(())
			}
			None => Err(FormError::UnknownField(name.to_string())),
		}
	}

	/// Reset the message of a single field. Unknown names are ignored.
	pub fn clear(&mut self, name: &str) {
		if let Some(slot) = self.messages.get_mut(name) {
			slot.clear();
		}
	}

	pub fn clear_all(&mut self) {
		for slot in self.messages.values_mut() {
			slot.clear();
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.messages.contains_key(name)
	}

	pub fn has_errors(&self) -> bool {
		self.messages.values().any(|message| !message.is_empty())
	}

	/// Fields that currently carry a message.
	pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
		self.messages
			.iter()
			.filter(|(_, message)| !message.is_empty())
			.map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_field_set_defaults_to_empty_strings() {
		// Arrange
		let fields = FieldSet::new(["nama", "alamat", "telepon", "website"]);

		// Act
		let values: Vec<_> = fields.iter().collect();

		// Assert
		assert_eq!(fields.len(), 4);
		assert!(values.iter().all(|(_, v)| v.is_empty()));
	}

	#[rstest]
	fn test_field_set_rejects_unknown_key() {
		// Arrange
		let mut fields = FieldSet::new(["email"]);

		// Act
		let result = fields.set("username", "budi");

		// Assert
		assert_eq!(result, Err(FormError::UnknownField("username".to_string())));
		assert!(!fields.contains("username"));
	}

	#[rstest]
	fn test_field_set_preserves_insertion_order() {
		// Arrange
		let fields = FieldSet::from_pairs([("b", "2"), ("a", "1")]);

		// Act
		let names: Vec<_> = fields.names().collect();

		// Assert
		assert_eq!(names, vec!["b", "a"]);
	}

	#[rstest]
	fn test_error_set_mirrors_field_keys() {
		// Arrange
		let fields = FieldSet::new(["email", "password"]);

		// Act
		let errors = ErrorSet::for_fields(&fields);

		// Assert
		assert!(fields.names().all(|name| errors.contains(name)));
		assert!(!errors.has_errors());
	}

	#[rstest]
	fn test_error_set_clear_only_touches_one_field() {
		// Arrange
		let mut errors = ErrorSet::new(["email", "password"]);
		errors.set("email", "Email wajib diisi").unwrap();
		errors.set("password", "Password wajib diisi").unwrap();

		// Act
		errors.clear("email");

		// Assert
		assert_eq!(errors.message("email"), "");
		assert_eq!(errors.message("password"), "Password wajib diisi");
		assert_eq!(errors.errors().count(), 1);
	}

	#[rstest]
	fn test_error_set_unknown_field_is_rejected() {
		let mut errors = ErrorSet::new(["email"]);
		assert!(errors.set("_all", "boom").is_err());
		assert_eq!(errors.len(), 1);
	}
}
