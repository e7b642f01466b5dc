//! Documents as delivered by a store

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

/// One stored document: its id (last path segment) and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	pub id: String,
	pub fields: Fields,
}

impl Document {
	pub fn new(id: impl Into<String>, fields: Fields) -> Self {
		Self {
			id: id.into(),
			fields,
		}
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// String value of `name`. Missing and non-string fields read as `""`.
	pub fn get_str(&self, name: &str) -> &str {
		self.fields
			.get(name)
			.and_then(Value::as_str)
			.unwrap_or_default()
	}

	/// Deserialize the fields into `T`.
	pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_value(Value::Object(self.fields.clone()))
	}
}

/// Merge `incoming` into `existing`.
///
/// Nested objects are merged key by key; every other value in `incoming`
/// replaces the existing one.
pub fn merge_fields(existing: &mut Fields, incoming: Fields) {
	for (key, value) in incoming {
		match (existing.get_mut(&key), value) {
			(Some(Value::Object(current)), Value::Object(patch)) => merge_fields(current, patch),
			(_, value) => {
				existing.insert(key, value);
			}
		}
	}
}
