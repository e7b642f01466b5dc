//! Remote error classification
//!
//! Backend failures carry opaque codes. A [`RemoteErrorMap`] turns an
//! `(operation, code)` pair into a [`Classification`]: the field the message
//! belongs under, the message itself, and a notification severity. New codes
//! are handled by extending the table, never by adding branches.
//!
//! Lookups are total. A code an operation does not list yields that
//! operation's primary field with the fallback message at
//! [`Level::Error`]; an operation the map does not know at all lands on
//! [`UNKNOWN_OPERATION_FIELD`], which no form renders, so only the
//! notification is seen.
//!
//! ## Example
//!
//! ```rust
//! use toko_backend::classify::{OperationTable, RemoteErrorMap};
//! use toko_messages::Level;
//!
//! let map = RemoteErrorMap::new().operation(
//! 	"signIn",
//! 	OperationTable::new("email").map(
//! 		"auth/wrong-password",
//! 		"password",
//! 		"Password Salah, Harap Cek Kembali",
//! 		Level::Warning,
//! 	),
//! );
//!
//! let hit = map.classify("signIn", "auth/wrong-password");
//! assert_eq!(hit.field, "password");
//!
//! let miss = map.classify("signIn", "auth/too-many-requests");
//! assert_eq!(miss.field, "email");
//! assert_eq!(miss.level, Level::Error);
//! ```

use crate::error::RemoteError;
use std::collections::HashMap;
use toko_messages::{Level, Message};

/// Message used when neither the map nor the operation overrides it.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Terjadi kesalahan silahkan coba lagi";

/// Field that unknown operations report under.
pub const UNKNOWN_OPERATION_FIELD: &str = "_all";

/// Where a backend failure is shown and how loudly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
	pub field: String,
	pub message: String,
	pub level: Level,
}

impl Classification {
	pub fn new(field: impl Into<String>, message: impl Into<String>, level: Level) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
			level,
		}
	}

	/// The transient notification for this classification.
	///
	/// Independent of the field message: showing it does not produce
	/// anything to store in the error set.
	pub fn notification(&self) -> Message {
		Message::new(self.level, self.message.clone())
	}
}

/// Code table for one operation.
#[derive(Debug, Clone)]
pub struct OperationTable {
	primary_field: String,
	fallback_message: Option<String>,
	codes: HashMap<String, Classification>,
}

impl OperationTable {
	/// `primary_field` receives unmapped codes. Pick the field the
	/// operation changes, not a generic slot.
	pub fn new(primary_field: impl Into<String>) -> Self {
		Self {
			primary_field: primary_field.into(),
			fallback_message: None,
			codes: HashMap::new(),
		}
	}

	pub fn map(
		mut self,
		code: impl Into<String>,
		field: impl Into<String>,
		message: impl Into<String>,
		level: Level,
	) -> Self {
		self.codes
			.insert(code.into(), Classification::new(field, message, level));
		self
	}

	/// Map `code` onto the primary field.
	pub fn on_primary(
		self,
		code: impl Into<String>,
		message: impl Into<String>,
		level: Level,
	) -> Self {
		let field = self.primary_field.clone();
		self.map(code, field, message, level)
	}

	pub fn fallback_message(mut self, message: impl Into<String>) -> Self {
		self.fallback_message = Some(message.into());
		self
	}

	pub fn primary_field(&self) -> &str {
		&self.primary_field
	}

	pub fn lookup(&self, code: &str) -> Option<&Classification> {
		self.codes.get(code)
	}

	pub fn codes(&self) -> impl Iterator<Item = &str> {
		self.codes.keys().map(String::as_str)
	}
}

/// Classification tables for every operation a page performs.
#[derive(Debug, Clone)]
pub struct RemoteErrorMap {
	operations: HashMap<String, OperationTable>,
	fallback_message: String,
}

impl RemoteErrorMap {
	pub fn new() -> Self {
		Self {
			operations: HashMap::new(),
			fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
		}
	}

	pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
		self.fallback_message = message.into();
		self
	}

	/// Register (or replace) the table for `operation`.
	pub fn operation(mut self, operation: impl Into<String>, table: OperationTable) -> Self {
		self.operations.insert(operation.into(), table);
		self
	}

	pub fn get(&self, operation: &str) -> Option<&OperationTable> {
		self.operations.get(operation)
	}

	/// Classify `code` raised by `operation`. Never fails.
	pub fn classify(&self, operation: &str, code: &str) -> Classification {
		let Some(table) = self.operations.get(operation) else {
			tracing::warn!(operation, code, "classifying error for unknown operation");
			return Classification::new(
				UNKNOWN_OPERATION_FIELD,
				self.fallback_message.clone(),
				Level::Error,
			);
		};

		if let Some(hit) = table.lookup(code) {
			return hit.clone();
		}

		tracing::warn!(operation, code, "unmapped backend error code");
		let message = table
			.fallback_message
			.clone()
			.unwrap_or_else(|| self.fallback_message.clone());
		Classification::new(table.primary_field.clone(), message, Level::Error)
	}

	pub fn classify_error(&self, operation: &str, error: &RemoteError) -> Classification {
		self.classify(operation, &error.code)
	}
}

impl Default for RemoteErrorMap {
	fn default() -> Self {
		Self::new()
	}
}
