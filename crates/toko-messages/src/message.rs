//! Notification payload

use crate::levels::Level;
use serde::{Deserialize, Serialize};

/// A transient, user-facing notification.
///
/// # Examples
///
/// ```
/// use toko_messages::{Level, Message};
///
/// let message = Message::success("Berhasil Login");
/// assert_eq!(message.level, Level::Success);
/// assert_eq!(message.text, "Berhasil Login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	pub level: Level,
	pub text: String,
}

impl Message {
	pub fn new(level: Level, text: impl Into<String>) -> Self {
		Self {
			level,
			text: text.into(),
		}
	}

	pub fn info(text: impl Into<String>) -> Self {
		Self::new(Level::Info, text)
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self::new(Level::Success, text)
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self::new(Level::Warning, text)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Level::Error, text)
	}
}
