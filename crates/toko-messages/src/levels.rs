//! Notification severities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a transient notification.
///
/// Ordered from least to most severe, so `level >= Level::Warning` selects
/// everything the user should not miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Info,
	Success,
	Warning,
	Error,
}

impl Level {
	pub fn as_str(self) -> &'static str {
		match self {
			Level::Info => "info",
			Level::Success => "success",
			Level::Warning => "warning",
			Level::Error => "error",
		}
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
