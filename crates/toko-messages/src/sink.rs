//! Notification sinks

use crate::levels::Level;
use crate::message::Message;

/// Where transient notifications go.
///
/// Dispatch is fire-and-forget: a sink has no return value, so a caller can
/// never mistake the result of showing a toast for the message itself.
pub trait NotificationSink: Send + Sync {
	fn notify(&self, message: Message);
}

/// Forwards notifications to `tracing`, for hosts without a toast surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
	fn notify(&self, message: Message) {
		match message.level {
			Level::Info | Level::Success => {
				tracing::info!(severity = %message.level, "{}", message.text)
			}
			Level::Warning => tracing::warn!(severity = %message.level, "{}", message.text),
			Level::Error => tracing::error!(severity = %message.level, "{}", message.text),
		}
	}
}
