//! Logging initialisation

use crate::error::ConfError;
use crate::settings::{LogFormat, LoggingSettings};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter, ConfError> {
	match EnvFilter::try_from_default_env() {
		Ok(filter) => Ok(filter),
		Err(_) => EnvFilter::try_new(&settings.level)
			.map_err(|e| ConfError::Logging(format!("invalid level `{}`: {e}", settings.level))),
	}
}

/// Install the global `tracing` subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init(settings: &LoggingSettings) -> Result<(), ConfError> {
	let filter = env_filter(settings)?;
	let builder = tracing_subscriber::fmt().with_env_filter(filter);

	let result = match settings.format {
		LogFormat::Compact => builder.compact().try_init(),
		LogFormat::Pretty => builder.pretty().try_init(),
		LogFormat::Json => builder.json().try_init(),
	};
	result.map_err(|e| ConfError::Logging(e.to_string()))?;

	tracing::debug!(level = %settings.level, format = %settings.format, "logging initialised");
	Ok(())
}
