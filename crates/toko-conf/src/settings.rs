//! Layered settings
//!
//! Values are resolved in priority order: environment variables > TOML file >
//! built-in defaults. Every section has a `Default`, so a file only needs to
//! list what it overrides.
//!
//! ```toml
//! [site]
//! origin = "https://admin.tokoku.id"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use crate::error::ConfError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix of every environment variable read by [`SettingsLoader`].
pub const ENV_PREFIX: &str = "TOKO_";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub site: SiteSettings,
	pub prompts: PromptSettings,
	pub logging: LoggingSettings,
}

impl Settings {
	/// Defaults overridden by `TOKO_*` environment variables.
	pub fn from_env() -> Result<Self, ConfError> {
		SettingsLoader::new().with_env_prefix(ENV_PREFIX).load()
	}

	pub fn from_toml_str(content: &str) -> Result<Self, ConfError> {
		Ok(toml::from_str(content)?)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// Scheme, host and port the admin is served from.
	pub origin: String,
	pub login_path: String,
	/// Where signed-in users land after login or registration.
	pub home_path: String,
}

impl SiteSettings {
	/// Link target for verification mails: the login page.
	///
	/// # Examples
	///
	/// ```
	/// use toko_conf::SiteSettings;
	///
	/// let site = SiteSettings::default();
	/// assert_eq!(site.verification_return_url(), "http://localhost:3000/login");
	/// ```
	pub fn verification_return_url(&self) -> String {
		format!(
			"{}/{}",
			self.origin.trim_end_matches('/'),
			self.login_path.trim_start_matches('/')
		)
	}
}

impl Default for SiteSettings {
	fn default() -> Self {
		Self {
			origin: "http://localhost:3000".to_string(),
			login_path: "/login".to_string(),
			home_path: "/".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
	/// Shown when leaving a page with unsaved changes.
	pub unsaved_changes: String,
	/// Asked before a transaction is deleted.
	pub delete_transaction: String,
}

impl Default for PromptSettings {
	fn default() -> Self {
		Self {
			unsaved_changes: "Terdapat perubahan yang belum disimpan, apakah anda yakin ingin meninggalkan halaman ini?".to_string(),
			delete_transaction: "Apakah anda yakin ingin menghapus transaksi ini?".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive, e.g. `info` or `toko_pages=debug,info`.
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::default(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Compact,
	Pretty,
	Json,
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"compact" => Ok(LogFormat::Compact),
			"pretty" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("unknown log format `{other}`")),
		}
	}
}

impl fmt::Display for LogFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			LogFormat::Compact => "compact",
			LogFormat::Pretty => "pretty",
			LogFormat::Json => "json",
		})
	}
}

/// Builds [`Settings`] from defaults, an optional TOML file and the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
	file: Option<PathBuf>,
	env_prefix: Option<String>,
}

impl SettingsLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read overrides from a TOML file. A missing file is not an error.
	pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.file = Some(path.into());
		self
	}

	/// Read overrides from environment variables starting with `prefix`.
	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = Some(prefix.into());
		self
	}

	pub fn load(&self) -> Result<Settings, ConfError> {
		let mut settings = match &self.file {
			Some(path) if path.exists() => {
				let content = fs::read_to_string(path).map_err(|source| ConfError::Io {
					path: path.clone(),
					source,
				})?;
				tracing::debug!(path = %path.display(), "loading settings file");
				Settings::from_toml_str(&content)?
			}
			_ => Settings::default(),
		};

		if let Some(prefix) = &self.env_prefix {
			apply_env(&mut settings, prefix, std::env::vars())?;
		}
		Ok(settings)
	}
}

/// Apply `PREFIX_*` overrides from `vars` onto `settings`.
fn apply_env<I>(settings: &mut Settings, prefix: &str, vars: I) -> Result<(), ConfError>
where
	I: IntoIterator<Item = (String, String)>,
{
	for (key, value) in vars {
		let Some(name) = key.strip_prefix(prefix) else {
			continue;
		};
		match name {
			"SITE_ORIGIN" => settings.site.origin = value,
			"SITE_LOGIN_PATH" => settings.site.login_path = value,
			"SITE_HOME_PATH" => settings.site.home_path = value,
			"PROMPT_UNSAVED_CHANGES" => settings.prompts.unsaved_changes = value,
			"PROMPT_DELETE_TRANSACTION" => settings.prompts.delete_transaction = value,
			"LOG_LEVEL" => settings.logging.level = value,
			"LOG_FORMAT" => {
				settings.logging.format = value.parse().map_err(|message| ConfError::Env {
					var: key.clone(),
					message,
				})?;
			}
			_ => tracing::trace!(var = %key, "ignoring unknown settings variable"),
		}
	}
	Ok(())
}
