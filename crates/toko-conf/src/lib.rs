//! Settings and logging for the storefront admin
//!
//! ```rust
//! use toko_conf::{Settings, SettingsLoader};
//!
//! let settings = SettingsLoader::new()
//! 	.with_file("toko.toml")
//! 	.with_env_prefix("TOKO_")
//! 	.load()
//! 	.unwrap_or_default();
//! assert!(!settings.site.login_path.is_empty());
//! ```

pub mod error;
pub mod logging;
pub mod settings;

pub use error::ConfError;
pub use settings::{
	ENV_PREFIX, LogFormat, LoggingSettings, PromptSettings, Settings, SettingsLoader,
	SiteSettings,
};
