//! # Toko Admin
//!
//! Form and document synchronization for a storefront administration UI.
//!
//! The engine keeps a small set of admin forms (login, registration,
//! account settings, store profile) and a live transaction list consistent
//! with a remote identity service and a remote document store. The
//! presentation layer only renders field views and forwards user events.
//!
//! ## Crates
//!
//! - [`forms`]: field and error sets, validation, the submission guard and
//!   dirty tracking
//! - [`messages`]: transient notifications and their sinks
//! - [`backend`]: collaborator contracts, live bindings, error
//!   classification and in-memory backends
//! - [`conf`]: layered settings and logging initialisation
//! - [`pages`]: one controller per admin page
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use toko::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let settings = Settings::default();
//! let auth = MemoryAuthService::new().with_account("budi@tokoku.id", "rahasia");
//! let messages = MessagesContainer::default();
//!
//! let login = LoginPage::new(Arc::new(auth), Arc::new(messages.clone()), &settings.site);
//! login.handle_change("email", "budi@tokoku.id").unwrap();
//! login.handle_change("password", "rahasia").unwrap();
//!
//! assert!(login.submit().await.is_success());
//! assert_eq!(messages.last().unwrap().text, "Berhasil Login");
//! # }
//! ```

pub mod pages;

pub use toko_backend as backend;
pub use toko_conf as conf;
pub use toko_forms as forms;
pub use toko_messages as messages;

pub use toko_backend::{
	AuthService, DocumentStore, LiveBinding, RemoteError, RemoteErrorMap, Snapshot,
};
pub use toko_conf::{ConfError, Settings, SettingsLoader};
pub use toko_forms::{ErrorSet, FieldSet, SubmissionGuard, SubmissionState, ValidationRules};
pub use toko_messages::{Level, Message, MessagesContainer, NotificationSink};
pub use toko_pages::{FormController, Outcome};

pub mod prelude {
	pub use crate::pages::{
		AccountSettingsPage, Confirmation, FieldView, FormController, LoginPage, NavigationGuard,
		NavigationPrompt, Outcome, RegistrationPage, StoreSettingsPage, Transaction,
		TransactionsPage,
	};
	pub use toko_backend::{
		AuthService, CollectionPath, DocumentPath, DocumentStore, LiveBinding, MemoryAuthService,
		MemoryDocumentStore, Principal, RemoteError, Snapshot,
	};
	pub use toko_conf::{PromptSettings, Settings, SettingsLoader, SiteSettings};
	pub use toko_forms::{ErrorSet, FieldSet, SubmissionState};
	pub use toko_messages::{Level, Message, MessagesContainer, NotificationSink, TracingSink};
}
