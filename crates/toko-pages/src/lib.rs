//! Page controllers for the storefront admin
//!
//! Each page owns a [`FormController`] and the collaborators it needs, all
//! injected at construction:
//!
//! - [`LoginPage`] and [`RegistrationPage`]: whole-form submits against the
//!   [`AuthService`](toko_backend::AuthService)
//! - [`AccountSettingsPage`]: per-field commits of the signed-in account
//! - [`StoreSettingsPage`]: the store profile document, kept in sync with the
//!   live binding and guarded against leaving with unsaved edits
//! - [`TransactionsPage`]: the live transaction list with a detail view and
//!   confirmed deletes
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use toko_backend::MemoryAuthService;
//! use toko_conf::SiteSettings;
//! use toko_messages::MessagesContainer;
//! use toko_pages::{LoginPage, Outcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let auth = MemoryAuthService::new().with_account("budi@tokoku.id", "rahasia");
//! let messages = MessagesContainer::default();
//! let page = LoginPage::new(Arc::new(auth), Arc::new(messages.clone()), &SiteSettings::default());
//!
//! page.handle_change("email", "budi@tokoku.id").unwrap();
//! page.handle_change("password", "salah").unwrap();
//!
//! assert!(matches!(page.submit().await, Outcome::Failure(_)));
//! assert_eq!(page.field("password").error, "Password Salah, Harap Cek Kembali");
//! # }
//! ```

pub mod controller;
pub mod navigation;
pub mod pages;
pub mod rules;
pub mod tables;

pub use controller::{FieldView, FormController, Outcome};
pub use navigation::{Confirmation, NavigationGuard, NavigationPrompt, PromptState};
pub use pages::{
	AccountSettingsPage, LineItem, LoginPage, RegistrationPage, StoreSettingsPage, Transaction,
	TransactionsPage,
};
