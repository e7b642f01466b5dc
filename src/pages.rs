//! Page controllers
//!
//! Re-exports [`toko_pages`]. Each page is constructed with its collaborators
//! and then driven by the presentation layer:
//!
//! ```rust
//! use std::sync::Arc;
//! use toko::pages::{NavigationPrompt, StoreSettingsPage};
//! use toko::backend::MemoryDocumentStore;
//! use toko::conf::PromptSettings;
//! use toko::messages::MessagesContainer;
//!
//! let page = StoreSettingsPage::new(
//! 	"uid-1",
//! 	Arc::new(MemoryDocumentStore::new()),
//! 	Arc::new(MessagesContainer::default()),
//! 	Arc::new(NavigationPrompt::new()),
//! 	&PromptSettings::default(),
//! )
//! .unwrap();
//! assert!(!page.can_submit());
//! ```

pub use toko_pages::*;
