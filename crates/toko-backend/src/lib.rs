//! Remote collaborators for the storefront admin pages
//!
//! - [`AuthService`] and [`DocumentStore`]: the contracts pages call
//! - [`LiveBinding`]: read subscriptions that redeliver on every change
//! - [`RemoteErrorMap`]: turns opaque failure codes into field messages
//! - [`memory`]: in-memory implementations of both contracts

pub mod auth;
pub mod binding;
pub mod classify;
pub mod document;
pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod ops;
pub mod path;
pub mod store;

pub use auth::{AuthService, Principal};
pub use binding::{LiveBinding, Publisher, Snapshot};
pub use classify::{Classification, OperationTable, RemoteErrorMap};
pub use document::{Document, Fields};
pub use error::{BindingClosed, PathError, RemoteError, codes};
#[cfg(feature = "memory")]
pub use memory::{MemoryAuthService, MemoryDocumentStore, VerificationEmail, WriteCall};
pub use path::{CollectionPath, DocumentPath};
pub use store::DocumentStore;
