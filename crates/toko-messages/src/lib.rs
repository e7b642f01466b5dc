//! Transient notifications for the storefront admin pages
//!
//! Pages report operation-level outcomes (success, warning, error) through a
//! [`NotificationSink`]. Field-level errors are not notifications; they live
//! in the form's error set.

pub mod container;
pub mod levels;
pub mod message;
pub mod sink;

pub use container::MessagesContainer;
pub use levels::Level;
pub use message::Message;
pub use sink::{NotificationSink, TracingSink};
