//! Backend error types

use thiserror::Error;

/// Failure reported by a remote collaborator.
///
/// `code` is opaque to this crate (for example `auth/wrong-password` or
/// `permission-denied`); it is only ever looked up in a
/// [`RemoteErrorMap`](crate::classify::RemoteErrorMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct RemoteError {
	pub code: String,
	pub message: String,
}

impl RemoteError {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
		}
	}

	/// An error whose message is its code.
	pub fn from_code(code: impl Into<String>) -> Self {
		let code = code.into();
		Self {
			message: code.clone(),
			code,
		}
	}
}

/// Returned by [`LiveBinding::changed`](crate::binding::LiveBinding::changed)
/// once the publishing side is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("live binding closed: publisher dropped")]
pub struct BindingClosed;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	#[error("Path is empty")]
	Empty,
	#[error("Path contains an empty segment: {0}")]
	EmptySegment(String),
	#[error("Segment contains a path separator: {0}")]
	NestedSegment(String),
	#[error("Not a document path (odd number of segments): {0}")]
	NotADocument(String),
	#[error("Not a collection path (even number of segments): {0}")]
	NotACollection(String),
}

impl From<PathError> for RemoteError {
	fn from(error: PathError) -> Self {
		RemoteError::new(codes::INVALID_ARGUMENT, error.to_string())
	}
}

/// Well-known backend error codes.
pub mod codes {
	pub const USER_NOT_FOUND: &str = "auth/user-not-found";
	pub const INVALID_EMAIL: &str = "auth/invalid-email";
	pub const WRONG_PASSWORD: &str = "auth/wrong-password";
	pub const USER_DISABLED: &str = "auth/user-disabled";
	pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
	pub const WEAK_PASSWORD: &str = "auth/weak-password";
	pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
	pub const REQUIRES_RECENT_LOGIN: &str = "auth/requires-recent-login";
	pub const NO_CURRENT_USER: &str = "auth/no-current-user";

	pub const PERMISSION_DENIED: &str = "permission-denied";
	pub const UNAVAILABLE: &str = "unavailable";
	pub const INVALID_ARGUMENT: &str = "invalid-argument";
}
