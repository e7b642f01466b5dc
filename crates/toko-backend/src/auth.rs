//! Authentication service contract

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub uid: String,
	pub email: String,
	pub display_name: Option<String>,
	pub email_verified: bool,
}

/// Identity operations the pages depend on.
///
/// Every fallible call reports an opaque [`RemoteError`] code; callers
/// classify it rather than matching on it.
#[async_trait]
pub trait AuthService: Send + Sync {
	async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, RemoteError>;

	/// Create an account and sign it in.
	async fn register(&self, email: &str, password: &str) -> Result<Principal, RemoteError>;

	async fn update_profile_name(&self, name: &str) -> Result<(), RemoteError>;

	async fn update_email(&self, email: &str) -> Result<(), RemoteError>;

	async fn update_password(&self, password: &str) -> Result<(), RemoteError>;

	/// Send a verification mail whose link returns to `return_url`.
	async fn send_verification_email(&self, return_url: &str) -> Result<(), RemoteError>;

	/// The currently signed-in principal, if any.
	fn current_user(&self) -> Option<Principal>;
}
