//! Account settings page
//!
//! Each field commits on its own when it loses focus. Display name and email
//! commits are skipped when the value equals what the account already has;
//! the password always commits.

use crate::controller::{FieldView, FormController, Outcome};
use crate::{rules, tables};
use std::future::Future;
use std::sync::Arc;
use toko_backend::{AuthService, Principal, RemoteError, ops};
use toko_conf::SiteSettings;
use toko_forms::{FieldSet, FormResult};
use toko_messages::NotificationSink;

pub const FIELDS: [&str; 3] = ["displayName", "email", "password"];

/// Guard key for the verification mail action.
const VERIFICATION_KEY: &str = "emailVerification";

pub struct AccountSettingsPage {
	form: FormController,
	auth: Arc<dyn AuthService>,
	return_url: String,
}

impl AccountSettingsPage {
	/// Seed the form from the signed-in principal.
	pub fn new(
		auth: Arc<dyn AuthService>,
		sink: Arc<dyn NotificationSink>,
		site: &SiteSettings,
	) -> Self {
		let principal = auth.current_user();
		let fields = FieldSet::from_pairs([
			(
				"displayName",
				principal
					.as_ref()
					.and_then(|p| p.display_name.clone())
					.unwrap_or_default(),
			),
			(
				"email",
				principal.map(|p| p.email).unwrap_or_default(),
			),
			("password", String::new()),
		]);

		Self {
			form: FormController::new(
				fields,
				rules::account(),
				sink,
				Arc::new(tables::account()),
			),
			auth,
			return_url: site.verification_return_url(),
		}
	}

	pub fn form(&self) -> &FormController {
		&self.form
	}

	pub fn principal(&self) -> Option<Principal> {
		self.auth.current_user()
	}

	pub fn email_verified(&self) -> bool {
		self.principal().is_some_and(|p| p.email_verified)
	}

	pub fn field(&self, name: &str) -> FieldView {
		self.form.field(name)
	}

	pub fn handle_change(&self, name: &str, value: impl Into<String>) -> FormResult<bool> {
		self.form.handle_change(name, value)
	}

	pub async fn save_display_name(&self) -> Outcome<()> {
		let current = self
			.principal()
			.and_then(|p| p.display_name)
			.unwrap_or_default();
		let auth = &self.auth;
		self.commit(
			"displayName",
			Some(current.as_str()),
			ops::UPDATE_PROFILE_NAME,
			tables::messages::PROFILE_NAME_UPDATED,
			|name| async move { auth.update_profile_name(&name).await },
		)
		.await
	}

	pub async fn save_email(&self) -> Outcome<()> {
		let current = self.principal().map(|p| p.email).unwrap_or_default();
		let auth = &self.auth;
		self.commit(
			"email",
			Some(current.as_str()),
			ops::UPDATE_EMAIL,
			tables::messages::EMAIL_UPDATED,
			|email| async move { auth.update_email(&email).await },
		)
		.await
	}

	pub async fn save_password(&self) -> Outcome<()> {
		let auth = &self.auth;
		self.commit(
			"password",
			None,
			ops::UPDATE_PASSWORD,
			tables::messages::PASSWORD_UPDATED,
			|password| async move { auth.update_password(&password).await },
		)
		.await
	}

	/// Mail a verification link that returns to the login page.
	pub async fn send_verification_email(&self) -> Outcome<()> {
		let email = self.principal().map(|p| p.email).unwrap_or_default();
		let success = tables::messages::verification_sent(&email);
		let auth = &self.auth;
		let return_url = self.return_url.as_str();
		self.form
			.run(
				VERIFICATION_KEY,
				ops::SEND_EMAIL_VERIFICATION,
				&success,
				|| async move { auth.send_verification_email(return_url).await },
			)
			.await
	}

	async fn commit<P, Fut>(
		&self,
		name: &str,
		current: Option<&str>,
		operation: &str,
		success: &str,
		perform: P,
	) -> Outcome<()>
	where
		P: FnOnce(String) -> Fut,
		Fut: Future<Output = Result<(), RemoteError>>,
	{
		if let Some(current) = current
			&& !self.form.is_field_submitting(name)
		{
			let value = self.form.value(name);
			if !value.is_empty() && value == current {
				tracing::debug!(field = name, "value unchanged, skipping commit");
				self.form.mark_field_clean(name);
				return Outcome::Unchanged;
			}
		}
		self.form.commit_field(name, operation, success, perform).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use toko_backend::{MemoryAuthService, codes};
	use toko_messages::{Level, Message, MessagesContainer};

	fn setup() -> (MemoryAuthService, MessagesContainer, AccountSettingsPage) {
		let auth = MemoryAuthService::new().signed_in_as("budi@tokoku.id", "rahasia");
		let messages = MessagesContainer::default();
		let page = AccountSettingsPage::new(
			Arc::new(auth.clone()),
			Arc::new(messages.clone()),
			&SiteSettings::default(),
		);
		(auth, messages, page)
	}

	#[rstest]
	#[tokio::test]
	async fn test_unchanged_email_skips_backend() {
		// Arrange
		let (auth, messages, page) = setup();
		page.handle_change("email", "budi@tokoku.id").unwrap();

		// Act
		let outcome = page.save_email().await;

		// Assert
		assert_eq!(outcome, Outcome::Unchanged);
		assert_eq!(auth.calls(ops::UPDATE_EMAIL), 0);
		assert!(messages.is_empty());
		assert!(!page.form().is_dirty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_display_name_is_invalid() {
		let (auth, _messages, page) = setup();

		let outcome = page.save_display_name().await;

		assert!(matches!(outcome, Outcome::Invalid(_)));
		assert_eq!(page.field("displayName").error, "Nama wajib diisi");
		assert_eq!(auth.calls(ops::UPDATE_PROFILE_NAME), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_display_name_commit() {
		// Arrange
		let (auth, messages, page) = setup();
		page.handle_change("displayName", "Budi Santoso").unwrap();

		// Act
		let outcome = page.save_display_name().await;

		// Assert
		assert_eq!(outcome, Outcome::Success(()));
		assert_eq!(
			auth.current_user().unwrap().display_name.as_deref(),
			Some("Budi Santoso")
		);
		assert_eq!(
			messages.get_messages(),
			vec![Message::success("Data Pengguna Berhasil Di Ganti")]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_recent_login_error_lands_on_password() {
		// Arrange
		let (auth, messages, page) = setup();
		auth.fail_next(
			ops::UPDATE_PASSWORD,
			RemoteError::from_code(codes::REQUIRES_RECENT_LOGIN),
		);
		page.handle_change("password", "rahasia-baru").unwrap();

		// Act
		let outcome = page.save_password().await;

		// Assert
		assert!(matches!(outcome, Outcome::Failure(_)));
		assert_eq!(
			page.field("password").error,
			"Silahkan logout, kemudian login kembali untuk memperbarui password"
		);
		assert_eq!(page.field("email").error, "");
		assert_eq!(messages.last().unwrap().level, Level::Warning);
		assert!(!page.field("password").disabled);
	}

	#[rstest]
	#[tokio::test]
	async fn test_verification_email_uses_login_return_url() {
		// Arrange
		let (auth, messages, page) = setup();

		// Act
		let outcome = page.send_verification_email().await;

		// Assert
		assert!(outcome.is_success());
		assert_eq!(auth.outbox()[0].return_url, "http://localhost:3000/login");
		assert_eq!(
			messages.last().unwrap().text,
			"Email verifikasi telah dikirim ke budi@tokoku.id"
		);
		assert!(!page.email_verified());
	}

	#[rstest]
	fn test_email_verified_follows_account() {
		let (auth, _messages, page) = setup();

		auth.verify_current_email();

		assert!(page.email_verified());
	}
}
