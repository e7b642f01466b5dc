//! Login page

use crate::controller::{FieldView, FormController, Outcome};
use crate::{rules, tables};
use std::sync::Arc;
use toko_backend::{AuthService, Principal, ops};
use toko_conf::SiteSettings;
use toko_forms::{FieldSet, FormResult};
use toko_messages::NotificationSink;

pub const FIELDS: [&str; 2] = ["email", "password"];

pub struct LoginPage {
	form: FormController,
	auth: Arc<dyn AuthService>,
	home_path: String,
}

impl LoginPage {
	pub fn new(
		auth: Arc<dyn AuthService>,
		sink: Arc<dyn NotificationSink>,
		site: &SiteSettings,
	) -> Self {
		Self {
			form: FormController::new(
				FieldSet::new(FIELDS),
				rules::login(),
				sink,
				Arc::new(tables::login()),
			),
			auth,
			home_path: site.home_path.clone(),
		}
	}

	pub fn form(&self) -> &FormController {
		&self.form
	}

	pub fn field(&self, name: &str) -> FieldView {
		self.form.field(name)
	}

	pub fn handle_change(&self, name: &str, value: impl Into<String>) -> FormResult<bool> {
		self.form.handle_change(name, value)
	}

	/// Where to send an already signed-in user: back to `from` when the
	/// user was bounced here from a private page, else home.
	pub fn redirect(&self, from: Option<&str>) -> Option<String> {
		self.auth.current_user()?;
		let target = from
			.filter(|path| !path.is_empty())
			.unwrap_or(self.home_path.as_str());
		Some(target.to_string())
	}

	pub async fn submit(&self) -> Outcome<Principal> {
		let auth = &self.auth;
		self.form
			.submit(ops::SIGN_IN, tables::messages::SIGNED_IN, |values| async move {
				auth.sign_in(values.value("email"), values.value("password"))
					.await
			})
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use toko_backend::MemoryAuthService;
	use toko_messages::MessagesContainer;

	fn page(auth: MemoryAuthService) -> LoginPage {
		LoginPage::new(
			Arc::new(auth),
			Arc::new(MessagesContainer::default()),
			&SiteSettings::default(),
		)
	}

	#[rstest]
	#[case(None, "/")]
	#[case(Some("/transaksi"), "/transaksi")]
	#[case(Some(""), "/")]
	fn test_redirect_when_signed_in(#[case] from: Option<&str>, #[case] expected: &str) {
		let page = page(MemoryAuthService::new().signed_in_as("budi@tokoku.id", "rahasia"));

		assert_eq!(page.redirect(from).as_deref(), Some(expected));
	}

	#[rstest]
	fn test_no_redirect_when_signed_out() {
		let page = page(MemoryAuthService::new());

		assert_eq!(page.redirect(Some("/transaksi")), None);
	}
}
