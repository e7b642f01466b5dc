//! Registration page

use crate::controller::{FieldView, FormController, Outcome};
use crate::{rules, tables};
use std::sync::Arc;
use toko_backend::{AuthService, Principal, ops};
use toko_conf::SiteSettings;
use toko_forms::{FieldSet, FormResult};
use toko_messages::NotificationSink;

pub const FIELDS: [&str; 3] = ["email", "password", "ulangi_password"];

pub struct RegistrationPage {
	form: FormController,
	auth: Arc<dyn AuthService>,
	home_path: String,
}

impl RegistrationPage {
	pub fn new(
		auth: Arc<dyn AuthService>,
		sink: Arc<dyn NotificationSink>,
		site: &SiteSettings,
	) -> Self {
		Self {
			form: FormController::new(
				FieldSet::new(FIELDS),
				rules::registration(),
				sink,
				Arc::new(tables::registration()),
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

	/// Signed-in users always go home.
	pub fn redirect(&self) -> Option<String> {
		self.auth
			.current_user()
			.map(|_| self.home_path.clone())
	}

	pub async fn submit(&self) -> Outcome<Principal> {
		let auth = &self.auth;
		self.form
			.submit(ops::REGISTER, tables::messages::REGISTERED, |values| async move {
				auth.register(values.value("email"), values.value("password"))
					.await
			})
			.await
	}
}
