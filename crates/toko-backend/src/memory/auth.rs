//! In-memory authentication service
//!
//! Reports the same error codes a hosted identity provider does, so pages can
//! be exercised end to end without one.
//!
//! ```rust
//! use toko_backend::{AuthService, MemoryAuthService, codes};
//!
//! # async fn example() {
//! let auth = MemoryAuthService::new().with_account("budi@tokoku.id", "rahasia");
//!
//! let error = auth.sign_in("budi@tokoku.id", "salah").await.unwrap_err();
//! assert_eq!(error.code, codes::WRONG_PASSWORD);
//!
//! let principal = auth.sign_in("budi@tokoku.id", "rahasia").await.unwrap();
//! assert_eq!(auth.current_user(), Some(principal));
//! # }
//! ```

use super::{CallLog, ScriptedFailures};
use crate::auth::{AuthService, Principal};
use crate::error::{RemoteError, codes};
use crate::ops;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
struct Account {
	uid: String,
	email: String,
	password: String,
	display_name: Option<String>,
	email_verified: bool,
	disabled: bool,
}

impl Account {
	fn principal(&self) -> Principal {
		Principal {
			uid: self.uid.clone(),
			email: self.email.clone(),
			display_name: self.display_name.clone(),
			email_verified: self.email_verified,
		}
	}
}

/// A verification mail that would have been sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
	pub email: String,
	pub return_url: String,
}

#[derive(Debug, Default)]
struct State {
	accounts: Vec<Account>,
	current: Option<String>,
	next_uid: u64,
	outbox: Vec<VerificationEmail>,
}

impl State {
	fn find(&self, email: &str) -> Option<&Account> {
		self.accounts
			.iter()
			.find(|a| a.email.eq_ignore_ascii_case(email))
	}

	fn current_mut(&mut self) -> Result<&mut Account, RemoteError> {
		let uid = self
			.current
			.clone()
			.ok_or_else(|| RemoteError::new(codes::NO_CURRENT_USER, "No user is signed in"))?;
		self.accounts
			.iter_mut()
			.find(|a| a.uid == uid)
			.ok_or_else(|| RemoteError::new(codes::NO_CURRENT_USER, "No user is signed in"))
	}

	fn create(&mut self, email: &str, password: &str) -> &Account {
		self.next_uid += 1;
		self.accounts.push(Account {
			uid: format!("uid-{}", self.next_uid),
			email: email.to_string(),
			password: password.to_string(),
			display_name: None,
			email_verified: false,
			disabled: false,
		});
		&self.accounts[self.accounts.len() - 1]
	}
}

fn looks_like_email(email: &str) -> bool {
	match email.split_once('@') {
		Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
		None => false,
	}
}

fn check_email(email: &str) -> Result<(), RemoteError> {
	if looks_like_email(email) {
		Ok(())
	} else {
		Err(RemoteError::new(
			codes::INVALID_EMAIL,
			"The email address is badly formatted.",
		))
	}
}

fn check_password(password: &str) -> Result<(), RemoteError> {
	if password.chars().count() >= MIN_PASSWORD_LENGTH {
		Ok(())
	} else {
		Err(RemoteError::new(
			codes::WEAK_PASSWORD,
			"Password should be at least 6 characters",
		))
	}
}

/// Thread-safe, cloneable in-memory [`AuthService`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthService {
	state: Arc<Mutex<State>>,
	calls: CallLog,
	failures: ScriptedFailures,
}

impl MemoryAuthService {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed an account.
	pub fn with_account(self, email: &str, password: &str) -> Self {
		self.state.lock().create(email, password);
		self
	}

	/// Seed an account and sign it in.
	pub fn signed_in_as(self, email: &str, password: &str) -> Self {
		{
			let mut state = self.state.lock();
			let uid = state.create(email, password).uid.clone();
			state.current = Some(uid);
		}
		self
	}

	pub fn disable(&self, email: &str) {
		let mut state = self.state.lock();
		if let Some(account) = state
			.accounts
			.iter_mut()
			.find(|a| a.email.eq_ignore_ascii_case(email))
		{
			account.disabled = true;
		}
	}

	/// Mark the current user's address as verified, as following the mailed
	/// link would.
	pub fn verify_current_email(&self) {
		if let Ok(account) = self.state.lock().current_mut() {
			account.email_verified = true;
		}
	}

	pub fn sign_out(&self) {
		self.state.lock().current = None;
	}

	/// Make the next call to `operation` fail with `error`.
	pub fn fail_next(&self, operation: &'static str, error: RemoteError) {
		self.failures.push(operation, error);
	}

	/// Number of calls made to `operation`, successful or not.
	pub fn calls(&self, operation: &str) -> usize {
		self.calls.count(operation)
	}

	pub fn password_of(&self, email: &str) -> Option<String> {
		self.state.lock().find(email).map(|a| a.password.clone())
	}

	pub fn outbox(&self) -> Vec<VerificationEmail> {
		self.state.lock().outbox.clone()
	}

	fn enter(&self, operation: &'static str) -> Result<(), RemoteError> {
		self.calls.record(operation);
		match self.failures.take(operation) {
			Some(error) => {
				tracing::debug!(operation, code = %error.code, "scripted auth failure");
				Err(error)
			}
			None => Ok(()),
		}
	}
}

#[async_trait]
impl AuthService for MemoryAuthService {
	async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, RemoteError> {
		self.enter(ops::SIGN_IN)?;
		check_email(email)?;

		let mut state = self.state.lock();
		let account = state.find(email).ok_or_else(|| {
			RemoteError::new(codes::USER_NOT_FOUND, "There is no user record for this email.")
		})?;
		if account.disabled {
			return Err(RemoteError::new(
				codes::USER_DISABLED,
				"The user account has been disabled by an administrator.",
			));
		}
		if account.password != password {
			return Err(RemoteError::new(
				codes::WRONG_PASSWORD,
				"The password is invalid.",
			));
		}

		let principal = account.principal();
		state.current = Some(principal.uid.clone());
		Ok(principal)
	}

	async fn register(&self, email: &str, password: &str) -> Result<Principal, RemoteError> {
		self.enter(ops::REGISTER)?;
		check_email(email)?;

		let mut state = self.state.lock();
		if state.find(email).is_some() {
			return Err(RemoteError::new(
				codes::EMAIL_ALREADY_IN_USE,
				"The email address is already in use by another account.",
			));
		}
		check_password(password)?;

		let principal = state.create(email, password).principal();
		state.current = Some(principal.uid.clone());
		Ok(principal)
	}

	async fn update_profile_name(&self, name: &str) -> Result<(), RemoteError> {
		self.enter(ops::UPDATE_PROFILE_NAME)?;
		let mut state = self.state.lock();
		state.current_mut()?.display_name = Some(name.to_string());
		Ok(())
	}

	async fn update_email(&self, email: &str) -> Result<(), RemoteError> {
		self.enter(ops::UPDATE_EMAIL)?;
		check_email(email)?;

		let mut state = self.state.lock();
		let uid = state.current_mut()?.uid.clone();
		if state.find(email).is_some_and(|other| other.uid != uid) {
			return Err(RemoteError::new(
				codes::EMAIL_ALREADY_IN_USE,
				"The email address is already in use by another account.",
			));
		}

		let account = state.current_mut()?;
		account.email = email.to_string();
		account.email_verified = false;
		Ok(())
	}

	async fn update_password(&self, password: &str) -> Result<(), RemoteError> {
		self.enter(ops::UPDATE_PASSWORD)?;
		check_password(password)?;
		self.state.lock().current_mut()?.password = password.to_string();
		Ok(())
	}

	async fn send_verification_email(&self, return_url: &str) -> Result<(), RemoteError> {
		self.enter(ops::SEND_EMAIL_VERIFICATION)?;
		let mut state = self.state.lock();
		let email = state.current_mut()?.email.clone();
		state.outbox.push(VerificationEmail {
			email,
			return_url: return_url.to_string(),
		});
		Ok(())
	}

	fn current_user(&self) -> Option<Principal> {
		let state = self.state.lock();
		let uid = state.current.as_deref()?;
		state
			.accounts
			.iter()
			.find(|a| a.uid == uid)
			.map(Account::principal)
	}
}
