//! Declarative per-field validation
//!
//! Each field carries an ordered list of checks. [`validate`] walks every
//! field of a [`FieldSet`], runs its checks top to bottom and keeps the
//! message of the first check that fails, so a field never reports more
//! than one problem at a time.
//!
//! Shape checks (email, URL, minimum length) accept the empty string:
//! emptiness is the business of [`Rule::Required`], which is expected to
//! come first in the list. That keeps a blank field from reporting
//! "Email tidak valid" when the user simply has not typed anything yet.

use crate::field_set::{ErrorSet, FieldSet};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

// Local part, a single `@`, and a domain with at least one dot.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// Website pattern.
//
// - Optional http or https scheme (store owners usually type "tokoku.id")
// - Domain labels without leading/trailing hyphens, ending in an alphabetic TLD
// - Optional port, path, query string and fragment
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^(?:https?://)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}(?::[0-9]{1,5})?(?:/[^\s?#]*)?(?:\?[^\s#]*)?(?:#\S*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

type Predicate = Arc<dyn Fn(&str, &FieldSet) -> bool + Send + Sync>;

/// A single predicate over a field value.
#[derive(Clone)]
pub enum Rule {
	/// Fails on an empty or whitespace-only value.
	Required,
	/// Fails when a non-empty value is not shaped like an email address.
	Email,
	/// Fails when a non-empty value is not shaped like a website address.
	Url,
	/// Fails when the value differs from the value of another field.
	SameAs(String),
	/// Fails when a non-empty value has fewer characters than required.
	MinLength(usize),
	/// Caller-supplied predicate; `true` means the value passes.
	Custom(Predicate),
}

impl Rule {
	pub fn custom<F>(predicate: F) -> Self
	where
		F: Fn(&str, &FieldSet) -> bool + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(predicate))
	}

	/// Whether `value` passes this rule in the context of `fields`.
	pub fn check(&self, value: &str, fields: &FieldSet) -> bool {
		match self {
			Rule::Required => !value.trim().is_empty(),
			Rule::Email => value.is_empty() || EMAIL_REGEX.is_match(value),
			Rule::Url => value.is_empty() || URL_REGEX.is_match(value),
			Rule::SameAs(other) => value == fields.value(other),
			Rule::MinLength(min) => value.is_empty() || value.chars().count() >= *min,
			Rule::Custom(predicate) => predicate(value, fields),
		}
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rule::Required => f.write_str("Required"),
			Rule::Email => f.write_str("Email"),
			Rule::Url => f.write_str("Url"),
			Rule::SameAs(other) => f.debug_tuple("SameAs").field(other).finish(),
			Rule::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
			Rule::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// A rule paired with the message shown when it fails.
#[derive(Debug, Clone)]
pub struct Check {
	pub rule: Rule,
	pub message: String,
}

/// Ordered checks for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
	checks: Vec<Check>,
}

impl FieldRules {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn rule(mut self, rule: Rule, message: impl Into<String>) -> Self {
		self.checks.push(Check {
			rule,
			message: message.into(),
		});
		self
	}

	pub fn required(self, message: impl Into<String>) -> Self {
		self.rule(Rule::Required, message)
	}

	pub fn email(self, message: impl Into<String>) -> Self {
		self.rule(Rule::Email, message)
	}

	pub fn url(self, message: impl Into<String>) -> Self {
		self.rule(Rule::Url, message)
	}

	/// Require the value to equal the value of `other` (password confirmation).
	pub fn same_as(self, other: impl Into<String>, message: impl Into<String>) -> Self {
		self.rule(Rule::SameAs(other.into()), message)
	}

	pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
		self.rule(Rule::MinLength(min), message)
	}

	pub fn checks(&self) -> &[Check] {
		&self.checks
	}

	/// Message of the first failing check, or the empty string.
	fn first_failure(&self, value: &str, fields: &FieldSet) -> &str {
		self.checks
			.iter()
			.find(|check| !check.rule.check(value, fields))
			.map(|check| check.message.as_str())
			.unwrap_or_default()
	}
}

/// The rule set of a whole form.
///
/// # Examples
///
/// ```
/// use toko_forms::{FieldSet, ValidationRules, validate};
///
/// let rules = ValidationRules::new()
///     .field("email", |f| f.required("Email wajib diisi").email("Email tidak valid"))
///     .field("password", |f| f.required("Password wajib diisi"));
///
/// let fields = FieldSet::from_pairs([("email", "not-an-email"), ("password", "x")]);
/// let errors = validate(&fields, &rules);
///
/// assert_eq!(errors.message("email"), "Email tidak valid");
/// assert_eq!(errors.message("password"), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
	fields: IndexMap<String, FieldRules>,
}

impl ValidationRules {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append checks for `name`. Calling this twice for the same field
	/// extends the existing list.
	pub fn field<F>(mut self, name: impl Into<String>, build: F) -> Self
	where
		F: FnOnce(FieldRules) -> FieldRules,
	{
		let slot = self.fields.entry(name.into()).or_default();
		*slot = build(std::mem::take(slot));
		self
	}

	pub fn get(&self, name: &str) -> Option<&FieldRules> {
		self.fields.get(name)
	}
}

/// Validate every field of `fields` against `rules`.
///
/// The returned [`ErrorSet`] has exactly the keys of `fields`. Rules
/// registered for names the form does not have are ignored.
pub fn validate(fields: &FieldSet, rules: &ValidationRules) -> ErrorSet {
	let mut errors = ErrorSet::for_fields(fields);
	for (name, value) in fields.iter() {
		let message = validate_value(name, value, fields, rules);
		if !message.is_empty() {
			// The key comes from `fields`, which `errors` mirrors.
			let _ = errors.set(name, message);
		}
	}
	errors
}

/// Validate a single field, for commit-on-blur inputs.
///
/// Returns the first failing message or the empty string.
pub fn validate_field(fields: &FieldSet, rules: &ValidationRules, name: &str) -> String {
	validate_value(name, fields.value(name), fields, rules).to_string()
}

fn validate_value<'r>(
	name: &str,
	value: &str,
	fields: &FieldSet,
	rules: &'r ValidationRules,
) -> &'r str {
	rules
		.get(name)
		.map(|field_rules| field_rules.first_failure(value, fields))
		.unwrap_or_default()
}
