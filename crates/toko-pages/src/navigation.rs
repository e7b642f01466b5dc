//! Navigation and confirmation collaborators
//!
//! The host application owns the actual prompt UI. Pages only report whether
//! leaving should be blocked and ask yes/no questions.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives the page's "block navigation?" state.
pub trait NavigationGuard: Send + Sync {
	fn update(&self, should_block: bool, confirm_message: &str);
}

/// Asks the user to confirm a destructive action.
pub trait Confirmation: Send + Sync {
	fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
	F: Fn(&str) -> bool + Send + Sync,
{
	fn confirm(&self, prompt: &str) -> bool {
		self(prompt)
	}
}

/// A navigation guard that remembers the latest state, for hosts that poll
/// it before leaving a page.
#[derive(Debug, Clone, Default)]
pub struct NavigationPrompt {
	state: Arc<Mutex<PromptState>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
	pub should_block: bool,
	pub message: String,
	/// Number of updates received.
	pub updates: usize,
}

impl NavigationPrompt {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> PromptState {
		self.state.lock().clone()
	}

	pub fn should_block(&self) -> bool {
		self.state.lock().should_block
	}

	/// The message to confirm with, if leaving is currently blocked.
	pub fn blocking_message(&self) -> Option<String> {
		let state = self.state.lock();
		state.should_block.then(|| state.message.clone())
	}
}

impl NavigationGuard for NavigationPrompt {
	fn update(&self, should_block: bool, confirm_message: &str) {
		let mut state = self.state.lock();
		state.should_block = should_block;
		state.message = confirm_message.to_string();
		state.updates += 1;
	}
}
