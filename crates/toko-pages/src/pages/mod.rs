//! One controller per admin page

pub mod account;
pub mod login;
pub mod registration;
pub mod store;
pub mod transactions;

pub use account::AccountSettingsPage;
pub use login::LoginPage;
pub use registration::RegistrationPage;
pub use store::StoreSettingsPage;
pub use transactions::{LineItem, Transaction, TransactionsPage};
