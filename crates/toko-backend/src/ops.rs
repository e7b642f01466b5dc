//! Operation identifiers
//!
//! Used as keys into a [`RemoteErrorMap`](crate::classify::RemoteErrorMap)
//! and by the in-memory backends to count calls and script failures.

pub const SIGN_IN: &str = "signIn";
pub const REGISTER: &str = "register";
pub const UPDATE_PROFILE_NAME: &str = "updateProfileName";
pub const UPDATE_EMAIL: &str = "updateEmail";
pub const UPDATE_PASSWORD: &str = "updatePassword";
pub const SEND_EMAIL_VERIFICATION: &str = "sendEmailVerification";

pub const WRITE_DOCUMENT: &str = "writeDocument";
pub const DELETE_DOCUMENT: &str = "deleteDocument";
