//! Google OAuth2 credentials for the Sheets and Calendar clients.
//!
//! Tokens are resolved at most once per run and persisted to a file-backed
//! store between runs.

pub mod credentials;
pub mod google;
pub mod storage;

pub use credentials::Credentials;
pub use google::GoogleOAuth2Provider;
pub use storage::{TokenSet, TokenStore};
