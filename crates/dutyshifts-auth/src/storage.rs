use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Token set for OAuth2 authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Access token for API requests
    pub access_token: String,

    /// Optional refresh token for token renewal
    pub refresh_token: Option<String>,

    /// Token expiration timestamp (Unix timestamp)
    pub expires_at: i64,

    /// Scopes granted to this token
    pub scopes: Vec<String>,
}

impl TokenSet {
    /// Check if the token needs refresh (within 5 minutes of expiry)
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - 300 // 5 minute buffer
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at
    }
}

/// File-backed storage for the OAuth token set.
///
/// The store location comes from the configuration; nothing else is
/// persisted locally.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist a token set.
    pub fn store(&self, token_set: &TokenSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create token store directory")?;
        }

        let json =
            serde_json::to_string_pretty(token_set).context("Failed to serialize token set")?;

        fs::write(&self.path, json).context("Failed to write token file")?;

        tracing::info!("Stored token set at {:?}", self.path);
        Ok(())
    }

    /// Retrieve the stored token set, if any.
    pub fn retrieve(&self) -> Result<TokenSet> {
        let json = fs::read_to_string(&self.path).context("Failed to read token file")?;

        let token_set: TokenSet =
            serde_json::from_str(&json).context("Failed to deserialize token set")?;

        tracing::debug!("Retrieved token set from {:?}", self.path);
        Ok(token_set)
    }

}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample(expires_at: i64) -> TokenSet {
        TokenSet {
            access_token: "test".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
            scopes: vec!["https://www.googleapis.com/auth/calendar".to_string()],
        }
    }

    #[test]
    fn test_token_expiry() {
        let now = chrono::Utc::now().timestamp();

        let expired = sample(now - 3600);
        assert!(expired.is_expired());
        assert!(expired.needs_refresh());

        let valid = sample(now + 3600);
        assert!(!valid.is_expired());
        assert!(!valid.needs_refresh());

        // Expires within the refresh buffer.
        let soon = sample(now + 200);
        assert!(!soon.is_expired());
        assert!(soon.needs_refresh());
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        assert!(store.retrieve().is_err());

        let token_set = sample(chrono::Utc::now().timestamp() + 3600);
        store.store(&token_set).unwrap();

        let loaded = store.retrieve().unwrap();
        assert_eq!(loaded.access_token, token_set.access_token);
        assert_eq!(loaded.refresh_token, token_set.refresh_token);
        assert_eq!(loaded.scopes, token_set.scopes);
    }

    #[test]
    fn test_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token.json"));

        store
            .store(&sample(chrono::Utc::now().timestamp() + 3600))
            .unwrap();
        assert!(store.retrieve().is_ok());
    }
}
