//! Google OAuth2 provider for Sheets and Calendar access.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::TokenSet;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Out-of-band redirect: the authorization code is shown to the user to
/// paste into the console instead of being delivered to a callback server.
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

// Scopes for roster reading and calendar writing
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

impl GoogleTokenResponse {
    /// Convert into a storable token set. Refresh responses omit the
    /// refresh token, so the previous one is carried over.
    pub fn into_token_set(self, previous_refresh_token: Option<String>) -> TokenSet {
        TokenSet {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh_token),
            expires_at: chrono::Utc::now().timestamp() + self.expires_in as i64,
            scopes: self.scope.split_whitespace().map(String::from).collect(),
        }
    }
}

pub struct GoogleOAuth2Provider {
    pub client_id: String,
    pub client_secret: String,
}

impl GoogleOAuth2Provider {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    /// Authorization URL for the console code flow.
    pub fn authorization_url(&self) -> String {
        let scopes = format!("{} {}", SHEETS_SCOPE, CALENDAR_SCOPE);

        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(OOB_REDIRECT_URI),
            urlencoding::encode(&scopes),
        )
    }

    /// Exchange an authorization code for tokens.
    #[tracing::instrument(skip(self, code), level = "info")]
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokenResponse> {
        let client = reqwest::Client::new();

        let response = client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", OOB_REDIRECT_URI),
            ])
            .send()
            .await
            .context("Failed to send token request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Token exchange failed: {}", error_text);
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .context("Failed to parse token response")
    }

    /// Refresh an expired access token.
    #[tracing::instrument(skip(self, refresh_token), level = "info")]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<GoogleTokenResponse> {
        let client = reqwest::Client::new();

        let response = client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to send refresh request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Token refresh failed: {}", error_text);
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .context("Failed to parse refresh response")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn provider() -> GoogleOAuth2Provider {
        GoogleOAuth2Provider::new(
            "test_client_id".to_string(),
            "test_client_secret".to_string(),
        )
    }

    #[test]
    fn test_auth_url_contains_scopes() {
        let url = provider().authorization_url();
        assert!(url.contains("scope="));
        assert!(url.contains("spreadsheets.readonly"));
        assert!(url.contains("calendar"));
    }

    #[test]
    fn test_auth_url_contains_offline_access() {
        let url = provider().authorization_url();
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
    }

    #[test]
    fn test_auth_url_uses_oob_redirect() {
        let url = provider().authorization_url();
        assert!(url.contains(&urlencoding::encode(OOB_REDIRECT_URI).into_owned()));
    }

    #[test]
    fn test_token_response_conversion_keeps_previous_refresh_token() {
        let response = GoogleTokenResponse {
            access_token: "new_access".to_string(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            scope: format!("{} {}", SHEETS_SCOPE, CALENDAR_SCOPE),
        };

        let token_set = response.into_token_set(Some("old_refresh".to_string()));
        assert_eq!(token_set.access_token, "new_access");
        assert_eq!(token_set.refresh_token.as_deref(), Some("old_refresh"));
        assert_eq!(token_set.scopes.len(), 2);
        assert!(!token_set.is_expired());
    }

    #[test]
    fn test_token_response_conversion_prefers_fresh_refresh_token() {
        let response = GoogleTokenResponse {
            access_token: "access".to_string(),
            refresh_token: Some("fresh".to_string()),
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            scope: String::new(),
        };

        let token_set = response.into_token_set(Some("stale".to_string()));
        assert_eq!(token_set.refresh_token.as_deref(), Some("fresh"));
    }
}
