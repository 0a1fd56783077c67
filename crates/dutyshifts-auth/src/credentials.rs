//! Process-wide credential resolution.
//!
//! The access token is resolved lazily, at most once per run, and shared by
//! the Sheets and Calendar clients. Resolution order: stored token if still
//! fresh, refresh flow if a refresh token is available, console
//! authorization-code flow otherwise.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::OnceCell;

use crate::google::GoogleOAuth2Provider;
use crate::storage::TokenStore;

pub struct Credentials {
    provider: GoogleOAuth2Provider,
    store: TokenStore,
    access_token: OnceCell<String>,
}

impl Credentials {
    pub fn new(client_id: String, client_secret: String, token_store: impl Into<PathBuf>) -> Self {
        Self {
            provider: GoogleOAuth2Provider::new(client_id, client_secret),
            store: TokenStore::new(token_store),
            access_token: OnceCell::new(),
        }
    }

    /// The access token for this run. The first caller triggers resolution;
    /// later callers get the memoized value.
    pub async fn access_token(&self) -> Result<&str> {
        self.access_token
            .get_or_try_init(|| self.resolve())
            .await
            .map(String::as_str)
    }

    async fn resolve(&self) -> Result<String> {
        if let Ok(token_set) = self.store.retrieve() {
            if !token_set.needs_refresh() {
                tracing::debug!("Using stored access token");
                return Ok(token_set.access_token);
            }

            if let Some(refresh_token) = token_set.refresh_token {
                tracing::info!("Stored access token expired, refreshing");
                let response = self.provider.refresh_token(&refresh_token).await?;
                let refreshed = response.into_token_set(Some(refresh_token));
                self.store.store(&refreshed)?;
                return Ok(refreshed.access_token);
            }
        }

        self.authorize_interactively().await
    }

    /// Console authorization-code flow: print the URL, read the code back.
    async fn authorize_interactively(&self) -> Result<String> {
        let url = self.provider.authorization_url();

        println!("Please, open this url in your browser and enter the resulting code:");
        println!();
        println!("{url}");
        println!();
        print!("Code: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut code = String::new();
        std::io::stdin()
            .read_line(&mut code)
            .context("Failed to read authorization code")?;
        let code = code.trim();

        if code.is_empty() {
            anyhow::bail!("No authorization code entered");
        }

        let response = self.provider.exchange_code(code).await?;
        let token_set = response.into_token_set(None);
        self.store.store(&token_set)?;

        tracing::info!("Authorization complete");
        Ok(token_set.access_token)
    }
}
