//! Sheets-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Token expired")]
    TokenExpired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
