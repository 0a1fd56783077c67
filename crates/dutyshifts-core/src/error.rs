//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
///
/// All of these are reported to the user before any external call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}
