use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default location of the configuration file, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Google OAuth application credentials and token store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client ID from the Google Cloud console
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Where the obtained token set is persisted between runs
    #[serde(default = "default_token_store")]
    pub token_store: PathBuf,
}

fn default_token_store() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dutyshifts")
        .join("token.json")
}

/// Typed application configuration.
///
/// Loaded once from the YAML file, merged with the command-line overrides,
/// validated, and passed immutably into the sync logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth settings
    pub auth: AuthConfig,

    /// Spreadsheet document id holding the duty roster
    pub sheet_id: String,

    /// Cell range of one roster block, e.g. "A2:BN40"
    pub sheet_range: String,

    /// Sheet (tab) title; first visible sheet when omitted
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// Roster row owner; login user when omitted
    #[serde(default)]
    pub username: Option<String>,

    /// Display name of the target calendar
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Popup reminder offsets in minutes before each shift
    #[serde(default)]
    pub alarm_times: Vec<i64>,

    /// Destroy and recreate the target calendar instead of appending
    #[serde(default)]
    pub clear_events: bool,

    /// Print events instead of creating them
    #[serde(default)]
    pub dry_run: bool,

    /// First date to sync; today when omitted
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_calendar_name() -> String {
    "DutyShifts".to_string()
}

/// Command-line overrides applied on top of the file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sheet_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub clear_events: bool,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Apply command-line overrides, consuming the file configuration and
    /// returning the final immutable one. Boolean flags only ever switch
    /// behavior on; absent flags keep the file setting.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if overrides.sheet_name.is_some() {
            self.sheet_name = overrides.sheet_name;
        }
        if overrides.start_date.is_some() {
            self.start_date = overrides.start_date;
        }
        if overrides.clear_events {
            self.clear_events = true;
        }
        if overrides.dry_run {
            self.dry_run = true;
        }
        self
    }

    /// The roster row owner: configured username, or the login user.
    pub fn resolved_username(&self) -> Option<String> {
        self.username.clone().or_else(login_user)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.auth.client_id.is_empty() || self.auth.client_id.starts_with("YOUR_") {
            result.add_error("auth.client_id", "OAuth client id is not configured");
        }
        if self.auth.client_secret.is_empty() || self.auth.client_secret.starts_with("YOUR_") {
            result.add_error("auth.client_secret", "OAuth client secret is not configured");
        }

        if self.sheet_id.is_empty() {
            result.add_error("sheet_id", "Spreadsheet id must not be empty");
        }
        if self.sheet_range.is_empty() {
            result.add_error("sheet_range", "Cell range must not be empty");
        }

        if self.calendar_name.is_empty() {
            result.add_error("calendar_name", "Calendar name must not be empty");
        }

        if self.resolved_username().is_none() {
            result.add_error(
                "username",
                "No username configured and the login user could not be determined",
            );
        }

        for minutes in &self.alarm_times {
            if *minutes < 0 {
                result.add_error("alarm_times", format!("Negative reminder offset: {minutes}"));
            } else if *minutes > 24 * 60 {
                result.add_warning(
                    "alarm_times",
                    format!("Reminder offset is more than 24 hours: {minutes}"),
                );
            }
        }

        result
    }

    /// Validate and convert failures into a single error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {warning}");
        }

        Ok(self)
    }
}

fn login_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.is_empty())
}
