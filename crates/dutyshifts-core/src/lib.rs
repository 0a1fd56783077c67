pub mod config;
pub mod error;
pub mod schedule;

pub use config::{Config, Overrides};
pub use error::ConfigError;
pub use schedule::{decode, end_of_month, ScheduleRow, ShiftEvent, ShiftKind};

/// Initialize logging for the application.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!("DutyShifts core initialized");
}
