//! Sync error types.
//!
//! Every failure is terminal: the run aborts on the first error with no
//! retry and no cleanup of events already created.

use dutyshifts_calendar::CalendarError;
use dutyshifts_sheets::SheetsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Spreadsheet has no visible sheets")]
    NoVisibleSheets,

    #[error("No roster row found for user: {0}")]
    RowNotFound(String),

    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),
}
