//! Google Sheets access for DutyShifts.
//!
//! Read-only spreadsheet port: sheet listing and range reads.

pub mod client;
pub mod error;
pub mod types;

pub use client::SheetsClient;
pub use error::SheetsError;
