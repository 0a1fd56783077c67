//! Google Calendar access for DutyShifts.
//!
//! Calendar port: calendar listing, creation, deletion and event insertion.

pub mod client;
pub mod error;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use types::Calendar;
