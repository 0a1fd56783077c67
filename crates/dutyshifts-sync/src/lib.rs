//! Roster-to-calendar synchronization.
//!
//! Glues the spreadsheet port, the shift decoder and the calendar port
//! together: resolve the roster row, decode it, then either print the
//! events (dry run) or materialize them into the target calendar.

pub mod error;
pub mod reconciler;
pub mod sync;

pub use error::SyncError;
pub use reconciler::{CalendarReconciler, TIME_ZONE};
pub use sync::{ScheduleSync, SyncOptions};
