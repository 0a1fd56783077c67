//! Schedule synchronization orchestration.

use chrono::NaiveDate;
use tracing::instrument;

use dutyshifts_core::{decode, end_of_month, ScheduleRow, ShiftEvent};
use dutyshifts_sheets::SheetsClient;

use crate::error::SyncError;
use crate::reconciler::CalendarReconciler;

/// Everything the orchestration needs besides the ports, assembled once
/// from the validated configuration.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Sheet (tab) title; first visible sheet when `None`
    pub sheet_name: Option<String>,
    /// Cell range of the roster block, e.g. "A2:BN40"
    pub sheet_range: String,
    /// Owner of the roster row to sync
    pub username: String,
    /// First date of the sync window; the window always ends at the last
    /// day of that month
    pub start_date: NaiveDate,
    /// Reminder offsets attached to every emitted event
    pub alarm_times: Vec<i64>,
}

pub struct ScheduleSync {
    sheets: SheetsClient,
    options: SyncOptions,
}

impl ScheduleSync {
    pub fn new(sheets: SheetsClient, options: SyncOptions) -> Self {
        Self { sheets, options }
    }

    /// Resolve the roster row and decode it into shift events.
    ///
    /// Fails with [`SyncError::RowNotFound`] before decoding when no row's
    /// first cell equals the configured username.
    #[instrument(skip(self), level = "info")]
    pub async fn load_events(&self) -> Result<Vec<ShiftEvent>, SyncError> {
        let sheet_name = match &self.options.sheet_name {
            Some(name) => name.clone(),
            None => self
                .sheets
                .list_sheet_titles()
                .await?
                .into_iter()
                .next()
                .ok_or(SyncError::NoVisibleSheets)?,
        };

        tracing::info!("Reading roster from sheet \"{sheet_name}\"");

        let rows = self
            .sheets
            .read_range(&sheet_name, &self.options.sheet_range)
            .await?;

        let row = rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(self.options.username.as_str()))
            .ok_or_else(|| SyncError::RowNotFound(self.options.username.clone()))?;

        // Drop the name cell; the rest is the (day, night) hour pairs.
        let schedule = ScheduleRow::from_cells(&row[1..]);

        let start = self.options.start_date;
        let end = end_of_month(start);

        Ok(decode(&schedule, start, end, &self.options.alarm_times))
    }

    /// Dry-run report: one line per event, chronological. Pure, so two runs
    /// over the same events render byte-identical output.
    pub fn render_report(events: &[ShiftEvent]) -> String {
        let mut report = String::new();
        for event in events {
            report.push_str(&format!(
                "{}: {} [{}]\n",
                event.start.format("%Y-%m-%d %H:%M:%S"),
                event.kind.label(),
                event.length_hours(),
            ));
        }
        report
    }

    /// Materialize the decoded events into the target calendar.
    ///
    /// Resolves the calendar exactly once, then inserts sequentially in
    /// chronological order. Any failure aborts with events created so far
    /// left in place.
    #[instrument(skip(self, reconciler, events), level = "info")]
    pub async fn apply(
        &self,
        reconciler: &CalendarReconciler,
        calendar_name: &str,
        keep_existing: bool,
        events: &[ShiftEvent],
    ) -> Result<usize, SyncError> {
        let calendar_id = reconciler.resolve(calendar_name, keep_existing).await?;

        for event in events {
            let event_id = reconciler.materialize(&calendar_id, event).await?;
            tracing::debug!(
                "Created {} on {} ({event_id})",
                event.kind.label(),
                event.date
            );
        }

        tracing::info!(
            "Created {} event(s) in calendar \"{calendar_name}\"",
            events.len()
        );
        Ok(events.len())
    }
}
