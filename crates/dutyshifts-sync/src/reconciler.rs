//! Whole-calendar reconciliation.
//!
//! Reconciliation is deliberately coarse: the target calendar is either
//! reused as-is (additive, so re-runs duplicate events) or destroyed and
//! recreated. There is no per-event diffing; correctness under re-run
//! relies on the caller choosing the clear policy.

use chrono::NaiveDateTime;
use tracing::instrument;

use dutyshifts_calendar::{CalendarClient, CalendarError};
use dutyshifts_core::ShiftEvent;

/// The single fixed time zone all events are created in.
pub const TIME_ZONE: &str = "Europe/Kiev";

pub struct CalendarReconciler {
    client: CalendarClient,
}

impl CalendarReconciler {
    pub fn new(client: CalendarClient) -> Self {
        Self { client }
    }

    /// Establish the target calendar id for this run.
    ///
    /// Exact case-sensitive match on the display name, first match if there
    /// are duplicates. A match with `keep_existing = false` is destroyed
    /// wholesale, events and all, before a fresh calendar is created.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(
        &self,
        name: &str,
        keep_existing: bool,
    ) -> Result<String, CalendarError> {
        let calendars = self.client.list_calendars().await?;

        let mut calendar_id = calendars
            .into_iter()
            .find(|calendar| calendar.summary == name)
            .map(|calendar| calendar.id);

        if !keep_existing {
            if let Some(id) = calendar_id.take() {
                tracing::info!("Destroying existing calendar \"{name}\" ({id})");
                self.client.delete_calendar(&id).await?;
            }
        }

        match calendar_id {
            Some(id) => {
                tracing::info!("Reusing existing calendar \"{name}\" ({id})");
                Ok(id)
            }
            None => {
                let description = format!("{name} (autogenerated calendar)");
                let id = self
                    .client
                    .create_calendar(name, &description, TIME_ZONE)
                    .await?;
                tracing::info!("Created calendar \"{name}\" ({id})");
                Ok(id)
            }
        }
    }

    /// Insert one shift event into the resolved calendar.
    ///
    /// Title and description both come from the shift kind; timestamps are
    /// wall-clock in the fixed zone.
    #[instrument(skip(self, event), level = "debug")]
    pub async fn materialize(
        &self,
        calendar_id: &str,
        event: &ShiftEvent,
    ) -> Result<String, CalendarError> {
        let title = event.kind.label();

        self.insert(calendar_id, title, event.start, event.end, &event.reminders)
            .await
    }

    async fn insert(
        &self,
        calendar_id: &str,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        reminders: &[i64],
    ) -> Result<String, CalendarError> {
        self.client
            .insert_event(calendar_id, title, title, start, end, TIME_ZONE, reminders)
            .await
    }
}
