//! Duty-roster decoding.
//!
//! A roster row carries two numeric cells per day of month: hours of a day
//! shift and hours of a night shift. Decoding turns the row into an ordered
//! sequence of typed shift events for a date range. Decoding never fails;
//! malformed cells degrade to "no shift" for that day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// One roster row: interleaved (day_hours, night_hours) pairs, one pair per
/// day of month. The pair for day N sits at index (N-1)*2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow(Vec<i64>);

impl ScheduleRow {
    /// Build a row from raw spreadsheet cells.
    ///
    /// The caller is expected to have dropped the leading name cell already.
    /// Missing or non-numeric cells parse as 0; an odd-length row is padded
    /// so the pair invariant holds.
    pub fn from_cells(cells: &[String]) -> Self {
        let mut hours: Vec<i64> = cells
            .iter()
            .map(|cell| cell.trim().parse::<i64>().unwrap_or(0))
            .collect();

        if hours.len() % 2 != 0 {
            hours.push(0);
        }

        Self(hours)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (day_hours, night_hours) for a 1-based day of month. Out-of-range
    /// reads are 0, never an error.
    fn hours_for(&self, day: u32) -> (i64, i64) {
        let column = (day.saturating_sub(1) as usize) * 2;
        let day_hours = self.0.get(column).copied().unwrap_or(0);
        let night_hours = self.0.get(column + 1).copied().unwrap_or(0);
        (day_hours, night_hours)
    }
}

/// Kind of shift a roster day decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftKind {
    Day,
    Night,
}

impl ShiftKind {
    /// Event title used in the calendar and in dry-run output.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Day => "Day shift",
            ShiftKind::Night => "Night shift",
        }
    }

    /// Local wall-clock start of the shift.
    fn start_time(&self) -> NaiveTime {
        let hour = match self {
            ShiftKind::Day => 8,
            ShiftKind::Night => 20,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }
}

/// One decoded shift. End is start plus the cell's hours by pure addition;
/// a long night shift crosses into the next calendar date without splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEvent {
    pub date: NaiveDate,
    pub kind: ShiftKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Popup reminder offsets in minutes, ordered, may repeat.
    pub reminders: Vec<i64>,
}

impl ShiftEvent {
    pub fn length_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

/// Decode a roster row into shift events for `[start_date, end_date]`,
/// ascending. A day with positive day hours emits a Day shift and ignores
/// the night cell; otherwise positive night hours emit a Night shift;
/// otherwise nothing. Zero-length shifts are never emitted, and hour values
/// too large to produce a valid end timestamp emit nothing either.
pub fn decode(
    row: &ScheduleRow,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reminders: &[i64],
) -> Vec<ShiftEvent> {
    let mut events = Vec::new();
    let mut date = start_date;

    while date <= end_date {
        let (day_hours, night_hours) = row.hours_for(date.day());

        let decoded = if day_hours > 0 {
            Some((ShiftKind::Day, day_hours))
        } else if night_hours > 0 {
            Some((ShiftKind::Night, night_hours))
        } else {
            None
        };

        if let Some((kind, length)) = decoded {
            let start = date.and_time(kind.start_time());
            // Absurdly large hour values overflow the end timestamp and
            // degrade to "no shift", like any other malformed cell.
            let end = Duration::try_hours(length).and_then(|d| start.checked_add_signed(d));

            if let Some(end) = end {
                events.push(ShiftEvent {
                    date,
                    kind,
                    start,
                    end,
                    reminders: reminders.to_vec(),
                });
            }
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    tracing::debug!(
        "Decoded {} shift(s) between {} and {}",
        events.len(),
        start_date,
        end_date
    );

    events
}

/// Last day of the month `date` falls in.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
