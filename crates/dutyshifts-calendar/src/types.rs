//! Calendar API types.

use serde::Deserialize;

/// Calendar metadata as used for display-name matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
}

// API Response Types

#[derive(Debug, Deserialize)]
pub struct CalendarListResponse {
    #[serde(default)]
    pub items: Vec<ApiCalendar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCalendar {
    pub id: String,
    pub summary: Option<String>,
}

impl From<ApiCalendar> for Calendar {
    fn from(api: ApiCalendar) -> Self {
        Self {
            id: api.id,
            summary: api.summary.unwrap_or_default(),
        }
    }
}

/// Response to calendar creation; only the assigned id matters here.
#[derive(Debug, Deserialize)]
pub struct ApiCreatedCalendar {
    pub id: String,
}

/// Response to event insertion; only the assigned id matters here.
#[derive(Debug, Deserialize)]
pub struct ApiCreatedEvent {
    pub id: String,
}
