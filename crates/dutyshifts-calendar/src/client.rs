//! Google Calendar API client.

use chrono::NaiveDateTime;
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::*;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Wall-clock timestamp format sent alongside an explicit time zone.
const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct CalendarClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: CALENDAR_API_BASE.to_string(),
        }
    }

    /// Client pointed at a custom endpoint, used by tests.
    pub fn new_with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// List all calendars visible to the user.
    ///
    /// Only the first page of the calendar list is read; the target
    /// calendar is expected to be among the user's own calendars.
    #[instrument(skip(self), level = "info")]
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>, CalendarError> {
        let url = format!("{}/users/me/calendarList", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let resp: CalendarListResponse = self.handle_response(response).await?;
        Ok(resp.items.into_iter().map(Calendar::from).collect())
    }

    /// Delete a whole calendar, including every event it holds.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_calendar(&self, calendar_id: &str) -> Result<(), CalendarError> {
        let url = format!(
            "{}/calendars/{}",
            self.base_url,
            urlencoding::encode(calendar_id),
        );

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        // Delete returns 204 No Content on success
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }

    /// Create a new calendar, returning its assigned id.
    #[instrument(skip(self, description), level = "info")]
    pub async fn create_calendar(
        &self,
        summary: &str,
        description: &str,
        time_zone: &str,
    ) -> Result<String, CalendarError> {
        let url = format!("{}/calendars", self.base_url);

        let body = serde_json::json!({
            "summary": summary,
            "description": description,
            "timeZone": time_zone,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        let created: ApiCreatedCalendar = self.handle_response(response).await?;
        Ok(created.id)
    }

    /// Insert one event with explicit popup reminders.
    ///
    /// Timestamps are wall-clock in `time_zone`. Default reminders are
    /// always disabled; each offset becomes one popup override.
    #[instrument(skip(self, description, reminder_minutes), level = "info")]
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        summary: &str,
        description: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        time_zone: &str,
        reminder_minutes: &[i64],
    ) -> Result<String, CalendarError> {
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id),
        );

        let overrides: Vec<serde_json::Value> = reminder_minutes
            .iter()
            .map(|minutes| serde_json::json!({"method": "popup", "minutes": minutes}))
            .collect();

        let body = serde_json::json!({
            "summary": summary,
            "description": description,
            "start": {
                "dateTime": start.format(EVENT_TIME_FORMAT).to_string(),
                "timeZone": time_zone,
            },
            "end": {
                "dateTime": end.format(EVENT_TIME_FORMAT).to_string(),
                "timeZone": time_zone,
            },
            "reminders": {
                "useDefault": false,
                "overrides": overrides,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        let created: ApiCreatedEvent = self.handle_response(response).await?;
        Ok(created.id)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CalendarError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(CalendarError::AuthRequired)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::CalendarNotFound(text))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CalendarError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shift_times() -> (NaiveDateTime, NaiveDateTime) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        (
            date.and_hms_opt(20, 0, 0).unwrap(),
            date.succ_opt().unwrap().and_hms_opt(4, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_calendars() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"id": "primary", "summary": "My Calendar"},
                    {"id": "cal2", "summary": "DutyShifts"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("test_token", &mock_server.uri());
        let calendars = client.list_calendars().await.unwrap();

        assert_eq!(calendars.len(), 2);
        assert_eq!(calendars[1].summary, "DutyShifts");
    }

    #[tokio::test]
    async fn test_delete_calendar() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/calendars/cal2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("test_token", &mock_server.uri());
        assert!(client.delete_calendar("cal2").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_calendar_returns_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendars"))
            .and(body_partial_json(serde_json::json!({
                "summary": "DutyShifts",
                "description": "DutyShifts (autogenerated calendar)",
                "timeZone": "Europe/Kiev"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "new-cal", "summary": "DutyShifts"})),
            )
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("test_token", &mock_server.uri());
        let id = client
            .create_calendar(
                "DutyShifts",
                "DutyShifts (autogenerated calendar)",
                "Europe/Kiev",
            )
            .await
            .unwrap();

        assert_eq!(id, "new-cal");
    }

    #[tokio::test]
    async fn test_insert_event_payload_shape() {
        let mock_server = MockServer::start().await;
        let (start, end) = shift_times();

        Mock::given(method("POST"))
            .and(path("/calendars/cal2/events"))
            .and(body_partial_json(serde_json::json!({
                "summary": "Night shift",
                "description": "Night shift",
                "start": {"dateTime": "2026-03-02T20:00:00", "timeZone": "Europe/Kiev"},
                "end": {"dateTime": "2026-03-03T04:00:00", "timeZone": "Europe/Kiev"},
                "reminders": {
                    "useDefault": false,
                    "overrides": [
                        {"method": "popup", "minutes": 30},
                        {"method": "popup", "minutes": 10}
                    ]
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "event-1"})),
            )
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("test_token", &mock_server.uri());
        let id = client
            .insert_event(
                "cal2",
                "Night shift",
                "Night shift",
                start,
                end,
                "Europe/Kiev",
                &[30, 10],
            )
            .await
            .unwrap();

        assert_eq!(id, "event-1");
    }

    #[tokio::test]
    async fn test_insert_event_empty_reminders_still_disable_defaults() {
        let mock_server = MockServer::start().await;
        let (start, end) = shift_times();

        Mock::given(method("POST"))
            .and(path("/calendars/cal2/events"))
            .and(body_partial_json(serde_json::json!({
                "reminders": {"useDefault": false, "overrides": []}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "event-2"})),
            )
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("test_token", &mock_server.uri());
        let id = client
            .insert_event(
                "cal2",
                "Day shift",
                "Day shift",
                start,
                end,
                "Europe/Kiev",
                &[],
            )
            .await
            .unwrap();

        assert_eq!(id, "event-2");
    }

    #[tokio::test]
    async fn test_token_expired() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("expired_token", &mock_server.uri());
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "60"))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::new_with_base_url("token", &mock_server.uri());
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::RateLimited(60))));
    }
}
