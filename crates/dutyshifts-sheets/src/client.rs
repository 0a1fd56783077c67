//! Google Sheets API client.

use tracing::instrument;

use crate::error::SheetsError;
use crate::types::*;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

pub struct SheetsClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(access_token: &str, spreadsheet_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
        }
    }

    /// Client pointed at a custom endpoint, used by tests.
    pub fn new_with_base_url(access_token: &str, spreadsheet_id: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Titles of all non-hidden sheets, sorted by display index.
    #[instrument(skip(self), level = "info")]
    pub async fn list_sheet_titles(&self) -> Result<Vec<String>, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}?fields=sheets.properties",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let spreadsheet: ApiSpreadsheet = self.handle_response(response).await?;

        let mut properties: Vec<ApiSheetProperties> = spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .filter(|properties| !properties.hidden)
            .collect();
        properties.sort_by_key(|properties| properties.index);

        Ok(properties
            .into_iter()
            .map(|properties| properties.title)
            .collect())
    }

    /// Read a cell range from one sheet as rows of raw strings.
    #[instrument(skip(self), level = "info")]
    pub async fn read_range(
        &self,
        sheet_title: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&format!("{sheet_title}!{range}")),
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let value_range: ValueRange = self.handle_response(response).await?;
        Ok(value_range.values)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, SheetsError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| SheetsError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(SheetsError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(SheetsError::AuthRequired)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(SheetsError::SpreadsheetNotFound(text))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(SheetsError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(SheetsError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
