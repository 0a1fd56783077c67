//! Sheets API response types.

use serde::Deserialize;

/// Spreadsheet metadata, restricted to sheet properties.
#[derive(Debug, Deserialize)]
pub struct ApiSpreadsheet {
    #[serde(default)]
    pub sheets: Vec<ApiSheet>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSheet {
    pub properties: ApiSheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSheetProperties {
    pub title: String,

    /// Display position of the sheet tab.
    #[serde(default)]
    pub index: i64,

    #[serde(default)]
    pub hidden: bool,
}

/// A rectangular block of formatted cell values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: Option<String>,
    pub major_dimension: Option<String>,

    /// Rows of raw cell strings; trailing empty cells are omitted by the API.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}
