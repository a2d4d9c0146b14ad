//! Google Sheets v4 REST backend.

use crate::backend::auth::TokenProvider;
use crate::backend::BackendError;
use crate::backend::SheetsBackend;
use crate::backend::ValueInput;
use crate::error::SheetStoreError;
use crate::spreadsheet::Grid;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Response of `spreadsheets.values.get`. `values` is absent for an empty range.
#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

/// A backend bound to one spreadsheet of the Google Sheets service.
pub struct GoogleSheetsBackend {
    agent: ureq::Agent,
    base_url: Url,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl GoogleSheetsBackend {
    pub fn new(
        agent: ureq::Agent,
        base_url: &str,
        spreadsheet_id: &str,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Result<Self, SheetStoreError> {
        Ok(GoogleSheetsBackend {
            agent,
            base_url: Url::parse(base_url)?,
            spreadsheet_id: spreadsheet_id.to_owned(),
            tokens,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Builds `{base}/spreadsheets/{id}/{segments...}`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, SheetStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SheetStoreError> {
        let id = self.spreadsheet_id.as_str();
        self.url(&[id, "values", &format!("{range}{suffix}")])
    }

    /// Values url carrying the `valueInputOption` query of a write.
    fn write_url(&self, range: &str, suffix: &str, input: ValueInput) -> Result<Url, SheetStoreError> {
        let mut url = self.values_url(range, suffix)?;
        url.query_pairs_mut().append_pair("valueInputOption", input.as_str());
        Ok(url)
    }

    /// Sends an authorized request and decodes the JSON response.
    fn call(&self, method: &str, url: Url, body: Option<Value>) -> Result<Value, SheetStoreError> {
        let token = self.tokens.access_token()?;
        debug!(method, url = %url, "calling sheets api");
        let request = self
            .agent
            .request_url(method, &url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Accept", "application/json");
        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(from_ureq)?;
        serde_json::from_reader(response.into_reader())
            .map_err(|error| BackendError::Decode(error.to_string()).into())
    }
}

/// Maps a ureq failure onto the backend taxonomy.
fn from_ureq(error: ureq::Error) -> BackendError {
    match error {
        ureq::Error::Status(code, response) => BackendError::Status {
            code,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => BackendError::Transport(transport.to_string()),
    }
}

/// `batchUpdate` request removing physical rows `[start, end)` of one sheet.
fn delete_rows_request(sheet_id: i64, start: usize, end: usize) -> Value {
    json!({
        "requests": [{
            "deleteDimension": {
                "range": {
                    "sheetId": sheet_id,
                    "dimension": "ROWS",
                    "startIndex": start,
                    "endIndex": end,
                }
            }
        }]
    })
}

/// Cells come back as formatted strings, but numbers and booleans are tolerated.
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(value) => value,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsBackend for GoogleSheetsBackend {
    fn read_range(&self, range: &str) -> Result<Grid, SheetStoreError> {
        let url = self.values_url(range, "")?;
        let body: ValueRange = serde_json::from_value(self.call("GET", url, None)?)
            .map_err(|error| BackendError::Decode(error.to_string()))?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    fn update_range(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError> {
        let url = self.write_url(range, "", input)?;
        let body = json!({ "range": range, "majorDimension": "ROWS", "values": rows });
        self.call("PUT", url, Some(body))?;
        Ok(())
    }

    fn append_rows(&self, range: &str, rows: Grid, input: ValueInput) -> Result<(), SheetStoreError> {
        let url = self.write_url(range, ":append", input)?;
        let body = json!({ "majorDimension": "ROWS", "values": rows });
        self.call("POST", url, Some(body))?;
        Ok(())
    }

    fn sheet_id(&self, title: &str) -> Result<Option<i64>, SheetStoreError> {
        let mut url = self.url(&[self.spreadsheet_id.as_str()])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");
        let body: Spreadsheet = serde_json::from_value(self.call("GET", url, None)?)
            .map_err(|error| BackendError::Decode(error.to_string()))?;
        Ok(body
            .sheets
            .into_iter()
            .find(|sheet| sheet.properties.title == title)
            .map(|sheet| sheet.properties.sheet_id))
    }

    fn delete_rows(&self, sheet_id: i64, start: usize, end: usize) -> Result<(), SheetStoreError> {
        let url = self.url(&[&format!("{}:batchUpdate", self.spreadsheet_id)])?;
        let body = delete_rows_request(sheet_id, start, end);
        self.call("POST", url, Some(body))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::StaticToken;

    fn backend() -> GoogleSheetsBackend {
        GoogleSheetsBackend::new(
            ureq::agent(),
            "https://sheets.googleapis.com/v4/",
            "sheet123",
            Arc::new(StaticToken("token".to_owned())),
        )
        .unwrap()
    }

    #[test]
    fn values_url_encodes_range() {
        let url = backend().values_url("'My Tab'!A:J", "").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/'My%20Tab'!A:J"
        );
    }

    #[test]
    fn append_url_keeps_method_suffix() {
        let url = backend().values_url("Personas!A:A", ":append").unwrap();
        assert!(url.path().ends_with("/values/Personas!A:A:append"));
    }

    #[test]
    fn batch_update_url() {
        let backend = backend();
        let url = backend.url(&["sheet123:batchUpdate"]).unwrap();
        assert_eq!(url.as_str(), "https://sheets.googleapis.com/v4/spreadsheets/sheet123:batchUpdate");
    }

    #[test]
    fn writes_carry_value_input_option() {
        let backend = backend();
        let update = backend.write_url("Content_Calendar!A2:L2", "", ValueInput::Raw).unwrap();
        assert!(update.path().ends_with("/values/Content_Calendar!A2:L2"));
        assert_eq!(update.query(), Some("valueInputOption=RAW"));

        let append = backend.write_url("Content_Calendar!A:A", ":append", ValueInput::UserEntered).unwrap();
        assert!(append.path().ends_with("/values/Content_Calendar!A:A:append"));
        assert_eq!(append.query(), Some("valueInputOption=USER_ENTERED"));
    }

    #[test]
    fn delete_request_covers_one_row_span() {
        let body = delete_rows_request(42, 1, 2);
        assert_eq!(body, json!({
            "requests": [{
                "deleteDimension": {
                    "range": { "sheetId": 42, "dimension": "ROWS", "startIndex": 1, "endIndex": 2 }
                }
            }]
        }));
    }

    #[test]
    fn cells_are_stringified() {
        assert_eq!(cell_to_string(json!("TRUE")), "TRUE");
        assert_eq!(cell_to_string(json!(3)), "3");
        assert_eq!(cell_to_string(json!(true)), "true");
        assert_eq!(cell_to_string(Value::Null), "");
    }

    #[test]
    fn value_range_without_values_is_empty() {
        let body: ValueRange = serde_json::from_value(json!({ "range": "Jobs!A1:L1000" })).unwrap();
        assert!(body.values.is_empty());
    }
}
