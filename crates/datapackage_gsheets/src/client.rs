//! Google Sheets and Drive calls used to build a template.

use crate::auth::fetch_access_token;
use crate::{Result, ServiceAccountKey, SheetsError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// A newly created spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreadsheet {
    /// Spreadsheet ID
    pub id: String,
    /// ID of the sheet every new spreadsheet starts with
    pub default_sheet_id: i64,
}

impl Spreadsheet {
    /// Browser URL of the spreadsheet.
    pub fn url(&self) -> String {
        spreadsheet_url(&self.id)
    }
}

/// Browser URL of a spreadsheet ID.
pub fn spreadsheet_url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}", id)
}

/// The Google API operations template building needs.
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Returns the ID of a non-trashed spreadsheet named `name`, if one is visible.
    async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>>;

    /// Creates an empty spreadsheet titled `name`.
    async fn create_spreadsheet(&self, name: &str) -> Result<Spreadsheet>;

    /// Grants `email` writer access to a spreadsheet.
    async fn share(&self, spreadsheet_id: &str, email: &str) -> Result<()>;

    /// Applies Sheets `batchUpdate` requests to a spreadsheet.
    async fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Value>) -> Result<()>;
}

/// [`SheetsClient`] talking to the Google REST APIs.
#[derive(Debug, Clone)]
pub struct HttpSheetsClient {
    http: reqwest::Client,
    token: String,
}

impl HttpSheetsClient {
    /// Authenticates as the service account.
    pub async fn connect(key: &ServiceAccountKey) -> Result<Self> {
        let http = reqwest::Client::new();
        let token = fetch_access_token(&http, key).await?;
        info!("Authenticated as {}", key.client_email);
        Ok(Self { http, token })
    }

    /// Wraps an existing bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.token).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

/// Drive query matching spreadsheets with an exact name.
pub fn spreadsheet_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

#[async_trait]
impl SheetsClient for HttpSheetsClient {
    async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>> {
        debug!("Looking for spreadsheet '{}'", name);
        let query = spreadsheet_query(name);
        let body: Value = self
            .send(
                self.http
                    .get(DRIVE_FILES_API)
                    .query(&[("q", query.as_str()), ("fields", "files(id,name)")]),
            )
            .await?;

        Ok(body["files"]
            .as_array()
            .and_then(|files| files.first())
            .and_then(|file| file["id"].as_str())
            .map(str::to_string))
    }

    async fn create_spreadsheet(&self, name: &str) -> Result<Spreadsheet> {
        let body: Value = self
            .send(
                self.http
                    .post(SHEETS_API)
                    .json(&json!({ "properties": { "title": name } })),
            )
            .await?;

        let id = body["spreadsheetId"]
            .as_str()
            .ok_or_else(|| SheetsError::UnexpectedResponse("missing spreadsheetId".to_string()))?
            .to_string();
        let default_sheet_id = body["sheets"][0]["properties"]["sheetId"]
            .as_i64()
            .unwrap_or(0);

        info!("Created spreadsheet '{}' ({})", name, id);
        Ok(Spreadsheet {
            id,
            default_sheet_id,
        })
    }

    async fn share(&self, spreadsheet_id: &str, email: &str) -> Result<()> {
        let url = format!("{}/{}/permissions", DRIVE_FILES_API, spreadsheet_id);
        let _: Value = self
            .send(self.http.post(url).json(&json!({
                "role": "writer",
                "type": "user",
                "emailAddress": email,
            })))
            .await?;

        info!("Shared spreadsheet {} with {}", spreadsheet_id, email);
        Ok(())
    }

    async fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Value>) -> Result<()> {
        let url = format!("{}/{}:batchUpdate", SHEETS_API, spreadsheet_id);
        debug!("Sending {} update requests", requests.len());
        let _: Value = self
            .send(self.http.post(url).json(&json!({ "requests": requests })))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spreadsheet_url() {
        let spreadsheet = Spreadsheet {
            id: "abc123".to_string(),
            default_sheet_id: 0,
        };
        assert_eq!(spreadsheet.url(), "https://docs.google.com/spreadsheets/d/abc123");
    }

    #[test]
    fn test_spreadsheet_query_escapes_quotes() {
        assert_eq!(
            spreadsheet_query("Bob's boreholes"),
            "name = 'Bob\\'s boreholes' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }
}
