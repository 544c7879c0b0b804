use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use super::{BookingStore, ValueInputMode};
use crate::config::AppConfig;
use crate::errors::StoreError;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh this long before Google's stated expiry.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// `source` is either a path to the key file or the key JSON itself.
    pub fn load(source: &str) -> Result<Self, StoreError> {
        let raw = if Path::new(source).exists() {
            std::fs::read_to_string(source).map_err(|e| {
                StoreError::Config(format!("failed to read credentials file {source}: {e}"))
            })?
        } else {
            source.to_string()
        };

        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Config(format!("invalid service account credentials: {e}")))
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Google Sheets worksheets through the v4 REST API, authenticated as a
/// service account.
///
/// Credentials and the spreadsheet id are checked on every call rather than at
/// construction, so a misconfigured deployment still starts and reports the
/// problem per request.
pub struct SheetsStore {
    client: reqwest::Client,
    credentials: Option<String>,
    sheet_id: Option<String>,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

impl SheetsStore {
    pub fn new(credentials: Option<String>, sheet_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            sheet_id,
            api_base: SHEETS_API.to_string(),
            token: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.service_account_json.clone(), config.sheet_id.clone())
    }

    /// Points the store at another Sheets-compatible endpoint, such as a
    /// local stand-in.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn credentials(&self) -> Result<&str, StoreError> {
        self.credentials
            .as_deref()
            .ok_or_else(|| StoreError::Config("GSPREAD_SERVICE_ACCOUNT_JSON not set".to_string()))
    }

    fn sheet_id(&self) -> Result<&str, StoreError> {
        self.sheet_id
            .as_deref()
            .ok_or_else(|| StoreError::Config("BOOKINGS_SHEET_ID not set".to_string()))
    }

    /// Cached bearer token, refreshed through a signed JWT assertion.
    async fn access_token(&self) -> Result<String, StoreError> {
        let credentials = self.credentials()?;
        self.sheet_id()?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let key = ServiceAccountKey::load(credentials)?;
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: SHEETS_SCOPE,
            aud: &key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + 3600,
        };
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid private key: {e}")))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| StoreError::Auth(format!("failed to sign assertion: {e}")))?;

        let resp = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = check(resp).await?.json().await?;

        tracing::debug!(client_email = %key.client_email, "refreshed sheets access token");

        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in - TOKEN_EXPIRY_MARGIN_SECS),
        });
        Ok(value)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| StoreError::Config(format!("invalid sheets API url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Config("sheets API url cannot have a path".to_string()))?
            .push(self.sheet_id()?)
            .extend(segments);
        Ok(url)
    }

    async fn worksheet_titles(&self, token: &str) -> Result<Vec<String>, StoreError> {
        let mut url = self.url(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let resp = self.client.get(url).bearer_auth(token).send().await?;
        let meta: SpreadsheetMeta = check(resp).await?.json().await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }
}

/// A1 notation for a whole worksheet. Titles are quoted so names with spaces
/// or punctuation address the sheet rather than a cell range.
pub fn a1_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        body,
    })
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl BookingStore for SheetsStore {
    async fn ensure_table(&self, table: &str, header: &[&str]) -> Result<(), StoreError> {
        let token = self.access_token().await?;

        if self.worksheet_titles(&token).await?.iter().any(|t| t == table) {
            return Ok(());
        }

        let batch_update = format!("{}:batchUpdate", self.sheet_id()?);
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| StoreError::Config(format!("invalid sheets API url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Config("sheets API url cannot have a path".to_string()))?
            .push(&batch_update);

        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": table,
                        "gridProperties": { "rowCount": 1000, "columnCount": 20 },
                    }
                }
            }]
        });
        let resp = self.client.post(url).bearer_auth(&token).json(&body).send().await?;
        check(resp).await?;

        let mut url = self.url(&["values", &format!("{}!A1", a1_range(table))])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", ValueInputMode::Raw.as_str());
        let resp = self
            .client
            .put(url)
            .bearer_auth(&token)
            .json(&json!({ "values": [header] }))
            .send()
            .await?;
        check(resp).await?;

        tracing::info!(table, "created worksheet with header row");
        Ok(())
    }

    async fn read_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let token = self.access_token().await?;
        let url = self.url(&["values", &a1_range(table)])?;

        let resp = self.client.get(url).bearer_auth(&token).send().await?;
        let range: ValueRange = check(resp).await?.json().await?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append_row(
        &self,
        table: &str,
        values: &[String],
        mode: ValueInputMode,
    ) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let mut url = self.url(&["values", &format!("{}:append", a1_range(table))])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", mode.as_str())
            .append_pair("insertDataOption", "INSERT_ROWS");

        let resp = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(&json!({ "values": [values] }))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}
