use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use crate::{
    errors::SheetError,
    sheet::RowSource,
    types::{SheetValuesResponse, SpreadsheetResponse},
};

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const SHEETS_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

/// How requests against the Sheets API are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetAuth {
    /// Path to a downloaded service-account key file.
    ServiceAccount(PathBuf),
    /// API key, only works for sheets shared publicly.
    ApiKey(String),
}

/// Worksheet of a Google spreadsheet read through the Sheets v4 values API.
#[derive(Debug, Clone)]
pub struct GoogleSheetSource {
    sheet_id: String,
    tab: Option<String>,
    auth: SheetAuth,
    api_url: String,
}

impl GoogleSheetSource {
    pub fn new(sheet_id: String, tab: Option<String>, auth: SheetAuth) -> Self {
        GoogleSheetSource {
            sheet_id,
            tab,
            auth,
            api_url: SHEETS_API_URL.to_string(),
        }
    }

    /// Points the source at another Sheets API base URL, e.g. a local mock.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, SheetError> {
        match &self.auth {
            SheetAuth::ApiKey(key) => Ok(request.query(&[("key", key)])),
            SheetAuth::ServiceAccount(path) => {
                let token = service_account_token(path).await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    /// Title of the first worksheet, used when no tab is configured.
    async fn first_tab(&self, client: &Client) -> Result<String, SheetError> {
        let url = self.spreadsheet_url(&[])?;
        let request = client
            .get(url)
            .query(&[("fields", "sheets.properties.title")]);

        let response = self
            .authorize(request)
            .await?
            .send()
            .await?
            .error_for_status()?;
        let spreadsheet = response.json::<SpreadsheetResponse>().await?;

        spreadsheet
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| SheetError::Schema(format!("no worksheet in {}", self.sheet_id)))
    }

    fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SheetError::Auth(format!("invalid Sheets API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Auth("Sheets API url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&self.sheet_id)
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RowSource for GoogleSheetSource {
    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        let client = Client::new();

        let tab = match &self.tab {
            Some(tab) => tab.clone(),
            None => self.first_tab(&client).await?,
        };

        let range = a1_range(&tab);
        let url = self.spreadsheet_url(&["values", range.as_str()])?;
        let response = self
            .authorize(client.get(url))
            .await?
            .send()
            .await?
            .error_for_status()?;

        let values = response.json::<SheetValuesResponse>().await?;
        Ok(pad_rows(values.values))
    }

    fn describe(&self) -> String {
        match &self.tab {
            Some(tab) => format!("Google sheet {} ({})", self.sheet_id, tab),
            None => format!("Google sheet {}", self.sheet_id),
        }
    }
}

/// The values API leaves out trailing empty cells, so a row whose last
/// column is blank comes back short. Pads every row to the header width.
fn pad_rows(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.first().map(Vec::len).unwrap_or_default();
    for row in rows.iter_mut().skip(1) {
        if row.len() < width {
            row.resize(width, String::new());
        }
    }
    rows
}

/// Quotes a worksheet title so it can be used as a whole-sheet A1 range.
pub fn a1_range(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

async fn service_account_token(path: &Path) -> Result<String, SheetError> {
    let key = yup_oauth2::read_service_account_key(path)
        .await
        .map_err(|e| SheetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

    let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| SheetError::Auth(e.to_string()))?;

    let token = auth
        .token(SHEETS_SCOPES)
        .await
        .map_err(|e| SheetError::Auth(e.to_string()))?;

    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| SheetError::Auth("service account returned no access token".to_string()))
}
