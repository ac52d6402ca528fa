use std::fmt;

use clipper_core::TitleRecord;
use clipper_logging::log_snippet;
use serde_json::{json, Value};

pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_NOTION_ENDPOINT: &str = "https://api.notion.com/v1/pages";

const MAX_ERROR_BODY: usize = 512;

/// Process-wide sink settings, built once at start-up.
///
/// Credentials are optional here so that a missing one surfaces as a sink
/// failure on delivery rather than preventing title extraction.
#[derive(Clone)]
pub struct SinkConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub api_version: String,
    pub endpoint: String,
}

impl SinkConfig {
    pub fn new(api_key: Option<String>, database_id: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            database_id: database_id.filter(|id| !id.trim().is_empty()),
            api_version: DEFAULT_NOTION_VERSION.to_string(),
            endpoint: DEFAULT_NOTION_ENDPOINT.to_string(),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("NOTION_API_KEY");
        }
        if self.database_id.is_none() {
            missing.push("NOTION_DATABASE_ID");
        }
        missing
    }
}

impl fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("api_version", &self.api_version)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink not configured, missing {0}")]
    NotConfigured(String),
    #[error("sink request failed: {0}")]
    Request(String),
    #[error("sink rejected page with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Receives the final `{title, url}` pair.
#[async_trait::async_trait]
pub trait TitleSink: Send + Sync {
    async fn submit(&self, record: &TitleRecord) -> Result<(), SinkError>;
}

/// Page body for the Notion pages API: unchecked `order` box, `URL`,
/// empty `Tags`, `Name` title and one bookmark block of the URL.
pub fn build_page_payload(database_id: &str, record: &TitleRecord) -> Value {
    let url = record.url().as_str();
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "order": { "checkbox": false },
            "URL": { "url": url },
            "Tags": { "multi_select": [] },
            "Name": {
                "title": [
                    { "text": { "content": record.title() } }
                ]
            }
        },
        "children": [
            {
                "object": "block",
                "bookmark": { "caption": [], "url": url }
            }
        ]
    })
}

pub struct NotionSink {
    config: SinkConfig,
    client: reqwest::Client,
}

impl NotionSink {
    pub fn new(config: SinkConfig) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| SinkError::Request(err.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl TitleSink for NotionSink {
    async fn submit(&self, record: &TitleRecord) -> Result<(), SinkError> {
        let (Some(api_key), Some(database_id)) = (&self.config.api_key, &self.config.database_id)
        else {
            return Err(SinkError::NotConfigured(self.config.missing().join(", ")));
        };

        let payload = build_page_payload(database_id, record);
        let response = self
            .client
            .post(self.config.endpoint.as_str())
            .bearer_auth(api_key)
            .header("Notion-Version", self.config.api_version.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|err| SinkError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body: log_snippet(&body, MAX_ERROR_BODY),
            });
        }
        Ok(())
    }
}
