//! HTTP client wrapper for the Notion pages API.

use crate::config::get_config;
use crate::notion::payload::build_page_body;
use crate::notion::types::{RecordSink, SinkError, VideoRecord};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Version pin required by the Notion REST API on every request.
const NOTION_VERSION: &str = "2022-06-28";

/// Lightweight HTTP client writing one page per imported video.
pub struct NotionClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) token: String,
    pub(crate) database_id: String,
    pub(crate) category_tag: String,
    pub(crate) subcategory_tag: String,
}

impl NotionClient {
    /// Construct a new client using configuration derived from the environment.
    pub fn new() -> Result<Self, SinkError> {
        let config = get_config();
        let client = Client::builder()
            .user_agent("captionflow/0.1")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let base_url =
            normalize_base_url(&config.notion_base_url).map_err(SinkError::InvalidUrl)?;
        tracing::debug!(url = %base_url, database = %config.notion_database_id, "Initialized Notion HTTP client");

        Ok(Self {
            client,
            base_url,
            token: config.notion_token.clone(),
            database_id: config.notion_database_id.clone(),
            category_tag: config.notion_category_tag.clone(),
            subcategory_tag: config.notion_subcategory_tag.clone(),
        })
    }
}

#[async_trait]
impl RecordSink for NotionClient {
    async fn create_record(&self, record: &VideoRecord) -> Result<(), SinkError> {
        let body = build_page_body(
            &self.database_id,
            &self.category_tag,
            &self.subcategory_tag,
            record,
        );

        let response = self
            .client
            .post(format!("{}/v1/pages", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::debug!(title = %record.title, chunks = record.chunks.len(), "Page created");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = SinkError::UnexpectedStatus { status, body };
            tracing::error!(title = %record.title, error = %error, "Notion request failed");
            Err(error)
        }
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    Ok(parsed.to_string().trim_end_matches('/').to_string())
}
