//! Shared types used by the Notion client and helpers.

use crate::processing::ContentChunk;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned while writing records to the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid Notion URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Notion responded with an unexpected status code.
    #[error("Unexpected Notion response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Notion.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// One structured record handed to the sink per imported video.
#[derive(Debug, Clone)]
pub struct VideoRecord {
    /// Video title, stored as the page title.
    pub title: String,
    /// Published date (date portion only), stored as start and end date.
    pub date: String,
    /// Ordered caption chunks forming the page body.
    pub chunks: Vec<ContentChunk>,
}

/// Write side of the document store as the pipeline produces to it.
///
/// The production implementation is [`crate::notion::NotionClient`]; tests
/// substitute recording fakes.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist one record; ordering of the record's chunks must be preserved.
    async fn create_record(&self, record: &VideoRecord) -> Result<(), SinkError>;
}
