//! Notion record sink integration.

pub mod client;
pub mod payload;
pub mod types;

pub use client::NotionClient;
pub use types::{RecordSink, SinkError, VideoRecord};
