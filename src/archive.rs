//! Filesystem sinks for cleaned captions and failure reports.
//!
//! Writes are awaited so a failure is observable and attributable to the
//! specific item before the pipeline moves on.

use crate::config::get_config;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned while writing archive files or reports.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Underlying filesystem operation failed.
    #[error("Archive write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Local write sinks used by the pipeline: caption archive and failure report.
#[async_trait]
pub trait CaptionArchive: Send + Sync {
    /// Persist one cleaned caption, keyed by the item's index and title.
    async fn write_caption(
        &self,
        index: usize,
        title: &str,
        text: &str,
    ) -> Result<(), ArchiveError>;

    /// Persist the end-of-run failure report under the given file name.
    async fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ArchiveError>;
}

/// Directory-backed archive writing plain text files.
pub struct FsArchive {
    caption_dir: PathBuf,
    report_dir: PathBuf,
}

impl FsArchive {
    /// Construct an archive rooted at the configured directories.
    pub fn new() -> Self {
        let config = get_config();
        Self {
            caption_dir: config.archive_dir.clone(),
            report_dir: config.report_dir.clone(),
        }
    }

    /// Construct an archive rooted at explicit directories.
    pub fn with_dirs(caption_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            caption_dir: caption_dir.into(),
            report_dir: report_dir.into(),
        }
    }

    async fn write_file(dir: &Path, file_name: &str, contents: &str) -> Result<(), ArchiveError> {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join(file_name), contents).await?;
        Ok(())
    }
}

#[async_trait]
impl CaptionArchive for FsArchive {
    async fn write_caption(
        &self,
        index: usize,
        title: &str,
        text: &str,
    ) -> Result<(), ArchiveError> {
        let file_name = format!("{index}_{}.txt", sanitize_file_stem(title));
        Self::write_file(&self.caption_dir, &file_name, text).await?;
        tracing::debug!(index, file = %file_name, "Caption archived");
        Ok(())
    }

    async fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ArchiveError> {
        Self::write_file(&self.report_dir, &sanitize_file_stem(file_name), contents).await
    }
}

/// Replace characters that would escape or break a file name.
///
/// Titles come straight from the catalog and may contain path separators or
/// other reserved characters; the archive key must stay inside its directory.
pub(crate) fn sanitize_file_stem(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
