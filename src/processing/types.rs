//! Core data types and error definitions for the ingestion pipeline.

use crate::archive::ArchiveError;
use crate::catalog::{CatalogError, CategoryNode};
use std::fmt;
use thiserror::Error;

/// Errors produced while splitting cleaned text into storable chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// The caller supplied an impossible chunk length.
    #[error("chunk length must be greater than zero")]
    InvalidChunkSize,
}

/// Errors that abort an ingestion run.
///
/// Per-item conditions (missing caption, failed caption fetch, failed archive
/// or sink write) are not errors at this level; they are recorded in the
/// [`RunReport`] and iteration continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Catalog resolution failed while locating the run's media list.
    #[error("Catalog request failed: {0}")]
    Catalog(#[from] CatalogError),
    /// The configured chunk length cannot produce valid chunks.
    #[error("Failed to chunk caption text: {0}")]
    Chunking(#[from] ChunkingError),
    /// The caller's category or subcategory selection matched nothing.
    #[error("No {stage} matched {selection} ({available} available)")]
    Selection {
        /// Which selection stage failed (`category` or `subcategory`).
        stage: &'static str,
        /// Human-readable form of the selection that was applied.
        selection: String,
        /// Number of keys the selection was applied against.
        available: usize,
    },
    /// The end-of-run failure report could not be persisted.
    #[error("Failed to write failure report: {0}")]
    Report(#[from] ArchiveError),
}

/// One bounded-length fragment of cleaned caption text.
///
/// Chunks are ordered; concatenating a record's chunk texts reproduces the
/// cleaned caption exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChunk {
    /// Fragment text, at most the configured number of characters.
    pub text: String,
}

/// Caller-supplied policy for picking one key out of a listed node set.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Pick the key at this position in source order.
    Index(usize),
    /// Pick the key equal to this value.
    Key(String),
}

impl Selection {
    /// Apply the selection against a node list, returning the matching key.
    pub fn pick<'a>(&self, nodes: &'a [CategoryNode]) -> Option<&'a str> {
        match self {
            Self::Index(index) => nodes.get(*index).map(|node| node.key.as_str()),
            Self::Key(key) => nodes
                .iter()
                .find(|node| node.key == *key)
                .map(|node| node.key.as_str()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Key(key) => write!(f, "key '{key}'"),
        }
    }
}

/// Why one media item was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The item carries no caption track; recorded as data, not an error.
    MissingCaption,
    /// The caption resource could not be fetched.
    CaptionFetch,
    /// The cleaned text could not be archived locally.
    ArchiveWrite,
    /// The record sink rejected or failed the page write.
    SinkWrite,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::MissingCaption => "missing-caption",
            Self::CaptionFetch => "caption-fetch",
            Self::ArchiveWrite => "archive-write",
            Self::SinkWrite => "sink-write",
        };
        f.write_str(code)
    }
}

/// One skipped media item, in iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Position of the item in the media list.
    pub index: usize,
    /// Title of the item.
    pub title: String,
    /// Why the item was skipped.
    pub reason: FailureReason,
}

/// Run-scoped accounting of imported and skipped items.
#[derive(Debug)]
pub struct RunReport {
    category_key: String,
    subcategory_key: String,
    total: usize,
    successes: usize,
    failures: Vec<Failure>,
}

impl RunReport {
    /// Start a report for a media list of `total` items.
    pub fn new(category_key: String, subcategory_key: String, total: usize) -> Self {
        Self {
            category_key,
            subcategory_key,
            total,
            successes: 0,
            failures: Vec::new(),
        }
    }

    /// Count one fully imported item.
    pub fn record_success(&mut self) {
        self.successes += 1;
    }

    /// Append one failure descriptor, preserving iteration order.
    pub fn record_failure(&mut self, index: usize, title: &str, reason: FailureReason) {
        self.failures.push(Failure {
            index,
            title: title.to_string(),
            reason,
        });
    }

    /// Whether any item was skipped this run.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// File name for the persisted report, embedding the run timestamp and
    /// the selected category/subcategory keys.
    pub fn file_name(&self, timestamp: &str) -> String {
        format!(
            "{timestamp}_{}_{}_ERROR.txt",
            self.category_key, self.subcategory_key
        )
    }

    /// Newline-joined failure list, one `index title [reason]` line per item.
    pub fn render(&self) -> String {
        self.failures
            .iter()
            .map(|failure| format!("{} {} [{}]", failure.index, failure.title, failure.reason))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Finish the report, yielding the run summary.
    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            category_key: self.category_key,
            subcategory_key: self.subcategory_key,
            successes: self.successes,
            total: self.total,
            failures: self.failures,
        }
    }
}

/// Summary of a completed run returned by
/// [`crate::processing::IngestionPipeline::run`].
#[derive(Debug)]
pub struct RunOutcome {
    /// Key of the category the run walked.
    pub category_key: String,
    /// Key of the subcategory the run walked.
    pub subcategory_key: String,
    /// Number of items imported end to end.
    pub successes: usize,
    /// Number of items the media list contained.
    pub total: usize,
    /// Skipped items, in iteration order.
    pub failures: Vec<Failure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(keys: &[&str]) -> Vec<CategoryNode> {
        keys.iter()
            .map(|key| CategoryNode {
                key: key.to_string(),
            })
            .collect()
    }

    #[test]
    fn selection_by_index_respects_source_order() {
        let nodes = nodes(&["a", "b", "c"]);
        assert_eq!(Selection::Index(2).pick(&nodes), Some("c"));
        assert_eq!(Selection::Index(3).pick(&nodes), None);
    }

    #[test]
    fn selection_by_key_matches_exactly() {
        let nodes = nodes(&["a", "b"]);
        assert_eq!(Selection::Key("b".into()).pick(&nodes), Some("b"));
        assert_eq!(Selection::Key("z".into()).pick(&nodes), None);
    }

    #[test]
    fn report_renders_failures_in_order() {
        let mut report = RunReport::new("Cat".into(), "Sub".into(), 3);
        report.record_failure(1, "B", FailureReason::MissingCaption);
        report.record_failure(2, "C", FailureReason::SinkWrite);
        assert_eq!(
            report.render(),
            "1 B [missing-caption]\n2 C [sink-write]"
        );
    }

    #[test]
    fn report_file_name_embeds_run_identity() {
        let report = RunReport::new("VideoOnDemand".into(), "VODTalks".into(), 0);
        assert_eq!(
            report.file_name("2024-05-01T00:00:00Z"),
            "2024-05-01T00:00:00Z_VideoOnDemand_VODTalks_ERROR.txt"
        );
    }

    #[test]
    fn outcome_carries_counters() {
        let mut report = RunReport::new("Cat".into(), "Sub".into(), 2);
        report.record_success();
        report.record_failure(1, "B", FailureReason::MissingCaption);
        let outcome = report.into_outcome();
        assert_eq!(outcome.successes, 1);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.failures.len(), 1);
    }
}
