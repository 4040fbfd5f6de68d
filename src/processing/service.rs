//! Ingestion pipeline coordinating catalog traversal, caption processing,
//! and record writes.

use crate::archive::CaptionArchive;
use crate::catalog::CatalogSource;
use crate::config::get_config;
use crate::notion::{RecordSink, VideoRecord};
use crate::processing::chunking::chunk_text;
use crate::processing::normalize::normalize;
use crate::processing::types::{
    ChunkingError, FailureReason, PipelineError, RunOutcome, RunReport, Selection,
};
use time::OffsetDateTime;

/// Tunables the pipeline needs beyond its injected collaborators.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Key of the catalog root node whose children form the category list.
    pub root_category_key: String,
    /// Maximum number of characters per stored text block.
    pub chunk_max_chars: usize,
}

impl PipelineSettings {
    /// Derive settings from the loaded configuration.
    pub fn from_config() -> Self {
        let config = get_config();
        Self {
            root_category_key: config.catalog_root_key.clone(),
            chunk_max_chars: config.chunk_max_chars,
        }
    }
}

/// Orchestrates one end-to-end import run.
///
/// Collaborators are injected at construction time so the run's control flow
/// is testable without network or filesystem access. One instance performs
/// one run at a time; nothing is shared across items except the run report.
pub struct IngestionPipeline {
    catalog: Box<dyn CatalogSource>,
    sink: Box<dyn RecordSink>,
    archive: Box<dyn CaptionArchive>,
    settings: PipelineSettings,
}

impl IngestionPipeline {
    /// Build a pipeline over the given collaborators.
    pub fn new(
        catalog: Box<dyn CatalogSource>,
        sink: Box<dyn RecordSink>,
        archive: Box<dyn CaptionArchive>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            catalog,
            sink,
            archive,
            settings,
        }
    }

    /// Execute one run over the selected category and subcategory.
    ///
    /// Catalog failures while resolving the session, category list,
    /// subcategory list, or media list abort the run. Per-item conditions
    /// (missing caption, caption fetch failure, archive or sink write
    /// failure) are recorded in the report and iteration continues. When any
    /// item was skipped, the report is flushed to the error sink before the
    /// outcome is returned.
    pub async fn run(
        &self,
        category: &Selection,
        subcategory: &Selection,
    ) -> Result<RunOutcome, PipelineError> {
        if self.settings.chunk_max_chars == 0 {
            return Err(ChunkingError::InvalidChunkSize.into());
        }

        tracing::info!("Acquiring catalog session");
        let session = self.catalog.authenticate().await?;

        let categories = self
            .catalog
            .list_subcategories(&self.settings.root_category_key, &session)
            .await?;
        tracing::info!(count = categories.len(), "Resolved category list");
        let category_key = category
            .pick(&categories)
            .ok_or_else(|| PipelineError::Selection {
                stage: "category",
                selection: category.to_string(),
                available: categories.len(),
            })?
            .to_string();

        let subcategories = self
            .catalog
            .list_subcategories(&category_key, &session)
            .await?;
        tracing::info!(
            category = %category_key,
            count = subcategories.len(),
            "Resolved subcategory list"
        );
        let subcategory_key = subcategory
            .pick(&subcategories)
            .ok_or_else(|| PipelineError::Selection {
                stage: "subcategory",
                selection: subcategory.to_string(),
                available: subcategories.len(),
            })?
            .to_string();

        let media = self.catalog.list_media(&subcategory_key, &session).await?;
        tracing::info!(
            category = %category_key,
            subcategory = %subcategory_key,
            items = media.len(),
            "Resolved media list"
        );

        let mut report = RunReport::new(category_key, subcategory_key, media.len());
        for (index, item) in media.iter().enumerate() {
            let Some(track) = &item.caption else {
                tracing::warn!(index, title = %item.title, "No caption track");
                report.record_failure(index, &item.title, FailureReason::MissingCaption);
                continue;
            };

            let raw = match self.catalog.fetch_caption(track, &session).await {
                Ok(raw) => raw,
                Err(error) => {
                    tracing::warn!(index, title = %item.title, %error, "Caption fetch failed");
                    report.record_failure(index, &item.title, FailureReason::CaptionFetch);
                    continue;
                }
            };

            let cleaned = normalize(&raw);
            let chunks = chunk_text(&cleaned, self.settings.chunk_max_chars)?;

            if let Err(error) = self.archive.write_caption(index, &item.title, &cleaned).await {
                tracing::warn!(index, title = %item.title, %error, "Caption archive failed");
                report.record_failure(index, &item.title, FailureReason::ArchiveWrite);
                continue;
            }

            let record = VideoRecord {
                title: item.title.clone(),
                date: item.published_date().to_string(),
                chunks,
            };
            if let Err(error) = self.sink.create_record(&record).await {
                tracing::warn!(index, title = %item.title, %error, "Record write failed");
                report.record_failure(index, &item.title, FailureReason::SinkWrite);
                continue;
            }

            tracing::info!(index, title = %item.title, "Imported");
            report.record_success();
        }

        if report.has_failures() {
            let file_name = report.file_name(&run_timestamp());
            self.archive
                .write_report(&file_name, &report.render())
                .await?;
            tracing::info!(report = %file_name, "Failure report written");
        }

        Ok(report.into_outcome())
    }
}

fn run_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
