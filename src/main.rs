use captionflow::archive::FsArchive;
use captionflow::catalog::CatalogClient;
use captionflow::notion::NotionClient;
use captionflow::processing::{IngestionPipeline, PipelineSettings, Selection};
use captionflow::{config, logging};
use clap::Parser;

/// Import VOD closed captions from the mediator catalog into Notion.
#[derive(Parser)]
#[command(name = "captionflow", version, about)]
struct Cli {
    /// Pick the category at this position in source order (default: 0).
    #[arg(long, conflicts_with = "category_key")]
    category_index: Option<usize>,
    /// Pick the category with this exact key.
    #[arg(long)]
    category_key: Option<String>,
    /// Pick the subcategory at this position in source order (default: 2).
    #[arg(long, conflicts_with = "subcategory_key")]
    subcategory_index: Option<usize>,
    /// Pick the subcategory with this exact key.
    #[arg(long)]
    subcategory_key: Option<String>,
    /// Override the configured catalog language code for this run.
    #[arg(long)]
    language: Option<String>,
}

fn selection(key: Option<String>, index: Option<usize>, default_index: usize) -> Selection {
    match (key, index) {
        (Some(key), _) => Selection::Key(key),
        (None, Some(index)) => Selection::Index(index),
        (None, None) => Selection::Index(default_index),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_config();
    logging::init_tracing();

    let catalog = CatalogClient::new(cli.language)?;
    let sink = NotionClient::new()?;
    let pipeline = IngestionPipeline::new(
        Box::new(catalog),
        Box::new(sink),
        Box::new(FsArchive::new()),
        PipelineSettings::from_config(),
    );

    let category = selection(cli.category_key, cli.category_index, 0);
    let subcategory = selection(cli.subcategory_key, cli.subcategory_index, 2);
    let outcome = pipeline.run(&category, &subcategory).await?;

    tracing::info!(
        category = %outcome.category_key,
        subcategory = %outcome.subcategory_key,
        successes = outcome.successes,
        total = outcome.total,
        failures = outcome.failures.len(),
        "Import finished"
    );
    Ok(())
}
