//! Caption processing pipeline: normalization, chunking, and run orchestration.

pub mod chunking;
pub mod normalize;
mod service;
pub mod types;

pub use chunking::chunk_text;
pub use normalize::normalize;
pub use service::{IngestionPipeline, PipelineSettings};
pub use types::{
    ChunkingError, ContentChunk, Failure, FailureReason, PipelineError, RunOutcome, RunReport,
    Selection,
};
