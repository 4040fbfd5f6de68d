#![deny(missing_docs)]

//! Core library for the captionflow importer.

/// Filesystem sinks for cleaned captions and failure reports.
pub mod archive;
/// Mediator catalog client: categories, media lists, caption tracks.
pub mod catalog;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Notion record sink integration.
pub mod notion;
/// Caption processing pipeline: normalization, chunking, orchestration.
pub mod processing;
