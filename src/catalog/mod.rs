//! Mediator catalog integration.

pub mod client;
pub mod types;

pub use client::{CatalogClient, CatalogSource};
pub use types::{CaptionTrack, CatalogError, CatalogSession, CategoryNode, MediaItem};
