// src/storage/mod.rs

//! Storage abstractions for review persistence.
//!
//! Scraped records are written twice from the same data:
//! - `reviews.json`: pretty-printed JSON array of records
//! - `reviews.csv`: flat CSV with the metadata column serialized as JSON

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ReviewRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of records written
    pub record_count: usize,
    /// Where the JSON output landed
    pub json_path: PathBuf,
    /// Where the CSV output landed
    pub csv_path: PathBuf,
}

/// Trait for review storage backends.
#[async_trait]
pub trait ReviewStorage: Send + Sync {
    /// Persist all records from one run.
    async fn write_records(&self, records: &[ReviewRecord]) -> Result<WriteSummary>;
}
