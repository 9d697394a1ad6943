// src/models/mod.rs

//! Domain models for the scraper application.

mod config;
mod review;
mod show;

// Re-export all public types
pub use config::{Config, CrawlerConfig, PathsConfig};
pub use review::{REVIEW_TAG, ReviewMetadata, ReviewRecord, SOURCE_NAME};
pub use show::{MatchStrategy, ShowMatch, ShowQuery};
