// src/pipeline/mod.rs

//! Pipeline entry points for scraper operations.

pub mod scrape;

pub use scrape::{ScrapeStats, run_scraper, run_scraper_with_policy};
