// src/services/mod.rs

//! Scraping services: fetch layer, title resolution, review crawling.

pub mod fetch;
pub mod resolver;
pub mod reviews;

pub use fetch::{FetchCache, FetchResult, RatePolicy};
pub use resolver::TitleResolver;
pub use reviews::ReviewCrawler;
