// src/pipeline/scrape.rs

//! Review scraping pipeline.
//!
//! Processes queries strictly sequentially: each one resolves, then its
//! crawl runs to completion, before the next query begins. One show's
//! failure never aborts the rest of the run.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, ReviewRecord, ShowQuery};
use crate::services::{FetchCache, RatePolicy, ReviewCrawler, TitleResolver};
use crate::storage::ReviewStorage;

/// Summary of a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub query_count: usize,
    pub resolved_count: usize,
    pub record_count: usize,
    pub crawl_failures: usize,
    pub network_calls: usize,
}

/// Run the scraper over all queries and persist the records.
pub async fn run_scraper(
    config: &Config,
    storage: &dyn ReviewStorage,
    queries: &[ShowQuery],
) -> Result<ScrapeStats> {
    let policy = match config.crawler.request_delay_secs {
        0 => RatePolicy::Disabled,
        secs => RatePolicy::Fixed(std::time::Duration::from_secs(secs)),
    };
    run_scraper_with_policy(config, storage, queries, policy).await
}

/// Run the scraper with an explicit rate policy (tests disable pacing).
pub async fn run_scraper_with_policy(
    config: &Config,
    storage: &dyn ReviewStorage,
    queries: &[ShowQuery],
    policy: RatePolicy,
) -> Result<ScrapeStats> {
    let start_time = Utc::now();
    log::info!("Scraping reviews for {} titles", queries.len());

    let mut fetcher = FetchCache::with_policy(&config.crawler, policy)?;
    let resolver = TitleResolver::new(&config.crawler.base_url);
    let crawler = ReviewCrawler::new(&config.crawler.base_url);

    let mut records: Vec<ReviewRecord> = Vec::new();
    let mut resolved_count = 0;
    let mut crawl_failures = 0;

    for query in queries {
        let Some(show) = resolver.resolve(&mut fetcher, query).await? else {
            continue;
        };
        resolved_count += 1;

        // Records from pages crawled before a failure stay in the buffer.
        match crawler.crawl(&mut fetcher, &show.identifier, &mut records).await {
            Ok(pages) => {
                log::info!(
                    "Crawled {} page(s) of reviews for {} ({})",
                    pages,
                    show.identifier,
                    show.strategy
                );
            }
            Err(e) => {
                crawl_failures += 1;
                log::warn!("Crawl failed for {}: {}", show.identifier, e);
            }
        }
    }

    let summary = storage.write_records(&records).await?;

    let stats = ScrapeStats {
        start_time,
        end_time: Utc::now(),
        query_count: queries.len(),
        resolved_count,
        record_count: summary.record_count,
        crawl_failures,
        network_calls: fetcher.network_calls(),
    };

    log::info!(
        "Done: {}/{} titles resolved, {} records, {} crawl failure(s), {} network call(s)",
        stats.resolved_count,
        stats.query_count,
        stats.record_count,
        stats.crawl_failures,
        stats.network_calls
    );

    Ok(stats)
}
