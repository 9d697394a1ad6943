// src/services/fetch.rs

//! Cached, rate-limited page fetching.
//!
//! All outbound requests from the resolver and the crawler go through one
//! [`FetchCache`] so that a URL is hit at most once per run and real network
//! calls are spaced by the configured delay.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// A fetched page, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// HTTP status code
    pub status: u16,

    /// URL the request ended up at after redirects. Differs from the
    /// requested URL when the site redirected, which the resolver relies on.
    pub final_url: String,

    /// Response body
    pub body: String,
}

/// Pacing applied after each real network fetch. Cache hits never pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePolicy {
    /// Sleep a fixed interval after every network response
    Fixed(Duration),
    /// No pacing, for tests
    Disabled,
}

impl RatePolicy {
    async fn pause(&self) {
        match self {
            RatePolicy::Fixed(interval) => tokio::time::sleep(*interval).await,
            RatePolicy::Disabled => {}
        }
    }
}

/// Deduplicating, rate-limited fetch layer.
///
/// Caches successful responses by requested URL for the lifetime of the
/// instance. Failures are not cached, so a later fetch of the same URL goes
/// back to the network. Built for the strictly sequential crawl model; a
/// concurrent caller would need to put this behind a mutex or an owning
/// task.
pub struct FetchCache {
    client: Client,
    policy: RatePolicy,
    cache: HashMap<String, FetchResult>,
    network_calls: usize,
}

impl FetchCache {
    /// Create a fetch cache from crawler configuration, deriving the rate
    /// policy from `request_delay_secs` (0 disables pacing).
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let policy = match config.request_delay_secs {
            0 => RatePolicy::Disabled,
            secs => RatePolicy::Fixed(Duration::from_secs(secs)),
        };
        Self::with_policy(config, policy)
    }

    /// Create a fetch cache with an explicit rate policy.
    pub fn with_policy(config: &CrawlerConfig, policy: RatePolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            policy,
            cache: HashMap::new(),
            network_calls: 0,
        })
    }

    /// Fetch a URL, returning the cached result when this run already
    /// fetched it. Real fetches pause for the rate policy's interval after
    /// the response arrives and before returning.
    pub async fn fetch(&mut self, url: &str) -> Result<&FetchResult> {
        if self.cache.contains_key(url) {
            log::debug!("Cache hit: {}", url);
        } else {
            let result = self.fetch_network(url).await?;
            self.cache.insert(url.to_string(), result);
        }
        Ok(&self.cache[url])
    }

    async fn fetch_network(&mut self, url: &str) -> Result<FetchResult> {
        log::debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        self.network_calls += 1;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        self.policy.pause().await;

        Ok(FetchResult {
            status,
            final_url,
            body,
        })
    }

    /// Number of real network fetches performed so far.
    pub fn network_calls(&self) -> usize {
        self.network_calls
    }

    /// Number of distinct URLs currently cached.
    pub fn cached_urls(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_config_delay() {
        let mut config = CrawlerConfig::default();
        config.request_delay_secs = 0;
        let cache = FetchCache::new(&config).unwrap();
        assert_eq!(cache.policy, RatePolicy::Disabled);

        config.request_delay_secs = 10;
        let cache = FetchCache::new(&config).unwrap();
        assert_eq!(cache.policy, RatePolicy::Fixed(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_disabled_policy_does_not_sleep() {
        let start = std::time::Instant::now();
        RatePolicy::Disabled.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
