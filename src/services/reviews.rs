// src/services/reviews.rs

//! Review-listing pagination crawler.
//!
//! Walks a show's paginated review listing until the pager stops offering a
//! next page, extracting one [`ReviewRecord`] per non-empty review.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::ReviewRecord;
use crate::services::fetch::FetchCache;
use crate::utils::{text, url};

/// Label on the pager's last link when a further page exists.
const NEXT_PAGE_GLYPH: &str = ">>";

/// Everything the crawler needs from one review-listing page, extracted
/// into owned data before the next fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReviewPage {
    reviews: Vec<String>,
    ratings: Vec<String>,
    genres: Vec<String>,
    has_next: bool,
}

/// Service crawling review listings for resolved shows.
pub struct ReviewCrawler {
    base_url: String,
}

impl ReviewCrawler {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Crawl every review page for one show, appending records to `out`.
    ///
    /// Appending to the caller's buffer keeps records from pages already
    /// processed when a later page fails to fetch; the failure itself still
    /// propagates and ends this show's crawl. Returns the number of pages
    /// crawled.
    pub async fn crawl(
        &self,
        fetcher: &mut FetchCache,
        identifier: &str,
        out: &mut Vec<ReviewRecord>,
    ) -> Result<usize> {
        let mut page_number = 1u32;

        loop {
            let page_url = url::reviews_url(&self.base_url, page_number, identifier);
            let fetched = fetcher
                .fetch(&page_url)
                .await
                .map_err(|e| AppError::crawl(identifier, e))?;

            let page = parse_review_page(&fetched.body)?;

            if page.reviews.len() != page.ratings.len() {
                log::warn!(
                    "Page {} of {} has {} reviews but {} ratings; pairing the shorter run",
                    page_number,
                    identifier,
                    page.reviews.len(),
                    page.ratings.len()
                );
            }

            for (review, rating) in page.reviews.iter().zip(page.ratings.iter()) {
                let review_text = text::normalize(review);
                if review_text.is_empty() {
                    continue;
                }
                log::debug!(
                    "Show {}: review ({} chars), rating {}",
                    identifier,
                    review_text.len(),
                    rating
                );
                out.push(ReviewRecord::new(
                    identifier,
                    review_text,
                    rating.trim(),
                    &page.genres,
                ));
            }

            if !page.has_next {
                return Ok(page_number as usize);
            }
            page_number += 1;
        }
    }
}

/// Extract reviews, ratings, genres and the pager state from one page.
///
/// Absent structure degrades to empty sequences (and "no next page"), never
/// to an error, so a sparse or reshuffled page skips its broken pieces
/// instead of killing the crawl.
fn parse_review_page(body: &str) -> Result<ReviewPage> {
    let document = Html::parse_document(body);
    let review_sel = parse_selector("div.review-text1")?;
    let rating_sel = parse_selector("div.user-reviews-movie-rating")?;
    let genres_sel = parse_selector("span.genres a")?;
    let pager_sel = parse_selector("div.pager")?;
    let link_sel = parse_selector("a")?;

    let collect_text = |sel: &Selector| -> Vec<String> {
        document
            .select(sel)
            .map(|el| el.text().collect::<String>())
            .collect()
    };

    // The first pager's last link reads ">>" exactly when a further page
    // exists. Only the first pager counts when the page repeats it.
    let has_next = document
        .select(&pager_sel)
        .next()
        .and_then(|pager| pager.select(&link_sel).last())
        .is_some_and(|link| link.text().collect::<String>() == NEXT_PAGE_GLYPH);

    Ok(ReviewPage {
        reviews: collect_text(&review_sel),
        ratings: collect_text(&rating_sel),
        genres: collect_text(&genres_sel),
        has_next,
    })
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
