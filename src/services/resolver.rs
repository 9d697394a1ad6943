// src/services/resolver.rs

//! Title-to-identifier resolution service.
//!
//! Maps a (title, release year) query to the catalog's show identifier
//! using an ordered cascade of heuristics: a search that redirects straight
//! to the show page, then an exact title match in the results listing, then
//! a release-year match over the same listing.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{MatchStrategy, ShowMatch, ShowQuery};
use crate::services::fetch::FetchCache;
use crate::utils::url;

/// Substring that marks a redirect target as a show page.
const SHOW_PAGE_MARKER: &str = "film";

/// One entry parsed from the search results listing. Missing fields stay
/// `None`; they make the entry non-matching, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchEntry {
    title: Option<String>,
    year: Option<String>,
    href: Option<String>,
}

/// Service resolving show queries against the catalog's search endpoint.
pub struct TitleResolver {
    base_url: String,
}

impl TitleResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve one query to at most one [`ShowMatch`].
    ///
    /// Strategies are tried in strict order and the first hit wins. A query
    /// that exhausts all strategies yields `Ok(None)`. A network failure is
    /// logged and reported as unresolved rather than propagated, so one bad
    /// lookup never aborts the run.
    pub async fn resolve(
        &self,
        fetcher: &mut FetchCache,
        query: &ShowQuery,
    ) -> Result<Option<ShowMatch>> {
        let search_url = url::search_url(&self.base_url, &query.title);

        let page = match fetcher.fetch(&search_url).await {
            Ok(page) => page,
            Err(AppError::Http(e)) => {
                log::warn!("Search request failed for '{}': {}", query.title, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // Strategy 1: the search redirected us straight onto a show page.
        if page.final_url != search_url {
            if let Some(segment) = url::show_id_segment(&page.final_url) {
                if segment.contains(SHOW_PAGE_MARKER) {
                    log::info!(
                        "Instantly found '{}' ({}): {}",
                        query.title,
                        query.release_year,
                        segment
                    );
                    return Ok(Some(ShowMatch {
                        identifier: segment.to_string(),
                        strategy: MatchStrategy::RedirectHit,
                        query: query.clone(),
                    }));
                }
            }
            log::info!("Not found (unrecognized redirect): '{}'", query.title);
            return Ok(None);
        }

        // No redirect: a results listing came back. Scan it twice, exact
        // title first, then release year.
        let entries = parse_search_entries(&page.body)?;

        if let Some(identifier) = Self::match_by_title(&entries, &query.title) {
            log::info!("Found by name '{}': {}", query.title, identifier);
            return Ok(Some(ShowMatch {
                identifier,
                strategy: MatchStrategy::ExactTitle,
                query: query.clone(),
            }));
        }

        if let Some(identifier) = Self::match_by_year(&entries, &query.release_year) {
            log::info!(
                "Found by year '{}' ({}): {}",
                query.title,
                query.release_year,
                identifier
            );
            return Ok(Some(ShowMatch {
                identifier,
                strategy: MatchStrategy::YearFallback,
                query: query.clone(),
            }));
        }

        log::info!("Not found: '{}'", query.title);
        Ok(None)
    }

    /// First entry whose displayed title equals the query title.
    fn match_by_title(entries: &[SearchEntry], title: &str) -> Option<String> {
        entries
            .iter()
            .filter(|entry| entry.title.as_deref() == Some(title))
            .find_map(SearchEntry::identifier)
    }

    /// First entry whose displayed release year equals the query year.
    fn match_by_year(entries: &[SearchEntry], year: &str) -> Option<String> {
        entries
            .iter()
            .filter(|entry| entry.year.as_deref() == Some(year))
            .find_map(SearchEntry::identifier)
    }
}

impl SearchEntry {
    fn identifier(&self) -> Option<String> {
        self.href
            .as_deref()
            .and_then(url::show_id_segment)
            .map(str::to_string)
    }
}

/// Parse the search results listing into entries, in document order.
///
/// An absent listing (or one with none of the expected structure) parses to
/// an empty vector, which the caller treats the same as "no match".
fn parse_search_entries(body: &str) -> Result<Vec<SearchEntry>> {
    let document = Html::parse_document(body);
    let entry_sel = parse_selector("div.se-it.mt")?;
    let title_sel = parse_selector("div.mc-title")?;
    let year_sel = parse_selector("div.ye-w")?;
    let link_sel = parse_selector("a")?;

    let entries = document
        .select(&entry_sel)
        .map(|entry| SearchEntry {
            title: entry
                .select(&title_sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string()),
            year: entry
                .select(&year_sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string()),
            href: entry
                .select(&link_sel)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(str::to_string),
        })
        .collect();
    Ok(entries)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <div class="se-it mt">
            <div class="mc-title"> Breaking Bad </div>
            <div class="ye-w">2008</div>
            <a href="https://www.filmaffinity.com/en/film489970.html">x</a>
        </div>
        <div class="se-it mt">
            <div class="mc-title">Breaking Bad: El Camino</div>
            <div class="ye-w">2019</div>
            <a href="https://www.filmaffinity.com/en/film724948.html">x</a>
        </div>
    "#;

    #[test]
    fn test_parse_search_entries() {
        let entries = parse_search_entries(LISTING).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Breaking Bad"));
        assert_eq!(entries[1].year.as_deref(), Some("2019"));
        assert_eq!(
            entries[0].identifier().as_deref(),
            Some("film489970.html")
        );
    }

    #[test]
    fn test_parse_search_entries_empty_listing() {
        assert!(parse_search_entries("<html><body>no results</body></html>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_match_by_title_is_exact() {
        let entries = parse_search_entries(LISTING).unwrap();
        assert_eq!(
            TitleResolver::match_by_title(&entries, "Breaking Bad").as_deref(),
            Some("film489970.html")
        );
        assert!(TitleResolver::match_by_title(&entries, "breaking bad").is_none());
    }

    #[test]
    fn test_match_by_year_takes_first() {
        let entries = parse_search_entries(LISTING).unwrap();
        assert_eq!(
            TitleResolver::match_by_year(&entries, "2019").as_deref(),
            Some("film724948.html")
        );
        assert!(TitleResolver::match_by_year(&entries, "1990").is_none());
    }

    #[test]
    fn test_entry_missing_fields_is_non_matching() {
        let body = r#"<div class="se-it mt"><div class="mc-title">Lost</div></div>"#;
        let entries = parse_search_entries(body).unwrap();
        assert_eq!(entries.len(), 1);
        // No link, so even a title hit cannot produce an identifier.
        assert!(TitleResolver::match_by_title(&entries, "Lost").is_none());
        assert!(TitleResolver::match_by_year(&entries, "2004").is_none());
    }
}
