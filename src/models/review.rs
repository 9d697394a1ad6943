//! Review record structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source label attached to every record.
pub const SOURCE_NAME: &str = "FilmAffinity";

/// Tag attached to every record ahead of the page genres.
pub const REVIEW_TAG: &str = "review";

/// One user review extracted from a review-listing page.
///
/// Field names follow the downstream consumer's schema, capitalized keys
/// included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRecord {
    pub metadata: ReviewMetadata,

    /// Catalog identifier of the reviewed show
    #[serde(rename = "Show ID")]
    pub show_id: String,

    /// Review text, accent-normalized and trimmed
    #[serde(rename = "Review")]
    pub review: String,

    /// Rating exactly as displayed on the page
    #[serde(rename = "Rating")]
    pub rating: String,
}

/// Provenance metadata for a review record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewMetadata {
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub format: String,
    pub tags: Vec<String>,
}

impl ReviewRecord {
    /// Build a record for one (review, rating) pair, tagging it with the
    /// page's genre list.
    pub fn new(
        show_id: impl Into<String>,
        review: impl Into<String>,
        rating: impl Into<String>,
        genres: &[String],
    ) -> Self {
        let mut tags = Vec::with_capacity(genres.len() + 1);
        tags.push(REVIEW_TAG.to_string());
        tags.extend_from_slice(genres);

        Self {
            metadata: ReviewMetadata {
                source: SOURCE_NAME.to_string(),
                timestamp: Utc::now(),
                format: "JSON".to_string(),
                tags,
            },
            show_id: show_id.into(),
            review: review.into(),
            rating: rating.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_prepend_review() {
        let genres = vec!["Drama".to_string(), "Thriller".to_string()];
        let record = ReviewRecord::new("film123", "great", "10", &genres);
        assert_eq!(record.metadata.tags, vec!["review", "Drama", "Thriller"]);
        assert_eq!(record.metadata.source, "FilmAffinity");
    }

    #[test]
    fn test_serialized_key_names() {
        let record = ReviewRecord::new("film123", "great", "10", &[]);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("Show ID").is_some());
        assert!(json.get("Review").is_some());
        assert!(json.get("Rating").is_some());
        assert!(json.get("metadata").is_some());
    }
}
