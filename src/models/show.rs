//! Show query and resolution result structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One (title, release year) lookup unit, as read from the input CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowQuery {
    /// Show title as listed in the input
    pub title: String,

    /// Release year, kept as the source string
    pub release_year: String,
}

impl ShowQuery {
    pub fn new(title: impl Into<String>, release_year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_year: release_year.into(),
        }
    }

    /// Load queries from a CSV file with `title` and `release_year` columns.
    ///
    /// Rows are kept in file order and never deduplicated. Rows with fewer
    /// fields than the header are skipped with a warning.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<ShowQuery>> {
        let content = fs::read_to_string(&path)?;
        let mut lines = content.lines();

        let header = lines
            .next()
            .ok_or_else(|| AppError::input("titles file is empty"))?;
        let columns = split_csv_line(header);
        let title_idx = column_index(&columns, "title")?;
        let year_idx = column_index(&columns, "release_year")?;

        let mut queries = Vec::new();
        for (line_no, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_csv_line(line);
            match (fields.get(title_idx), fields.get(year_idx)) {
                (Some(title), Some(year)) => {
                    queries.push(ShowQuery::new(title.trim(), year.trim()));
                }
                _ => {
                    log::warn!("Skipping malformed titles row {}: {}", line_no + 2, line);
                }
            }
        }
        Ok(queries)
    }
}

fn column_index(columns: &[String], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| AppError::input(format!("titles file is missing a '{name}' column")))
}

/// Split one CSV line into fields, honoring double-quoted fields.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote is an escaped quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Which resolution heuristic produced a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Search redirected straight to the show page
    RedirectHit,
    /// Listing entry with the exact query title
    ExactTitle,
    /// Listing entry with the query release year
    YearFallback,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStrategy::RedirectHit => "redirect hit",
            MatchStrategy::ExactTitle => "exact title",
            MatchStrategy::YearFallback => "year fallback",
        };
        f.write_str(label)
    }
}

/// A resolved catalog identifier for one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowMatch {
    /// Canonical path segment denoting the show on the catalog site
    pub identifier: String,

    /// The heuristic that found it
    pub strategy: MatchStrategy,

    /// The query that resolved to this match
    pub query: ShowQuery,
}
