// src/storage/local.rs

//! Local filesystem storage implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::ReviewRecord;
use crate::storage::{ReviewStorage, WriteSummary};

const JSON_FILE: &str = "reviews.json";
const CSV_FILE: &str = "reviews.csv";
const CSV_HEADER: &str = "metadata,Show ID,Review,Rating";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &PathBuf, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;

        // Append rather than swap the extension so each target gets its
        // own temp file (reviews.json.tmp vs reviews.csv.tmp).
        let mut tmp = path.clone();
        tmp.as_mut_os_string().push(".tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    fn render_csv(records: &[ReviewRecord]) -> Result<String> {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for record in records {
            let metadata = serde_json::to_string(&record.metadata)?;
            csv.push_str(&csv_escape(&metadata));
            csv.push(',');
            csv.push_str(&csv_escape(&record.show_id));
            csv.push(',');
            csv.push_str(&csv_escape(&record.review));
            csv.push(',');
            csv.push_str(&csv_escape(&record.rating));
            csv.push('\n');
        }
        Ok(csv)
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[async_trait]
impl ReviewStorage for LocalStorage {
    async fn write_records(&self, records: &[ReviewRecord]) -> Result<WriteSummary> {
        let json_path = self.root_dir.join(JSON_FILE);
        let json = serde_json::to_vec_pretty(records)?;
        self.write_bytes(&json_path, &json).await?;

        let csv_path = self.root_dir.join(CSV_FILE);
        let csv = Self::render_csv(records)?;
        self.write_bytes(&csv_path, csv.as_bytes()).await?;

        log::info!(
            "Wrote {} records to {} and {}",
            records.len(),
            json_path.display(),
            csv_path.display()
        );

        Ok(WriteSummary {
            record_count: records.len(),
            json_path,
            csv_path,
        })
    }
}
