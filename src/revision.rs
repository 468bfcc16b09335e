//! Revision table lookup
//!
//! The revision table is a CSV file with at least the columns `repository`
//! and `tag`. Rows are kept in file order and duplicates are not collapsed:
//! [`RevisionTable::resolve`] returns the tag of the first matching row.

use crate::error::{ForkstatError, Result};
use std::fs;
use std::path::Path;

const REPOSITORY_COLUMN: &str = "repository";
const TAG_COLUMN: &str = "tag";

/// One `(repository, tag)` row of the revision table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRow {
    pub repository: String,
    pub tag: String,
}

/// Ordered collection of revision rows
#[derive(Debug, Clone, Default)]
pub struct RevisionTable {
    rows: Vec<RevisionRow>,
}

impl RevisionTable {
    pub fn new(rows: Vec<RevisionRow>) -> Self {
        Self { rows }
    }

    /// Load and parse a revision CSV from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ForkstatError::io(path, e))?;
        Self::from_csv_str(&contents, path)
    }

    /// Parse CSV text; `origin` is only used in error messages
    pub fn from_csv_str(contents: &str, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(contents.as_bytes());

        let headers = reader.headers().map_err(|e| csv_error(origin, e))?;
        let repo_idx = column_index(headers, REPOSITORY_COLUMN, origin)?;
        let tag_idx = column_index(headers, TAG_COLUMN, origin)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(origin, e))?;
            let (Some(repository), Some(tag)) = (record.get(repo_idx), record.get(tag_idx)) else {
                return Err(ForkstatError::format(
                    origin,
                    format!(
                        "line {}: expected at least {} fields, found {}",
                        record.position().map_or(0, csv::Position::line),
                        repo_idx.max(tag_idx) + 1,
                        record.len()
                    ),
                ));
            };
            rows.push(RevisionRow {
                repository: repository.to_string(),
                tag: tag.to_string(),
            });
        }

        tracing::debug!(rows = rows.len(), "loaded revision table");
        Ok(Self { rows })
    }

    /// Tag of the first row whose repository equals `repository` exactly
    ///
    /// Later rows for the same repository are ignored.
    pub fn resolve(&self, repository: &str) -> Result<&str> {
        self.rows
            .iter()
            .find(|row| row.repository == repository)
            .map(|row| row.tag.as_str())
            .ok_or_else(|| ForkstatError::NotFound {
                repository: repository.to_string(),
            })
    }

    pub fn rows(&self) -> &[RevisionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn column_index(headers: &csv::StringRecord, column: &str, origin: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ForkstatError::format(origin, format!("missing column '{}'", column)))
}

fn csv_error(origin: &Path, err: csv::Error) -> ForkstatError {
    ForkstatError::format(origin, err.to_string())
}
