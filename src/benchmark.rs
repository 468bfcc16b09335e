//! Benchmark record: identity, measurement source and resolved revision

use crate::error::{ForkstatError, Result};
use crate::identity::BenchmarkIdentity;
use crate::revision::RevisionTable;
use std::path::{Path, PathBuf};

/// One discovered benchmark
///
/// Built from a measurement file path; the revision is attached by
/// [`BenchmarkRecord::resolve_revision`], which returns a new record and
/// leaves the original untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRecord {
    identity: BenchmarkIdentity,
    source: PathBuf,
    revision: Option<String>,
}

impl BenchmarkRecord {
    /// Parse the identity from the file name of `source`
    pub fn from_path(source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let identity = BenchmarkIdentity::from_path(&source)?;
        Ok(Self {
            identity,
            source,
            revision: None,
        })
    }

    pub fn identity(&self) -> &BenchmarkIdentity {
        &self.identity
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File name without the `.json` extension, used to name artifacts
    pub fn stem(&self) -> String {
        self.source
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.strip_suffix(".json").unwrap_or(n).to_string())
            .unwrap_or_default()
    }

    pub fn repository(&self) -> String {
        self.identity.repository()
    }

    pub fn is_resolved(&self) -> bool {
        self.revision.is_some()
    }

    /// Revision tag, or [`ForkstatError::Unresolved`] before resolution
    pub fn revision(&self) -> Result<&str> {
        self.revision
            .as_deref()
            .ok_or_else(|| ForkstatError::Unresolved {
                repository: self.repository(),
            })
    }

    /// Look up this benchmark's repository in `table`
    pub fn resolve_revision(&self, table: &RevisionTable) -> Result<Self> {
        let tag = table.resolve(&self.repository())?;
        tracing::debug!(repository = %self.repository(), tag, "resolved revision");
        Ok(self.clone().with_revision(tag))
    }

    /// Attach a known revision tag
    pub fn with_revision(self, tag: impl Into<String>) -> Self {
        Self {
            revision: Some(tag.into()),
            ..self
        }
    }
}
