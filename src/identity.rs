//! Benchmark identity parsed from a measurement file name
//!
//! Measurement files are named `{org}__{project}#{method}#{params}.json`.
//! The four groups are extracted atomically: either every field is populated
//! or the name is rejected with [`ForkstatError::Parse`].

use crate::error::{ForkstatError, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

const GITHUB_BASE_URL: &str = "https://github.com/";

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // ORG stops at the first underscore, PROJECT and METHOD at the next '#',
        // PARAMS runs greedily up to the trailing ".json".
        Regex::new(r"^(?P<org>[^_]+)__(?P<proj>[^#]+)#(?P<method>[^#]+)#(?P<params>.*)\.json$")
            .unwrap_or_else(|e| unreachable!("static benchmark pattern is valid: {e}"))
    })
}

/// Structured identity of one benchmarked method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BenchmarkIdentity {
    pub organization: String,
    pub project: String,
    pub method: String,
    /// JMH-style parameter string, empty when the benchmark is unparameterised
    pub params: String,
}

impl BenchmarkIdentity {
    /// Parse a bare file name such as `apache__commons#sort#.json`
    pub fn parse(file_name: &str) -> Result<Self> {
        let caps = file_name_pattern()
            .captures(file_name)
            .ok_or_else(|| ForkstatError::Parse {
                name: file_name.to_string(),
            })?;

        Ok(Self {
            organization: caps["org"].to_string(),
            project: caps["proj"].to_string(),
            method: caps["method"].to_string(),
            params: caps["params"].to_string(),
        })
    }

    /// Parse the final component of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ForkstatError::Parse {
                name: path.display().to_string(),
            })?;
        Self::parse(name)
    }

    /// `organization/project`, the key used in the revision table
    pub fn repository(&self) -> String {
        format!("{}/{}", self.organization, self.project)
    }

    pub fn repository_url(&self) -> String {
        format!("{}{}", GITHUB_BASE_URL, self.repository())
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}
