//! Pipeline configuration
//!
//! Replaces fixed directory and table names with an explicit value passed to
//! the pipeline. Can be loaded from TOML; CLI flags override file values.

use crate::error::{ForkstatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory holding `*.json` measurement files
pub const DEFAULT_DATA_DIRECTORY: &str = "timeseries";

/// Default revision table
pub const DEFAULT_REVISION_TABLE: &str = "benchmarks_revision.csv";

/// Locations used by one analysis run
///
/// # Example
/// ```
/// use forkstat::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.data_directory.to_str(), Some("timeseries"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory scanned (non-recursively) for measurement files
    pub data_directory: PathBuf,

    /// CSV with `repository` and `tag` columns
    pub revision_table: PathBuf,

    /// Where chart artifacts are written
    ///
    /// Default: the system temporary directory
    pub output_directory: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            revision_table: PathBuf::from(DEFAULT_REVISION_TABLE),
            output_directory: std::env::temp_dir(),
        }
    }
}

impl PipelineConfig {
    pub fn new(data_directory: impl Into<PathBuf>, revision_table: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
            revision_table: revision_table.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(contents)
            .map_err(|e| ForkstatError::format(origin, format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ForkstatError::io(path, e))?;
        Self::from_toml_str(&contents, path)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("data_directory", &self.data_directory),
            ("revision_table", &self.revision_table),
            ("output_directory", &self.output_directory),
        ] {
            if value.as_os_str().is_empty() {
                return Err(ForkstatError::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
