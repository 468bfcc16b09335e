//! Error taxonomy for benchmark analysis
//!
//! Every failure is local to one benchmark: the batch driver records it and
//! moves on to the next file. The only value ever substituted for an error is
//! the zero-mean CV saturation in [`crate::stats::coefficient_of_variation`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a measurement file into a summary
#[derive(Error, Debug)]
pub enum ForkstatError {
    #[error("Unable to parse: {name}")]
    Parse { name: String },

    #[error("Repository {repository} not found in revision table")]
    NotFound { repository: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed content in {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("Statistic undefined: {0}")]
    Domain(String),

    #[error("Revision of {repository} read before resolution")]
    Unresolved { repository: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of [`ForkstatError`], used by reports and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    NotFound,
    Io,
    Format,
    Domain,
    Unresolved,
    Config,
}

impl ForkstatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForkstatError::Parse { .. } => ErrorKind::Parse,
            ForkstatError::NotFound { .. } => ErrorKind::NotFound,
            ForkstatError::Io { .. } => ErrorKind::Io,
            ForkstatError::Format { .. } => ErrorKind::Format,
            ForkstatError::Domain(_) => ErrorKind::Domain,
            ForkstatError::Unresolved { .. } => ErrorKind::Unresolved,
            ForkstatError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForkstatError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ForkstatError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForkstatError>;
