//! forkstat - fork-to-fork stability analysis for recorded benchmark timings
//!
//! This library parses benchmark identities from measurement file names,
//! resolves their repository revision, and derives the coefficient of
//! variation per fork and the relative performance deviation between
//! adjacent forks, ready for chart or report rendering.

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod json_output;
pub mod measurements;
pub mod pipeline;
pub mod revision;
pub mod stats;
pub mod summary;
pub mod svg_output;
pub mod text_output;

pub use error::{ErrorKind, ForkstatError, Result};
