//! Benchmark discovery and selection
//!
//! Lists `{data_directory}/*.json`, parses each file name into a
//! [`BenchmarkRecord`] and keeps the names that failed to parse so they can
//! be reported. Selection helpers never touch measurement contents.

use crate::benchmark::BenchmarkRecord;
use crate::error::{ForkstatError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// A file that was found but could not be turned into a benchmark
#[derive(Debug)]
pub struct Rejected {
    pub path: PathBuf,
    pub error: ForkstatError,
}

/// Outcome of scanning a data directory
#[derive(Debug, Default)]
pub struct Discovery {
    /// Parsed benchmarks, sorted by path
    pub benchmarks: Vec<BenchmarkRecord>,
    pub rejected: Vec<Rejected>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Benchmark whose file name equals `file_name`
    pub fn find(&self, file_name: &str) -> Option<&BenchmarkRecord> {
        self.benchmarks
            .iter()
            .find(|b| b.source().file_name().and_then(|n| n.to_str()) == Some(file_name))
    }

    /// Uniformly random benchmark, `None` when nothing was discovered
    pub fn pick_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&BenchmarkRecord> {
        pick_one(&self.benchmarks, rng)
    }
}

/// Uniformly random element of `benchmarks`
pub fn pick_one<'a, R: Rng + ?Sized>(
    benchmarks: &'a [BenchmarkRecord],
    rng: &mut R,
) -> Option<&'a BenchmarkRecord> {
    benchmarks.choose(rng)
}

/// Scan `data_dir` (non-recursively) for JSON measurement files
pub fn discover(data_dir: &Path) -> Result<Discovery> {
    if !data_dir.is_dir() {
        return Err(ForkstatError::io(
            data_dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found"),
        ));
    }

    let pattern = format!(
        "{}/*.json",
        glob::Pattern::escape(&data_dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern)
        .map_err(|e| ForkstatError::Config(format!("invalid discovery pattern: {}", e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(ForkstatError::io(path, e.into_error()));
            }
        }
    }
    paths.sort();

    let mut discovery = Discovery::default();
    for path in paths {
        match BenchmarkRecord::from_path(&path) {
            Ok(record) => discovery.benchmarks.push(record),
            Err(error) => {
                tracing::warn!("{}", error);
                discovery.rejected.push(Rejected { path, error });
            }
        }
    }

    tracing::info!(
        dir = %data_dir.display(),
        benchmarks = discovery.benchmarks.len(),
        rejected = discovery.rejected.len(),
        "discovered benchmarks"
    );
    Ok(discovery)
}
