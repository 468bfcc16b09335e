//! Per-fork timing samples and the store that loads them
//!
//! A payload is a JSON array of arrays: the outer index is the fork, the
//! inner index is the iteration. Both orders are preserved as-is.

use crate::error::{ForkstatError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Ordered timing samples, one inner sequence per fork
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ForkSeries {
    forks: Vec<Vec<f64>>,
}

impl ForkSeries {
    /// Build a series, rejecting negative or non-finite samples
    pub fn new(forks: Vec<Vec<f64>>) -> std::result::Result<Self, String> {
        for (fork, samples) in forks.iter().enumerate() {
            if let Some((iteration, value)) = samples
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v < 0.0)
            {
                return Err(format!(
                    "fork {} iteration {}: sample {} is not a non-negative number",
                    fork, iteration, value
                ));
            }
        }
        Ok(Self { forks })
    }

    /// Decode a JSON payload; `origin` is only used in error messages
    pub fn from_json_str(contents: &str, origin: &Path) -> Result<Self> {
        let forks: Vec<Vec<f64>> = serde_json::from_str(contents)
            .map_err(|e| ForkstatError::format(origin, format!("invalid measurement JSON: {}", e)))?;
        Self::new(forks).map_err(|reason| ForkstatError::format(origin, reason))
    }

    pub fn forks(&self) -> &[Vec<f64>] {
        &self.forks
    }

    pub fn fork(&self, index: usize) -> Option<&[f64]> {
        self.forks.get(index).map(Vec::as_slice)
    }

    pub fn fork_count(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Total number of samples across all forks
    pub fn sample_count(&self) -> usize {
        self.forks.iter().map(Vec::len).sum()
    }
}

/// Source of raw measurements for a benchmark
pub trait MeasurementStore {
    fn load(&self, source: &Path) -> Result<ForkSeries>;
}

/// Reads measurement payloads from JSON files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMeasurementStore;

impl MeasurementStore for JsonMeasurementStore {
    fn load(&self, source: &Path) -> Result<ForkSeries> {
        let contents = fs::read_to_string(source).map_err(|e| ForkstatError::io(source, e))?;
        let series = ForkSeries::from_json_str(&contents, source)?;
        tracing::debug!(
            path = %source.display(),
            forks = series.fork_count(),
            samples = series.sample_count(),
            "loaded measurements"
        );
        Ok(series)
    }
}
