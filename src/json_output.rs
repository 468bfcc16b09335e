//! JSON output format for benchmark reports
//!
//! `--format json` implementation

use crate::error::{ErrorKind, Result};
use crate::identity::BenchmarkIdentity;
use crate::pipeline::{BatchReport, BenchmarkReport, Failure};
use crate::stats::{ForkCv, ForkPairRpd};
use serde::Serialize;

/// One analysed benchmark
#[derive(Debug, Clone, Serialize)]
pub struct JsonBenchmark {
    /// Measurement file path
    pub file: String,
    #[serde(flatten)]
    pub identity: BenchmarkIdentity,
    pub repository: String,
    pub repository_url: String,
    pub revision: String,
    pub fork_count: usize,
    pub samples_per_fork: Vec<usize>,
    pub cv_per_fork: Vec<ForkCv>,
    /// `null` when RPD is undefined for this benchmark
    pub rpd_per_fork_pair: Option<Vec<ForkPairRpd>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpd_error: Option<String>,
}

impl JsonBenchmark {
    pub fn from_report(report: &BenchmarkReport) -> Result<Self> {
        let record = &report.record;
        let identity = record.identity();
        let (rpd_per_fork_pair, rpd_error) = match report.stats.rpd_per_fork_pair() {
            Ok(rpd) => (Some(rpd.to_vec()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Ok(Self {
            file: record.source().display().to_string(),
            identity: identity.clone(),
            repository: identity.repository(),
            repository_url: identity.repository_url(),
            revision: record.revision()?.to_string(),
            fork_count: report.forks.fork_count(),
            samples_per_fork: report.forks.forks().iter().map(Vec::len).collect(),
            cv_per_fork: report.stats.cv_per_fork.clone(),
            rpd_per_fork_pair,
            rpd_error,
        })
    }
}

/// A benchmark that could not be analysed
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailure {
    pub file: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Failure> for JsonFailure {
    fn from(failure: &Failure) -> Self {
        Self {
            file: failure.source.display().to_string(),
            kind: failure.error.kind(),
            message: failure.error.to_string(),
        }
    }
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub version: &'static str,
    pub benchmarks: Vec<JsonBenchmark>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<JsonFailure>,
}

impl JsonOutput {
    pub fn from_batch(batch: &BatchReport) -> Result<Self> {
        Ok(Self {
            version: env!("CARGO_PKG_VERSION"),
            benchmarks: batch
                .succeeded
                .iter()
                .map(JsonBenchmark::from_report)
                .collect::<Result<Vec<_>>>()?,
            failures: batch.failed.iter().map(JsonFailure::from).collect(),
        })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::BenchmarkRecord;
    use crate::error::ForkstatError;
    use crate::measurements::ForkSeries;
    use crate::stats::StatSeries;
    use std::path::PathBuf;

    fn batch() -> BatchReport {
        let record = BenchmarkRecord::from_path("timeseries/apache__commons#sort#.json")
            .unwrap()
            .with_revision("v1.2.3");
        let forks = ForkSeries::new(vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]]).unwrap();
        let stats = StatSeries::compute(&forks).unwrap();
        BatchReport {
            succeeded: vec![BenchmarkReport {
                record,
                forks,
                stats,
            }],
            failed: vec![Failure {
                source: PathBuf::from("timeseries/google__guava#hash#.json"),
                error: ForkstatError::NotFound {
                    repository: "google/guava".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_json_document_shape() {
        let json = JsonOutput::from_batch(&batch()).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let bench = &value["benchmarks"][0];
        assert_eq!(bench["organization"], "apache");
        assert_eq!(bench["project"], "commons");
        assert_eq!(bench["params"], "");
        assert_eq!(bench["repository_url"], "https://github.com/apache/commons");
        assert_eq!(bench["revision"], "v1.2.3");
        assert_eq!(bench["fork_count"], 2);
        assert_eq!(bench["cv_per_fork"][1]["percent"], 0.0);
        assert_eq!(bench["rpd_per_fork_pair"][0]["ratio"], 1.0);

        assert_eq!(value["failures"][0]["kind"], "not_found");
        assert!(bench.get("rpd_error").is_none());
    }

    #[test]
    fn test_undefined_rpd_is_null_with_reason() {
        let record = BenchmarkRecord::from_path("timeseries/apache__commons#zero#.json")
            .unwrap()
            .with_revision("v1.2.3");
        let forks = ForkSeries::new(vec![vec![0.0, 0.0], vec![1.0]]).unwrap();
        let stats = StatSeries::compute(&forks).unwrap();
        let b = BatchReport {
            succeeded: vec![BenchmarkReport {
                record,
                forks,
                stats,
            }],
            failed: Vec::new(),
        };

        let json = JsonOutput::from_batch(&b).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let bench = &value["benchmarks"][0];
        assert_eq!(bench["cv_per_fork"][0]["percent"], 0.0);
        assert!(bench["rpd_per_fork_pair"].is_null());
        assert!(bench["rpd_error"].as_str().unwrap().contains("forks 0 and 1"));
    }

    #[test]
    fn test_failures_omitted_when_empty() {
        let mut b = batch();
        b.failed.clear();
        let json = JsonOutput::from_batch(&b).unwrap().to_json().unwrap();
        assert!(!json.contains("failures"));
    }
}
