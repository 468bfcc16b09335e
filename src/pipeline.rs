//! Per-benchmark analysis and batch driver
//!
//! identity (already parsed) -> revision -> measurements -> statistics.
//! Each benchmark is independent: a failure is recorded against that
//! benchmark and the batch moves on.

use crate::benchmark::BenchmarkRecord;
use crate::config::PipelineConfig;
use crate::error::{ForkstatError, Result};
use crate::measurements::{ForkSeries, JsonMeasurementStore, MeasurementStore};
use crate::revision::RevisionTable;
use crate::stats::StatSeries;
use crate::summary::{assemble, ChartKind, Presentation};
use std::path::PathBuf;

/// Fully populated benchmark: resolved revision, loaded forks, statistics
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub record: BenchmarkRecord,
    pub forks: ForkSeries,
    pub stats: StatSeries,
}

impl BenchmarkReport {
    pub fn presentation(&self, kind: ChartKind) -> Result<Presentation> {
        assemble(kind, &self.record, &self.forks, &self.stats)
    }

    /// One result per requested kind; an undefined statistic fails only its own chart
    pub fn presentations(&self, kinds: &[ChartKind]) -> Vec<Result<Presentation>> {
        kinds.iter().map(|k| self.presentation(*k)).collect()
    }
}

/// A benchmark whose processing stopped with an error
#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub error: ForkstatError,
}

/// Results of processing several benchmarks
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<BenchmarkReport>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Analysis pipeline over a fixed revision table and measurement store
#[derive(Debug)]
pub struct Pipeline<S = JsonMeasurementStore> {
    revisions: RevisionTable,
    store: S,
}

impl Pipeline<JsonMeasurementStore> {
    /// Load the revision table named by `config`
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let revisions = RevisionTable::from_file(&config.revision_table)?;
        Ok(Self::new(revisions, JsonMeasurementStore))
    }
}

impl<S: MeasurementStore> Pipeline<S> {
    pub fn new(revisions: RevisionTable, store: S) -> Self {
        Self { revisions, store }
    }

    pub fn revisions(&self) -> &RevisionTable {
        &self.revisions
    }

    /// Resolve, load and compute statistics for one benchmark
    pub fn analyze(&self, record: &BenchmarkRecord) -> Result<BenchmarkReport> {
        let _span = tracing::info_span!("benchmark", name = %record.stem()).entered();

        let record = record.resolve_revision(&self.revisions)?;
        let forks = self.store.load(record.source())?;
        let stats = StatSeries::compute(&forks)?;
        if let Err(e) = stats.rpd_per_fork_pair() {
            tracing::warn!(benchmark = %record.stem(), "{}", e);
        }

        tracing::info!(
            repository = %record.repository(),
            forks = forks.fork_count(),
            "analyzed benchmark"
        );
        Ok(BenchmarkReport {
            record,
            forks,
            stats,
        })
    }

    /// Analyze every record; failures are collected, never fatal
    pub fn analyze_all(&self, records: &[BenchmarkRecord]) -> BatchReport {
        let mut batch = BatchReport::default();
        for record in records {
            match self.analyze(record) {
                Ok(report) => batch.succeeded.push(report),
                Err(error) => {
                    tracing::warn!(benchmark = %record.source().display(), "{}", error);
                    batch.failed.push(Failure {
                        source: record.source().to_path_buf(),
                        error,
                    });
                }
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::revision::RevisionRow;
    use std::collections::HashMap;
    use std::path::Path;

    /// In-memory store keyed by file name
    struct MapStore(HashMap<String, Vec<Vec<f64>>>);

    impl MeasurementStore for MapStore {
        fn load(&self, source: &Path) -> Result<ForkSeries> {
            let name = source.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let forks = self.0.get(name).cloned().ok_or_else(|| {
                ForkstatError::io(
                    source,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "not in map"),
                )
            })?;
            ForkSeries::new(forks).map_err(|r| ForkstatError::format(source, r))
        }
    }

    fn pipeline() -> Pipeline<MapStore> {
        let revisions = RevisionTable::new(vec![
            RevisionRow {
                repository: "apache/commons".to_string(),
                tag: "v1.2.3".to_string(),
            },
            RevisionRow {
                repository: "zero/mean".to_string(),
                tag: "v0".to_string(),
            },
        ]);
        let mut data = HashMap::new();
        data.insert(
            "apache__commons#sort#.json".to_string(),
            vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]],
        );
        data.insert(
            "zero__mean#m#.json".to_string(),
            vec![vec![0.0, 0.0], vec![1.0, 1.0]],
        );
        Pipeline::new(revisions, MapStore(data))
    }

    #[test]
    fn test_end_to_end_scenario() {
        let record = BenchmarkRecord::from_path("apache__commons#sort#.json").unwrap();
        let report = pipeline().analyze(&record).unwrap();

        let id = report.record.identity();
        assert_eq!(
            (id.organization.as_str(), id.project.as_str(), id.method.as_str(), id.params.as_str()),
            ("apache", "commons", "sort", "")
        );
        assert_eq!(report.record.revision().unwrap(), "v1.2.3");
        assert_eq!(report.stats.cv_values(), vec![0.0, 0.0]);
        assert_eq!(report.stats.rpd_values().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_zero_mean_fork_keeps_cv_charts() {
        let record = BenchmarkRecord::from_path("zero__mean#m#.json").unwrap();
        let report = pipeline().analyze(&record).unwrap();

        assert_eq!(report.stats.cv_values(), vec![0.0, 0.0]);
        let charts = report.presentations(&ChartKind::ALL);
        assert!(charts[0].is_ok());
        assert_eq!(charts[1].as_ref().unwrap_err().kind(), ErrorKind::Domain);
        assert!(charts[2].is_ok());
    }

    #[test]
    fn test_unknown_repository_is_not_found() {
        let record = BenchmarkRecord::from_path("google__guava#hash#.json").unwrap();
        let err = pipeline().analyze(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_measurements_is_io_error() {
        let p = pipeline();
        let record = BenchmarkRecord::from_path("apache__commons#other#.json").unwrap();
        assert_eq!(p.analyze(&record).unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let records: Vec<BenchmarkRecord> = [
            "apache__commons#sort#.json",
            "google__guava#hash#.json",
            "zero__mean#m#.json",
        ]
        .iter()
        .map(|n| BenchmarkRecord::from_path(*n).unwrap())
        .collect();

        let batch = pipeline().analyze_all(&records);
        assert_eq!(batch.total(), 3);
        assert_eq!(batch.succeeded.len(), 2);

        let kinds: Vec<ErrorKind> = batch.failed.iter().map(|f| f.error.kind()).collect();
        assert_eq!(kinds, vec![ErrorKind::NotFound]);
    }

    #[test]
    fn test_report_presentations() {
        let record = BenchmarkRecord::from_path("apache__commons#sort#.json").unwrap();
        let report = pipeline().analyze(&record).unwrap();
        let all = report.presentations(&ChartKind::ALL);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|p| p
            .as_ref()
            .unwrap()
            .title
            .starts_with("Project apache/commons at rev v1.2.3")));
    }
}
