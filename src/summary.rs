//! Presentation series for chart and report sinks
//!
//! Pure formatting: every number shown here was already computed by
//! [`crate::stats`] or read from the [`ForkSeries`].

use crate::benchmark::BenchmarkRecord;
use crate::error::Result;
use crate::measurements::ForkSeries;
use crate::stats::StatSeries;
use serde::Serialize;

/// Which presentation to assemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Per-fork scatter of raw samples, one panel per fork
    Forks,
    /// Bar chart of RPD between adjacent forks
    Rpd,
    /// Line chart of CV against fork number
    Cv,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Forks, ChartKind::Rpd, ChartKind::Cv];

    /// Suffix appended to the benchmark stem when naming artifacts
    pub fn artifact_suffix(self) -> &'static str {
        match self {
            ChartKind::Forks => "",
            ChartKind::Rpd => "_rpd",
            ChartKind::Cv => "_cv_vs_forks",
        }
    }
}

/// Labelled value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub label: String,
    pub value: f64,
}

/// One named group of points (a panel in a scatter, or the single series of a bar/line chart)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub kind: ChartKind,
    /// Benchmark title shared by every presentation of the same benchmark
    pub title: String,
    /// Chart-specific heading
    pub heading: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// `Project {repo} at rev {rev}\nMethod: {method}[\nParams: {params}]`
pub fn benchmark_title(record: &BenchmarkRecord) -> Result<String> {
    let id = record.identity();
    let mut title = format!(
        "Project {} at rev {}\nMethod: {}",
        id.repository(),
        record.revision()?,
        id.method
    );
    if id.has_params() {
        title.push_str(&format!("\nParams: {}", id.params));
    }
    Ok(title)
}

/// Assemble one presentation for a fully populated benchmark
///
/// [`ChartKind::Rpd`] fails with the stored domain error when RPD is
/// undefined; the other kinds only need CV.
pub fn assemble(
    kind: ChartKind,
    record: &BenchmarkRecord,
    forks: &ForkSeries,
    stats: &StatSeries,
) -> Result<Presentation> {
    let title = benchmark_title(record)?;
    let method = &record.identity().method;

    let presentation = match kind {
        ChartKind::Forks => Presentation {
            kind,
            title,
            heading: format!("Samples per fork for {}", method),
            x_label: "Iteration".to_string(),
            y_label: "Average Exec Time (seconds)".to_string(),
            series: fork_panels(forks, stats),
        },
        ChartKind::Rpd => Presentation {
            kind,
            title,
            heading: format!(
                "RPD between forks before and after teardown for {}",
                method
            ),
            x_label: "Fork Pair".to_string(),
            y_label: "Relative Performance Deviation (RPD)".to_string(),
            series: vec![Series {
                name: "RPD".to_string(),
                points: stats
                    .rpd_per_fork_pair()?
                    .iter()
                    .map(|r| Point {
                        label: format!("Fork {} vs Fork {}", r.pair, r.pair + 1),
                        value: r.ratio,
                    })
                    .collect(),
            }],
        },
        ChartKind::Cv => Presentation {
            kind,
            title,
            heading: "Coefficient of Variation (CV) vs Number of Forks".to_string(),
            x_label: "Number of Forks".to_string(),
            y_label: "Coefficient of Variation (%)".to_string(),
            series: vec![Series {
                name: "CV".to_string(),
                points: stats
                    .cv_per_fork
                    .iter()
                    .map(|c| Point {
                        label: (c.fork + 1).to_string(),
                        value: c.percent,
                    })
                    .collect(),
            }],
        },
    };
    Ok(presentation)
}

fn fork_panels(forks: &ForkSeries, stats: &StatSeries) -> Vec<Series> {
    forks
        .forks()
        .iter()
        .zip(&stats.cv_per_fork)
        .map(|(samples, cv)| Series {
            name: format!("Fork: {} (CV: {:.2}%)", cv.fork, cv.percent),
            points: samples
                .iter()
                .enumerate()
                .map(|(iteration, value)| Point {
                    label: iteration.to_string(),
                    value: *value,
                })
                .collect(),
        })
        .collect()
}
