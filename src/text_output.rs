//! Human-readable console report

use crate::discovery::Rejected;
use crate::error::Result;
use crate::pipeline::{BatchReport, BenchmarkReport};

/// Format one benchmark's statistics
pub fn format_report(report: &BenchmarkReport) -> Result<String> {
    let record = &report.record;
    let id = record.identity();
    let mut out = String::new();

    out.push_str(&format!("{}\n", crate::summary::benchmark_title(record)?));
    out.push_str(&format!("Repository: {}\n", id.repository_url()));
    out.push_str(&format!("File: {}\n", record.source().display()));

    out.push_str(&format!("\nCV per fork ({} forks):\n", report.forks.fork_count()));
    for (cv, samples) in report.stats.cv_per_fork.iter().zip(report.forks.forks()) {
        out.push_str(&format!(
            "  Fork: {} (CV: {:.2}%, {} samples)\n",
            cv.fork,
            cv.percent,
            samples.len()
        ));
    }

    match report.stats.rpd_per_fork_pair() {
        Err(e) => out.push_str(&format!("\nRPD: {}\n", e)),
        Ok([]) => out.push_str("\nRPD: n/a (single fork)\n"),
        Ok(pairs) => {
            out.push_str("\nRPD between adjacent forks:\n");
            for rpd in pairs {
                out.push_str(&format!(
                    "  Fork {} vs Fork {}: {:.4}\n",
                    rpd.pair,
                    rpd.pair + 1,
                    rpd.ratio
                ));
            }
        }
    }

    Ok(out)
}

/// Format every benchmark of a batch plus its failures and rejected files
pub fn format_batch(batch: &BatchReport, rejected: &[Rejected]) -> Result<String> {
    let mut out = String::new();

    for (i, report) in batch.succeeded.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_report(report)?);
    }

    if !batch.failed.is_empty() {
        out.push_str(&format!("\nFailed benchmarks ({}):\n", batch.failed.len()));
        for failure in &batch.failed {
            out.push_str(&format!("  - {}\n", failure.error));
        }
    }

    if !rejected.is_empty() {
        out.push_str(&format!("\nUnparsable files ({}):\n", rejected.len()));
        for r in rejected {
            out.push_str(&format!("  - {}\n", r.path.display()));
        }
    }

    out.push_str(&format!(
        "\nProcessed {} of {} benchmarks\n",
        batch.succeeded.len(),
        batch.total()
    ));
    Ok(out)
}
