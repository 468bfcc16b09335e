//! CSV output format for benchmark statistics
//!
//! One row per statistic value, suitable for spreadsheet analysis:
//! `repository,revision,method,params,metric,index,value`

use crate::error::Result;
use crate::pipeline::BenchmarkReport;

/// CSV record for a single statistic value
#[derive(Debug, Clone, PartialEq)]
pub struct CsvStat {
    pub repository: String,
    pub revision: String,
    pub method: String,
    pub params: String,
    /// `cv` (index = fork) or `rpd` (index = fork pair)
    pub metric: &'static str,
    pub index: usize,
    pub value: f64,
}

/// CSV statistics output formatter
#[derive(Debug, Default)]
pub struct CsvStatsOutput {
    stats: Vec<CsvStat>,
}

impl CsvStatsOutput {
    pub fn new() -> Self {
        Self { stats: Vec::new() }
    }

    /// Add every CV and RPD value of `report`
    ///
    /// An undefined RPD series contributes no rows.
    pub fn add_report(&mut self, report: &BenchmarkReport) -> Result<()> {
        let id = report.record.identity();
        let revision = report.record.revision()?.to_string();
        let row = |metric: &'static str, index: usize, value: f64| CsvStat {
            repository: id.repository(),
            revision: revision.clone(),
            method: id.method.clone(),
            params: id.params.clone(),
            metric,
            index,
            value,
        };

        let cv_rows: Vec<CsvStat> = report
            .stats
            .cv_per_fork
            .iter()
            .map(|c| row("cv", c.fork, c.percent))
            .collect();
        let rpd_rows: Vec<CsvStat> = report
            .stats
            .rpd_per_fork_pair()
            .map(|rpd| rpd.iter().map(|r| row("rpd", r.pair, r.ratio)).collect())
            .unwrap_or_default();

        self.stats.extend(cv_rows);
        self.stats.extend(rpd_rows);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::from("repository,revision,method,params,metric,index,value\n");

        for stat in &self.stats {
            output.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                Self::escape_field(&stat.repository),
                Self::escape_field(&stat.revision),
                Self::escape_field(&stat.method),
                Self::escape_field(&stat.params),
                stat.metric,
                stat.index,
                stat.value
            ));
        }

        output
    }
}
