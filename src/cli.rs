//! CLI argument parsing for forkstat

use crate::config::PipelineConfig;
use crate::summary::ChartKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// SVG chart files written to the output directory (default)
    Svg,
    /// Human-readable text on stdout
    Text,
    /// JSON document on stdout
    Json,
    /// CSV rows on stdout
    Csv,
}

/// Which chart(s) to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartSelection {
    /// Per-fork sample scatter with CV in each panel title
    Forks,
    /// RPD between adjacent forks
    Rpd,
    /// CV against number of forks
    Cv,
    /// All of the above
    All,
}

impl ChartSelection {
    pub fn kinds(self) -> Vec<ChartKind> {
        match self {
            ChartSelection::Forks => vec![ChartKind::Forks],
            ChartSelection::Rpd => vec![ChartKind::Rpd],
            ChartSelection::Cv => vec![ChartKind::Cv],
            ChartSelection::All => ChartKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "forkstat")]
#[command(version)]
#[command(about = "Fork-to-fork stability analysis (CV and RPD) for recorded benchmark timings", long_about = None)]
pub struct Cli {
    /// TOML configuration file (data_directory, revision_table, output_directory)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing {org}__{project}#{method}#{params}.json measurement files
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Revision table CSV with `repository` and `tag` columns
    #[arg(short = 'r', long = "revisions", value_name = "CSV")]
    pub revisions: Option<PathBuf>,

    /// Directory for chart artifacts (default: system temp dir)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analyze every discovered benchmark instead of one random pick
    #[arg(short = 'a', long = "all", conflicts_with = "benchmark")]
    pub all: bool,

    /// Analyze the benchmark with this file name
    #[arg(short = 'b', long = "benchmark", value_name = "FILE_NAME")]
    pub benchmark: Option<String>,

    /// Seed for the random benchmark pick
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Chart(s) to produce
    #[arg(long = "chart", value_enum, default_value = "all")]
    pub chart: ChartSelection,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "svg")]
    pub format: OutputFormat,

    /// Enable trace-level diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `base`
    pub fn apply_overrides(&self, base: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            data_directory: self.data_dir.clone().unwrap_or(base.data_directory),
            revision_table: self.revisions.clone().unwrap_or(base.revision_table),
            output_directory: self.output_dir.clone().unwrap_or(base.output_directory),
        }
    }
}
