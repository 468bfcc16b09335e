use anyhow::{bail, Context, Result};
use clap::Parser;
use forkstat::cli::{Cli, OutputFormat};
use forkstat::config::PipelineConfig;
use forkstat::csv_output::CsvStatsOutput;
use forkstat::discovery::{discover, Discovery};
use forkstat::json_output::JsonOutput;
use forkstat::pipeline::{BatchReport, Pipeline};
use forkstat::summary::ChartKind;
use forkstat::svg_output::{ChartSink, SvgRenderer};
use forkstat::{benchmark::BenchmarkRecord, text_output};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings always reach stderr, --debug adds everything
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration: defaults, then --config file, then CLI flags
fn load_config(args: &Cli) -> Result<PipelineConfig> {
    let base = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let config = args.apply_overrides(base);
    config.validate()?;
    Ok(config)
}

/// Pick the benchmarks to analyze from what was discovered
fn select(args: &Cli, discovery: &Discovery) -> Result<Vec<BenchmarkRecord>> {
    if discovery.is_empty() {
        bail!("No parsable benchmark files found");
    }

    if args.all {
        return Ok(discovery.benchmarks.clone());
    }

    if let Some(name) = &args.benchmark {
        return match discovery.find(name) {
            Some(record) => Ok(vec![record.clone()]),
            None => bail!("Benchmark not found: {}", name),
        };
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let picked = discovery
        .pick_one(&mut rng)
        .context("No benchmark available to pick")?;
    tracing::info!(benchmark = %picked.source().display(), "randomly selected");
    Ok(vec![picked.clone()])
}

/// Write chart artifacts for every analyzed benchmark
///
/// A chart whose statistic is undefined is reported and skipped.
fn render_charts(batch: &BatchReport, kinds: &[ChartKind], output_dir: &Path) -> Result<()> {
    let mut renderer = SvgRenderer::new(output_dir);
    for report in &batch.succeeded {
        let stem = report.record.stem();
        for (kind, presentation) in kinds.iter().zip(report.presentations(kinds)) {
            match presentation {
                Ok(presentation) => {
                    let path = renderer.render(&presentation, &stem)?;
                    println!("Plot saved to: {}", path.display());
                }
                Err(e) => {
                    eprintln!("Skipped {}{}.svg: {}", stem, kind.artifact_suffix(), e);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    tracing::info!(
        data_dir = %config.data_directory.display(),
        revisions = %config.revision_table.display(),
        "configuration"
    );

    let discovery = discover(&config.data_directory)?;
    let records = select(&args, &discovery)?;

    let pipeline = Pipeline::from_config(&config).context("Failed to load revision table")?;
    let batch = pipeline.analyze_all(&records);

    match args.format {
        OutputFormat::Svg => {
            render_charts(&batch, &args.chart.kinds(), &config.output_directory)?;
            for failure in &batch.failed {
                eprintln!("Skipped {}: {}", failure.source.display(), failure.error);
            }
        }
        OutputFormat::Text => {
            print!("{}", text_output::format_batch(&batch, &discovery.rejected)?);
        }
        OutputFormat::Json => {
            println!("{}", JsonOutput::from_batch(&batch)?.to_json()?);
        }
        OutputFormat::Csv => {
            let mut output = CsvStatsOutput::new();
            for report in &batch.succeeded {
                output.add_report(report)?;
            }
            print!("{}", output.to_csv());
        }
    }

    if batch.succeeded.is_empty() {
        bail!(
            "No benchmark could be analyzed ({} failed)",
            batch.failed.len()
        );
    }

    Ok(())
}
