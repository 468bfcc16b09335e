// End-to-end library tests: discovery -> revision -> measurements -> stats -> charts

use forkstat::config::PipelineConfig;
use forkstat::discovery::discover;
use forkstat::pipeline::Pipeline;
use forkstat::summary::ChartKind;
use forkstat::svg_output::{ChartSink, SvgRenderer};
use forkstat::ErrorKind;
use std::fs;
use tempfile::TempDir;

fn setup(files: &[(&str, &str)], revisions: &str) -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("timeseries");
    fs::create_dir(&data).unwrap();
    for (name, payload) in files {
        fs::write(data.join(name), payload).unwrap();
    }
    let table = dir.path().join("benchmarks_revision.csv");
    fs::write(&table, revisions).unwrap();

    let mut config = PipelineConfig::new(data, table);
    config.output_directory = dir.path().join("plots");
    (dir, config)
}

#[test]
fn test_reference_scenario() {
    let (_dir, config) = setup(
        &[("apache__commons#sort#.json", "[[1,1,1],[2,2,2]]")],
        "repository,tag\napache/commons,v1.2.3\n",
    );

    let discovery = discover(&config.data_directory).unwrap();
    assert_eq!(discovery.benchmarks.len(), 1);

    let pipeline = Pipeline::from_config(&config).unwrap();
    let report = pipeline.analyze(&discovery.benchmarks[0]).unwrap();

    let id = report.record.identity();
    assert_eq!(id.organization, "apache");
    assert_eq!(id.project, "commons");
    assert_eq!(id.method, "sort");
    assert_eq!(id.params, "");
    assert_eq!(report.record.revision().unwrap(), "v1.2.3");
    assert_eq!(report.stats.cv_values(), vec![0.0, 0.0]);
    assert_eq!(report.stats.rpd_values().unwrap(), vec![1.0]);
}

#[test]
fn test_duplicate_revision_rows_take_first() {
    let (_dir, config) = setup(
        &[("apache__commons#sort#.json", "[[1],[1]]")],
        "repository,tag\napache/commons,v1\napache/commons,v2\n",
    );
    let discovery = discover(&config.data_directory).unwrap();
    let report = Pipeline::from_config(&config)
        .unwrap()
        .analyze(&discovery.benchmarks[0])
        .unwrap();
    assert_eq!(report.record.revision().unwrap(), "v1");
}

#[test]
fn test_batch_error_kinds_are_local() {
    let (_dir, config) = setup(
        &[
            ("apache__commons#ok#.json", "[[1,2],[2,3]]"),
            ("apache__commons#empty#.json", "[]"),
            ("apache__commons#emptyfork#.json", "[[1],[]]"),
            ("apache__commons#negative#.json", "[[1,-2]]"),
            ("missing__repo#m#.json", "[[1]]"),
        ],
        "repository,tag\napache/commons,v1\n",
    );

    let discovery = discover(&config.data_directory).unwrap();
    let batch = Pipeline::from_config(&config)
        .unwrap()
        .analyze_all(&discovery.benchmarks);

    assert_eq!(batch.succeeded.len(), 1);
    assert_eq!(batch.succeeded[0].record.identity().method, "ok");

    let mut kinds: Vec<(String, ErrorKind)> = batch
        .failed
        .iter()
        .map(|f| {
            let name = f.source.file_name().unwrap().to_string_lossy().into_owned();
            (name, f.error.kind())
        })
        .collect();
    kinds.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        kinds,
        vec![
            ("apache__commons#empty#.json".to_string(), ErrorKind::Domain),
            ("apache__commons#emptyfork#.json".to_string(), ErrorKind::Domain),
            ("apache__commons#negative#.json".to_string(), ErrorKind::Format),
            ("missing__repo#m#.json".to_string(), ErrorKind::NotFound),
        ]
    );
}

#[test]
fn test_zero_mean_fork_renders_cv_charts() {
    let (_dir, config) = setup(
        &[("apache__commons#idle#.json", "[[0,0,0],[1,2,3],[2,2]]")],
        "repository,tag\napache/commons,v1\n",
    );
    let discovery = discover(&config.data_directory).unwrap();
    let report = Pipeline::from_config(&config)
        .unwrap()
        .analyze(&discovery.benchmarks[0])
        .unwrap();

    assert_eq!(report.stats.cv_per_fork[0].percent, 0.0);
    assert_eq!(report.stats.cv_per_fork.len(), 3);
    assert_eq!(report.stats.rpd_values().unwrap_err().kind(), ErrorKind::Domain);

    let mut renderer = SvgRenderer::new(&config.output_directory);
    let stem = report.record.stem();
    for kind in [ChartKind::Forks, ChartKind::Cv] {
        let path = renderer
            .render(&report.presentation(kind).unwrap(), &stem)
            .unwrap();
        assert!(path.exists());
    }
    assert!(report.presentation(ChartKind::Rpd).is_err());
}

#[test]
fn test_missing_revision_table_is_io_error() {
    let (dir, mut config) = setup(&[], "repository,tag\n");
    config.revision_table = dir.path().join("absent.csv");
    let err = Pipeline::from_config(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_render_every_chart() {
    let (_dir, config) = setup(
        &[("google__guava#hash#size=16.json", "[[0.5,0.6,0.55],[0.7,0.7],[0.65]]")],
        "repository,tag\ngoogle/guava,v31.0\n",
    );
    let discovery = discover(&config.data_directory).unwrap();
    let report = Pipeline::from_config(&config)
        .unwrap()
        .analyze(&discovery.benchmarks[0])
        .unwrap();

    let mut renderer = SvgRenderer::new(&config.output_directory);
    let stem = report.record.stem();
    for presentation in report.presentations(&ChartKind::ALL) {
        let path = renderer.render(&presentation.unwrap(), &stem).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Params: size=16"));
    }

    let rpd = fs::read_to_string(config.output_directory.join(format!("{}_rpd.svg", stem))).unwrap();
    assert!(rpd.contains("Fork 0 vs Fork 1"));
    assert!(rpd.contains("Fork 1 vs Fork 2"));
}
