/// Fork statistics benchmarks
///
/// Measures CV/RPD computation over realistic fork layouts
/// (few forks, many iterations) and the presentation assembly on top.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use forkstat::benchmark::BenchmarkRecord;
use forkstat::measurements::ForkSeries;
use forkstat::stats::StatSeries;
use forkstat::summary::{assemble, ChartKind};

fn synthetic_forks(forks: usize, iterations: usize) -> ForkSeries {
    let data = (0..forks)
        .map(|f| {
            (0..iterations)
                .map(|i| 1.0 + f as f64 * 0.01 + ((i * 7919) % 97) as f64 * 1e-4)
                .collect()
        })
        .collect();
    ForkSeries::new(data).unwrap()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("stat_series_compute");
    for (forks, iterations) in [(5, 100), (10, 1_000), (30, 3_000)] {
        let series = synthetic_forks(forks, iterations);
        group.throughput(Throughput::Elements((forks * iterations) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", forks, iterations)),
            &series,
            |b, s| b.iter(|| StatSeries::compute(black_box(s)).unwrap()),
        );
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let record = BenchmarkRecord::from_path("apache__commons#sort#n=10.json")
        .unwrap()
        .with_revision("v1.2.3");
    let series = synthetic_forks(10, 1_000);
    let stats = StatSeries::compute(&series).unwrap();

    c.bench_function("assemble_all_charts", |b| {
        b.iter(|| {
            for kind in ChartKind::ALL {
                black_box(assemble(kind, &record, &series, &stats).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_compute, bench_assemble);
criterion_main!(benches);
