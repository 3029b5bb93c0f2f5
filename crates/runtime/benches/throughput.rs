use compound_sim::{simulate, SimulationConfig, MAX_MONTHS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_trajectory_throughput(c: &mut Criterion) {
    let config = SimulationConfig {
        months: MAX_MONTHS,
        ..SimulationConfig::default()
    };

    let mut group = c.benchmark_group("trajectory_throughput");
    group.throughput(Throughput::Elements(u64::from(MAX_MONTHS)));

    group.bench_function(BenchmarkId::new("simulate", MAX_MONTHS), |b| {
        b.iter(|| {
            let rows = simulate(black_box(&config)).expect("default config is valid");
            black_box(rows);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_trajectory_throughput);
criterion_main!(benches);
