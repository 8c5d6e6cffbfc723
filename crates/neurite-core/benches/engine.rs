use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use neurite_core::{MetabolicCondition, Simulator, SimulatorConfig};

fn seeded_simulator() -> Simulator {
    Simulator::new(SimulatorConfig::default().with_seed(1234)).expect("bench simulator")
}

fn bench_standard_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("standard_run");
    // Short tick counts to keep benches fast in CI
    for &ticks in &[100usize, 500, 1000] {
        group.throughput(Throughput::Elements(ticks as u64));
        group.bench_with_input(BenchmarkId::new("ticks", ticks), &ticks, |b, &ticks| {
            b.iter_batched(
                seeded_simulator,
                |mut sim| {
                    sim.run_standard(ticks);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_condition_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_run");
    let mut condition = MetabolicCondition::hypoxia();
    condition.onset_timestep = 50;

    group.throughput(Throughput::Elements(500));
    group.bench_function("hypoxia_500", |b| {
        b.iter_batched(
            seeded_simulator,
            |mut sim| {
                sim.run_with_condition(&condition, 500);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_standard_run, bench_condition_run);
criterion_main!(benches);
