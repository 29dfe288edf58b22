//! Solve-path benchmarks over fixed-seed instances.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use satori_cdcl::testing::{pigeonhole, random_3sat};
use satori_cdcl::{CdclConfig, CdclSolver, Decider, RestartPolicy};

fn bench_random_3sat(c: &mut Criterion) {
    let cnf = random_3sat(100, 420, 424242);
    let mut group = c.benchmark_group("random_3sat_100");
    for (name, decider) in [("vsids", Decider::Vsids), ("minisat", Decider::Minisat)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let config = CdclConfig {
                    decider,
                    restart: RestartPolicy::Luby,
                    ..CdclConfig::default()
                };
                let mut solver = CdclSolver::with_config(black_box(&cnf), config).unwrap();
                black_box(solver.solve().unwrap());
            });
        });
    }
    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let cnf = pigeonhole(6, 5);
    c.bench_function("pigeonhole_6_5", |b| {
        b.iter(|| {
            let mut solver = CdclSolver::new(black_box(&cnf)).unwrap();
            black_box(solver.solve().unwrap());
        });
    });
}

criterion_group!(benches, bench_random_3sat, bench_pigeonhole);
criterion_main!(benches);
