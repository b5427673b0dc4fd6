//! Criterion benchmarks for panel derivation and rendering.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use reconcile_lab::sync::derive;
use reconcile_lab::{render, Era, Explainer, ManualScheduler, Settings};

/// Benchmark the pure step -> flags derivation over every walkthrough.
fn bench_derive(c: &mut Criterion) {
    c.bench_function("derive_all_steps", |b| {
        b.iter(|| {
            for era in Era::all() {
                for scenario in era.scenarios() {
                    for step in 0..=scenario.max_step() {
                        black_box(derive(*era, *scenario, black_box(step)));
                    }
                }
            }
        });
    });
}

/// Benchmark building a full panel view for each scenario.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for era in Era::all() {
        for scenario in era.scenarios() {
            let mut ex = Explainer::new(*era, ManualScheduler::new(), Settings::default());
            ex.select(*scenario);
            ex.advance_once();
            group.bench_with_input(
                BenchmarkId::new(era.key(), scenario.key()),
                &ex,
                |b, ex| b.iter(|| black_box(render(ex))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_render);
criterion_main!(benches);
