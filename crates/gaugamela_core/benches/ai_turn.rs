//! AI and rendering benchmarks for gaugamela_core.
//!
//! Run with: `cargo bench -p gaugamela_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gaugamela_core::ai;
use gaugamela_core::render;
use gaugamela_test_utils::fixtures::{self, persian, phalanx, RecordingCanvas};

/// A crowded field: a Macedonian line at the bottom, a Persian line at the top.
fn crowded() -> gaugamela_core::battle::BattleState {
    let mut roster = Vec::new();
    for x in 0..20 {
        roster.push(phalanx(x, 14));
        roster.push(persian(x, 0));
    }
    fixtures::battle_with(&roster)
}

pub fn ai_turn_benchmark(c: &mut Criterion) {
    let catalog = fixtures::catalog();

    c.bench_function("ai_turn_opening", |b| {
        b.iter_batched(
            fixtures::opening_battle,
            |mut state| black_box(ai::run_ai_turn(&mut state, &catalog)),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("ai_turn_crowded", |b| {
        b.iter_batched(
            crowded,
            |mut state| black_box(ai::run_ai_turn(&mut state, &catalog)),
            BatchSize::SmallInput,
        );
    });
}

pub fn render_benchmark(c: &mut Criterion) {
    let catalog = fixtures::catalog();

    c.bench_function("draw_battlefield", |b| {
        b.iter_batched(
            || (crowded(), RecordingCanvas::default()),
            |(mut state, mut canvas)| {
                render::draw_battlefield(&mut state, &catalog, &mut canvas);
                black_box(canvas.calls.len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, ai_turn_benchmark, render_benchmark);
criterion_main!(benches);
