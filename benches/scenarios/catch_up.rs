//! Benchmarks for one catch-up pass after the control thread stalled.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use saavy_metronome::{
    audio::OfflineBackend, scheduler::LookaheadScheduler, NoteResolution, SharedConfig,
};

use crate::SAMPLE_RATE;

const TEMPO: f64 = 120.0;

pub fn bench_catch_up(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/catch_up");
    let step = 15.0 / TEMPO;

    // Steps missed while the control thread was stalled
    for &missed in &[1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("steps", missed), &missed, |b, &missed| {
            b.iter_batched(
                || {
                    let config = SharedConfig::new(TEMPO, NoteResolution::Sixteenth);
                    let scheduler = LookaheadScheduler::new(config, 0.0, 0.1, 0.05);
                    let mut backend = OfflineBackend::new(SAMPLE_RATE);
                    backend.render_until(missed as f64 * step);
                    (scheduler, backend)
                },
                |(mut scheduler, mut backend)| {
                    black_box(scheduler.on_tick(&mut backend));
                    (scheduler, backend)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
