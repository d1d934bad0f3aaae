//! Benchmarks for rendering a click track block by block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::{audio::OfflineBackend, Metronome, MetronomeConfig, NoteResolution};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Busiest case: every 16th sounds at the top tempo
        let config = MetronomeConfig::new()
            .tempo(250.0)
            .note_resolution(NoteResolution::Sixteenth);
        let mut metronome = Metronome::new(OfflineBackend::new(SAMPLE_RATE), config);
        if metronome.play().is_err() {
            return;
        }

        group.bench_with_input(BenchmarkId::new("sixteenths_250bpm", size), &size, |b, _| {
            b.iter(|| {
                metronome.on_tick();
                metronome.backend_mut().render(black_box(&mut buffer));
            })
        });

        // Stop the tick thread before the next block size
        let _ = metronome.play();
    }

    group.finish();
}
