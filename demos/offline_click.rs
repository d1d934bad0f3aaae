//! Bounce two bars of click track without an audio device.
//!
//! Run with: cargo run --example offline_click -- [bpm]

use saavy_metronome::{
    audio::{AudioBackend, OfflineBackend},
    Metronome, MetronomeConfig, NoteResolution, Result,
};

const SAMPLE_RATE: u32 = 48_000;
const TICK_SECONDS: f64 = 0.025;

fn main() -> Result<()> {
    let tempo = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .filter(|bpm| *bpm > 0.0)
        .unwrap_or(120.0);

    let config = MetronomeConfig::new()
        .tempo(tempo)
        .note_resolution(NoteResolution::Eighth);
    let mut metronome = Metronome::new(OfflineBackend::new(SAMPLE_RATE), config);
    metronome.play()?;

    // Two bars of four quarter notes
    let length = 2.0 * 4.0 * 60.0 / tempo;
    let mut audio = Vec::new();
    let mut t = 0.0;
    while t < length {
        metronome.on_tick();
        t += TICK_SECONDS;
        audio.extend(metronome.backend_mut().render_until(t));
    }
    metronome.play()?;

    let peak = audio.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let voiced = audio.iter().filter(|s| s.abs() > 1e-4).count();

    println!("tempo:      {tempo:.1} BPM");
    println!("rendered:   {:.3}s ({} frames)", metronome.backend().now(), audio.len());
    println!("peak:       {peak:.3}");
    println!("voiced:     {:.1}%", 100.0 * voiced as f64 / audio.len().max(1) as f64);
    println!();

    for tone in metronome.backend().submitted() {
        println!("{:>8.4}s  {:>5.0} Hz", tone.start, tone.frequency);
    }

    Ok(())
}
