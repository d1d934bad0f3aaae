use std::time::Duration;

use saavy_metronome::{
    audio::{AudioBackend, OfflineBackend},
    Metronome, MetronomeConfig, NoteResolution,
};

const SAMPLE_RATE: u32 = 48_000;

fn metronome(tempo: f64, resolution: NoteResolution) -> Metronome<OfflineBackend> {
    let config = MetronomeConfig::new()
        .tempo(tempo)
        .note_resolution(resolution);
    Metronome::new(OfflineBackend::new(SAMPLE_RATE), config)
}

/// Tick every `interval` seconds of device time until `until`, returning the audio
fn drive(metronome: &mut Metronome<OfflineBackend>, interval: f64, until: f64) -> Vec<f32> {
    let mut audio = Vec::new();
    let mut t = metronome.backend().now();
    while t < until {
        metronome.on_tick();
        t += interval;
        audio.extend(metronome.backend_mut().render_until(t));
    }
    audio
}

fn due_times(metronome: &Metronome<OfflineBackend>) -> Vec<f64> {
    metronome
        .notes()
        .map(|log| log.iter().map(|n| n.due_time).collect())
        .unwrap_or_default()
}

fn peak(audio: &[f32], from: f64, to: f64) -> f32 {
    let start = (from * SAMPLE_RATE as f64) as usize;
    let end = (to * SAMPLE_RATE as f64) as usize;
    audio[start..end]
        .iter()
        .fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

#[test]
fn sixteenths_at_sixty_sound_every_step() {
    let mut metronome = metronome(60.0, NoteResolution::Sixteenth);
    metronome.play().unwrap();
    drive(&mut metronome, 0.025, 4.2);

    let times = due_times(&metronome);
    assert!(times.len() >= 17);
    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], 0.25);
    }

    let tones = metronome.backend().submitted();
    assert_eq!(tones.len(), times.len(), "every step should sound");

    let first_bar: Vec<f32> = tones.iter().take(16).map(|t| t.frequency).collect();
    let expected: Vec<f32> = (0..16)
        .map(|beat| match beat {
            0 => 880.0,
            4 | 8 | 12 => 440.0,
            _ => 220.0,
        })
        .collect();
    assert_eq!(first_bar, expected);
    assert_eq!(tones[16].frequency, 880.0);
}

#[test]
fn quarter_resolution_at_one_twenty_sounds_only_quarters() {
    let mut metronome = metronome(120.0, NoteResolution::Quarter);
    metronome.play().unwrap();
    let audio = drive(&mut metronome, 0.025, 2.2);

    let notes = metronome.notes().unwrap();
    for pair in notes.as_slice().windows(2) {
        assert!((pair[1].due_time - pair[0].due_time - 0.125).abs() < 1e-12);
    }

    let expected: Vec<(f64, f32)> = notes
        .iter()
        .filter(|n| n.beat.index() % 4 == 0)
        .map(|n| (n.due_time, if n.beat.index() == 0 { 880.0 } else { 440.0 }))
        .collect();
    let submitted: Vec<(f64, f32)> = metronome
        .backend()
        .submitted()
        .iter()
        .map(|t| (t.start, t.frequency))
        .collect();
    assert_eq!(submitted, expected);
    assert!(notes.len() > submitted.len(), "silent beats are still logged");

    // Beat 1 is logged but silent, beat 4 sounds
    assert_eq!(peak(&audio, 0.125, 0.175), 0.0);
    assert!(peak(&audio, 0.5, 0.55) > 0.1);
}

#[test]
fn late_tick_schedules_missed_steps_at_once() {
    let mut metronome = metronome(60.0, NoteResolution::Sixteenth);
    metronome.play().unwrap();
    metronome.on_tick();
    let before = metronome.notes().unwrap().len();

    // Three steps' worth of stall on the control thread
    metronome.backend_mut().render_until(0.75);
    let scheduled = metronome.on_tick();

    assert!(scheduled >= 3);
    let times = due_times(&metronome);
    assert_eq!(times.len(), before + scheduled);
    assert!(times.windows(2).all(|p| p[0] < p[1]));
}

#[test]
fn long_stall_still_sounds_notes_ahead_of_the_clock() {
    let mut metronome = metronome(250.0, NoteResolution::Sixteenth);
    metronome.play().unwrap();
    metronome.on_tick();

    // Three seconds without a tick: around fifty steps to catch up on
    metronome.backend_mut().render_until(3.0);
    let scheduled = metronome.on_tick();
    assert!(scheduled > 32, "catch-up should outnumber the tone slots");

    let last = *metronome.notes().unwrap().last().unwrap();
    assert!(last.due_time > 3.0);

    let audio = metronome.backend_mut().render_until(3.2);
    // Every tone in the window has played out and released its slot
    assert_eq!(metronome.backend().active_tones(), 0);
    let from = last.due_time - 3.0;
    assert!(peak(&audio, from, from + 0.05) > 0.1);
}

#[test]
fn tempo_change_only_affects_following_steps() {
    let mut metronome = metronome(60.0, NoteResolution::Sixteenth);
    metronome.play().unwrap();
    metronome.on_tick(); // beat 0 at 0.0, next due 0.25

    metronome.set_tempo(120.0);
    metronome.backend_mut().render_until(0.2);
    metronome.on_tick(); // beat 1 at 0.25, next due 0.375

    let times = due_times(&metronome);
    assert_eq!(times, vec![0.0, 0.25]);
    assert_eq!(metronome.session().unwrap().cursor(), 0.375);

    drive(&mut metronome, 0.025, 1.0);
    let times = due_times(&metronome);
    for pair in times[1..].windows(2) {
        assert!((pair[1] - pair[0] - 0.125).abs() < 1e-12);
    }
}

#[test]
fn beats_never_skip_across_bars() {
    let mut metronome = metronome(180.0, NoteResolution::Eighth);
    metronome.play().unwrap();

    // Mix of prompt ticks and long stalls
    for stall in [0.01, 0.3, 0.02, 0.9, 0.025, 0.5] {
        metronome.on_tick();
        let t = metronome.backend().now() + stall;
        metronome.backend_mut().render_until(t);
    }
    metronome.on_tick();

    let beats: Vec<u8> = metronome
        .notes()
        .unwrap()
        .iter()
        .map(|n| n.beat.index())
        .collect();
    assert!(beats.len() > 16);
    for (i, beat) in beats.iter().enumerate() {
        assert_eq!(*beat as usize, i % 16);
    }
}

#[test]
fn stopping_does_not_retract_submitted_tones() {
    let mut metronome = metronome(120.0, NoteResolution::Sixteenth);
    metronome.play().unwrap();
    metronome.on_tick(); // beat 0 at 0.0
    metronome.backend_mut().render_until(0.05);
    metronome.on_tick(); // beat 1 at 0.125 is already inside the window
    metronome.play().unwrap();

    let audio = metronome.backend_mut().render_until(0.3);
    // Rendered from 0.05s on, so beat 1 lands 0.075s in
    let start = (0.075 * SAMPLE_RATE as f64) as usize;
    let end = (0.125 * SAMPLE_RATE as f64) as usize;
    assert!(audio[start..end].iter().any(|s| s.abs() > 0.1));
}

#[test]
fn tick_thread_drives_scheduling() {
    let config = MetronomeConfig::new()
        .tempo(60.0)
        .tick_interval(Duration::from_millis(5));
    let mut metronome = Metronome::new(OfflineBackend::new(SAMPLE_RATE), config);

    // Stopped: ticks are neither produced nor acted on
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(metronome.process_ticks(), 0);

    metronome.play().unwrap();
    std::thread::sleep(Duration::from_millis(60));
    // Offline clock stands still, so only the first step is due
    assert_eq!(metronome.process_ticks(), 1);

    metronome.play().unwrap();
    std::thread::sleep(Duration::from_millis(30));
    metronome.backend_mut().render_until(5.0);
    assert_eq!(metronome.process_ticks(), 0);
}
