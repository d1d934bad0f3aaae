//! Metronome configuration.
//!
//! `MetronomeConfig` is a plain snapshot used to build a metronome.
//! `SharedConfig` is the live view: the control surface writes tempo and
//! resolution through it while the scheduler reads them once per step, so a
//! change is effective on the next step and never touches notes that are
//! already scheduled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, AtomicU8, Ordering},
    Arc,
};
use std::time::Duration;

use crate::error::Error;

/// Which of the 16 steps per bar produce sound.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteResolution {
    /// Beats 0, 4, 8, 12
    #[default]
    Quarter,
    /// Even beats
    Eighth,
    /// Every step
    Sixteenth,
}

impl NoteResolution {
    pub const ALL: [NoteResolution; 3] = [
        NoteResolution::Quarter,
        NoteResolution::Eighth,
        NoteResolution::Sixteenth,
    ];

    /// Note value as written on the selector (4, 8 or 16).
    pub fn value(self) -> u8 {
        match self {
            NoteResolution::Quarter => 4,
            NoteResolution::Eighth => 8,
            NoteResolution::Sixteenth => 16,
        }
    }

    /// Whether a step on the 16-step grid sounds at this resolution.
    pub fn is_audible(self, beat: u8) -> bool {
        match self {
            NoteResolution::Quarter => beat % 4 == 0,
            NoteResolution::Eighth => beat % 2 == 0,
            NoteResolution::Sixteenth => true,
        }
    }
}

impl TryFrom<u8> for NoteResolution {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(NoteResolution::Quarter),
            8 => Ok(NoteResolution::Eighth),
            16 => Ok(NoteResolution::Sixteenth),
            other => Err(Error::UnknownResolution(other)),
        }
    }
}

impl std::fmt::Display for NoteResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ths", self.value())
    }
}

/// Snapshot of everything needed to build a [`crate::Metronome`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetronomeConfig {
    /// Tempo in beats per minute (must be > 0)
    pub tempo: f64,
    pub note_resolution: NoteResolution,
    /// Wall-clock period of the tick source
    pub tick_interval: Duration,
    /// How far ahead of the device clock notes are scheduled (seconds)
    pub schedule_ahead: f64,
    /// Length of each click (seconds)
    pub note_length: f64,
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            tempo: 60.0,
            note_resolution: NoteResolution::Quarter,
            tick_interval: Duration::from_millis(25),
            schedule_ahead: 0.1,
            note_length: 0.05,
        }
    }
}

impl MetronomeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tempo in beats per minute
    pub fn tempo(mut self, bpm: f64) -> Self {
        self.tempo = bpm;
        self
    }

    pub fn note_resolution(mut self, resolution: NoteResolution) -> Self {
        self.note_resolution = resolution;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the lookahead window in seconds
    pub fn schedule_ahead(mut self, seconds: f64) -> Self {
        self.schedule_ahead = seconds;
        self
    }

    pub fn note_length(mut self, seconds: f64) -> Self {
        self.note_length = seconds;
        self
    }
}

/// Live tempo and resolution, readable from any thread.
///
/// Clones share the same values. Writes are never validated here: the
/// caller keeps tempo above zero.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    tempo_bits: Arc<AtomicU64>,
    resolution: Arc<AtomicU8>,
}

impl SharedConfig {
    pub fn new(tempo: f64, resolution: NoteResolution) -> Self {
        Self {
            tempo_bits: Arc::new(AtomicU64::new(tempo.to_bits())),
            resolution: Arc::new(AtomicU8::new(resolution.value())),
        }
    }

    pub fn tempo(&self) -> f64 {
        f64::from_bits(self.tempo_bits.load(Ordering::Relaxed))
    }

    pub fn set_tempo(&self, bpm: f64) {
        self.tempo_bits.store(bpm.to_bits(), Ordering::Relaxed);
    }

    pub fn note_resolution(&self) -> NoteResolution {
        // Only valid values are ever stored
        NoteResolution::try_from(self.resolution.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_note_resolution(&self, resolution: NoteResolution) {
        self.resolution.store(resolution.value(), Ordering::Relaxed);
    }
}

impl From<&MetronomeConfig> for SharedConfig {
    fn from(config: &MetronomeConfig) -> Self {
        Self::new(config.tempo, config.note_resolution)
    }
}
