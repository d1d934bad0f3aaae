pub mod audio; // Device clock, tone rendering, backends
pub mod config;
pub mod dsp;
pub mod error;
pub mod metronome;
pub mod scheduler; // Lookahead scheduling on the 16-step grid
pub mod timing; // Background tick source

pub use config::{MetronomeConfig, NoteResolution, SharedConfig};
pub use error::{Error, Result};
pub use metronome::{Metronome, PlaybackState};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Steps per bar on the fixed 16th-note grid.
pub const STEPS_PER_BAR: u8 = 16;
