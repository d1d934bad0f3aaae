//! Lookahead scheduling of metronome clicks.
//!
//! The scheduler turns coarse ticks into exactly timed tones. Each tick it
//! looks a short window ahead of the device clock and hands every click due
//! inside that window to the audio backend, which then owns its timing.
//!
//! - `note`: the 16-step beat pointer and the log of scheduled notes
//! - `pitch`: which frequency a step sounds at
//! - `lookahead`: the catch-up loop itself

pub mod lookahead;
pub mod note;
pub mod pitch;

pub use lookahead::LookaheadScheduler;
pub use note::{Beat, NoteLog, ScheduledNote};
pub use pitch::pitch_for_beat;
