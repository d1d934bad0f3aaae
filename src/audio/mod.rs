// Purpose: the audio-rendering capability the scheduler drives.
// A device clock, a way to place a tone on it, and the unlock buffer.

pub mod clock;
pub mod device;
pub mod offline;
pub mod renderer;

pub use clock::FrameClock;
pub use device::CpalBackend;
pub use offline::OfflineBackend;
pub use renderer::{ScheduledTone, ToneRenderer};

use crate::error::Result;

/// A tone on the device clock: `frequency` Hz from `start` to `stop` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    pub frequency: f32,
    pub start: f64,
    pub stop: f64,
}

impl ToneEvent {
    pub fn new(frequency: f32, start: f64, length: f64) -> Self {
        Self {
            frequency,
            start,
            stop: start + length,
        }
    }

    /// Convert to sample frames on `clock`
    pub fn to_frames(&self, clock: &FrameClock) -> ScheduledTone {
        ScheduledTone {
            frequency: self.frequency,
            start_frame: clock.to_frame(self.start),
            stop_frame: clock.to_frame(self.stop),
        }
    }
}

/// Audio output as seen by the scheduler.
///
/// Once `schedule_tone` returns, the tone's timing belongs to the device:
/// nothing the control thread does afterwards moves it.
pub trait AudioBackend {
    /// Monotonic device time in seconds
    fn now(&self) -> f64;

    /// Hand a tone to the device
    fn schedule_tone(&mut self, tone: ToneEvent) -> Result<()>;

    /// One-shot silent output that brings the device up for the first time
    fn play_silent_buffer(&mut self) -> Result<()>;

    /// Make sure output is running before a playback session begins
    fn resume(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn now(&self) -> f64 {
        (**self).now()
    }

    fn schedule_tone(&mut self, tone: ToneEvent) -> Result<()> {
        (**self).schedule_tone(tone)
    }

    fn play_silent_buffer(&mut self) -> Result<()> {
        (**self).play_silent_buffer()
    }

    fn resume(&mut self) -> Result<()> {
        (**self).resume()
    }
}
