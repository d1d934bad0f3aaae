use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Device clock derived from the number of frames the renderer has produced.
///
/// The audio thread advances it after every block; any thread may read it.
/// Tone start times are converted to frames against the same counter, so a
/// tone lands on exactly the frame the scheduler asked for.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames: Arc<AtomicU64>,
    sample_rate: f64,
}

impl FrameClock {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Current device time in seconds
    pub fn now(&self) -> f64 {
        self.frames() as f64 / self.sample_rate
    }

    /// Nearest frame to a device time. Times before zero map to frame 0.
    pub fn to_frame(&self, seconds: f64) -> u64 {
        (seconds * self.sample_rate).round().max(0.0) as u64
    }

    pub(crate) fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::Release);
    }
}
