//! Offline backend: the renderer without a device.
//!
//! Time only moves when you render. That makes it the deterministic clock for
//! tests, benchmarks and bouncing a click track to a buffer.

use rtrb::{Producer, RingBuffer};

use crate::{
    audio::{
        clock::FrameClock,
        renderer::{ScheduledTone, ToneRenderer, TONE_QUEUE_SIZE},
        AudioBackend, ToneEvent,
    },
    error::{Error, Result},
    MAX_BLOCK_SIZE,
};

pub struct OfflineBackend {
    renderer: ToneRenderer,
    tx: Producer<ScheduledTone>,
    clock: FrameClock,
    /// Every tone the backend accepted, in submission order
    submitted: Vec<ToneEvent>,
    silent_buffers: usize,
    output_denied: bool,
}

impl OfflineBackend {
    pub fn new(sample_rate: u32) -> Self {
        let clock = FrameClock::new(sample_rate as f64);
        let (tx, rx) = RingBuffer::new(TONE_QUEUE_SIZE);
        Self {
            renderer: ToneRenderer::new(rx, clock.clone()),
            tx,
            clock,
            submitted: Vec::new(),
            silent_buffers: 0,
            output_denied: false,
        }
    }

    /// Make `resume` fail as if the host refused to start audio
    pub fn with_output_denied(mut self) -> Self {
        self.output_denied = true;
        self
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Render into `out`, advancing the device clock by `out.len()` frames
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.renderer.render_block(block);
        }
    }

    /// Render until the device clock reaches `seconds`, returning the audio
    pub fn render_until(&mut self, seconds: f64) -> Vec<f32> {
        let target = self.clock.to_frame(seconds);
        let frames = target.saturating_sub(self.clock.frames()) as usize;
        let mut out = vec![0.0f32; frames];
        self.render(&mut out);
        out
    }

    pub fn submitted(&self) -> &[ToneEvent] {
        &self.submitted
    }

    pub fn silent_buffers_played(&self) -> usize {
        self.silent_buffers
    }

    /// Tones handed to the renderer that haven't finished sounding
    pub fn active_tones(&self) -> usize {
        self.renderer.active_tones()
    }
}

impl AudioBackend for OfflineBackend {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn schedule_tone(&mut self, tone: ToneEvent) -> Result<()> {
        self.tx
            .push(tone.to_frames(&self.clock))
            .map_err(|_| Error::ToneQueueFull)?;
        self.submitted.push(tone);
        Ok(())
    }

    /// Zero-length here: the offline clock is never locked
    fn play_silent_buffer(&mut self) -> Result<()> {
        self.silent_buffers += 1;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.output_denied {
            return Err(Error::PlayStream(cpal::PlayStreamError::DeviceNotAvailable));
        }
        Ok(())
    }
}
