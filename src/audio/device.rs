//! Audio output through cpal's default device

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
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

/// Default output device driven by a [`ToneRenderer`].
///
/// The stream is built paused. The device clock stands still until the
/// silent unlock buffer starts it.
pub struct CpalBackend {
    stream: cpal::Stream,
    tx: Producer<ScheduledTone>,
    clock: FrameClock,
    running: bool,
}

impl CpalBackend {
    /// Open the host's default output device
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(Error::NoOutputDevice)?;
        let config = device.default_output_config()?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(Error::UnsupportedSampleFormat(config.sample_format()));
        }

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        log::info!(
            "output device: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels
        );

        let clock = FrameClock::new(sample_rate as f64);
        let (tx, rx) = RingBuffer::<ScheduledTone>::new(TONE_QUEUE_SIZE);
        let mut renderer = ToneRenderer::new(rx, clock.clone());
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    renderer.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )?;

        Ok(Self {
            stream,
            tx,
            clock,
            running: false,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.clock.sample_rate()
    }

    fn start_stream(&mut self) -> Result<()> {
        if !self.running {
            self.stream.play()?;
            self.running = true;
        }
        Ok(())
    }
}

impl AudioBackend for CpalBackend {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn schedule_tone(&mut self, tone: ToneEvent) -> Result<()> {
        self.tx
            .push(tone.to_frames(&self.clock))
            .map_err(|_| Error::ToneQueueFull)
    }

    /// Starting the stream is the unlock: its first callback block is silence
    fn play_silent_buffer(&mut self) -> Result<()> {
        self.start_stream()?;
        log::debug!("audio output unlocked");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.start_stream()
    }
}
