//! ToneRenderer - runs in the audio thread and turns scheduled tones into
//! samples on exactly the frames they were scheduled for.

use rtrb::Consumer;

use crate::{audio::clock::FrameClock, dsp::SineOscillator};

/// Tones that can be pending or sounding at once
pub const MAX_TONES: usize = 32;

/// Capacity of the control → audio tone queue
pub const TONE_QUEUE_SIZE: usize = 256;

/// Output level of a single click
pub const TONE_GAIN: f32 = 0.4;

/// A tone expressed in device frames, ready for the audio thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub frequency: f32,
    pub start_frame: u64,
    pub stop_frame: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Free,    // Available for a new tone
    Pending, // Accepted, start frame not reached yet
    Sounding,
}

struct ToneSlot {
    osc: SineOscillator,
    start_frame: u64,
    stop_frame: u64,
    state: SlotState,
}

impl ToneSlot {
    fn new() -> Self {
        Self {
            osc: SineOscillator::new(440.0),
            start_frame: 0,
            stop_frame: 0,
            state: SlotState::Free,
        }
    }

    fn arm(&mut self, tone: ScheduledTone) {
        self.osc.reset(tone.frequency);
        self.start_frame = tone.start_frame;
        self.stop_frame = tone.stop_frame;
        self.state = SlotState::Pending;
    }
}

pub struct ToneRenderer {
    slots: Vec<ToneSlot>,
    rx: Consumer<ScheduledTone>,
    clock: FrameClock,
    sample_rate: f32,
}

impl ToneRenderer {
    pub fn new(rx: Consumer<ScheduledTone>, clock: FrameClock) -> Self {
        let sample_rate = clock.sample_rate() as f32;
        Self {
            slots: (0..MAX_TONES).map(|_| ToneSlot::new()).collect(),
            rx,
            clock,
            sample_rate,
        }
    }

    /// Render one mono block and advance the device clock by its length.
    ///
    /// A tone whose start frame has already passed begins at the top of the
    /// block; one whose stop frame has passed is dropped unheard.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let block_start = self.clock.frames();
        let block_end = block_start + out.len() as u64;
        out.fill(0.0);

        for slot in &mut self.slots {
            if slot.state != SlotState::Free && slot.stop_frame <= block_start {
                slot.state = SlotState::Free;
            }
        }

        while let Ok(tone) = self.rx.pop() {
            // Already over: must not take a slot from a tone still to come
            if tone.stop_frame <= block_start {
                continue;
            }
            // Full pool: the tone is lost
            if let Some(slot) = self.slots.iter_mut().find(|s| s.state == SlotState::Free) {
                slot.arm(tone);
            }
        }

        for slot in &mut self.slots {
            if slot.state == SlotState::Free {
                continue;
            }
            if slot.start_frame >= block_end {
                continue;
            }

            slot.state = SlotState::Sounding;
            let from = (slot.start_frame.max(block_start) - block_start) as usize;
            let to = (slot.stop_frame.min(block_end) - block_start) as usize;
            slot.osc
                .render_add(&mut out[from..to], self.sample_rate, TONE_GAIN);

            if slot.stop_frame <= block_end {
                slot.state = SlotState::Free;
            }
        }

        self.clock.advance(out.len() as u64);
    }

    /// Tones accepted but not yet finished
    pub fn active_tones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state != SlotState::Free)
            .count()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::{Producer, RingBuffer};

    const SAMPLE_RATE: f64 = 1_000.0;

    fn renderer() -> (ToneRenderer, Producer<ScheduledTone>) {
        let (tx, rx) = RingBuffer::new(TONE_QUEUE_SIZE);
        (ToneRenderer::new(rx, FrameClock::new(SAMPLE_RATE)), tx)
    }

    fn tone(start_frame: u64, stop_frame: u64) -> ScheduledTone {
        ScheduledTone {
            frequency: 110.0,
            start_frame,
            stop_frame,
        }
    }

    fn nonzero_range(buffer: &[f32]) -> Option<(usize, usize)> {
        let first = buffer.iter().position(|s| s.abs() > 0.0)?;
        let last = buffer.iter().rposition(|s| s.abs() > 0.0)?;
        Some((first, last))
    }

    #[test]
    fn tone_lands_on_its_frames() {
        let (mut renderer, mut tx) = renderer();
        tx.push(tone(100, 150)).unwrap();

        let mut buffer = vec![0.0f32; 256];
        renderer.render_block(&mut buffer);

        // Starts on a zero crossing, so the first non-zero sample is one later
        let (first, last) = nonzero_range(&buffer).unwrap();
        assert_eq!(first, 101);
        assert!(last < 150);
        assert!(buffer[..100].iter().all(|&s| s == 0.0));
        assert!(buffer[150..].iter().all(|&s| s == 0.0));
        assert_eq!(renderer.clock().frames(), 256);
    }

    #[test]
    fn tone_spans_block_boundary() {
        let (mut renderer, mut tx) = renderer();
        tx.push(tone(60, 90)).unwrap();

        let mut first_block = vec![0.0f32; 64];
        renderer.render_block(&mut first_block);
        assert_eq!(renderer.active_tones(), 1);

        let mut second_block = vec![0.0f32; 64];
        renderer.render_block(&mut second_block);
        assert_eq!(renderer.active_tones(), 0);

        assert!(first_block[61..].iter().any(|s| s.abs() > 0.0));
        assert!(second_block[..26].iter().any(|s| s.abs() > 0.0));
        assert!(second_block[26..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn future_tone_waits_silently() {
        let (mut renderer, mut tx) = renderer();
        tx.push(tone(500, 550)).unwrap();

        let mut buffer = vec![0.0f32; 128];
        renderer.render_block(&mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(renderer.active_tones(), 1);
    }

    #[test]
    fn late_tone_starts_at_block_top() {
        let (mut renderer, mut tx) = renderer();
        let mut buffer = vec![0.0f32; 100];
        renderer.render_block(&mut buffer);

        // Due at frame 80, arrives when the clock is already at 100
        tx.push(tone(80, 130)).unwrap();
        renderer.render_block(&mut buffer);

        assert!(buffer[..30].iter().any(|s| s.abs() > 0.0));
        assert!(buffer[30..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn expired_tone_is_dropped() {
        let (mut renderer, mut tx) = renderer();
        let mut buffer = vec![0.0f32; 100];
        renderer.render_block(&mut buffer);

        tx.push(tone(10, 60)).unwrap();
        renderer.render_block(&mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(renderer.active_tones(), 0);
    }

    #[test]
    fn stale_backlog_does_not_crowd_out_future_tone() {
        let (mut renderer, mut tx) = renderer();
        let mut buffer = vec![0.0f32; 100];
        renderer.render_block(&mut buffer);

        // A catch-up burst: more expired tones than slots, then one still ahead
        for i in 0..(MAX_TONES as u64 + 8) {
            tx.push(tone(i, i + 2)).unwrap();
        }
        tx.push(tone(150, 250)).unwrap();
        renderer.render_block(&mut buffer);

        assert_eq!(renderer.active_tones(), 1);
        assert!(buffer[..50].iter().all(|&s| s == 0.0));
        assert!(buffer[50..].iter().any(|s| s.abs() > 0.0));
    }

    #[test]
    fn overlapping_tones_mix() {
        let (mut renderer, mut tx) = renderer();
        tx.push(tone(0, 50)).unwrap();
        tx.push(tone(0, 50)).unwrap();

        let mut buffer = vec![0.0f32; 64];
        renderer.render_block(&mut buffer);

        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak > TONE_GAIN * 1.5, "two tones should sum, peak {peak}");
    }
}
