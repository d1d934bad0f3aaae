use std::f32::consts::TAU;

/*
Click Oscillator
================

A metronome click here is nothing more than a sine wave switched on for a
fixed length. No envelope, no filter: the pitch tells you where you are in
the bar (high on the downbeat, middle on quarters, low on the rest).

Phase Accumulation
------------------

  phase       Position within one cycle, kept in [0.0, 1.0).
  increment   How far the phase moves per sample: frequency / sample_rate.

Each sample:

    out   = sin(TAU * phase)
    phase = fract(phase + increment)

Keeping phase normalised avoids the precision loss of feeding an ever-growing
time value into sin(). Starting from phase 0 means every click begins at a
zero crossing, which keeps the hard on-switch quieter.
*/

pub struct SineOscillator {
    frequency: f32,
    phase: f32,
}

impl SineOscillator {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
        }
    }

    /// Retune and restart from a zero crossing.
    pub fn reset(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.phase = 0.0;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let sample = (TAU * self.phase).sin();
        self.phase = (self.phase + self.frequency / sample_rate).fract();
        sample
    }

    /// Add `gain * sine` into every sample of `out`.
    pub fn render_add(&mut self, out: &mut [f32], sample_rate: f32, gain: f32) {
        for sample in out.iter_mut() {
            *sample += gain * self.next_sample(sample_rate);
        }
    }
}
