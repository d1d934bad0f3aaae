//! Low-level DSP primitives used by the tone renderer.
//!
//! These components are allocation-free and realtime-safe, so they can live
//! inside the audio callback.

/// Sine oscillator used for the click tones.
pub mod oscillator;

pub use oscillator::SineOscillator;
