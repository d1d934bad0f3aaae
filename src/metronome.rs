//! Metronome - play/pause state machine tying the tick source to the scheduler
//!
//! ```ignore
//! use saavy_metronome::{audio::CpalBackend, Metronome, MetronomeConfig};
//!
//! let backend = CpalBackend::open_default()?;
//! let mut metronome = Metronome::new(backend, MetronomeConfig::new().tempo(96.0));
//! metronome.play()?;
//! loop {
//!     metronome.process_ticks();
//!     // ... draw, handle input ...
//! }
//! ```

use rtrb::Consumer;

use crate::{
    audio::AudioBackend,
    config::{MetronomeConfig, NoteResolution, SharedConfig},
    error::Result,
    scheduler::{Beat, LookaheadScheduler, NoteLog},
    timing::{Tick, TickReceiver, TickSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Owns the audio backend, the tick source and the current playback session.
///
/// Everything here runs on the control thread. Ticks arrive from the tick
/// source's worker and are handled one at a time in [`Metronome::process_ticks`].
pub struct Metronome<B: AudioBackend> {
    backend: B,
    config: SharedConfig,
    schedule_ahead: f64,
    note_length: f64,
    ticks: TickSource,
    tick_rx: Consumer<Tick>,
    /// Most recent session; kept after stopping until the next play
    session: Option<LookaheadScheduler>,
    state: PlaybackState,
    unlocked: bool,
}

impl<B: AudioBackend> Metronome<B> {
    pub fn new(backend: B, config: MetronomeConfig) -> Self {
        let (ticks, tick_rx) = TickSource::new(config.tick_interval);

        Self {
            backend,
            config: SharedConfig::from(&config),
            schedule_ahead: config.schedule_ahead,
            note_length: config.note_length,
            ticks,
            tick_rx,
            session: None,
            state: PlaybackState::Stopped,
            unlocked: false,
        }
    }

    /// Toggle between playing and stopped, returning the new state.
    ///
    /// Starting unlocks audio the first time, resets the beat to 0 and the
    /// cursor to the device's current time, then starts ticking. Stopping
    /// only halts the ticks: tones already handed to the device still sound.
    pub fn play(&mut self) -> Result<PlaybackState> {
        match self.state {
            PlaybackState::Stopped => self.start()?,
            PlaybackState::Playing => self.stop()?,
        }
        Ok(self.state)
    }

    fn start(&mut self) -> Result<()> {
        if !self.unlocked {
            self.backend.play_silent_buffer()?;
            self.unlocked = true;
        }
        self.backend.resume()?;

        // Anything left over from the previous session is stale
        TickReceiver::drain(&mut self.tick_rx);
        self.ticks.start()?;

        // Previous session survives until ticks are actually running
        let now = self.backend.now();
        self.session = Some(LookaheadScheduler::new(
            self.config.clone(),
            now,
            self.schedule_ahead,
            self.note_length,
        ));
        self.state = PlaybackState::Playing;

        log::info!(
            "playing at {:.0} BPM, {} (device time {:.3}s)",
            self.config.tempo(),
            self.config.note_resolution(),
            now
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.state = PlaybackState::Stopped;
        self.ticks.stop()?;
        log::info!("stopped");
        Ok(())
    }

    /// Handle every tick that has arrived since the last call.
    ///
    /// Returns the number of steps scheduled. Ticks received while stopped
    /// are discarded.
    pub fn process_ticks(&mut self) -> usize {
        let mut scheduled = 0;
        while TickReceiver::pop(&mut self.tick_rx).is_some() {
            scheduled += self.on_tick();
        }
        scheduled
    }

    /// Run the catch-up loop once, as a tick would
    pub fn on_tick(&mut self) -> usize {
        if self.state != PlaybackState::Playing {
            return 0;
        }
        match &mut self.session {
            Some(session) => session.on_tick(&mut self.backend),
            None => 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Live tempo/resolution handle; clone it to share with a control surface
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Takes effect on the next step
    pub fn set_tempo(&self, bpm: f64) {
        self.config.set_tempo(bpm);
    }

    /// Takes effect on the next scheduled note
    pub fn set_note_resolution(&self, resolution: NoteResolution) {
        self.config.set_note_resolution(resolution);
    }

    pub fn session(&self) -> Option<&LookaheadScheduler> {
        self.session.as_ref()
    }

    pub fn notes(&self) -> Option<&NoteLog> {
        self.session.as_ref().map(LookaheadScheduler::notes)
    }

    /// Step the listener is hearing now (the latest note already due)
    pub fn current_beat(&self) -> Option<Beat> {
        if !self.is_playing() {
            return None;
        }
        let now = self.backend.now();
        self.notes()?.latest_due_by(now).map(|note| note.beat)
    }

    /// Whether the one-time unlock buffer has been played
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
