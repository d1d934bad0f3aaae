//! LookaheadScheduler - the catch-up loop run on every tick
//!
//! Two clocks are in play. Ticks come from a wall-clock timer and may arrive
//! late or in bursts. Due times live on the audio device clock and are exact.
//! On each tick the scheduler schedules every step whose due time falls
//! before `device.now() + schedule_ahead`, so a late tick simply schedules
//! several steps at once and nothing is skipped.

use crate::{
    audio::{AudioBackend, ToneEvent},
    config::SharedConfig,
    scheduler::{
        note::{Beat, NoteLog, ScheduledNote},
        pitch::pitch_for_beat,
    },
};

/// State of one playback session: beat pointer, audio cursor and note log.
///
/// Created when playback starts and left as-is when it stops.
pub struct LookaheadScheduler {
    /// Step the next scheduled note falls on
    beat: Beat,
    /// Device time of the next note (seconds)
    cursor: f64,
    schedule_ahead: f64,
    note_length: f64,
    config: SharedConfig,
    notes: NoteLog,
}

impl LookaheadScheduler {
    /// Start a session whose first step is due at `start_time` on the device clock
    pub fn new(config: SharedConfig, start_time: f64, schedule_ahead: f64, note_length: f64) -> Self {
        Self {
            beat: Beat::DOWNBEAT,
            cursor: start_time,
            schedule_ahead,
            note_length,
            config,
            notes: NoteLog::new(),
        }
    }

    /// Schedule every step due inside the lookahead window.
    ///
    /// Returns how many steps were scheduled (audible or not). Never fails: a
    /// tone the backend rejects is logged and skipped, its step still advances.
    pub fn on_tick<B: AudioBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        let mut scheduled = 0;

        while self.cursor < backend.now() + self.schedule_ahead {
            self.schedule_note(self.beat, self.cursor, backend);
            self.advance_step();
            scheduled += 1;
        }

        scheduled
    }

    /// Move to the next 16th using the tempo as it is right now
    fn advance_step(&mut self) {
        let tempo = self.config.tempo();
        debug_assert!(tempo > 0.0, "tempo must be positive, got {tempo}");

        let seconds_per_beat = 60.0 / tempo;
        self.cursor += 0.25 * seconds_per_beat;
        self.beat = self.beat.next();
    }

    fn schedule_note<B: AudioBackend + ?Sized>(&mut self, beat: Beat, due_time: f64, backend: &mut B) {
        self.notes.push(ScheduledNote { beat, due_time });

        if !self.config.note_resolution().is_audible(beat.index()) {
            return;
        }

        let tone = ToneEvent::new(pitch_for_beat(beat), due_time, self.note_length);
        match backend.schedule_tone(tone) {
            Ok(()) => log::trace!(
                "beat {} at {:.4}s ({} Hz)",
                beat,
                due_time,
                tone.frequency
            ),
            Err(e) => log::warn!("beat {} at {:.4}s not scheduled: {}", beat, due_time, e),
        }
    }

    /// Step the next scheduled note will fall on
    pub fn beat(&self) -> Beat {
        self.beat
    }

    /// Due time of the next note to be scheduled
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn notes(&self) -> &NoteLog {
        &self.notes
    }
}
