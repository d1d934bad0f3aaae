use crate::STEPS_PER_BAR;

/// Position on the 16-step grid, always in `0..16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Beat(u8);

impl Beat {
    pub const DOWNBEAT: Beat = Beat(0);

    /// `None` if `index` is off the grid
    pub fn new(index: u8) -> Option<Self> {
        (index < STEPS_PER_BAR).then_some(Beat(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The following step, wrapping from 15 back to 0
    pub fn next(self) -> Self {
        Beat((self.0 + 1) % STEPS_PER_BAR)
    }

    pub fn is_downbeat(self) -> bool {
        self.0 % STEPS_PER_BAR == 0
    }

    pub fn is_quarter(self) -> bool {
        self.0 % 4 == 0
    }

    /// All 16 steps in order
    pub fn bar() -> impl Iterator<Item = Beat> {
        (0..STEPS_PER_BAR).map(Beat)
    }
}

impl std::fmt::Display for Beat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A step handed to the scheduling routine, audible or not
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub beat: Beat,
    /// Device-clock time in seconds
    pub due_time: f64,
}

/// Append-only record of scheduled notes, in due-time order.
///
/// The scheduler never reads it back. It exists for inspection and for
/// showing which step is sounding right now.
#[derive(Debug, Clone, Default)]
pub struct NoteLog {
    notes: Vec<ScheduledNote>,
}

impl NoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, note: ScheduledNote) {
        debug_assert!(self.notes.last().map_or(true, |last| last.due_time < note.due_time));
        self.notes.push(note);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledNote> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[ScheduledNote] {
        &self.notes
    }

    pub fn last(&self) -> Option<&ScheduledNote> {
        self.notes.last()
    }

    /// Latest note due at or before `time`, i.e. the one the listener last heard
    pub fn latest_due_by(&self, time: f64) -> Option<&ScheduledNote> {
        let idx = self.notes.partition_point(|n| n.due_time <= time);
        idx.checked_sub(1).map(|i| &self.notes[i])
    }
}
