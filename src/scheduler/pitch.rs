use crate::scheduler::note::Beat;

/// First step of the bar
pub const DOWNBEAT_HZ: f32 = 880.0;
/// Quarter-note steps other than the downbeat
pub const QUARTER_HZ: f32 = 440.0;
/// Every other 16th
pub const OFFBEAT_HZ: f32 = 220.0;

/// Click pitch for a step. Highest match wins.
pub fn pitch_for_beat(beat: Beat) -> f32 {
    if beat.is_downbeat() {
        DOWNBEAT_HZ
    } else if beat.is_quarter() {
        QUARTER_HZ
    } else {
        OFFBEAT_HZ
    }
}
