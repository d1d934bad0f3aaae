// Purpose: coarse wall-clock wake-ups, independent of the control thread

pub mod tick;

pub use tick::{Tick, TickReceiver, TickSource, TICK_QUEUE_SIZE};
