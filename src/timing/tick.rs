//! Tick source - a free-running wake-up signal on its own thread
//!
//! Ticks carry no timing information. They only tell the control thread
//! "look at the schedule again". Precision comes from the audio device clock,
//! so a late or dropped tick costs nothing but a larger catch-up.

use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Payload-free wake-up message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Capacity of the tick channel, about 1.6s of backlog at the default 25ms
/// interval. Ticks past that are dropped.
pub const TICK_QUEUE_SIZE: usize = 64;

/// Anything ticks can be pulled from on the control thread
pub trait TickReceiver {
    fn pop(&mut self) -> Option<Tick>;

    /// Discard everything pending, returning how many ticks were dropped
    fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while self.pop().is_some() {
            dropped += 1;
        }
        dropped
    }
}

impl TickReceiver for Consumer<Tick> {
    fn pop(&mut self) -> Option<Tick> {
        Consumer::pop(self).ok()
    }
}

struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Producer<Tick>>,
}

/// Emits [`Tick`] at a fixed wall-clock interval from a background thread.
///
/// The producer half of the channel lives with the worker while it runs and
/// comes back on [`TickSource::stop`], so one source can be started and
/// stopped indefinitely.
pub struct TickSource {
    interval: Duration,
    idle: Option<Producer<Tick>>,
    worker: Option<Worker>,
}

impl TickSource {
    /// Create a stopped tick source and the consumer its ticks arrive on
    pub fn new(interval: Duration) -> (Self, Consumer<Tick>) {
        let (tx, rx) = RingBuffer::<Tick>::new(TICK_QUEUE_SIZE);
        let source = Self {
            interval,
            idle: Some(tx),
            worker: None,
        };
        (source, rx)
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Start emitting ticks.
    ///
    /// Fails with [`Error::TickSourceRunning`] if already started; the
    /// running worker is left alone.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::TickSourceRunning);
        }
        // Only missing if a previous worker panicked while holding it
        let tx = self.idle.take().ok_or(Error::TickWorkerPanicked)?;

        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = stop.clone();
        let interval = self.interval;
        let handle = thread::spawn(move || emit_ticks(tx, interval, &worker_stop));

        log::debug!("tick source started ({:?} interval)", interval);
        self.worker = Some(Worker { stop, handle });
        Ok(())
    }

    /// Stop emitting ticks. No-op when not running.
    pub fn stop(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        worker.stop.store(true, Ordering::Release);
        // Wake the worker now instead of at its next deadline
        worker.handle.thread().unpark();

        match worker.handle.join() {
            Ok(tx) => {
                self.idle = Some(tx);
                log::debug!("tick source stopped");
                Ok(())
            }
            Err(_) => Err(Error::TickWorkerPanicked),
        }
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Worker loop: park until the next deadline, push a tick, repeat.
fn emit_ticks(mut tx: Producer<Tick>, interval: Duration, stop: &AtomicBool) -> Producer<Tick> {
    let mut deadline = Instant::now() + interval;

    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        if now < deadline {
            // May wake early (unpark or spuriously); the loop re-checks
            thread::park_timeout(deadline - now);
            continue;
        }

        if tx.push(Tick).is_err() {
            log::trace!("tick queue full, dropping tick");
        }

        deadline += interval;
        if deadline <= now {
            // Fell behind by whole periods; don't burst to make up for them
            deadline = now + interval;
        }
    }

    tx
}
