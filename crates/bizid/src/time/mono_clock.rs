use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use crate::{SystemClock, TimeSource};

#[derive(Debug)]
struct Ticker {
    elapsed_ms: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A clock that reads as Unix milliseconds but never moves backwards.
///
/// The wall clock is sampled once at construction. After that a background
/// thread advances a shared counter from [`Instant`] once per millisecond,
/// and reads return `start_wall_ms + elapsed_ms`. Wall-clock steps after
/// construction are therefore invisible: the sequencer never has to recover
/// from a backtrack, at the cost of drifting from the wall clock if it is
/// corrected while the process runs.
///
/// Reads are a single relaxed atomic load, which also keeps syscalls off the
/// generation hot path. The ticker thread exits once every clone has been
/// dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    ticker: Arc<Ticker>,
    start_wall_ms: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time and starts its
    /// ticker thread.
    #[must_use]
    pub fn new() -> Self {
        Self::anchored_at(SystemClock.current_millis())
    }

    /// Starts a clock whose first reading is `start_wall_ms`.
    #[must_use]
    pub fn anchored_at(start_wall_ms: u64) -> Self {
        let start = Instant::now();
        let ticker = Arc::new(Ticker {
            elapsed_ms: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak = Arc::downgrade(&ticker);
        let handle = thread::spawn(move || {
            let mut next_tick = 1;
            loop {
                let Some(ticker) = weak.upgrade() else {
                    break;
                };

                let target = start + Duration::from_millis(next_tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                #[allow(clippy::cast_possible_truncation)]
                let elapsed = start.elapsed().as_millis() as u64;
                ticker.elapsed_ms.store(elapsed, Ordering::Relaxed);
                next_tick = elapsed + 1;
            }
        });
        let _ = ticker._handle.set(handle);

        Self {
            ticker,
            start_wall_ms,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.start_wall_ms + self.ticker.elapsed_ms.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_anchor_and_advances() {
        let clock = MonotonicClock::anchored_at(1_000_000);
        let first = clock.current_millis();
        assert!(first >= 1_000_000);

        thread::sleep(Duration::from_millis(20));
        let later = clock.current_millis();
        assert!(later > first, "{later} should be past {first}");
    }

    #[test]
    fn never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }
}
