use core::time::Duration;
use std::time::Instant;

/// How the sequencer waits out a backtracked clock or an exhausted
/// millisecond.
///
/// Waits are always short (one to a few milliseconds). Tests substitute a
/// sleeper that advances a mock clock instead of blocking.
pub trait Sleeper {
    fn sleep(&self, dur: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, dur: Duration) {
        (**self).sleep(dur);
    }
}

/// Parks the calling thread with [`std::thread::sleep`].
///
/// This is the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Sleeper for ThreadSleep {
    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Spins on [`std::thread::yield_now`] until `dur` has passed.
///
/// This avoids timer granularity (often well above 1ms) at the cost of
/// burning CPU while the clock catches up.
#[derive(Clone, Copy, Debug, Default)]
pub struct YieldSleep;

impl Sleeper for YieldSleep {
    fn sleep(&self, dur: Duration) {
        let deadline = Instant::now() + dur;
        while Instant::now() < deadline {
            std::thread::yield_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yield_sleep_waits_the_full_duration() {
        let start = Instant::now();
        YieldSleep.sleep(Duration::from_millis(3));
        assert!(start.elapsed() >= Duration::from_millis(3));
    }

    #[test]
    fn yield_sleep_returns_at_once_for_zero() {
        YieldSleep.sleep(Duration::ZERO);
    }
}
