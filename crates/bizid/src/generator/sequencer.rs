use core::{cmp, time::Duration};

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Layout, Result, SEQUENCE_OVERFLOW_THRESHOLD, SequencerConfig, Sleeper, ThreadSleep,
    TimeSource,
};

const COUNTER_BITS: u32 = Layout::SEQUENCE_COUNTER_BITS;
const COUNTER_MASK: u64 = Layout::SEQUENCE_COUNTER_MASK;

/// Largest millisecond value the packed state can hold (52 bits, roughly the
/// year 144,000).
const MAX_STATE_MILLIS: u64 = u64::MAX >> COUNTER_BITS;

/// One `(timestamp, counter)` pair handed out by a [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick {
    millis: u64,
    counter: u16,
}

impl Tick {
    #[must_use]
    pub const fn new(millis: u64, counter: u16) -> Self {
        Self { millis, counter }
    }

    /// Unix time in milliseconds.
    #[must_use]
    pub const fn millis(&self) -> u64 {
        self.millis
    }

    /// The 12-bit counter, unique among ticks sharing a millisecond.
    #[must_use]
    pub const fn counter(&self) -> u16 {
        self.counter
    }

    /// Whole Unix seconds, as stored in the identifier's top 32 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn timestamp_secs(&self) -> u32 {
        (self.millis / 1000) as u32
    }

    /// Millisecond within the second.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn millis_part(&self) -> u16 {
        (self.millis % 1000) as u16
    }

    /// The low 6 bits of the counter, stored next to the milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn sequence(&self) -> u8 {
        (self.counter as u64 & Layout::SEQUENCE_MASK) as u8
    }

    const fn to_state(self) -> u64 {
        (self.millis << COUNTER_BITS) | (self.counter as u64 & COUNTER_MASK)
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn from_state(state: u64) -> Self {
        Self {
            millis: state >> COUNTER_BITS,
            counter: (state & COUNTER_MASK) as u16,
        }
    }
}

/// A lock-free source of unique `(timestamp, counter)` pairs.
///
/// Every caller in the process shares one sequencer (usually through an
/// [`IdGenerator`](crate::IdGenerator)). The last issued millisecond and the
/// counter live together in a single [`AtomicU64`], so one compare-and-swap
/// publishes both and two callers can never walk away with the same pair.
///
/// ## States
/// - **Normal**: the clock moved forward; the counter restarts at 0.
/// - **Sequence exhausted**: 4096 pairs were issued in one millisecond; the
///   caller pauses (default 1ms) and tries again in the next one.
/// - **Backtrack recovery**: the clock reads earlier than the last issued
///   millisecond by at most `max_backtrack_ms`; the caller sleeps the gap
///   plus 1ms, up to `max_backtrack_retries` times.
/// - **Fatal**: anything larger or more persistent returns
///   [`Error::ClockBacktrack`]. Only that call fails; the sequencer itself
///   is untouched and the next call starts over.
///
/// Pairs sharing a millisecond get distinct counters, but their order need
/// not match the order in which callers arrived.
#[derive(Debug)]
pub struct Sequencer<T, S = ThreadSleep> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
    sleeper: S,
    config: SequencerConfig,
}

impl<T, S> Sequencer<T, S>
where
    T: TimeSource,
    S: Sleeper,
{
    /// Creates a sequencer with the default [`SequencerConfig`].
    pub fn new(time: T, sleeper: S) -> Self {
        Self::with_config(time, sleeper, SequencerConfig::default())
    }

    pub fn with_config(time: T, sleeper: S, config: SequencerConfig) -> Self {
        Self::from_state(0, 0, time, sleeper, config)
    }

    /// Creates a sequencer that behaves as if it last issued
    /// `(last_millis, counter)`.
    ///
    /// Useful to carry the high-water mark across a restart, so that a clock
    /// which came back behind the previous run is caught as a backtrack.
    pub fn from_state(
        last_millis: u64,
        counter: u16,
        time: T,
        sleeper: S,
        config: SequencerConfig,
    ) -> Self {
        debug_assert!(last_millis <= MAX_STATE_MILLIS, "timestamp overflow");
        let initial = Tick::new(last_millis, counter).to_state();
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(initial)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(initial),
            time,
            sleeper,
            config,
        }
    }

    /// Claims the next unique `(timestamp, counter)` pair.
    ///
    /// May sleep briefly when the current millisecond is exhausted or the
    /// clock stepped back a little. Never blocks otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBacktrack`] when the clock is behind the last
    /// issued millisecond by more than `max_backtrack_ms`, or still behind
    /// after `max_backtrack_retries` waits.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_tick(&self) -> Result<Tick> {
        let mut retries = 0;

        loop {
            // State before clock: a reading taken after this load is never
            // older than the one that produced the state.
            let current_raw = self.state.load(Ordering::Acquire);
            let now = self.time.current_millis();
            let last = Tick::from_state(current_raw);

            let next = match now.cmp(&last.millis) {
                cmp::Ordering::Greater => Tick::new(now, 0),
                cmp::Ordering::Equal => {
                    let counter = u32::from(last.counter) + 1;
                    if counter >= SEQUENCE_OVERFLOW_THRESHOLD {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(millis = now, "sequence exhausted, waiting for next millisecond");
                        self.sleeper.sleep(self.config.overflow_pause);
                        continue;
                    }
                    #[allow(clippy::cast_possible_truncation)]
                    Tick::new(now, counter as u16)
                }
                cmp::Ordering::Less => {
                    let backtrack_ms = last.millis - now;
                    if backtrack_ms <= self.config.max_backtrack_ms
                        && retries < self.config.max_backtrack_retries
                    {
                        retries += 1;
                        #[cfg(feature = "tracing")]
                        tracing::debug!(backtrack_ms, retries, "clock moved backwards, waiting");
                        self.sleeper.sleep(Duration::from_millis(backtrack_ms + 1));
                        continue;
                    }
                    return Err(Self::cold_clock_behind(last.millis, now, retries));
                }
            };

            debug_assert!(next.millis <= MAX_STATE_MILLIS, "timestamp overflow");
            if self
                .state
                .compare_exchange(
                    current_raw,
                    next.to_state(),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
            {
                return Ok(next);
            }
            // CAS failed - another caller won the race. Retry immediately.
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last_millis: u64, current_millis: u64, retries: u32) -> Error {
        let backtrack_ms = last_millis - current_millis;
        #[cfg(feature = "tracing")]
        tracing::error!(
            last_millis,
            current_millis,
            backtrack_ms,
            retries,
            "clock moved backwards beyond recovery"
        );
        Error::ClockBacktrack {
            last_millis,
            current_millis,
            backtrack_ms,
            retries,
        }
    }

    /// The most recently issued millisecond (0 before the first call).
    pub fn last_millis(&self) -> u64 {
        Tick::from_state(self.state.load(Ordering::Relaxed)).millis
    }

    /// The counter issued with [`Self::last_millis`].
    pub fn sequence_counter(&self) -> u16 {
        Tick::from_state(self.state.load(Ordering::Relaxed)).counter
    }

    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub const fn time(&self) -> &T {
        &self.time
    }
}
