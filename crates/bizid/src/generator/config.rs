use core::time::Duration;

/// Retries allowed for a small backward clock jump before giving up.
pub const MAX_CLOCK_BACKTRACK_RETRIES: u32 = 5;

/// Largest backward jump, in milliseconds, that is waited out rather than
/// treated as fatal.
pub const MAX_CLOCK_BACKTRACK_MS: u64 = 5;

/// Counter value at which a millisecond is exhausted (12 bits).
pub const SEQUENCE_OVERFLOW_THRESHOLD: u32 = 4096;

/// Default wait after exhausting a millisecond.
pub const DEFAULT_OVERFLOW_PAUSE: Duration = Duration::from_millis(1);

/// Tuning for a [`Sequencer`](crate::Sequencer).
///
/// The defaults match the limits the identifier scheme was designed around;
/// widening the backtrack tolerance trades a longer worst-case stall in
/// `generate` for fewer fatal errors on jittery clocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Backward jumps up to this many milliseconds are waited out.
    pub max_backtrack_ms: u64,
    /// How many backtrack waits a single call may perform.
    pub max_backtrack_retries: u32,
    /// How long to wait once a millisecond's counter is exhausted.
    pub overflow_pause: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            max_backtrack_ms: MAX_CLOCK_BACKTRACK_MS,
            max_backtrack_retries: MAX_CLOCK_BACKTRACK_RETRIES,
            overflow_pause: DEFAULT_OVERFLOW_PAUSE,
        }
    }
}

impl SequencerConfig {
    #[must_use]
    pub const fn with_max_backtrack_ms(mut self, ms: u64) -> Self {
        self.max_backtrack_ms = ms;
        self
    }

    #[must_use]
    pub const fn with_max_backtrack_retries(mut self, retries: u32) -> Self {
        self.max_backtrack_retries = retries;
        self
    }

    #[must_use]
    pub const fn with_overflow_pause(mut self, pause: Duration) -> Self {
        self.overflow_pause = pause;
        self
    }
}
