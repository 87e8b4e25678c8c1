use rand::{Rng, rng};

use crate::RandSource;

/// A `RandSource` backed by the thread-local RNG (`rand::rng()`).
///
/// The thread-local RNG is cryptographically secure (ChaCha-based) and
/// reseeded periodically. Each OS thread owns its instance, so concurrent
/// generators never contend on it.
///
/// This type stores nothing; it reaches for the thread-local generator on
/// each call, which makes it `Send + Sync` even though the RNG is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> u32 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
