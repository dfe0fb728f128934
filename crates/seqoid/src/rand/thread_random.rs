use rand::{Rng, rng};

use crate::{RandSource, Result};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), seeded from the
/// OS and automatically reseeded periodically. It never reports an error: if
/// the OS source is unavailable when a thread first touches its RNG, `rand`
/// panics instead. Prefer [`crate::OsRandom`] when that failure must be
/// surfaced as an [`crate::Error`].
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it accesses
/// the thread-local generator on each call, so it is `Send + Sync`.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> Result<u32> {
        Ok(rng().random())
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> Result<u64> {
        Ok(rng().random())
    }
}
