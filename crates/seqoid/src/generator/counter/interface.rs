use crate::Result;

/// Largest value a sequence can take; draws wrap to zero after it.
pub const MAX_SEQUENCE: u32 = (1 << 24) - 1;

/// A process-wide 24-bit counter handing out one sequence number per draw.
///
/// Implementations start **unseeded**. The first [`draw`] seeds the counter
/// with a random 24-bit value, and every draw returns the current value and
/// advances it by one modulo 2^24. Draws are linearizable: no two draws
/// observe the same pre-increment value within a seeding epoch and no
/// increment is lost.
///
/// [`draw`]: SequenceCounter::draw
pub trait SequenceCounter {
    /// Returns the current sequence value and advances the counter.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::RandomSource`] if the counter is unseeded and the
    ///   random source fails. The failure is kept and returned by every draw
    ///   until the next [`reset`](SequenceCounter::reset); the random source
    ///   is not consulted again in between.
    /// - `Error::LockPoisoned` for a lock-based counter whose std mutex was
    ///   poisoned.
    fn draw(&self) -> Result<u32>;

    /// Reseeds the counter.
    ///
    /// With `Some(seed)` the next draw returns `|seed| mod 2^24`; values that
    /// do not fit in 24 bits are truncated rather than rejected. With `None`
    /// the counter returns to the unseeded state and the next draw picks a
    /// fresh random seed. Either way a kept seeding failure is cleared. A reset
    /// is atomic with respect to concurrent draws: each draw observes either
    /// the old sequence or the new one.
    fn reset(&self, seed: Option<i64>);
}

impl<C> SequenceCounter for &C
where
    C: SequenceCounter + ?Sized,
{
    fn draw(&self) -> Result<u32> {
        (**self).draw()
    }

    fn reset(&self, seed: Option<i64>) {
        (**self).reset(seed);
    }
}

/// Reduces an administrative seed to a sequence value: `|seed| mod 2^24`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn normalize_seed(seed: i64) -> u32 {
    (seed.unsigned_abs() & MAX_SEQUENCE as u64) as u32
}

/// The value following `current`, wrapping to zero after [`MAX_SEQUENCE`].
#[must_use]
pub const fn next_sequence(current: u32) -> u32 {
    current.wrapping_add(1) & MAX_SEQUENCE
}
