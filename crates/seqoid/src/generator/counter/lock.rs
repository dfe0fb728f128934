#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, RandSource, Result,
    generator::{MAX_SEQUENCE, Mutex, SequenceCounter, next_sequence, normalize_seed},
};

/// A lock-based sequence counter suitable for multi-threaded environments.
///
/// This counter wraps its state in a [`Mutex`], so each draw (including the
/// one-time seeding) is a single critical section. Seeding therefore happens
/// at most once per epoch without any retry logic, at the cost of callers
/// briefly queueing behind each other under contention. A failed seeding is
/// kept and returned by every draw until the next [`reset`](Self::reset).
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fair access across threads
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
/// - Your target doesn't support 64-bit atomics
///
/// ## See Also
/// - [`AtomicSequenceCounter`]
///
/// [`AtomicSequenceCounter`]: crate::generator::AtomicSequenceCounter
pub struct LockSequenceCounter<R> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<SequenceState>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<SequenceState>,
    rng: R,
}

#[derive(Debug)]
enum SequenceState {
    Unseeded,
    Seeded(u32),
    Failed(Error),
}

impl<R> LockSequenceCounter<R>
where
    R: RandSource<u32>,
{
    /// Creates an unseeded counter that seeds itself from `rng` on first
    /// draw.
    ///
    /// # Example
    /// ```
    /// use seqoid::{LockSequenceCounter, OsRandom, SequenceCounter};
    ///
    /// let counter = LockSequenceCounter::new(OsRandom);
    /// counter.reset(Some(41));
    /// assert_eq!(counter.draw().unwrap(), 41);
    /// assert_eq!(counter.draw().unwrap(), 42);
    /// ```
    pub fn new(rng: R) -> Self {
        Self::from_state(SequenceState::Unseeded, rng)
    }

    /// Creates a counter whose first draw returns `seed` masked to 24 bits.
    pub fn with_seed(seed: u32, rng: R) -> Self {
        Self::from_state(SequenceState::Seeded(seed & MAX_SEQUENCE), rng)
    }

    fn from_state(state: SequenceState, rng: R) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(state),
            rng,
        }
    }

    /// Returns the current sequence value and advances the counter.
    ///
    /// # Errors
    ///
    /// - Returns [`crate::Error::RandomSource`] if the counter must be seeded
    ///   and `rng` fails. The same error is returned, without consulting
    ///   `rng` again, until the counter is reset.
    /// - Returns `Error::LockPoisoned` if the lock was poisoned (std mutex
    ///   only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn draw(&self) -> Result<u32> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let value = match &*state {
            SequenceState::Seeded(value) => *value,
            SequenceState::Failed(e) => return Err(e.clone()),
            SequenceState::Unseeded => match self.cold_seed() {
                Ok(seed) => seed,
                Err(e) => {
                    *state = SequenceState::Failed(e.clone());
                    return Err(e);
                }
            },
        };
        *state = SequenceState::Seeded(next_sequence(value));
        Ok(value)
    }

    /// Reseeds the counter; see [`SequenceCounter::reset`].
    ///
    /// Resetting also recovers a poisoned lock and clears a failed seeding:
    /// the state is fully overwritten here.
    pub fn reset(&self, seed: Option<i64>) {
        let seed = seed.map(normalize_seed);
        let state = seed.map_or(SequenceState::Unseeded, SequenceState::Seeded);
        #[cfg(feature = "parking-lot")]
        {
            *self.state.lock() = state;
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            *self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner) = state;
            self.state.clear_poison();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?seed, "sequence counter reset");
    }

    /// Returns `true` if the counter holds a sequence value.
    ///
    /// Both a fresh counter and one whose seeding failed report `false`.
    pub fn is_seeded(&self) -> bool {
        #[cfg(feature = "parking-lot")]
        let state = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        matches!(*state, SequenceState::Seeded(_))
    }

    #[cold]
    #[inline(never)]
    fn cold_seed(&self) -> Result<u32> {
        let seed = self.rng.rand()? & MAX_SEQUENCE;
        #[cfg(feature = "tracing")]
        tracing::debug!("seeding sequence counter");
        Ok(seed)
    }
}

impl<R> SequenceCounter for LockSequenceCounter<R>
where
    R: RandSource<u32>,
{
    fn draw(&self) -> Result<u32> {
        self.draw()
    }

    fn reset(&self, seed: Option<i64>) {
        self.reset(seed);
    }
}

impl<R> core::fmt::Debug for LockSequenceCounter<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LockSequenceCounter").finish_non_exhaustive()
    }
}
