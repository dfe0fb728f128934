use portable_atomic::{AtomicU64, Ordering, fence};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, RandSource, Result,
    generator::{
        MAX_SEQUENCE, Mutex, MutexGuard, SequenceCounter, next_sequence, normalize_seed,
    },
};

/// Marks the unseeded state; no 24-bit value can collide with it.
const UNSEEDED: u64 = u64::MAX;
/// Marks an epoch whose seeding failed. The error is parked in `failure`.
const FAILED: u64 = u64::MAX - 1;

/// A lock-free sequence counter suitable for multi-threaded environments.
///
/// The counter state lives in a single [`AtomicU64`] holding either a 24-bit
/// sequence value or an "unseeded" marker, and every draw is one
/// compare-and-swap on it. Seeding happens inside the same CAS loop: racing
/// first draws may each fetch a random seed, but only one of them installs
/// it, and the losers retry against the installed value. A counter is
/// therefore seeded at most once per epoch, and no caller ever blocks on
/// another.
///
/// A failed seeding is not retried: the error is kept and returned by every
/// draw until the next [`reset`](Self::reset).
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Never blocks (CAS retry only under contention)
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Throughput matters more than fair access
///
/// ## See Also
/// - [`LockSequenceCounter`]
///
/// [`LockSequenceCounter`]: crate::generator::LockSequenceCounter
pub struct AtomicSequenceCounter<R> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    failure: Mutex<Option<Error>>,
    rng: R,
}

impl<R> AtomicSequenceCounter<R>
where
    R: RandSource<u32>,
{
    /// Creates an unseeded counter that seeds itself from `rng` on first
    /// draw.
    ///
    /// # Example
    /// ```
    /// use seqoid::{AtomicSequenceCounter, OsRandom, SequenceCounter};
    ///
    /// let counter = AtomicSequenceCounter::new(OsRandom);
    /// let first = counter.draw().unwrap();
    /// let second = counter.draw().unwrap();
    /// assert_eq!(second, (first + 1) % (1 << 24));
    /// ```
    pub const fn new(rng: R) -> Self {
        Self::from_state(UNSEEDED, rng)
    }

    /// Creates a counter whose first draw returns `seed` masked to 24 bits.
    ///
    /// `rng` is only consulted again after [`Self::reset`] with `None`.
    pub const fn with_seed(seed: u32, rng: R) -> Self {
        Self::from_state((seed & MAX_SEQUENCE) as u64, rng)
    }

    const fn from_state(state: u64, rng: R) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(state),
            failure: Mutex::new(None),
            rng,
        }
    }

    /// Returns the current sequence value and advances the counter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RandomSource`] if the counter must be seeded
    /// and `rng` fails. The same error is returned, without consulting `rng`
    /// again, until the counter is reset.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    #[allow(clippy::cast_possible_truncation)]
    pub fn draw(&self) -> Result<u32> {
        let mut current = self.state.load(Ordering::Relaxed);
        // A seed fetched in a lost race is reused if the counter is still
        // unseeded on retry.
        let mut fetched_seed = None;

        loop {
            let value = match current {
                FAILED => return Err(self.cached_failure()),
                UNSEEDED => match fetched_seed {
                    Some(seed) => seed,
                    None => match self.cold_seed() {
                        Ok(seed) => {
                            fetched_seed = Some(seed);
                            seed
                        }
                        Err(e) => {
                            *self.lock_failure() = Some(e.clone());
                            match self.state.compare_exchange(
                                UNSEEDED,
                                FAILED,
                                Ordering::Release,
                                Ordering::Relaxed,
                            ) {
                                Ok(_) => return Err(e),
                                // Seeded or reset meanwhile; draw from that.
                                Err(actual) => {
                                    current = actual;
                                    continue;
                                }
                            }
                        }
                    },
                },
                _ => current as u32,
            };
            let next = u64::from(next_sequence(value));

            match self.state.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(value),
                // Another thread won the race; retry against its value.
                Err(actual) => current = actual,
            }
        }
    }

    /// Reseeds the counter; see [`SequenceCounter::reset`].
    pub fn reset(&self, seed: Option<i64>) {
        let state = seed.map_or(UNSEEDED, |seed| u64::from(normalize_seed(seed)));
        self.state.store(state, Ordering::Relaxed);
        #[cfg(feature = "tracing")]
        tracing::debug!(?seed, "sequence counter reset");
    }

    /// Returns `true` if the counter holds a sequence value.
    ///
    /// Both a fresh counter and one whose seeding failed report `false`.
    pub fn is_seeded(&self) -> bool {
        !matches!(self.state.load(Ordering::Relaxed), UNSEEDED | FAILED)
    }

    #[cold]
    #[inline(never)]
    fn cold_seed(&self) -> Result<u32> {
        let seed = self.rng.rand()? & MAX_SEQUENCE;
        #[cfg(feature = "tracing")]
        tracing::debug!("seeding sequence counter");
        Ok(seed)
    }

    #[cold]
    #[inline(never)]
    fn cached_failure(&self) -> Error {
        // Pairs with the release store of `FAILED`.
        fence(Ordering::Acquire);
        self.lock_failure()
            .clone()
            .unwrap_or_else(|| Error::RandomSource {
                reason: "sequence counter seeding failed".into(),
            })
    }

    fn lock_failure(&self) -> MutexGuard<'_, Option<Error>> {
        #[cfg(feature = "parking-lot")]
        {
            self.failure.lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.failure
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }
}

impl<R> SequenceCounter for AtomicSequenceCounter<R>
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

impl<R> core::fmt::Debug for AtomicSequenceCounter<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.load(Ordering::Relaxed);
        let mut dbg = f.debug_struct("AtomicSequenceCounter");
        match state {
            UNSEEDED => dbg.field("state", &"unseeded"),
            FAILED => dbg.field("state", &"failed"),
            _ => dbg.field("state", &format_args!("{state} (0x{state:06x})")),
        };
        dbg.finish_non_exhaustive()
    }
}
