#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    AtomicSequenceCounter, HardwareAddress, MachineIdSource, MachineIdentity, ObjectId,
    OsRandom, Result, SequenceCounter, TimeSource, UnixClock, global::GLOBAL_COUNTER,
};

/// An [`ObjectId`] generator composed of a sequence counter, a clock and a
/// machine identity.
///
/// Each call to [`ObjectIdGenerator::try_next_id`] reads the clock, resolves
/// the machine identifier (once, on first use), reads the current process id
/// and draws the next sequence number:
///
/// ```text
/// timestamp (clock) | machine (identity) | process (OS) | sequence (counter)
/// ```
///
/// The sequence is not reset per tick: the counter simply wraps modulo 2^24,
/// so generation never has to wait for the clock to advance.
///
/// The counter is any [`SequenceCounter`], including a reference. Several
/// generators can therefore share one `static` counter, which is how the
/// process-wide API in [`crate::try_object_id`] is built.
///
/// ## See Also
/// - [`AtomicSequenceCounter`]
/// - [`crate::LockSequenceCounter`]
pub struct ObjectIdGenerator<C, T, M> {
    counter: C,
    clock: T,
    machine: MachineIdentity<M>,
}

impl<C, T, M> ObjectIdGenerator<C, T, M>
where
    C: SequenceCounter,
    T: TimeSource<u32>,
    M: MachineIdSource,
{
    /// Creates a generator. Nothing is discovered or seeded until the first
    /// call to [`Self::try_next_id`].
    ///
    /// # Example
    /// ```
    /// use seqoid::{
    ///     LockSequenceCounter, ObjectIdGenerator, StaticMachineId, ThreadRandom, UnixClock,
    /// };
    ///
    /// let generator = ObjectIdGenerator::new(
    ///     LockSequenceCounter::new(ThreadRandom),
    ///     UnixClock,
    ///     StaticMachineId::new([1, 2, 3]),
    /// );
    /// generator.reset_sequence(Some(42));
    ///
    /// let id = generator.try_next_id().unwrap();
    /// assert_eq!(id.sequence(), 42);
    /// assert!(id.to_hex().ends_with("00002a"));
    /// ```
    pub const fn new(counter: C, clock: T, machine: M) -> Self {
        Self {
            counter,
            clock,
            machine: MachineIdentity::new(machine),
        }
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::MachineId`] if machine id discovery failed. The
    ///   failure is cached, so every later call returns it too.
    /// - [`crate::Error::RandomSource`] if the counter needed seeding and the
    ///   random source failed. The counter keeps returning it until reset.
    /// - `Error::LockPoisoned` from a lock-based counter whose std mutex was
    ///   poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<ObjectId> {
        let timestamp = self.clock.current_secs();
        let machine_id = self.machine.resolve()?;
        let process_id = std::process::id();
        let sequence = self.counter.draw()?;
        Ok(ObjectId::from_parts(
            timestamp, machine_id, process_id, sequence,
        ))
    }

    /// Reseeds the underlying counter; see [`SequenceCounter::reset`].
    pub fn reset_sequence(&self, seed: Option<i64>) {
        self.counter.reset(seed);
    }

    /// Returns the machine identifier, discovering it if no ID has been
    /// generated yet.
    ///
    /// # Errors
    ///
    /// Returns the cached [`crate::Error::MachineId`] if discovery failed.
    pub fn machine_id(&self) -> Result<[u8; 3]> {
        self.machine.resolve()
    }

    /// Returns a reference to the sequence counter.
    pub const fn counter(&self) -> &C {
        &self.counter
    }

    /// Returns a reference to the clock.
    pub const fn clock(&self) -> &T {
        &self.clock
    }
}

/// The generator behind [`crate::try_object_id`]: the process-wide
/// lock-free counter seeded from the OS, the system clock and the host
/// hardware address.
///
/// Every instance built with [`Default`] borrows the same process-wide
/// counter, so any number of them (and the free functions) never hand out
/// the same sequence value within a second. Resetting one resets them all.
/// A generator that owns its counter instead must be the only one in the
/// process using that machine id.
///
/// # Example
/// ```
/// use seqoid::DefaultObjectIdGenerator;
///
/// let a = DefaultObjectIdGenerator::default();
/// let b = DefaultObjectIdGenerator::default();
/// assert!(core::ptr::eq(*a.counter(), *b.counter()));
/// ```
pub type DefaultObjectIdGenerator =
    ObjectIdGenerator<&'static AtomicSequenceCounter<OsRandom>, UnixClock, HardwareAddress>;

impl Default for DefaultObjectIdGenerator {
    fn default() -> Self {
        Self::new(&GLOBAL_COUNTER, UnixClock, HardwareAddress::new())
    }
}

impl<C, T, M> core::fmt::Debug for ObjectIdGenerator<C, T, M>
where
    C: core::fmt::Debug,
    M: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectIdGenerator")
            .field("counter", &self.counter)
            .field("machine", &self.machine)
            .finish_non_exhaustive()
    }
}
