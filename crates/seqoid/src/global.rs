//! Process-wide ObjectId generation.
//!
//! Every call shares one sequence counter and one machine identity, both
//! initialized lazily on first use: the counter is seeded from the OS random
//! source and the machine id is discovered from the host hardware address.
//! A failed discovery is remembered, so every later call reports the same
//! [`Error::MachineId`].
//!
//! # Example
//! ```no_run
//! use seqoid::{reset_sequence_counter, try_object_id};
//!
//! reset_sequence_counter(Some(42));
//! let id = try_object_id().unwrap();
//! assert!(id.to_hex().ends_with("00002a"));
//! ```

use std::sync::LazyLock;

use crate::{AtomicSequenceCounter, DefaultObjectIdGenerator, Error, ObjectId, OsRandom, Result};

/// The process-wide sequence counter, seeded on first draw.
pub(crate) static GLOBAL_COUNTER: AtomicSequenceCounter<OsRandom> =
    AtomicSequenceCounter::new(OsRandom);

// Tests that draw from or reset the process-wide counter hold this.
#[cfg(test)]
pub(crate) static SERIAL: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// A generator borrowing the process-wide counter.
static GLOBAL_GENERATOR: LazyLock<DefaultObjectIdGenerator> =
    LazyLock::new(DefaultObjectIdGenerator::default);

/// Generates an [`ObjectId`] from the process-wide generator.
///
/// # Errors
///
/// - [`Error::MachineId`] if the host has no usable hardware address.
/// - [`Error::RandomSource`] if the OS random source failed while seeding the
///   counter.
///
/// # Example
/// ```no_run
/// let a = seqoid::try_object_id().unwrap();
/// let b = seqoid::try_object_id().unwrap();
/// assert_ne!(a, b);
/// ```
pub fn try_object_id() -> Result<ObjectId> {
    GLOBAL_GENERATOR.try_next_id()
}

/// Generates an [`ObjectId`] from the process-wide generator.
///
/// # Panics
///
/// Panics if [`try_object_id`] fails, i.e. if the machine id cannot be
/// discovered or the OS random source is unavailable.
#[must_use]
pub fn object_id() -> ObjectId {
    match try_object_id() {
        Ok(id) => id,
        Err(e) => object_id_failed(&e),
    }
}

#[cold]
#[inline(never)]
fn object_id_failed(e: &Error) -> ! {
    panic!("failed to generate ObjectId: {e}")
}

/// Reseeds the process-wide sequence counter.
///
/// With `Some(seed)` the next identifier carries `|seed| mod 2^24` as its
/// sequence; with `None` the counter picks a fresh random seed on its next
/// draw.
pub fn reset_sequence_counter(seed: Option<i64>) {
    GLOBAL_COUNTER.reset(seed);
}

/// Returns the machine identifier used by the process-wide generator,
/// discovering it on first use.
///
/// # Errors
///
/// Returns [`Error::MachineId`] if discovery failed.
pub fn machine_id() -> Result<[u8; 3]> {
    GLOBAL_GENERATOR.machine_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_deterministic() {
        let _guard = SERIAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        reset_sequence_counter(Some(42));
        assert_eq!(GLOBAL_COUNTER.draw().unwrap(), 0x2a);
        assert_eq!(GLOBAL_COUNTER.draw().unwrap(), 0x2b);

        reset_sequence_counter(Some(i64::MIN + 1));
        assert_eq!(GLOBAL_COUNTER.draw().unwrap(), 0xff_ffff);
        assert_eq!(GLOBAL_COUNTER.draw().unwrap(), 0);

        reset_sequence_counter(None);
        assert!(!GLOBAL_COUNTER.is_seeded());
        GLOBAL_COUNTER.draw().unwrap();
        assert!(GLOBAL_COUNTER.is_seeded());
    }

    #[test]
    fn reseeded_ids_end_with_seed() {
        let _guard = SERIAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        reset_sequence_counter(Some(42));
        match try_object_id() {
            Ok(first) => {
                let second = try_object_id().unwrap();
                assert!(first.to_hex().ends_with("00002a"));
                assert!(second.to_hex().ends_with("00002b"));
                assert_eq!(first.machine_id(), machine_id().unwrap());
            }
            // No hardware address on this host; the failure must be stable.
            Err(e) => {
                assert!(matches!(e, Error::MachineId { .. }));
                assert_eq!(try_object_id(), Err(e.clone()));
                assert_eq!(machine_id(), Err(e));
            }
        }
    }

    #[test]
    fn ids_are_unique_and_fixed_width() {
        let _guard = SERIAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        reset_sequence_counter(None);
        let Ok(first) = try_object_id() else {
            return;
        };
        let mut seen = std::collections::HashSet::new();
        seen.insert(first);
        for _ in 0..1000 {
            let id = object_id();
            assert_eq!(id.to_hex().len(), 24);
            assert!(seen.insert(id));
        }
    }
}
