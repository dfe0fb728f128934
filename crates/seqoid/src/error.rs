use crate::base32::Base32Error;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `seqoid` can produce.
///
/// [`Error::MachineId`] and [`Error::RandomSource`] are initialization
/// failures: they are raised by the first draw that needs the failing
/// collaborator and are never papered over with a weaker fallback value.
/// Every other variant comes from parsing or decoding caller-supplied input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No machine identifier could be discovered for this host.
    #[error("machine id unavailable: {reason}")]
    MachineId {
        /// What the discovery attempt ran into.
        reason: String,
    },

    /// The random source used to seed the sequence counter failed.
    #[error("random source unavailable: {reason}")]
    RandomSource {
        /// The underlying error message.
        reason: String,
    },

    /// A thread panicked while holding the sequence counter lock.
    ///
    /// Only produced by [`crate::LockSequenceCounter`] with a std mutex; when
    /// the `parking-lot` feature is enabled mutexes do not poison.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("sequence counter lock poisoned")]
    LockPoisoned,

    /// A hex string did not have exactly 24 characters.
    #[error("invalid hex length: expected 24, got {len}")]
    InvalidHexLen {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// A hex string contained a non-hex character.
    #[error("invalid hex digit {byte:#04x} at index {index}")]
    InvalidHexDigit {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// A decimal string was empty or contained something other than ASCII
    /// digits.
    #[error("invalid decimal id: expected ASCII digits only")]
    InvalidDecimal,

    /// A numeric value does not fit in 96 bits.
    #[error("value does not fit in 96 bits")]
    Overflow,

    /// Crockford Base32 decoding failed.
    #[error(transparent)]
    Base32(#[from] Base32Error),
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
