use crate::Result;

/// A trait for random sources that return random integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Sources are fallible: an unavailable entropy
/// source surfaces as [`crate::Error::RandomSource`] rather than a predictable
/// value.
///
/// # Example
/// ```
/// use seqoid::{RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource<u32> for FixedRand {
///     fn rand(&self) -> Result<u32> {
///         Ok(1234)
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand().unwrap(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RandomSource`] if no randomness is available.
    fn rand(&self) -> Result<T>;
}

impl<T, R> RandSource<T> for &R
where
    R: RandSource<T> + ?Sized,
{
    fn rand(&self) -> Result<T> {
        (**self).rand()
    }
}
