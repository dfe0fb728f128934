/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The unit is **seconds since the Unix epoch**; `T` is typically `u32`, the
/// width of the [`ObjectId`] timestamp field.
///
/// # Example
///
/// ```
/// use seqoid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u32> for FixedTime {
///     fn current_secs(&self) -> u32 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_secs(), 1234);
/// ```
///
/// [`ObjectId`]: crate::ObjectId
pub trait TimeSource<T> {
    /// Returns the current time in seconds since the Unix epoch.
    fn current_secs(&self) -> T;
}

impl<T, S> TimeSource<T> for &S
where
    S: TimeSource<T> + ?Sized,
{
    fn current_secs(&self) -> T {
        (**self).current_secs()
    }
}
