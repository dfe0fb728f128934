use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The system wall clock, in whole seconds since the Unix epoch.
///
/// Reads `SystemTime::now()` on every call. A clock set before 1970 reads as
/// zero, and the `u32` rendering wraps in 2106 the same way the timestamp
/// field of an [`ObjectId`] does.
///
/// [`ObjectId`]: crate::ObjectId
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixClock;

impl TimeSource<u64> for UnixClock {
    fn current_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs()
    }
}

impl TimeSource<u32> for UnixClock {
    #[allow(clippy::cast_possible_truncation)]
    fn current_secs(&self) -> u32 {
        <Self as TimeSource<u64>>::current_secs(self) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_system_time() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let now: u64 = UnixClock.current_secs();
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn narrow_reading_is_truncated_wide_reading() {
        let wide: u64 = UnixClock.current_secs();
        let narrow: u32 = UnixClock.current_secs();
        // Allow for a second boundary between the two reads.
        assert!(u64::from(narrow).wrapping_sub(wide & u64::from(u32::MAX)) <= 1);
    }
}
