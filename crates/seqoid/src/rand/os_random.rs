use rand::{TryRngCore, rngs::OsRng};

use crate::{Error, RandSource, Result};

/// A `RandSource` that reads from the operating system's CSPRNG
/// (`getrandom(2)`, `BCryptGenRandom`, ...).
///
/// Every call is a syscall, so this is meant for one-off draws such as seeding
/// the sequence counter, not for hot paths. Failures are reported, never
/// replaced with weaker randomness.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl OsRandom {
    fn fill(buf: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(buf).map_err(|e| Error::RandomSource {
            reason: e.to_string(),
        })
    }
}

impl RandSource<u32> for OsRandom {
    fn rand(&self) -> Result<u32> {
        let mut buf = [0_u8; 4];
        Self::fill(&mut buf)?;
        Ok(u32::from_ne_bytes(buf))
    }
}

impl RandSource<u64> for OsRandom {
    fn rand(&self) -> Result<u64> {
        let mut buf = [0_u8; 8];
        Self::fill(&mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }
}
