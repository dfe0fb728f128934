use crate::{MachineIdSource, OsRandom, RandSource, Result};

/// A machine identifier supplied by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StaticMachineId([u8; 3]);

impl StaticMachineId {
    /// Wraps a configured 3-byte machine identifier.
    ///
    /// # Example
    /// ```
    /// use seqoid::{MachineIdSource, StaticMachineId};
    ///
    /// let source = StaticMachineId::new([0xaa, 0xbb, 0xcc]);
    /// assert_eq!(source.machine_id().unwrap(), [0xaa, 0xbb, 0xcc]);
    /// ```
    #[must_use]
    pub const fn new(machine_id: [u8; 3]) -> Self {
        Self(machine_id)
    }
}

impl MachineIdSource for StaticMachineId {
    fn machine_id(&self) -> Result<[u8; 3]> {
        Ok(self.0)
    }
}

/// A random machine identifier, for hosts without a usable hardware address.
///
/// This is an explicit, opt-in fallback: 24 random bits collide across hosts
/// far more readily than hardware addresses do, so nothing in this crate
/// substitutes it on its own. Each [`crate::MachineIdentity`] draws once and
/// keeps the value for its lifetime.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMachineId<R = OsRandom> {
    rng: R,
}

impl<R> RandomMachineId<R>
where
    R: RandSource<u32>,
{
    /// Creates a source drawing the low 3 bytes of one `rng` value per
    /// discovery.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> MachineIdSource for RandomMachineId<R>
where
    R: RandSource<u32>,
{
    fn machine_id(&self) -> Result<[u8; 3]> {
        let [_, a, b, c] = self.rng.rand()?.to_be_bytes();
        Ok([a, b, c])
    }
}
