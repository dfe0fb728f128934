use crate::Result;

/// A source of the 3-byte machine identifier embedded in every ID.
///
/// The value should differ between hosts that generate IDs concurrently.
/// Sources are consulted once per [`MachineIdentity`], so they are free to do
/// slow work such as querying network hardware.
///
/// # Example
///
/// ```
/// use seqoid::{MachineIdSource, Result};
///
/// struct Rack(u8);
/// impl MachineIdSource for Rack {
///     fn machine_id(&self) -> Result<[u8; 3]> {
///         Ok([0x52, 0x4b, self.0])
///     }
/// }
///
/// assert_eq!(Rack(7).machine_id().unwrap(), [0x52, 0x4b, 7]);
/// ```
///
/// [`MachineIdentity`]: crate::MachineIdentity
pub trait MachineIdSource {
    /// Discovers the machine identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MachineId`] (or [`crate::Error::RandomSource`]
    /// for random sources) when no identifier can be produced.
    fn machine_id(&self) -> Result<[u8; 3]>;
}

impl<S> MachineIdSource for &S
where
    S: MachineIdSource + ?Sized,
{
    fn machine_id(&self) -> Result<[u8; 3]> {
        (**self).machine_id()
    }
}

impl<S> MachineIdSource for Box<S>
where
    S: MachineIdSource + ?Sized,
{
    fn machine_id(&self) -> Result<[u8; 3]> {
        (**self).machine_id()
    }
}
