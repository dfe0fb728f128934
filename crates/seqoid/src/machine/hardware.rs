use std::path::PathBuf;

use crate::{Error, MachineIdSource, Result};

/// A 6-byte link-layer (MAC) address.
pub type MacAddress = [u8; 6];

const SYSFS_NET: &str = "/sys/class/net";
const LOOPBACK: &str = "lo";

/// Derives the machine identifier from a network hardware address.
///
/// Only the low-order 3 bytes of the address are kept. The high-order 3 bytes
/// are the vendor prefix (OUI), which is shared by every card a manufacturer
/// ships, while the low-order bytes are the part assigned per device.
///
/// Discovery is platform-specific:
/// - Linux: reads `/sys/class/net/<iface>/address`. Without a pinned
///   interface, interfaces are visited in name order and the first one with a
///   non-zero address wins; the loopback device is skipped.
/// - Elsewhere: discovery fails with [`Error::MachineId`]. Supply a
///   [`crate::StaticMachineId`] or opt into [`crate::RandomMachineId`].
#[derive(Clone, Debug)]
pub struct HardwareAddress {
    interface: Option<String>,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    sysfs_root: PathBuf,
}

impl Default for HardwareAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAddress {
    /// Uses the first interface with a usable hardware address.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interface: None,
            sysfs_root: PathBuf::from(SYSFS_NET),
        }
    }

    /// Uses the hardware address of the named interface (e.g. `"eth0"`).
    #[must_use]
    pub fn with_interface(name: impl Into<String>) -> Self {
        Self {
            interface: Some(name.into()),
            ..Self::new()
        }
    }

    #[cfg(all(test, target_os = "linux"))]
    fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Discovers the full 6-byte hardware address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MachineId`] if no usable address is found.
    pub fn discover(&self) -> Result<MacAddress> {
        #[cfg(target_os = "linux")]
        {
            self.discover_sysfs()
        }
        #[cfg(not(target_os = "linux"))]
        {
            Err(Error::MachineId {
                reason: format!(
                    "hardware address discovery is not supported on this platform (interface: {})",
                    self.interface.as_deref().unwrap_or("any")
                ),
            })
        }
    }

    #[cfg(target_os = "linux")]
    fn discover_sysfs(&self) -> Result<MacAddress> {
        if let Some(iface) = &self.interface {
            return self.read_interface(iface).and_then(|mac| {
                if is_null(&mac) {
                    Err(Error::MachineId {
                        reason: format!("interface {iface} has an all-zero hardware address"),
                    })
                } else {
                    Ok(mac)
                }
            });
        }

        let entries = std::fs::read_dir(&self.sysfs_root).map_err(|e| Error::MachineId {
            reason: format!("failed to list {}: {e}", self.sysfs_root.display()),
        })?;
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
            .filter(|name| name != LOOPBACK)
            .collect();
        names.sort_unstable();

        names
            .iter()
            .filter_map(|name| self.read_interface(name).ok())
            .find(|mac| !is_null(mac))
            .ok_or_else(|| Error::MachineId {
                reason: format!(
                    "no interface under {} has a non-zero hardware address",
                    self.sysfs_root.display()
                ),
            })
    }

    #[cfg(target_os = "linux")]
    fn read_interface(&self, iface: &str) -> Result<MacAddress> {
        let path = self.sysfs_root.join(iface).join("address");
        let content = std::fs::read_to_string(&path).map_err(|e| Error::MachineId {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        parse_mac(&content).ok_or_else(|| Error::MachineId {
            reason: format!("invalid hardware address in {}: {}", path.display(), content.trim()),
        })
    }
}

impl MachineIdSource for HardwareAddress {
    fn machine_id(&self) -> Result<[u8; 3]> {
        self.discover().map(|mac| low_order_bytes(&mac))
    }
}

/// The device-specific half of a hardware address.
#[must_use]
pub const fn low_order_bytes(mac: &MacAddress) -> [u8; 3] {
    [mac[3], mac[4], mac[5]]
}

/// Parses a hardware address written as six hex octets separated by `:`, `-`
/// or spaces (e.g. `00:1A:2B:3C:4D:5E`).
#[must_use]
pub fn parse_mac(raw: &str) -> Option<MacAddress> {
    let cleaned = raw.trim().trim_matches('"');
    let mut bytes = [0_u8; 6];
    let mut parts = cleaned
        .split([':', '-', ' '])
        .filter(|part| !part.is_empty());

    for byte in &mut bytes {
        let part = parts.next()?;
        if part.len() > 2 {
            return None;
        }
        *byte = u8::from_str_radix(part, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(bytes)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn is_null(mac: &MacAddress) -> bool {
    mac.iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mac_colon_separated() {
        assert_eq!(
            parse_mac("00:1A:2B:3C:4D:5E\n"),
            Some([0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E])
        );
    }

    #[test]
    fn parse_mac_dash_separated() {
        assert_eq!(
            parse_mac("00-1a-2b-3c-4d-5e"),
            Some([0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E])
        );
    }

    #[test]
    fn parse_mac_invalid_length() {
        assert_eq!(parse_mac("00:1A:2B:3C:4D"), None);
        assert_eq!(parse_mac("00:1A:2B:3C:4D:5E:6F"), None);
        assert_eq!(parse_mac("001:1A:2B:3C:4D:5E"), None);
    }

    #[test]
    fn parse_mac_invalid_hex() {
        assert_eq!(parse_mac("ZZ:1A:2B:3C:4D:5E"), None);
    }

    #[test]
    fn keeps_device_half_of_address() {
        assert_eq!(
            low_order_bytes(&[0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E]),
            [0x3C, 0x4D, 0x5E]
        );
    }

    #[cfg(target_os = "linux")]
    mod sysfs {
        use super::*;
        use std::{fs, path::Path};

        struct FakeSysfs {
            root: PathBuf,
        }

        impl FakeSysfs {
            fn new(name: &str, interfaces: &[(&str, &str)]) -> Self {
                let root = std::env::temp_dir().join(format!(
                    "seqoid-sysfs-{}-{name}",
                    std::process::id()
                ));
                let _ = fs::remove_dir_all(&root);
                for (iface, address) in interfaces {
                    let dir = root.join(iface);
                    fs::create_dir_all(&dir).unwrap();
                    fs::write(dir.join("address"), format!("{address}\n")).unwrap();
                }
                fs::create_dir_all(&root).unwrap();
                Self { root }
            }

            fn path(&self) -> &Path {
                &self.root
            }
        }

        impl Drop for FakeSysfs {
            fn drop(&mut self) {
                let _ = fs::remove_dir_all(&self.root);
            }
        }

        #[test]
        fn picks_first_named_interface_with_real_address() {
            let sysfs = FakeSysfs::new(
                "first",
                &[
                    ("lo", "00:00:00:00:00:00"),
                    ("dummy0", "00:00:00:00:00:00"),
                    ("eth1", "02:42:ac:11:00:03"),
                    ("eth0", "02:42:ac:11:00:02"),
                ],
            );
            let source = HardwareAddress::new().with_sysfs_root(sysfs.path());
            assert_eq!(source.discover().unwrap(), [0x02, 0x42, 0xac, 0x11, 0x00, 0x02]);
            assert_eq!(source.machine_id().unwrap(), [0x11, 0x00, 0x02]);
        }

        #[test]
        fn skips_unparseable_addresses() {
            let sysfs = FakeSysfs::new(
                "garbage",
                &[("a0", "not-a-mac"), ("b0", "de:ad:be:ef:00:01")],
            );
            let source = HardwareAddress::new().with_sysfs_root(sysfs.path());
            assert_eq!(source.machine_id().unwrap(), [0xef, 0x00, 0x01]);
        }

        #[test]
        fn pinned_interface_is_used() {
            let sysfs = FakeSysfs::new(
                "pinned",
                &[("eth0", "02:42:ac:11:00:02"), ("wlan0", "a4:5e:60:01:02:03")],
            );
            let source = HardwareAddress::with_interface("wlan0").with_sysfs_root(sysfs.path());
            assert_eq!(source.machine_id().unwrap(), [0x01, 0x02, 0x03]);
        }

        #[test]
        fn pinned_interface_must_exist_and_be_non_zero() {
            let sysfs = FakeSysfs::new("pinned-missing", &[("lo", "00:00:00:00:00:00")]);
            let missing = HardwareAddress::with_interface("eth9").with_sysfs_root(sysfs.path());
            assert!(matches!(missing.machine_id(), Err(Error::MachineId { .. })));

            let zero = HardwareAddress::with_interface("lo").with_sysfs_root(sysfs.path());
            assert!(matches!(zero.machine_id(), Err(Error::MachineId { .. })));
        }

        #[test]
        fn loopback_only_host_fails() {
            let sysfs = FakeSysfs::new("loopback", &[("lo", "00:00:00:00:00:00")]);
            let source = HardwareAddress::new().with_sysfs_root(sysfs.path());
            assert!(matches!(source.machine_id(), Err(Error::MachineId { .. })));
        }

        #[test]
        fn missing_sysfs_fails() {
            let source = HardwareAddress::new().with_sysfs_root("/nonexistent/seqoid/net");
            assert!(matches!(source.machine_id(), Err(Error::MachineId { .. })));
        }
    }
}
