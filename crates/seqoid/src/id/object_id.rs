use core::{fmt, str::FromStr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Error, Result, id::hex};

/// Size of an [`ObjectId`] in bytes.
pub const OBJECT_ID_SIZE: usize = 12;

/// Length of the canonical hex rendering of an [`ObjectId`].
pub const OBJECT_ID_HEX_SIZE: usize = OBJECT_ID_SIZE * 2;

/// A 96-bit identifier made of a timestamp, machine id, process id and
/// sequence number.
///
/// ```text
///  Byte Index:  0          3 4        6 7       8 9        11
///               +-----------+----------+---------+-----------+
///  Field:       | timestamp | machine  | process | sequence  |
///               |   (32)    |   (24)   |  (16)   |   (24)    |
///               +-----------+----------+---------+-----------+
///               |<-------------- MSB -- 96 bits -- LSB ----->|
/// ```
///
/// Each field is stored big-endian, so comparing two IDs (derived [`Ord`])
/// gives the same answer as comparing their hex strings, and IDs created more
/// than a second apart sort by creation time.
///
/// `ObjectId` is a plain value: it is `Copy`, never changes after
/// construction, and can be shared across threads freely.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectId {
    bytes: [u8; OBJECT_ID_SIZE],
}

impl ObjectId {
    pub const TIMESTAMP_BITS: u32 = 32;
    pub const MACHINE_ID_BITS: u32 = 24;
    pub const PROCESS_ID_BITS: u32 = 16;
    pub const SEQUENCE_BITS: u32 = 24;

    pub const PROCESS_ID_MASK: u32 = (1 << Self::PROCESS_ID_BITS) - 1;
    pub const SEQUENCE_MASK: u32 = (1 << Self::SEQUENCE_BITS) - 1;

    /// The all-zero ID.
    pub const NIL: Self = Self::from_bytes([0; OBJECT_ID_SIZE]);

    /// Packs the four fields into an ID.
    ///
    /// `process_id` is masked to its low 16 bits and `sequence` to its low 24
    /// bits, so oversized inputs never spill into a neighbouring field.
    #[must_use]
    pub const fn from_parts(
        timestamp: u32,
        machine_id: [u8; 3],
        process_id: u32,
        sequence: u32,
    ) -> Self {
        let ts = timestamp.to_be_bytes();
        let pid = (process_id & Self::PROCESS_ID_MASK).to_be_bytes();
        let seq = (sequence & Self::SEQUENCE_MASK).to_be_bytes();
        Self::from_bytes([
            ts[0],
            ts[1],
            ts[2],
            ts[3],
            machine_id[0],
            machine_id[1],
            machine_id[2],
            pid[2],
            pid[3],
            seq[1],
            seq[2],
            seq[3],
        ])
    }

    /// Wraps raw bytes without validation; every 12-byte value is a valid ID.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_SIZE]) -> Self {
        Self { bytes }
    }

    /// Borrows the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; OBJECT_ID_SIZE] {
        &self.bytes
    }

    /// Copies out the raw bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; OBJECT_ID_SIZE] {
        self.bytes
    }

    /// Unix seconds at creation.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        let b = &self.bytes;
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    #[must_use]
    pub const fn machine_id(&self) -> [u8; 3] {
        let b = &self.bytes;
        [b[4], b[5], b[6]]
    }

    /// The low 16 bits of the creating process' id.
    #[must_use]
    pub const fn process_id(&self) -> u16 {
        let b = &self.bytes;
        u16::from_be_bytes([b[7], b[8]])
    }

    /// The 24-bit sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        let b = &self.bytes;
        u32::from_be_bytes([0, b[9], b[10], b[11]])
    }

    /// The ID interpreted as an unsigned 96-bit big-endian integer.
    #[must_use]
    pub fn to_u128(&self) -> u128 {
        let mut buf = [0_u8; 16];
        buf[16 - OBJECT_ID_SIZE..].copy_from_slice(&self.bytes);
        u128::from_be_bytes(buf)
    }

    /// Builds an ID from its integer value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if `value` needs more than 96 bits.
    pub fn from_u128(value: u128) -> Result<Self> {
        if value >> (OBJECT_ID_SIZE * 8) != 0 {
            return Err(Error::Overflow);
        }
        let raw = value.to_be_bytes();
        let mut bytes = [0_u8; OBJECT_ID_SIZE];
        bytes.copy_from_slice(&raw[16 - OBJECT_ID_SIZE..]);
        Ok(Self::from_bytes(bytes))
    }

    /// The decimal rendering of [`Self::to_u128`].
    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.to_u128().to_string()
    }

    /// Parses a decimal string produced by [`Self::to_decimal`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDecimal`] if `s` is empty or holds anything but
    ///   ASCII digits (signs included).
    /// - [`Error::Overflow`] if the value does not fit in 96 bits.
    pub fn from_decimal(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDecimal);
        }
        // Only digits remain, so parsing can fail on width alone.
        let value = s.parse::<u128>().map_err(|_| Error::Overflow)?;
        Self::from_u128(value)
    }

    /// Writes the 24-character lowercase hex form into `buf` without
    /// allocating.
    pub fn encode_hex_to_buf(&self, buf: &mut [u8; OBJECT_ID_HEX_SIZE]) {
        hex::encode_hex(&self.bytes, buf);
    }

    /// The canonical 24-character lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut buf = [0_u8; OBJECT_ID_HEX_SIZE];
        self.encode_hex_to_buf(&mut buf);
        buf.iter().copied().map(char::from).collect()
    }

    /// Parses a 24-character hex string in either case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHexLen`] or [`Error::InvalidHexDigit`].
    pub fn from_hex(s: &str) -> Result<Self> {
        hex::decode_hex::<OBJECT_ID_SIZE>(s).map(Self::from_bytes)
    }

    /// The creation time encoded in the timestamp field.
    ///
    /// # ⚠️ Note
    /// The precision is whole seconds.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(u64::from(self.timestamp()))
    }

    /// An ID carrying only the timestamp of `datetime`, with every other field
    /// zeroed.
    ///
    /// This is the smallest ID any generator could have produced during that
    /// second, which makes it a convenient lower bound for range queries.
    /// Times before the Unix epoch clamp to zero; times past 2106 wrap like
    /// the timestamp field itself.
    #[must_use]
    pub fn from_datetime(datetime: SystemTime) -> Self {
        let secs = datetime
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = secs as u32;
        Self::from_parts(timestamp, [0; 3], 0, 0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::NIL
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; OBJECT_ID_HEX_SIZE];
        self.encode_hex_to_buf(&mut buf);
        // Hex output is always ASCII.
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.pad(s)
    }
}

impl fmt::LowerHex for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m0, m1, m2] = self.machine_id();
        f.debug_struct("ObjectId")
            .field("id", &format_args!("{self}"))
            .field(
                "timestamp",
                &format_args!("{} (0x{:x})", self.timestamp(), self.timestamp()),
            )
            .field("machine_id", &format_args!("0x{m0:02x}{m1:02x}{m2:02x}"))
            .field(
                "process_id",
                &format_args!("{} (0x{:x})", self.process_id(), self.process_id()),
            )
            .field(
                "sequence",
                &format_args!("{} (0x{:06x})", self.sequence(), self.sequence()),
            )
            .finish()
    }
}

impl From<[u8; OBJECT_ID_SIZE]> for ObjectId {
    fn from(bytes: [u8; OBJECT_ID_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<ObjectId> for [u8; OBJECT_ID_SIZE] {
    fn from(id: ObjectId) -> Self {
        id.to_bytes()
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_hex()
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        Self::from_hex(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<ObjectId> for &str {
    fn eq(&self, other: &ObjectId) -> bool {
        other == *self
    }
}
