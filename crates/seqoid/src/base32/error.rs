use core::fmt;

/// Errors that can occur while decoding a Crockford Base32 string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input is not exactly [`crate::OBJECT_ID_BASE32_SIZE`] characters.
    DecodeInvalidLen {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// The input contains a byte outside the Crockford alphabet.
    DecodeInvalidAscii {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The leading character sets bits beyond the 96 an ID can hold.
    DecodeOverflow,
}

impl fmt::Display for Base32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeInvalidLen { len } => write!(f, "invalid base32 length: {len}"),
            Self::DecodeInvalidAscii { byte, index } => {
                write!(f, "invalid base32 byte {byte:#04x} at index {index}")
            }
            Self::DecodeOverflow => write!(f, "base32 value does not fit in 96 bits"),
        }
    }
}

impl core::error::Error for Base32Error {}
