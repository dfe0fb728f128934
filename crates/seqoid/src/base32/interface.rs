use crate::{
    Base32Error, ObjectId, Result,
    base32::{base32_size, decode_base32, encode_base32},
    id::OBJECT_ID_SIZE,
};

/// Length of the Crockford Base32 rendering of an [`ObjectId`].
pub const OBJECT_ID_BASE32_SIZE: usize = base32_size(OBJECT_ID_SIZE);

/// Extension trait providing the text-safe transport encoding of an ID.
///
/// IDs are rendered with the [Crockford Base32](https://www.crockford.com/base32.html)
/// alphabet into a fixed 20 characters. The output is a deterministic
/// function of the raw bytes, ASCII only, case-insensitive on decode, and
/// sorts in the same order as the bytes.
pub trait Base32Ext: Sized {
    /// Encodes this ID into a [`String`] using Crockford Base32.
    ///
    /// # Example
    ///
    /// ```
    /// use seqoid::{Base32Ext, ObjectId};
    ///
    /// let id = ObjectId::from_u128(42).unwrap();
    /// assert_eq!(id.encode(), "0000000000000000001A");
    /// ```
    fn encode(&self) -> String {
        let mut buf = [0_u8; OBJECT_ID_BASE32_SIZE];
        self.encode_to_buf(&mut buf);
        buf.iter().copied().map(char::from).collect()
    }

    /// Encodes this ID into the provided buffer without heap allocation.
    ///
    /// See also: [`Base32Ext::encode`] for an allocation-producing version.
    fn encode_to_buf(&self, buf: &mut [u8; OBJECT_ID_BASE32_SIZE]);

    /// Decodes a Base32-encoded string back into an ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the input string:
    /// - is not exactly [`OBJECT_ID_BASE32_SIZE`] bytes long
    /// - contains characters outside the Crockford alphabet
    /// - sets bits above the 96 an ID holds (leading character above `1`)
    fn decode(s: &str) -> Result<Self>;
}

impl Base32Ext for ObjectId {
    fn encode_to_buf(&self, buf: &mut [u8; OBJECT_ID_BASE32_SIZE]) {
        encode_base32(self.as_bytes(), buf);
    }

    fn decode(s: &str) -> Result<Self> {
        if s.len() != OBJECT_ID_BASE32_SIZE {
            return Err(Base32Error::DecodeInvalidLen { len: s.len() }.into());
        }
        let raw = decode_base32(s)?;
        Self::from_u128(raw).map_err(|_| Base32Error::DecodeOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn encoded_width_is_fixed() {
        assert_eq!(OBJECT_ID_BASE32_SIZE, 20);
        for id in [
            ObjectId::NIL,
            ObjectId::from_bytes([0xff; 12]),
            ObjectId::from_parts(1_700_000_000, [1, 2, 3], 4, 5),
        ] {
            assert_eq!(id.encode().len(), OBJECT_ID_BASE32_SIZE);
        }
        assert_eq!(ObjectId::NIL.encode(), "00000000000000000000");
        assert_eq!(ObjectId::from_bytes([0xff; 12]).encode(), "1ZZZZZZZZZZZZZZZZZZZ");
    }

    #[test]
    fn decode_inverts_encode() {
        let id = ObjectId::from_parts(0x65a1_b2c3, [0xaa, 0xbb, 0xcc], 0x1234, 0x00de_adbe);
        let encoded = id.encode();
        assert_eq!(ObjectId::decode(&encoded).unwrap(), id);
        assert_eq!(ObjectId::decode(&encoded.to_lowercase()).unwrap(), id);
    }

    #[test]
    fn encoding_preserves_order() {
        let a = ObjectId::from_parts(1, [0; 3], 0, 0xFF_FFFF);
        let b = ObjectId::from_parts(2, [0; 3], 0, 0);
        assert!(a.encode() < b.encode());
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!(
            ObjectId::decode("0000"),
            Err(Error::Base32(Base32Error::DecodeInvalidLen { len: 4 }))
        );
        assert_eq!(
            ObjectId::decode("0000000000000000000U"),
            Err(Error::Base32(Base32Error::DecodeInvalidAscii {
                byte: b'U',
                index: 19
            }))
        );
        assert_eq!(
            ObjectId::decode("G0000000000000000000"),
            Err(Error::Base32(Base32Error::DecodeOverflow))
        );
    }
}
