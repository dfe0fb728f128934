use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes an [`ObjectId`] as its 96-bit integer value.
///
/// [`ObjectId`]: crate::ObjectId
pub mod as_native_object_id {
    use super::*;
    use crate::ObjectId;

    pub fn serialize<S>(id: &ObjectId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_u128().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = u128::deserialize(d)?;
        ObjectId::from_u128(n).map_err(serde::de::Error::custom)
    }
}

/// Serializes an [`ObjectId`] as its canonical 24-character hex string.
///
/// [`ObjectId`]: crate::ObjectId
pub mod as_hex_object_id {
    use super::*;
    use crate::{OBJECT_ID_HEX_SIZE, ObjectId};

    pub fn serialize<S>(id: &ObjectId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; OBJECT_ID_HEX_SIZE];
        id.encode_hex_to_buf(&mut buf);
        // The buffer only ever holds ASCII hex digits.
        let hex = core::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        s.serialize_str(hex)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl serde::de::Visitor<'_> for HexVisitor {
            type Value = ObjectId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 24-character hex string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ObjectId::from_hex(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(HexVisitor)
    }
}

/// Serializes an [`ObjectId`] as a 20-character Crockford Base32 string.
///
/// [`ObjectId`]: crate::ObjectId
pub mod as_base32_object_id {
    use super::*;
    use crate::{Base32Ext, OBJECT_ID_BASE32_SIZE, ObjectId};

    pub fn serialize<S>(id: &ObjectId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; OBJECT_ID_BASE32_SIZE];
        id.encode_to_buf(&mut buf);
        let encoded = core::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        s.serialize_str(encoded)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl serde::de::Visitor<'_> for Base32Visitor {
            type Value = ObjectId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Crockford base32 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ObjectId::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}
