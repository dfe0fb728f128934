use crate::{Error, Result};

const ALPHABET: &[u8; 16] = b"0123456789abcdef";
const NO_VALUE: u8 = 255;

/// Lookup table for hex decoding, accepting both cases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i; // upper-case letter
        }
        i += 1;
    }
    lut
};

/// Encodes `input` as lowercase hex into `buf`.
///
/// `buf` must be exactly twice the length of `input`; callers pass fixed-size
/// arrays so this holds by construction.
#[inline]
pub fn encode_hex(input: &[u8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), input.len() * 2);
    for (pair, &b) in buf.chunks_exact_mut(2).zip(input) {
        pair[0] = ALPHABET[usize::from(b >> 4)];
        pair[1] = ALPHABET[usize::from(b & 0x0F)];
    }
}

/// Decodes a hex string of exactly `N * 2` characters into `N` bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidHexLen`] for any other length and
/// [`Error::InvalidHexDigit`] for characters outside `[0-9a-fA-F]`.
pub fn decode_hex<const N: usize>(encoded: &str) -> Result<[u8; N]> {
    let input = encoded.as_bytes();
    if input.len() != N * 2 {
        return Err(Error::InvalidHexLen { len: input.len() });
    }

    let mut out = [0_u8; N];
    for (i, pair) in input.chunks_exact(2).enumerate() {
        let hi = LOOKUP[usize::from(pair[0])];
        if hi == NO_VALUE {
            return Err(Error::InvalidHexDigit {
                byte: pair[0],
                index: i * 2,
            });
        }
        let lo = LOOKUP[usize::from(pair[1])];
        if lo == NO_VALUE {
            return Err(Error::InvalidHexDigit {
                byte: pair[1],
                index: i * 2 + 1,
            });
        }
        out[i] = (hi << 4) | lo;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_lowercase() {
        let mut buf = [0_u8; 8];
        encode_hex(&[0xDE, 0xAD, 0xBE, 0xEF], &mut buf);
        assert_eq!(&buf, b"deadbeef");
    }

    #[test]
    fn decodes_either_case() {
        assert_eq!(decode_hex::<4>("deadbeef").unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(decode_hex::<4>("DEADbeef").unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            decode_hex::<4>("deadbee"),
            Err(Error::InvalidHexLen { len: 7 })
        );
        assert_eq!(decode_hex::<4>(""), Err(Error::InvalidHexLen { len: 0 }));
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert_eq!(
            decode_hex::<4>("deadbeeg"),
            Err(Error::InvalidHexDigit {
                byte: b'g',
                index: 7
            })
        );
        assert_eq!(
            decode_hex::<2>("x0ff"),
            Err(Error::InvalidHexDigit {
                byte: b'x',
                index: 0
            })
        );
    }

    #[test]
    fn multibyte_utf8_is_rejected_not_split() {
        // 'é' is two bytes, so the length matches but the digits do not.
        assert!(matches!(
            decode_hex::<2>("é00"),
            Err(Error::InvalidHexDigit { index: 0, .. })
        ));
    }
}
