use crate::base32::Base32Error;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Number of base32 characters needed for `bytes` bytes.
pub const fn base32_size(bytes: usize) -> usize {
    (bytes * 8).div_ceil(BITS_PER_CHAR)
}

/// Encodes `input` into Crockford base32, writing to `buf`.
///
/// The output is left-padded with zero bits so that `buf.len() * 5` bits are
/// produced; callers size `buf` with [`base32_size`].
#[inline]
pub fn encode_base32(input: &[u8], buf: &mut [u8]) {
    debug_assert_eq!(buf.len(), base32_size(input.len()));
    let input_bits = input.len() * 8;
    let total_bits = buf.len() * BITS_PER_CHAR;
    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mask = 0x1F;

    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[usize::from((acc >> bits) & mask)];
            out += 1;
        }
    }
}

/// Decodes a Crockford base32 string into a `u128`.
///
/// Length and overflow checks belong to the caller, which knows the target
/// width; at most 25 characters fit without losing bits.
#[inline]
pub fn decode_base32(encoded: &str) -> Result<u128, Base32Error> {
    debug_assert!(encoded.len() * BITS_PER_CHAR <= 128);
    let mut acc = 0_u128;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(Base32Error::DecodeInvalidAscii { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }
    Ok(acc)
}
