//! Integer codec for the backend's signal layout.
//!
//! A signal of `w` bits occupies `ceil(w / 8)` bytes, least significant byte first.
//! Only the low `w % 8` bits of the last byte are defined (all eight when `w` is a
//! multiple of eight); `tail_mask` selects them. Values are exchanged as `i128`,
//! which holds every signed and unsigned value of up to 64 bits.

use crate::common::constants::BITS_PER_BYTE;

/// Number of bytes occupied by a signal of `bit_width` bits.
#[inline]
pub const fn byte_width(bit_width: u32) -> usize {
    bit_width.div_ceil(BITS_PER_BYTE) as usize
}

/// Mask of the defined bits in the most significant occupied byte.
#[inline]
pub const fn tail_mask(bit_width: u32) -> u8 {
    match bit_width % BITS_PER_BYTE {
        0 => 0xFF,
        rem => (1u8 << rem) - 1,
    }
}

/// Inclusive `(min, max)` of values representable in `bit_width` bits.
pub const fn value_range(bit_width: u32, signed: bool) -> (i128, i128) {
    if signed {
        let half = 1i128 << (bit_width - 1);
        (-half, half - 1)
    } else {
        (0, (1i128 << bit_width) - 1)
    }
}

/// Returns `true` if `value` fits a `bit_width`-bit signal.
pub const fn fits(value: i128, bit_width: u32, signed: bool) -> bool {
    let (min, max) = value_range(bit_width, signed);
    value >= min && value <= max
}

/// Decodes little-endian signal bytes.
///
/// Undefined bits of the tail byte are ignored. Signed values are sign-extended
/// from bit `bit_width - 1`, not from the byte boundary.
pub fn decode(bytes: &[u8], bit_width: u32, signed: bool) -> i128 {
    let mask = tail_mask(bit_width);
    let last = bytes.len().saturating_sub(1);
    let raw = bytes
        .iter()
        .enumerate()
        .rev()
        .fold(0u64, |acc, (i, &b)| {
            let b = if i == last { b & mask } else { b };
            (acc << BITS_PER_BYTE) | u64::from(b)
        });

    let raw = i128::from(raw);
    if signed && (raw >> (bit_width - 1)) & 1 == 1 {
        raw - (1i128 << bit_width)
    } else {
        raw
    }
}

/// Encodes `value` into `out`, which must be `byte_width(bit_width)` long.
///
/// The caller checks the range first; bits beyond `bit_width` are never set.
pub fn encode(value: i128, bit_width: u32, out: &mut [u8]) {
    let bits = (value as u128) & ((1u128 << bit_width) - 1);
    let le = (bits as u64).to_le_bytes();
    out.copy_from_slice(&le[..out.len()]);
    if let Some(tail) = out.last_mut() {
        *tail &= tail_mask(bit_width);
    }
}
