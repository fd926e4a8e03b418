//! Lowercase hexadecimal rendering of digests.

use crate::{DIGEST_LEN, Digest, HEX_LEN};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Render `digest` as 32 lowercase hex characters, byte 0 first.
pub fn to_hex(digest: &Digest) -> String {
    let mut out = [0u8; HEX_LEN];
    encode_hex_into(digest, &mut out);
    out.iter().map(|&b| char::from(b)).collect()
}

/// Write the hex rendering of `digest` into `out` without allocating.
pub fn encode_hex_into(digest: &Digest, out: &mut [u8; HEX_LEN]) {
    for (pair, byte) in out.chunks_exact_mut(2).zip(digest) {
        pair[0] = HEX_DIGITS[usize::from(byte >> 4)];
        pair[1] = HEX_DIGITS[usize::from(byte & 0x0f)];
    }
}

/// Value of the hex character at `position` in the rendering of `digest`.
///
/// Even positions are high nibbles, odd positions low nibbles.
///
/// # Panics
///
/// Panics if `position >= 32`.
#[inline]
pub fn nibble(digest: &Digest, position: usize) -> u8 {
    assert!(
        position < HEX_LEN,
        "nibble position {position} out of range for a {DIGEST_LEN}-byte digest"
    );
    let byte = digest[position / 2];
    if position % 2 == 0 { byte >> 4 } else { byte & 0x0f }
}

/// Length of the run of `'0'` characters at the start of the hex rendering.
pub fn leading_zero_nibbles(digest: &Digest) -> usize {
    (0..HEX_LEN)
        .find(|&position| nibble(digest, position) != 0)
        .unwrap_or(HEX_LEN)
}

/// Hex character for a nibble value in `0..16`.
#[inline]
pub fn hex_char(value: u8) -> char {
    char::from(HEX_DIGITS[usize::from(value & 0x0f)])
}
