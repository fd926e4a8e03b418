//! Portable MD5 compression function (RFC 1321).
//!
//! One lane, one block at a time. Everything here operates on plain arrays:
//! the state is `[u32; 4]`, a block is `[u8; 64]`, and every addition wraps
//! at 32 bits.

use crate::{BLOCK_LEN, Digest};

/// Initial accumulator values A, B, C, D.
pub(crate) const INIT_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Per-round left-rotation amounts.
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Per-round additive constants, `floor(2^32 * |sin(i + 1)|)`.
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Offset of the 64-bit length field inside the final block.
const LENGTH_OFFSET: usize = 56;

/// Compute the MD5 digest of `input` in one shot.
pub fn digest(input: &[u8]) -> Digest {
    let mut state = INIT_STATE;
    for block in pad(input).chunks_exact(BLOCK_LEN) {
        compress(&mut state, block);
    }
    state_to_digest(&state)
}

/// Build the padded block stream for `input`.
///
/// The result is `input`, a single `0x80`, zeros up to 56 mod 64, then the
/// message length in bits as a little-endian `u64`. Lengths beyond 2^61 bytes
/// wrap, matching the reference algorithm.
pub(crate) fn pad(input: &[u8]) -> Vec<u8> {
    let padded_len = padded_len(input.len());
    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(input);
    padded.push(0x80);
    padded.resize(padded_len - 8, 0);
    padded.extend_from_slice(&bit_length(input.len() as u64).to_le_bytes());
    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    padded
}

/// Total length of the padded stream for a message of `len` bytes.
pub(crate) const fn padded_len(len: usize) -> usize {
    // One marker byte plus eight length bytes always follow the message.
    (len + 1 + 8).div_ceil(BLOCK_LEN) * BLOCK_LEN
}

/// Message length in bits, wrapping at 64 bits.
pub(crate) const fn bit_length(byte_len: u64) -> u64 {
    byte_len.wrapping_mul(8)
}

/// Finish a message whose last partial block is `tail` (fewer than 64 bytes)
/// and whose total length is `total_len` bytes.
pub(crate) fn finish(state: &mut [u32; 4], tail: &[u8], total_len: u64) {
    debug_assert!(tail.len() < BLOCK_LEN);

    let mut block = [0u8; BLOCK_LEN];
    block[..tail.len()].copy_from_slice(tail);
    block[tail.len()] = 0x80;

    if tail.len() >= LENGTH_OFFSET {
        compress(state, &block);
        block = [0u8; BLOCK_LEN];
    }

    block[LENGTH_OFFSET..].copy_from_slice(&bit_length(total_len).to_le_bytes());
    compress(state, &block);
}

/// Serialise the accumulators little-endian in A, B, C, D order.
pub(crate) fn state_to_digest(state: &[u32; 4]) -> Digest {
    let mut out = [0u8; 16];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Run the 64-round compression function over one 64-byte block.
#[inline]
pub(crate) fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);

    let mut m = [0u32; 16];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i {
            0..=15 => ((b & c) | (!b & d), i),
            16..=31 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let f = f
            .wrapping_add(a)
            .wrapping_add(K[i])
            .wrapping_add(m[g]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(f.rotate_left(S[i]));
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}
