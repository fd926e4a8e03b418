#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Scalar MD5 message digest (RFC 1321).
//!
//! The crate computes the 128-bit MD5 digest of arbitrary byte sequences and
//! renders it as lowercase hex. Every function is pure: no global state, no
//! I/O, and all arithmetic wraps at 32 bits.
//!
//! # Example
//!
//! ```
//! use md5_digest::{digest, digest_batch, hex_digest};
//!
//! // Single hash
//! let hash = digest(b"abc");
//! assert_eq!(hash[0], 0x90);
//! assert_eq!(hex_digest(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
//!
//! // Batch hash, order preserved
//! let inputs = [b"input1".as_slice(), b"input2", b"input3"];
//! let hashes = digest_batch(&inputs);
//! assert_eq!(hashes[1], digest(b"input2"));
//! ```
//!
//! MD5 is broken as a cryptographic hash. Use it for interoperability and
//! puzzles, not for security.

mod hex;
#[cfg(feature = "rayon")]
mod rayon_support;
mod scalar;
mod streaming;

pub use hex::{encode_hex_into, hex_char, leading_zero_nibbles, nibble, to_hex};
#[cfg(feature = "rayon")]
pub use rayon_support::ParallelMd5;
pub use streaming::Md5;

/// MD5 digest type (16 bytes / 128 bits).
pub type Digest = [u8; DIGEST_LEN];

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Length of the hex rendering of a digest.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// Size of one compression block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Compute the MD5 digest for a single input.
pub fn digest(input: &[u8]) -> Digest {
    scalar::digest(input)
}

/// Compute the MD5 digest of `input` rendered as 32 lowercase hex characters.
pub fn hex_digest(input: &[u8]) -> String {
    to_hex(&digest(input))
}

/// Compute MD5 digests for multiple inputs.
///
/// With the `rayon` feature the inputs are hashed on the rayon thread pool.
/// Returns digests in the same order as inputs.
pub fn digest_batch<T: AsRef<[u8]> + Sync>(inputs: &[T]) -> Vec<Digest> {
    #[cfg(feature = "rayon")]
    {
        rayon_support::digest_batch(inputs)
    }

    #[cfg(not(feature = "rayon"))]
    {
        inputs.iter().map(|input| digest(input.as_ref())).collect()
    }
}
