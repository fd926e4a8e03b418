//! Incremental MD5 hasher.

use std::fmt;
use std::io;

use crate::scalar::{self, INIT_STATE};
use crate::{BLOCK_LEN, Digest};

/// Streaming MD5 hasher.
///
/// Bytes may be fed in any number of [`update`](Self::update) calls; the
/// digest produced by [`finalize`](Self::finalize) only depends on the
/// concatenation of everything fed, never on how it was split.
///
/// ```
/// use md5_digest::{Md5, digest};
///
/// let mut hasher = Md5::new();
/// hasher.update(b"The quick brown fox ");
/// hasher.update(b"jumps over the lazy dog");
/// assert_eq!(hasher.finalize(), digest(b"The quick brown fox jumps over the lazy dog"));
/// ```
#[derive(Clone)]
pub struct Md5 {
    state: [u32; 4],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    /// Total bytes fed so far, wrapping like the MD5 length field.
    total_len: u64,
}

impl Md5 {
    /// Creates a hasher with the initial MD5 state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: INIT_STATE,
            buffer: [0; BLOCK_LEN],
            buffered: 0,
            total_len: 0,
        }
    }

    /// Feeds additional bytes into the digest state.
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }
            scalar::compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            scalar::compress(&mut self.state, block);
        }

        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffered = tail.len();
    }

    /// Number of bytes fed so far (modulo 2^64).
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.total_len
    }

    /// Reports whether no bytes have been fed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Finalises the digest and returns the 128-bit MD5 output.
    #[must_use]
    pub fn finalize(mut self) -> Digest {
        scalar::finish(&mut self.state, &self.buffer[..self.buffered], self.total_len);
        scalar::state_to_digest(&self.state)
    }

    /// Convenience helper that computes the MD5 digest for `data` in one shot.
    #[must_use]
    pub fn digest(data: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5")
            .field("len", &self.total_len)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
