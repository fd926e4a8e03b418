//! Chunked, parallel scan for indices whose digest starts with zero nibbles.

use std::collections::VecDeque;

use md5_digest::{Digest, Md5, leading_zero_nibbles, nibble, to_hex};
use rayon::prelude::*;
use tracing::trace;

use crate::{SearchConfig, SearchError};

/// Longest decimal rendering of a `u64`.
const MAX_DECIMAL_LEN: usize = 20;

/// An index whose candidate digest starts with the configured zero run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hit {
    /// Counter appended to the door ID.
    pub index: u64,
    /// Digest of the door ID followed by the decimal index.
    pub digest: Digest,
    leading_zeros: usize,
}

impl Hit {
    /// Nibble `offset` positions past the zero run.
    ///
    /// Offset 0 is the first payload character, offset 1 the second.
    ///
    /// # Panics
    ///
    /// Panics if the zero run plus `offset` reaches past the last nibble,
    /// that is when `leading_zeros + offset >= 32`.
    pub fn payload(&self, offset: usize) -> u8 {
        nibble(&self.digest, self.leading_zeros + offset)
    }

    /// Hex rendering of the digest.
    pub fn hex(&self) -> String {
        to_hex(&self.digest)
    }

    #[cfg(test)]
    pub(crate) const fn for_test(index: u64, digest: Digest, leading_zeros: usize) -> Self {
        Self {
            index,
            digest,
            leading_zeros,
        }
    }
}

/// Iterator over hits in increasing index order.
///
/// Indices are hashed `chunk_size` at a time on the rayon pool. The iterator
/// ends when the index space is exhausted; it never wraps past `u64::MAX`.
#[derive(Debug)]
pub struct HitScanner {
    prefix: Md5,
    leading_zeros: usize,
    chunk_size: u64,
    next_index: Option<u64>,
    pending: VecDeque<Hit>,
    scanned: u64,
}

impl HitScanner {
    /// Validates `config` and positions the scanner at its start index.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let mut prefix = Md5::new();
        prefix.update(config.door_id.as_bytes());

        Ok(Self {
            prefix,
            leading_zeros: config.leading_zeros,
            chunk_size: config.chunk_size,
            next_index: Some(config.start_index),
            pending: VecDeque::new(),
            scanned: 0,
        })
    }

    /// Number of indices hashed so far.
    pub const fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Hashes the next chunk; returns `false` once no indices remain.
    fn scan_chunk(&mut self) -> bool {
        let Some(first) = self.next_index else {
            return false;
        };
        let last = first.saturating_add(self.chunk_size - 1);
        self.next_index = last.checked_add(1);

        let prefix = &self.prefix;
        let leading_zeros = self.leading_zeros;
        let mut hits: Vec<Hit> = (first..=last)
            .into_par_iter()
            .filter_map(|index| {
                let digest = candidate_digest(prefix, index);
                (leading_zero_nibbles(&digest) >= leading_zeros).then_some(Hit {
                    index,
                    digest,
                    leading_zeros,
                })
            })
            .collect();
        hits.sort_unstable_by_key(|hit| hit.index);

        self.scanned += last - first + 1;
        trace!(first, last, hits = hits.len(), "scanned chunk");
        self.pending.extend(hits);
        true
    }
}

impl Iterator for HitScanner {
    type Item = Hit;

    fn next(&mut self) -> Option<Hit> {
        loop {
            if let Some(hit) = self.pending.pop_front() {
                return Some(hit);
            }
            if !self.scan_chunk() {
                return None;
            }
        }
    }
}

/// Digest of the door ID (already fed to `prefix`) followed by `index` in decimal.
pub(crate) fn candidate_digest(prefix: &Md5, index: u64) -> Digest {
    let mut digits = [0u8; MAX_DECIMAL_LEN];
    let mut hasher = prefix.clone();
    hasher.update(decimal(index, &mut digits));
    hasher.finalize()
}

/// Render `value` in decimal into the tail of `buf`.
fn decimal(mut value: u64, buf: &mut [u8; MAX_DECIMAL_LEN]) -> &[u8] {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5_digest::digest;

    fn prefix(door_id: &str) -> Md5 {
        let mut hasher = Md5::new();
        hasher.update(door_id.as_bytes());
        hasher
    }

    #[test]
    fn decimal_renders_like_display() {
        let mut buf = [0u8; MAX_DECIMAL_LEN];
        for value in [0, 7, 10, 3231929, u64::MAX] {
            assert_eq!(decimal(value, &mut buf), value.to_string().as_bytes());
        }
    }

    #[test]
    fn candidate_digest_hashes_concatenation() {
        let prefix = prefix("abc");
        assert_eq!(candidate_digest(&prefix, 3231929), digest(b"abc3231929"));
        assert_eq!(candidate_digest(&prefix, 0), digest(b"abc0"));
    }

    #[test]
    fn known_hit_has_five_zero_nibbles() {
        let hit_digest = candidate_digest(&prefix("abc"), 3231929);
        assert_eq!(to_hex(&hit_digest), "00000155f8105dff7f56ee10fa9b9abd");
    }

    #[test]
    fn scanner_matches_brute_force() {
        let config = SearchConfig::new("abc")
            .with_leading_zeros(2)
            .with_chunk_size(97);

        let scanned: Vec<u64> = HitScanner::new(&config)
            .unwrap()
            .take(10)
            .map(|hit| hit.index)
            .collect();

        let expected: Vec<u64> = (0u64..)
            .filter(|i| leading_zero_nibbles(&digest(format!("abc{i}").as_bytes())) >= 2)
            .take(10)
            .collect();

        assert_eq!(scanned, expected);
    }

    #[test]
    fn hits_expose_payload_after_zero_run() {
        let config = SearchConfig::new("abc").with_leading_zeros(2);
        let hit = HitScanner::new(&config).unwrap().next().unwrap();
        let hex = hit.hex();

        assert!(hex.starts_with("00"));
        assert_eq!(
            md5_digest::hex_char(hit.payload(0)),
            hex.chars().nth(2).unwrap()
        );
        assert_eq!(
            md5_digest::hex_char(hit.payload(1)),
            hex.chars().nth(3).unwrap()
        );
    }

    #[test]
    fn payload_reads_last_nibble() {
        let mut digest = [0u8; 16];
        digest[15] = 0x0c;
        let hit = Hit::for_test(0, digest, 30);
        assert_eq!(hit.payload(0), 0);
        assert_eq!(hit.payload(1), 0xc);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn payload_past_last_nibble_panics() {
        let hit = Hit::for_test(0, [0; 16], 30);
        let _ = hit.payload(2);
    }

    #[test]
    fn scanner_respects_start_index() {
        let config = SearchConfig::new("abc")
            .with_leading_zeros(1)
            .with_start_index(1000);
        let hit = HitScanner::new(&config).unwrap().next().unwrap();
        assert!(hit.index >= 1000);
    }

    #[test]
    fn scanner_stops_at_end_of_index_space() {
        let config = SearchConfig::new("abc")
            .with_leading_zeros(30)
            .with_start_index(u64::MAX - 9)
            .with_chunk_size(4);
        let mut scanner = HitScanner::new(&config).unwrap();

        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.scanned(), 10);
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.scanned(), 10);
    }

    #[test]
    fn scanner_rejects_invalid_config() {
        let config = SearchConfig::new("abc").with_chunk_size(0);
        assert_eq!(HitScanner::new(&config).unwrap_err(), SearchError::ChunkSize);
    }
}
