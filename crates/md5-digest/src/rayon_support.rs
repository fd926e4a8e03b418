//! Rayon integration for parallel MD5 hashing.

use rayon::prelude::*;

use crate::{Digest, digest};

/// Inputs shorter than this are hashed on the calling thread.
const PARALLEL_THRESHOLD: usize = 16;

/// Extension trait for parallel MD5 hashing.
///
/// # Example
///
/// ```
/// use rayon::prelude::*;
/// use md5_digest::ParallelMd5;
///
/// let data: Vec<Vec<u8>> = vec![
///     b"hello".to_vec(),
///     b"world".to_vec(),
///     b"test".to_vec(),
/// ];
///
/// let digests = data.par_iter().md5_digest();
/// assert_eq!(digests.len(), 3);
/// assert_eq!(digests[0], md5_digest::digest(b"hello"));
/// ```
pub trait ParallelMd5 {
    /// Compute MD5 digests in parallel, preserving iterator order.
    fn md5_digest(self) -> Vec<Digest>;
}

impl<I, T> ParallelMd5 for I
where
    I: IndexedParallelIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    fn md5_digest(self) -> Vec<Digest> {
        self.map(|item| digest(item.as_ref())).collect()
    }
}

pub(crate) fn digest_batch<T: AsRef<[u8]> + Sync>(inputs: &[T]) -> Vec<Digest> {
    if inputs.len() < PARALLEL_THRESHOLD {
        return inputs.iter().map(|input| digest(input.as_ref())).collect();
    }
    inputs.par_iter().md5_digest()
}
