//! Sorted-index primitives shared by every mutation path
//!
//! Stored positions are kept strictly increasing, so single-element access
//! is a binary search and insertion or deletion is an O(nnz) shift of the
//! paired index and value buffers.

use crate::error::{Error, Result};

/// Binary search for `index` in a strictly increasing slice
///
/// Returns `Ok(k)` if `indices[k] == index`, otherwise `Err(k)` where `k`
/// is the position at which `index` would be inserted to keep the order.
#[inline]
pub(crate) fn find(indices: &[usize], index: usize) -> std::result::Result<usize, usize> {
    indices.binary_search(&index)
}

/// First stored position `>= index`
#[inline]
pub(crate) fn lower_bound(indices: &[usize], index: usize) -> usize {
    indices.partition_point(|&i| i < index)
}

/// Insert `(index, value)` at slot `k`, shifting the tail of both buffers
#[inline]
pub(crate) fn insert_at<T>(
    indices: &mut Vec<usize>,
    values: &mut Vec<T>,
    k: usize,
    index: usize,
    value: T,
) {
    debug_assert!(k == 0 || indices[k - 1] < index);
    debug_assert!(k == indices.len() || indices[k] > index);
    indices.insert(k, index);
    values.insert(k, value);
}

/// Remove slot `k` from both buffers, returning the stored value
#[inline]
pub(crate) fn remove_at<T>(indices: &mut Vec<usize>, values: &mut Vec<T>, k: usize) -> T {
    indices.remove(k);
    values.remove(k)
}

/// Validate caller-supplied storage against the stored-entry invariants
///
/// Checks that `indices` is strictly increasing and every entry lies in
/// `[0, len)`. Used by constructors that accept raw buffers from outside
/// the crate's own algorithms.
pub(crate) fn validate_strictly_increasing(indices: &[usize], len: usize) -> Result<()> {
    if let Some(&last) = indices.last() {
        if last >= len {
            return Err(Error::invalid_argument(
                "nzind",
                format!("stored index {} out of range for length {}", last, len),
            ));
        }
    }
    if let Some(w) = indices.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::invalid_argument(
            "nzind",
            format!(
                "stored indices must be strictly increasing, found {} followed by {}",
                w[0], w[1]
            ),
        ));
    }
    Ok(())
}
