//! Structural maintenance: predicate-driven compaction and zero pruning

use std::cmp::Ordering;

use super::SparseVector;
use crate::dtype::Element;

/// True unless the magnitude of `v` is at or below `tol`
///
/// Unordered magnitudes (NaN, missing values) are never below a tolerance.
#[inline]
pub(crate) fn above_tolerance<T: Element>(v: T, tol: f64) -> bool {
    matches!(
        v.magnitude().partial_cmp(&tol),
        Some(Ordering::Greater) | None
    )
}

impl<T: Element> SparseVector<T> {
    /// Keep entries for which `pred(index, value)` holds, compacting left
    ///
    /// A single pass with a read cursor and a write cursor: survivors are
    /// moved down over rejected slots so relative order is preserved, then
    /// both buffers are truncated and trimmed to the surviving count.
    ///
    /// Returns the number of rejected entries.
    pub(crate) fn compact_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(usize, T) -> bool,
    {
        let before = self.nzind.len();
        let mut write = 0;
        for read in 0..before {
            let (i, v) = (self.nzind[read], self.nzval[read]);
            if pred(i, v) {
                if write != read {
                    self.nzind[write] = i;
                    self.nzval[write] = v;
                }
                write += 1;
            }
        }

        let dropped = before - write;
        if dropped > 0 {
            self.nzind.truncate(write);
            self.nzval.truncate(write);
            self.shrink_to_fit();
            tracing::debug!(len = self.n, kept = write, dropped, "compacted sparse vector");
        }
        dropped
    }

    /// Remove stored entries whose magnitude is at or below `tol`
    ///
    /// Returns the number of removed entries. With `tol == 0.0` this is
    /// equivalent to [`dropzeros`](Self::dropzeros) for numeric types.
    /// Missing and NaN values have no magnitude to compare and are kept.
    pub fn droptol(&mut self, tol: f64) -> usize {
        self.compact_where(|_, v| above_tolerance(v, tol))
    }

    /// Remove stored entries whose value is exactly zero
    ///
    /// Returns the number of removed entries.
    pub fn dropzeros(&mut self) -> usize {
        self.compact_where(|_, v| !v.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Nullable;
    use crate::sparse::format::{SparseRead, SparseWrite};

    #[test]
    fn test_droptol_zero_removes_stored_zero() {
        let mut x = SparseVector::new(3, vec![0, 1, 2], vec![1.0f64, 0.0, 1.0]).unwrap();
        assert_eq!(x.droptol(0.0), 1);
        assert_eq!(x.nonzero_indices(), &[0, 2]);
        assert_eq!(x.nonzeros(), &[1.0, 1.0]);
        assert_eq!(x.len(), 3);
    }

    #[test]
    fn test_droptol_threshold_is_inclusive() {
        let mut x =
            SparseVector::new(6, vec![0, 1, 3, 5], vec![0.5f64, -0.1, 0.1, -2.0]).unwrap();
        assert_eq!(x.droptol(0.1), 2);
        assert_eq!(x.nonzero_indices(), &[0, 5]);
        assert_eq!(x.nonzeros(), &[0.5, -2.0]);
    }

    #[test]
    fn test_dropzeros() {
        let mut x = SparseVector::new(5, vec![0, 2, 4], vec![0i32, 3, 0]).unwrap();
        assert_eq!(x.dropzeros(), 2);
        assert_eq!(x.nonzero_indices(), &[2]);
        assert_eq!(x.dropzeros(), 0);
    }

    #[test]
    fn test_dropzeros_keeps_missing() {
        let mut x = SparseVector::new(
            3,
            vec![0, 1],
            vec![Nullable::<f64>::missing(), Nullable::new(0.0)],
        )
        .unwrap();
        assert_eq!(x.dropzeros(), 1);
        assert_eq!(x.nonzero_indices(), &[0]);
    }

    #[test]
    fn test_droptol_keeps_missing_and_nan() {
        let mut x = SparseVector::new(
            4,
            vec![0, 1, 3],
            vec![Nullable::<f64>::missing(), Nullable::new(5.0), Nullable::new(0.5)],
        )
        .unwrap();
        assert_eq!(x.droptol(1.0), 1);
        assert_eq!(x.nonzero_indices(), &[0, 1]);
        assert!(x.nonzeros()[0].is_missing());

        let mut y = SparseVector::new(3, vec![0, 2], vec![f64::NAN, 0.0]).unwrap();
        assert_eq!(y.droptol(0.0), 1);
        assert_eq!(y.nonzero_indices(), &[0]);
    }

    #[test]
    fn test_fkeep_is_stable() {
        let mut x = SparseVector::new(10, vec![1, 2, 4, 7, 9], vec![1.0f64, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        let rejected = x.fkeep(|i, _| i % 2 == 1);
        assert_eq!(rejected, 2);
        assert_eq!(x.nonzero_indices(), &[1, 7, 9]);
        assert_eq!(x.nonzeros(), &[1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_fkeep_reject_all_and_none() {
        let mut x = SparseVector::new(4, vec![0, 3], vec![1u8, 2]).unwrap();
        assert_eq!(x.fkeep(|_, _| true), 0);
        assert_eq!(x.nnz(), 2);
        assert_eq!(x.fkeep(|_, _| false), 2);
        assert!(x.is_empty());
        assert_eq!(x.len(), 4);
    }
}
