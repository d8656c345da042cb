//! SparseVector element access: assignment, deletion, slicing, in-place copy

use std::ops::Range;

use super::SparseVector;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::sparse::format::{SparseRead, SparseWrite, check_bounds};
use crate::sparse::locate;

impl<T: Element> SparseVector<T> {
    /// Remove the stored entry at `index`
    ///
    /// Unlike writing zero, this deletes the entry from the sparsity
    /// pattern. Returns the removed value, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<Option<T>> {
        check_bounds(index, self.n)?;
        Ok(match locate::find(&self.nzind, index) {
            Ok(k) => Some(locate::remove_at(&mut self.nzind, &mut self.nzval, k)),
            Err(_) => None,
        })
    }

    /// Copy of the entries in `range`, re-based to start at zero
    ///
    /// Both range ends are located by binary search, so the cost is
    /// O(log nnz) plus the number of entries copied.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `range.start > range.end`, `IndexOutOfBounds`
    /// if the range extends past `len()`.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end {
            return Err(Error::invalid_argument(
                "range",
                format!("start {} is past end {}", range.start, range.end),
            ));
        }
        if range.end > self.n {
            return Err(Error::IndexOutOfBounds {
                index: range.end,
                size: self.n,
            });
        }
        if range.is_empty() {
            return Ok(Self::zeros(0));
        }

        let lo = locate::lower_bound(&self.nzind, range.start);
        let hi = locate::lower_bound(&self.nzind, range.end);
        let nzind = self.nzind[lo..hi]
            .iter()
            .map(|&i| i - range.start)
            .collect();
        let nzval = self.nzval[lo..hi].to_vec();

        Ok(Self::from_parts_unchecked(range.end - range.start, nzind, nzval))
    }

    /// Overwrite this vector with the contents of `src`, reusing allocations
    ///
    /// `src` may be any read-only kind, including a column view. The
    /// receiver is borrowed mutably, so the two can never share storage.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn copy_from<S: SparseRead<T> + ?Sized>(&mut self, src: &S) -> Result<()> {
        if src.len() != self.n {
            return Err(Error::length_mismatch(self.n, src.len()));
        }
        self.nzind.clear();
        self.nzind.extend_from_slice(src.indices());
        self.nzval.clear();
        self.nzval.extend_from_slice(src.values());
        Ok(())
    }
}

impl<T: Element> SparseWrite<T> for SparseVector<T> {
    /// Write `value` at `index`
    ///
    /// An existing entry is overwritten, even with zero. A nonzero value at
    /// an unstored position is inserted in order (an O(nnz) shift); a zero
    /// at an unstored position leaves the vector untouched.
    fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_bounds(index, self.n)?;
        match locate::find(&self.nzind, index) {
            Ok(k) => self.nzval[k] = value,
            Err(k) => {
                if !value.is_zero() {
                    locate::insert_at(&mut self.nzind, &mut self.nzval, k, index, value);
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn values_mut(&mut self) -> &mut [T] {
        &mut self.nzval
    }

    fn fkeep<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(usize, T) -> bool,
    {
        self.compact_where(pred)
    }
}
