//! Sparse vector kinds and the shared read/write interfaces

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

use super::locate;

/// Sparse vector storage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparseKind {
    /// Owned storage whose stored positions may change
    ///
    /// Best for: assembly, arithmetic results, structural compaction
    Mutable,

    /// Owned values over a frozen set of stored positions
    ///
    /// Best for: iterative updates on a stable sparsity pattern
    Fixed,

    /// Borrowed column of a compressed sparse column matrix
    ///
    /// Read-only; lifetime tied to the parent matrix
    ColumnView,
}

impl SparseKind {
    /// Returns true if stored positions can be inserted or removed
    #[inline]
    pub fn is_pattern_mutable(&self) -> bool {
        matches!(self, SparseKind::Mutable)
    }

    /// Returns true if values can be written
    #[inline]
    pub fn is_writable(&self) -> bool {
        !matches!(self, SparseKind::ColumnView)
    }

    /// Returns the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            SparseKind::Mutable => "mutable",
            SparseKind::Fixed => "fixed",
            SparseKind::ColumnView => "column-view",
        }
    }
}

impl std::fmt::Display for SparseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read interface shared by every sparse vector kind
///
/// Implementors guarantee that `indices()` is strictly increasing, every
/// index lies in `[0, len())`, and `values()` has the same length as
/// `indices()`, paired positionally.
pub trait SparseRead<T: Element> {
    /// Returns the storage kind
    fn kind(&self) -> SparseKind;

    /// Returns the declared length of the vector
    fn len(&self) -> usize;

    /// Stored positions, strictly increasing
    fn indices(&self) -> &[usize];

    /// Stored values, paired with `indices()`
    fn values(&self) -> &[T];

    /// Returns the number of stored entries (explicit zeros included)
    #[inline]
    fn nnz(&self) -> usize {
        self.indices().len()
    }

    /// Returns true if nothing is stored
    #[inline]
    fn is_empty(&self) -> bool {
        self.nnz() == 0
    }

    /// Returns the data type of values
    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Fraction of positions that are stored
    #[inline]
    fn density(&self) -> f64 {
        let n = self.len();
        if n == 0 {
            0.0
        } else {
            self.nnz() as f64 / n as f64
        }
    }

    /// Read the element at `index`
    ///
    /// Binary search over the stored positions: O(log nnz). Unstored
    /// positions read as the additive identity.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`.
    fn get(&self, index: usize) -> Result<T> {
        check_bounds(index, self.len())?;
        Ok(match locate::find(self.indices(), index) {
            Ok(k) => self.values()[k],
            Err(_) => T::zero(),
        })
    }

    /// Iterate stored `(index, value)` pairs in ascending index order
    fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices()
            .iter()
            .copied()
            .zip(self.values().iter().copied())
    }

    /// Returns the memory usage of the stored entries in bytes (approximate)
    fn memory_usage(&self) -> usize {
        self.nnz() * (std::mem::size_of::<usize>() + std::mem::size_of::<T>())
    }
}

/// Mutation capability of the owning sparse vector kinds
///
/// What a write to an unstored position does depends on the kind: the
/// mutable kind inserts, the fixed kind leaves the structure untouched.
pub trait SparseWrite<T: Element>: SparseRead<T> {
    /// Write `value` at `index`
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`.
    fn set(&mut self, index: usize, value: T) -> Result<()>;

    /// Stored values, mutable in place
    fn values_mut(&mut self) -> &mut [T];

    /// Keep stored entries for which `pred(index, value)` holds
    ///
    /// Returns the number of rejected entries.
    fn fkeep<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(usize, T) -> bool;

    /// Overwrite every stored value with `value`
    fn fill_stored(&mut self, value: T) {
        self.values_mut().fill(value);
    }
}

#[inline]
pub(crate) fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        return Err(Error::IndexOutOfBounds { index, size });
    }
    Ok(())
}
