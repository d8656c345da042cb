//! Core SparseVector implementation: struct, creation, getters

use crate::dtype::Element;
use crate::error::{Error, Result};

use super::super::format::{SparseKind, SparseRead};
use super::super::locate;

/// Compressed sparse vector with a mutable sparsity pattern
///
/// Stores the declared length `n` together with the strictly increasing
/// stored positions `nzind` and their paired values `nzval`. A stored value
/// may be zero: an explicit stored zero is distinct from a structural zero
/// (a position with no stored entry).
///
/// # Example
///
/// ```
/// use spvec::sparse::{SparseRead, SparseVector};
///
/// let x = SparseVector::new(4, vec![0, 1, 3], vec![5.0f64, 6.0, 7.0])?;
/// assert_eq!(x.nnz(), 3);
/// assert_eq!(x.to_dense(), vec![5.0, 6.0, 0.0, 7.0]);
/// # Ok::<(), spvec::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T: Element> {
    pub(crate) n: usize,
    pub(crate) nzind: Vec<usize>,
    pub(crate) nzval: Vec<T>,
}

impl<T: Element> SparseVector<T> {
    /// Create a sparse vector from its components
    ///
    /// The stored indices are taken as given: they must already be strictly
    /// increasing and below `n`. Callers holding unsorted or duplicated
    /// coordinates go through [`from_coo`](Self::from_coo) instead, and callers
    /// that want the ordering verified use [`new_checked`](Self::new_checked).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `nzind` and `nzval` differ in length.
    pub fn new(n: usize, nzind: Vec<usize>, nzval: Vec<T>) -> Result<Self> {
        if nzind.len() != nzval.len() {
            return Err(Error::invalid_argument(
                "nzind",
                format!(
                    "index count {} does not match value count {}",
                    nzind.len(),
                    nzval.len()
                ),
            ));
        }

        Ok(Self { n, nzind, nzval })
    }

    /// Create a sparse vector from its components, verifying index order
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the counts differ, the indices are not strictly
    /// increasing, or any index is `>= n`.
    pub fn new_checked(n: usize, nzind: Vec<usize>, nzval: Vec<T>) -> Result<Self> {
        locate::validate_strictly_increasing(&nzind, n)?;
        Self::new(n, nzind, nzval)
    }

    /// Internal constructor for algorithms whose output is sorted by construction
    #[inline]
    pub(crate) fn from_parts_unchecked(n: usize, nzind: Vec<usize>, nzval: Vec<T>) -> Self {
        debug_assert_eq!(nzind.len(), nzval.len());
        debug_assert!(locate::validate_strictly_increasing(&nzind, n).is_ok());
        Self { n, nzind, nzval }
    }

    /// Create a sparse vector of length `n` with nothing stored
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            nzind: Vec::new(),
            nzval: Vec::new(),
        }
    }

    /// Create an empty vector with room for `capacity` stored entries
    pub fn with_capacity(n: usize, capacity: usize) -> Self {
        Self {
            n,
            nzind: Vec::with_capacity(capacity),
            nzval: Vec::with_capacity(capacity),
        }
    }

    /// Returns the stored indices
    pub fn nonzero_indices(&self) -> &[usize] {
        &self.nzind
    }

    /// Returns the stored values
    pub fn nonzeros(&self) -> &[T] {
        &self.nzval
    }

    /// Decompose into `(n, nzind, nzval)`
    pub fn into_parts(self) -> (usize, Vec<usize>, Vec<T>) {
        (self.n, self.nzind, self.nzval)
    }

    /// Indices and values of stored entries whose value is nonzero
    pub fn find_nonzeros(&self) -> (Vec<usize>, Vec<T>) {
        self.iter().filter(|&(_, v)| !v.is_zero()).unzip()
    }

    /// Number of stored entries whose value is nonzero
    pub fn count_nonzeros(&self) -> usize {
        self.nzval.iter().filter(|v| !v.is_zero()).count()
    }

    /// Trim spare capacity of both buffers
    pub fn shrink_to_fit(&mut self) {
        self.nzind.shrink_to_fit();
        self.nzval.shrink_to_fit();
    }
}

impl<T: Element> SparseRead<T> for SparseVector<T> {
    #[inline]
    fn kind(&self) -> SparseKind {
        SparseKind::Mutable
    }

    #[inline]
    fn len(&self) -> usize {
        self.n
    }

    #[inline]
    fn indices(&self) -> &[usize] {
        &self.nzind
    }

    #[inline]
    fn values(&self) -> &[T] {
        &self.nzval
    }
}
