//! CSC (Compressed Sparse Column) matrix and its borrowed column views
//!
//! The matrix here is the minimal collaborator sparse vectors need: validated
//! column-pointer storage that hands out read-only column views and accepts
//! single-column reinterpretation of a sparse vector.

use crate::dtype::Element;
use crate::error::{Error, Result};

use super::format::{SparseKind, SparseRead};
use super::locate;

/// CSC (Compressed Sparse Column) sparse matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix<T: Element> {
    pub(crate) col_ptrs: Vec<usize>,
    pub(crate) row_indices: Vec<usize>,
    pub(crate) values: Vec<T>,
    pub(crate) shape: [usize; 2],
}

impl<T: Element> CscMatrix<T> {
    /// Create CSC matrix from host slices
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `col_ptrs` does not have `ncols + 1` entries
    ///   or the row index and value counts differ
    /// - `InvalidArgument` if the column pointers are not a non-decreasing
    ///   sequence from 0 to nnz, or rows within a column are not strictly
    ///   increasing
    /// - `IndexOutOfBounds` if a row index is `>= nrows`
    pub fn from_slices(
        col_ptrs: &[i64],
        row_indices: &[i64],
        values: &[T],
        shape: [usize; 2],
    ) -> Result<Self> {
        let [nrows, ncols] = shape;

        if col_ptrs.len() != ncols + 1 {
            return Err(Error::dimension_mismatch(&[ncols + 1], &[col_ptrs.len()]));
        }

        if row_indices.len() != values.len() {
            return Err(Error::dimension_mismatch(&[values.len()], &[row_indices.len()]));
        }

        let nnz = values.len();
        if col_ptrs[0] != 0 || col_ptrs[ncols] != nnz as i64 {
            return Err(Error::invalid_argument(
                "col_ptrs",
                format!(
                    "expected [0]=0 and [{}]={}, got [0]={} and [{}]={}",
                    ncols, nnz, col_ptrs[0], ncols, col_ptrs[ncols]
                ),
            ));
        }
        if col_ptrs.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid_argument(
                "col_ptrs",
                "column pointers must be non-decreasing",
            ));
        }

        let mut rows: Vec<usize> = Vec::with_capacity(nnz);
        for &r in row_indices {
            if r < 0 {
                return Err(Error::invalid_argument(
                    "row_indices",
                    format!("negative row index {}", r),
                ));
            }
            if r as usize >= nrows {
                return Err(Error::IndexOutOfBounds {
                    index: r as usize,
                    size: nrows,
                });
            }
            rows.push(r as usize);
        }

        let ptrs: Vec<usize> = col_ptrs.iter().map(|&p| p as usize).collect();
        for col in 0..ncols {
            locate::validate_strictly_increasing(&rows[ptrs[col]..ptrs[col + 1]], nrows)
                .map_err(|_| {
                    Error::invalid_argument(
                        "row_indices",
                        format!("rows of column {} are not strictly increasing", col),
                    )
                })?;
        }

        Ok(Self {
            col_ptrs: ptrs,
            row_indices: rows,
            values: values.to_vec(),
            shape,
        })
    }

    /// Internal constructor for storage that is valid by construction
    pub(crate) fn from_parts_unchecked(
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<T>,
        shape: [usize; 2],
    ) -> Self {
        debug_assert_eq!(col_ptrs.len(), shape[1] + 1);
        debug_assert_eq!(row_indices.len(), values.len());
        Self {
            col_ptrs,
            row_indices,
            values,
            shape,
        }
    }

    /// Create an empty CSC matrix
    pub fn empty(shape: [usize; 2]) -> Self {
        Self {
            col_ptrs: vec![0; shape[1] + 1],
            row_indices: Vec::new(),
            values: Vec::new(),
            shape,
        }
    }

    /// Returns the shape as [nrows, ncols]
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Returns the number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.shape[0]
    }

    /// Returns the number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.shape[1]
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the column pointers
    pub fn col_ptrs(&self) -> &[usize] {
        &self.col_ptrs
    }

    /// Returns the row indices
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Returns the values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Read-only view of column `col`
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `col >= ncols`.
    pub fn column(&self, col: usize) -> Result<SparseColumnView<'_, T>> {
        if col >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols(),
            });
        }
        let (start, end) = (self.col_ptrs[col], self.col_ptrs[col + 1]);
        Ok(SparseColumnView {
            len: self.nrows(),
            indices: &self.row_indices[start..end],
            values: &self.values[start..end],
        })
    }

    /// Iterate over all columns as views
    pub fn columns(&self) -> impl Iterator<Item = SparseColumnView<'_, T>> + '_ {
        self.col_ptrs.windows(2).map(move |w| SparseColumnView {
            len: self.nrows(),
            indices: &self.row_indices[w[0]..w[1]],
            values: &self.values[w[0]..w[1]],
        })
    }
}

/// Borrowed column of a [`CscMatrix`]
///
/// A contiguous slice of the parent's row indices and values. Satisfies the
/// same read interface as an owned sparse vector without owning storage.
#[derive(Debug, Clone, Copy)]
pub struct SparseColumnView<'a, T: Element> {
    len: usize,
    indices: &'a [usize],
    values: &'a [T],
}

impl<T: Element> SparseRead<T> for SparseColumnView<'_, T> {
    #[inline]
    fn kind(&self) -> SparseKind {
        SparseKind::ColumnView
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn indices(&self) -> &[usize] {
        self.indices
    }

    #[inline]
    fn values(&self) -> &[T] {
        self.values
    }
}
