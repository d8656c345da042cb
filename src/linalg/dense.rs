//! Row-major dense matrix used as the dense operand of linear-algebra adapters

use crate::dtype::Element;
use crate::error::{Error, Result};

/// Dense matrix stored row-major
///
/// Element `(i, j)` lives at `data[i * ncols + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: Element> {
    data: Vec<T>,
    shape: [usize; 2],
}

impl<T: Element> DenseMatrix<T> {
    /// Create a matrix from row-major data
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `data.len() != nrows * ncols`.
    pub fn from_vec(data: Vec<T>, shape: [usize; 2]) -> Result<Self> {
        let expected = shape[0] * shape[1];
        if data.len() != expected {
            return Err(Error::dimension_mismatch(&[expected], &[data.len()]));
        }
        Ok(Self { data, shape })
    }

    /// Create a matrix from a list of rows
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the rows differ in length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::dimension_mismatch(&[i, ncols], &[i, row.len()]));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            shape: [rows.len(), ncols],
        })
    }

    /// Matrix of zeros
    pub fn zeros(shape: [usize; 2]) -> Self {
        Self {
            data: vec![T::zero(); shape[0] * shape[1]],
            shape,
        }
    }

    /// Returns the shape as [nrows, ncols]
    #[inline]
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

    /// Element at `(row, col)`
    ///
    /// # Panics
    ///
    /// If `row` or `col` is out of range.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.shape[0] && col < self.shape[1]);
        self.data[row * self.shape[1] + col]
    }

    /// Row `row` as a slice
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let ncols = self.shape[1];
        &self.data[row * ncols..(row + 1) * ncols]
    }

    /// Row-major element storage
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Validate that the matrix is square, returning its order
    pub(crate) fn square_order(&self) -> Result<usize> {
        let [m, n] = self.shape;
        if m != n {
            return Err(Error::dimension_mismatch(&[m, m], &[m, n]));
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let a = DenseMatrix::from_vec(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
        assert_eq!(a.shape(), [2, 3]);
        assert_eq!(a.at(1, 2), 6.0);
        assert_eq!(a.row(0), &[1.0, 2.0, 3.0]);
        assert!(DenseMatrix::from_vec(vec![1.0f64; 5], [2, 3]).is_err());
    }

    #[test]
    fn test_from_rows() {
        let a = DenseMatrix::from_rows(&[vec![1i32, 2], vec![3, 4]]).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        assert!(DenseMatrix::from_rows(&[vec![1i32, 2], vec![3]]).is_err());
        assert_eq!(DenseMatrix::<f32>::from_rows(&[]).unwrap().shape(), [0, 0]);
    }

    #[test]
    fn test_square_order() {
        assert_eq!(DenseMatrix::<f64>::zeros([3, 3]).square_order().unwrap(), 3);
        assert!(matches!(
            DenseMatrix::<f64>::zeros([2, 3]).square_order(),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
