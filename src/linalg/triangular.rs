//! Triangular products and solves against a sparse right-hand side
//!
//! A lower-triangular solve cannot produce nonzeros above the first stored
//! index of the right-hand side, and an upper-triangular solve cannot
//! produce nonzeros below the last one. Solves therefore densify only that
//! band and run dense substitution on it.

use std::ops::Range;

use super::dense::DenseMatrix;
use super::dot::mul_add;
use crate::dtype::{Element, NumericElement};
use crate::error::{Error, Result};
use crate::sparse::{BinaryOp, SparseRead, SparseVector};

/// Which triangle of a square matrix is referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    /// Entries on and below the diagonal
    Lower,
    /// Entries on and above the diagonal
    Upper,
}

impl Triangle {
    /// Range of positions a solve can fill, given the stored indices of the
    /// right-hand side
    ///
    /// Returns `None` when nothing is stored.
    pub fn band(&self, n: usize, indices: &[usize]) -> Option<Range<usize>> {
        match self {
            Triangle::Lower => indices.first().map(|&lo| lo..n),
            Triangle::Upper => indices.last().map(|&hi| 0..hi + 1),
        }
    }

    /// Returns true if `(row, col)` lies in this triangle
    #[inline]
    fn contains(&self, row: usize, col: usize) -> bool {
        match self {
            Triangle::Lower => row >= col,
            Triangle::Upper => row <= col,
        }
    }
}

impl<T: Element> SparseVector<T> {
    /// Store every position of `range`, keeping entries outside it sparse
    ///
    /// Phase one sizes fresh index and value buffers for the entries before
    /// the range, the full range, and the entries after it; phase two fills
    /// them, writing zero at range positions that had nothing stored.
    pub(crate) fn densify_range(&mut self, range: Range<usize>) {
        debug_assert!(range.end <= self.n);
        let lo = self.nzind.partition_point(|&i| i < range.start);
        let hi = self.nzind.partition_point(|&i| i < range.end);
        let cap = lo + range.len() + (self.nzind.len() - hi);

        let mut nzind = Vec::with_capacity(cap);
        let mut nzval = Vec::with_capacity(cap);
        nzind.extend_from_slice(&self.nzind[..lo]);
        nzval.extend_from_slice(&self.nzval[..lo]);

        let mut k = lo;
        for i in range.clone() {
            nzind.push(i);
            if k < hi && self.nzind[k] == i {
                nzval.push(self.nzval[k]);
                k += 1;
            } else {
                nzval.push(T::zero());
            }
        }

        nzind.extend_from_slice(&self.nzind[hi..]);
        nzval.extend_from_slice(&self.nzval[hi..]);

        self.nzind = nzind;
        self.nzval = nzval;
    }
}

/// Solve `A * x = b` in place for triangular `A` and sparse `b`
///
/// # Arguments
///
/// * `a` - Square matrix; only the referenced triangle is read
/// * `triangle` - Which triangle of `a` is referenced
/// * `unit_diagonal` - Treat the diagonal as ones without reading it
/// * `b` - Right-hand side, overwritten with the solution
///
/// # Algorithm
///
/// 1. Compute the band from the extreme stored index of `b`
/// 2. Densify `b` over the band
/// 3. Forward (lower) or backward (upper) substitution over the band
///
/// # Errors
///
/// - `DimensionMismatch` if `a` is not square or its order differs from
///   `b.len()`
/// - `Singular` if a diagonal entry inside the band is zero and
///   `unit_diagonal` is false
/// - `Overflow` if integer arithmetic leaves the range of `T`; `b` then
///   holds a partially substituted band
pub fn solve_triangular_in_place<T: NumericElement>(
    a: &DenseMatrix<T>,
    triangle: Triangle,
    unit_diagonal: bool,
    b: &mut SparseVector<T>,
) -> Result<()> {
    let n = a.square_order()?;
    if n != b.len() {
        return Err(Error::dimension_mismatch(&[n], &[b.len()]));
    }

    let Some(band) = triangle.band(n, b.indices()) else {
        return Ok(());
    };

    if !unit_diagonal {
        if let Some(index) = band.clone().find(|&i| a.at(i, i).is_zero()) {
            return Err(Error::Singular { index });
        }
    }

    tracing::debug!(
        n,
        band_start = band.start,
        band_end = band.end,
        rhs_nnz = b.nnz(),
        "triangular solve"
    );

    b.densify_range(band.clone());
    let start = band.start;
    let x = &mut b.nzval[..];

    match triangle {
        Triangle::Lower => {
            // band entries sit at positions 0..len of the value buffer
            for i in band.clone() {
                let mut sum = T::zero();
                for j in start..i {
                    sum = mul_add(sum, a.at(i, j), x[j - start])?;
                }
                let r = BinaryOp::Sub.apply(x[i - start], sum)?;
                x[i - start] = if unit_diagonal { r } else { r / a.at(i, i) };
            }
        }
        Triangle::Upper => {
            let end = band.end;
            for i in band.rev() {
                let mut sum = T::zero();
                for j in (i + 1)..end {
                    sum = mul_add(sum, a.at(i, j), x[j])?;
                }
                let r = BinaryOp::Sub.apply(x[i], sum)?;
                x[i] = if unit_diagonal { r } else { r / a.at(i, i) };
            }
        }
    }
    Ok(())
}

/// Solve `A * x = b` for triangular `A` and sparse `b`, returning `x`
///
/// See [`solve_triangular_in_place`].
///
/// # Errors
///
/// Same as [`solve_triangular_in_place`].
pub fn solve_triangular<T: NumericElement>(
    a: &DenseMatrix<T>,
    triangle: Triangle,
    unit_diagonal: bool,
    b: &SparseVector<T>,
) -> Result<SparseVector<T>> {
    let mut x = b.clone();
    solve_triangular_in_place(a, triangle, unit_diagonal, &mut x)?;
    Ok(x)
}

/// Triangular matrix times sparse vector: `y = tri(A) * x`
///
/// Only the referenced triangle of `a` is read; with `unit_diagonal` the
/// diagonal is taken as ones. Structural zeros of `x` skip their column.
///
/// # Errors
///
/// `DimensionMismatch` if `a` is not square or its order differs from
/// `x.len()`, `Overflow` if integer arithmetic leaves the range of `T`.
pub fn triangular_matvec<T, X>(
    a: &DenseMatrix<T>,
    triangle: Triangle,
    unit_diagonal: bool,
    x: &X,
) -> Result<Vec<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    let n = a.square_order()?;
    if n != x.len() {
        return Err(Error::dimension_mismatch(&[n], &[x.len()]));
    }

    let mut y = vec![T::zero(); n];
    for (j, v) in x.iter() {
        let rows = match triangle {
            Triangle::Lower => j..n,
            Triangle::Upper => 0..j + 1,
        };
        for i in rows {
            debug_assert!(triangle.contains(i, j));
            let aij = if unit_diagonal && i == j { T::one() } else { a.at(i, j) };
            y[i] = mul_add(y[i], aij, v)?;
        }
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lower triangle used by the tests:
    // [2, 0, 0, 0]
    // [1, 1, 0, 0]
    // [0, 3, 4, 0]
    // [1, 0, 2, 1]
    // The upper triangle of the same storage holds its transpose.
    fn matrix() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 3.0, 0.0],
            vec![0.0, 3.0, 4.0, 2.0],
            vec![1.0, 0.0, 2.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_band() {
        assert_eq!(Triangle::Lower.band(6, &[2, 4]), Some(2..6));
        assert_eq!(Triangle::Upper.band(6, &[2, 4]), Some(0..5));
        assert_eq!(Triangle::Lower.band(6, &[]), None);
    }

    #[test]
    fn test_densify_range_keeps_outside_entries() {
        let mut x = SparseVector::new(8, vec![0, 3, 7], vec![1.0f64, 3.0, 7.0]).unwrap();
        x.densify_range(2..5);
        assert_eq!(x.nonzero_indices(), &[0, 2, 3, 4, 7]);
        assert_eq!(x.nonzeros(), &[1.0, 0.0, 3.0, 0.0, 7.0]);
    }

    #[test]
    fn test_lower_solve_densifies_from_first_stored() {
        let b = SparseVector::new(4, vec![1], vec![2.0]).unwrap();
        let x = solve_triangular(&matrix(), Triangle::Lower, false, &b).unwrap();
        assert_eq!(x.nonzero_indices(), &[1, 2, 3]);
        // x1 = 2, x2 = (0 - 3*2)/4 = -1.5, x3 = (0 - 0*2 - 2*-1.5)/1 = 3
        assert_eq!(x.nonzeros(), &[2.0, -1.5, 3.0]);

        let back = triangular_matvec(&matrix(), Triangle::Lower, false, &x).unwrap();
        assert_eq!(back, b.to_dense());
    }

    #[test]
    fn test_upper_solve_densifies_to_last_stored() {
        let b = SparseVector::new(4, vec![2], vec![4.0]).unwrap();
        let x = solve_triangular(&matrix(), Triangle::Upper, false, &b).unwrap();
        assert_eq!(x.nonzero_indices(), &[0, 1, 2]);

        let back = triangular_matvec(&matrix(), Triangle::Upper, false, &x).unwrap();
        for (got, want) in back.iter().zip(b.to_dense()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unit_diagonal() {
        let b = SparseVector::new(4, vec![0], vec![1.0]).unwrap();
        let x = solve_triangular(&matrix(), Triangle::Lower, true, &b).unwrap();
        // x0 = 1, x1 = -1, x2 = 3, x3 = -1 - 6 = -7
        assert_eq!(x.to_dense(), vec![1.0, -1.0, 3.0, -7.0]);
        let back = triangular_matvec(&matrix(), Triangle::Lower, true, &x).unwrap();
        assert_eq!(back, b.to_dense());
    }

    #[test]
    fn test_empty_rhs_is_untouched() {
        let b = SparseVector::<f64>::zeros(4);
        let x = solve_triangular(&matrix(), Triangle::Upper, false, &b).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn test_singular_inside_band_only() {
        let a = DenseMatrix::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![1.0, 2.0, 0.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        // zero pivot at 0 lies outside the band 1..3
        let b = SparseVector::new(3, vec![1], vec![2.0]).unwrap();
        assert!(solve_triangular(&a, Triangle::Lower, false, &b).is_ok());

        let b0 = SparseVector::new(3, vec![0], vec![2.0]).unwrap();
        assert!(matches!(
            solve_triangular(&a, Triangle::Lower, false, &b0),
            Err(Error::Singular { index: 0 })
        ));
    }

    #[test]
    fn test_triangular_matvec_stored_zero_meets_nan() {
        let a = DenseMatrix::from_rows(&[vec![1.0, 0.0], vec![f64::NAN, 1.0]]).unwrap();
        let stored_zero = SparseVector::new(2, vec![0], vec![0.0]).unwrap();
        let y = triangular_matvec(&a, Triangle::Lower, false, &stored_zero).unwrap();
        assert_eq!(y[0], 0.0);
        assert!(y[1].is_nan());

        let nothing = SparseVector::<f64>::zeros(2);
        let y = triangular_matvec(&a, Triangle::Lower, false, &nothing).unwrap();
        assert_eq!(y, vec![0.0, 0.0]);
    }

    #[test]
    fn test_solve_dimension_checks() {
        let b = SparseVector::new(3, vec![0], vec![1.0]).unwrap();
        assert!(matches!(
            solve_triangular(&matrix(), Triangle::Lower, false, &b),
            Err(Error::DimensionMismatch { .. })
        ));
        let rect = DenseMatrix::<f64>::zeros([3, 4]);
        assert!(solve_triangular(&rect, Triangle::Lower, false, &b).is_err());
    }
}
