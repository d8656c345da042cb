//! Matrix-vector products with a sparse vector operand
//!
//! Forward products walk the stored entries of the vector and accumulate
//! `v * column(j)` into the output. Transposed products reduce to one dot
//! product per output entry. Element types carry no conjugation, so the
//! adjoint product is the transposed one.

use super::dense::DenseMatrix;
use super::dot::{dot, mul_add};
use crate::dtype::NumericElement;
use crate::error::{Error, Result};
use crate::sparse::merge::{self, BinaryOp, MergeMode};
use crate::sparse::{CscMatrix, SparseRead, SparseVector};

/// Dense matrix times sparse vector: `y = A * x`
///
/// Only structural zeros of `x` skip their column; a stored zero still
/// multiplies it, so non-finite entries of `A` reach the result.
///
/// # Performance
///
/// O(nnz(x) * nrows).
///
/// # Errors
///
/// `DimensionMismatch` if `A.ncols() != x.len()`, `Overflow` if integer
/// arithmetic leaves the range of `T`.
pub fn matvec<T, X>(a: &DenseMatrix<T>, x: &X) -> Result<Vec<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    let [nrows, ncols] = a.shape();
    if ncols != x.len() {
        return Err(Error::dimension_mismatch(&[ncols], &[x.len()]));
    }

    let mut y = vec![T::zero(); nrows];
    for (j, v) in x.iter() {
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = mul_add(*yi, a.at(i, j), v)?;
        }
    }
    Ok(y)
}

/// Transposed dense matrix times sparse vector: `y = Aᵀ * x`
///
/// Each output entry is the dot product of `x` with one column of `A`,
/// scanning only the stored entries of `x`.
///
/// # Errors
///
/// `DimensionMismatch` if `A.nrows() != x.len()`, `Overflow` if integer
/// arithmetic leaves the range of `T`.
pub fn matvec_transpose<T, X>(a: &DenseMatrix<T>, x: &X) -> Result<Vec<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    let [nrows, ncols] = a.shape();
    if nrows != x.len() {
        return Err(Error::dimension_mismatch(&[nrows], &[x.len()]));
    }

    let mut y = vec![T::zero(); ncols];
    for (i, v) in x.iter() {
        for (yj, &aij) in y.iter_mut().zip(a.row(i)) {
            *yj = mul_add(*yj, aij, v)?;
        }
    }
    Ok(y)
}

/// Sparse matrix times sparse vector: `y = A * x`
///
/// # Algorithm
///
/// For each stored `(j, v)` of `x`, column `j` of `A` is scaled by `v` and
/// merged into the running result with a union merge-walk, so the output
/// stays sparse throughout and no dense intermediate is built. Zero
/// products are dropped before the merge.
///
/// # Errors
///
/// `DimensionMismatch` if `A.ncols() != x.len()`, `Overflow` if integer
/// arithmetic leaves the range of `T`.
pub fn matvec_csc<T, X>(a: &CscMatrix<T>, x: &X) -> Result<SparseVector<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    let [nrows, ncols] = a.shape();
    if ncols != x.len() {
        return Err(Error::dimension_mismatch(&[ncols], &[x.len()]));
    }

    let mut acc = SparseVector::zeros(nrows);
    for (j, v) in x.iter() {
        let col = a.column(j)?;
        let mut rows = Vec::with_capacity(col.nnz());
        let mut vals = Vec::with_capacity(col.nnz());
        for (i, c) in col.iter() {
            let p = BinaryOp::Mul.apply(c, v)?;
            if !p.is_zero() {
                rows.push(i);
                vals.push(p);
            }
        }
        let scaled = SparseVector::from_parts_unchecked(nrows, rows, vals);
        acc = merge::try_merge(&acc, &scaled, MergeMode::Union, |p: T, q: T| {
            BinaryOp::Add.apply(p, q)
        })?;
    }

    tracing::debug!(
        nrows,
        ncols,
        x_nnz = x.nnz(),
        out_nnz = acc.nnz(),
        "sparse matrix-vector product"
    );
    Ok(acc)
}

/// Transposed sparse matrix times sparse vector: `y = Aᵀ * x`
///
/// Entry `j` of the result is `dot(column(j), x)`; zero dot products are not
/// stored.
///
/// # Errors
///
/// `DimensionMismatch` if `A.nrows() != x.len()`, `Overflow` if integer
/// arithmetic leaves the range of `T`.
pub fn matvec_transpose_csc<T, X>(a: &CscMatrix<T>, x: &X) -> Result<SparseVector<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    let [nrows, ncols] = a.shape();
    if nrows != x.len() {
        return Err(Error::dimension_mismatch(&[nrows], &[x.len()]));
    }

    let mut nzind = Vec::new();
    let mut nzval = Vec::new();
    for (j, col) in a.columns().enumerate() {
        let d = dot(&col, x)?;
        if !d.is_zero() {
            nzind.push(j);
            nzval.push(d);
        }
    }
    SparseVector::new(ncols, nzind, nzval)
}
