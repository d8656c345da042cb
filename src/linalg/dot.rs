//! Dot products and scaled accumulation (axpy) over sparse vectors

use crate::dtype::{AccumulationPrecision, NumericElement};
use crate::error::{Error, Result};
use crate::sparse::{BinaryOp, SparseRead};

/// `acc + a * b`, checked for integer overflow
#[inline]
pub(crate) fn mul_add<T: NumericElement>(acc: T, a: T, b: T) -> Result<T> {
    BinaryOp::Add.apply(acc, BinaryOp::Mul.apply(a, b)?)
}

/// Dot product of two sparse vectors
///
/// # Algorithm
///
/// A merge-walk over both index sequences that accumulates products at
/// matching positions only and allocates no output. When `x` and `y` are
/// the same object the walk degenerates to a sum of squares over the
/// stored values.
///
/// # Performance
///
/// O(nnz(x) + nnz(y)).
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`, `Overflow` if native
/// integer accumulation leaves the range of `T`.
pub fn dot<T, X, Y>(x: &X, y: &Y) -> Result<T>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
    Y: SparseRead<T> + ?Sized,
{
    dot_with_precision(x, y, AccumulationPrecision::Native)
}

/// Dot product of two sparse vectors with an explicit accumulator precision
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`, `Overflow` if native
/// integer accumulation leaves the range of `T`.
pub fn dot_with_precision<T, X, Y>(x: &X, y: &Y, precision: AccumulationPrecision) -> Result<T>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
    Y: SparseRead<T> + ?Sized,
{
    if x.len() != y.len() {
        return Err(Error::length_mismatch(x.len(), y.len()));
    }

    if std::ptr::addr_eq(x as *const X, y as *const Y) {
        let vals = x.values();
        return Ok(match precision {
            AccumulationPrecision::F64 => {
                T::from_f64(vals.iter().map(|v| v.to_f64() * v.to_f64()).sum())
            }
            _ => vals.iter().try_fold(T::zero(), |acc, &v| mul_add(acc, v, v))?,
        });
    }

    let (xi, xv) = (x.indices(), x.values());
    let (yi, yv) = (y.indices(), y.values());

    match precision {
        AccumulationPrecision::F64 => {
            let mut acc = 0.0f64;
            walk_matches(xi, yi, |i, j| {
                acc += xv[i].to_f64() * yv[j].to_f64();
                Ok(())
            })?;
            Ok(T::from_f64(acc))
        }
        _ => {
            let mut acc = T::zero();
            walk_matches(xi, yi, |i, j| {
                acc = mul_add(acc, xv[i], yv[j])?;
                Ok(())
            })?;
            Ok(acc)
        }
    }
}

/// Call `f(i, j)` for every pair of positions with `xi[i] == yi[j]`, stopping at the first error
#[inline]
fn walk_matches<F>(xi: &[usize], yi: &[usize], mut f: F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<()>,
{
    let (mut i, mut j) = (0, 0);
    while i < xi.len() && j < yi.len() {
        let (ix, iy) = (xi[i], yi[j]);
        if ix < iy {
            i += 1;
        } else if iy < ix {
            j += 1;
        } else {
            f(i, j)?;
            i += 1;
            j += 1;
        }
    }
    Ok(())
}

/// Dot product of a sparse vector with a dense slice
///
/// Scans the stored entries of `x` only: O(nnz(x)).
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`.
pub fn dot_dense<T, X>(x: &X, y: &[T]) -> Result<T>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    if x.len() != y.len() {
        return Err(Error::length_mismatch(x.len(), y.len()));
    }
    x.iter().try_fold(T::zero(), |acc, (i, v)| mul_add(acc, v, y[i]))
}

/// Scaled accumulation `y += a * x` into a dense target
///
/// A zero `a` leaves `y` untouched. `a == 1` and `a == -1` add or subtract
/// without multiplying.
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`, `Overflow` if integer
/// arithmetic leaves the range of `T`. On overflow, entries of `y` before
/// the failing position have already been updated.
pub fn axpy<T, X>(a: T, x: &X, y: &mut [T]) -> Result<()>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
{
    if x.len() != y.len() {
        return Err(Error::length_mismatch(y.len(), x.len()));
    }

    if a.is_zero() {
        return Ok(());
    }

    if a == T::one() {
        for (i, v) in x.iter() {
            y[i] = BinaryOp::Add.apply(y[i], v)?;
        }
    } else if a == T::one().neg() {
        for (i, v) in x.iter() {
            y[i] = BinaryOp::Sub.apply(y[i], v)?;
        }
    } else {
        for (i, v) in x.iter() {
            y[i] = mul_add(y[i], a, v)?;
        }
    }
    Ok(())
}
