//! Sparse vector merge algorithms
//!
//! This module implements the parameterized merge-walk behind every
//! elementwise binary operation between two sparse vectors, plus the unary
//! map with an explicit zero-preservation flag.

use crate::dtype::{Element, NumericElement};
use crate::error::{Error, Result};

use super::format::SparseRead;
use super::vector::SparseVector;

// =============================================================================
// Merge Mode and Operation Selection
// =============================================================================
//
// Instead of one kernel per operator, a single merge-walk is parameterized by:
// - MergeMode: which positions to visit and which results to zero-test
// - an operation closure f(x, y) defining the elementwise computation
//
// ```text
// User-facing method (add, sub, mul, min, max)
//       │
//       ├─> select_mode(op, x may be missing, y may be missing)   once per call
//       │
//       └─> merge(x, y, mode, f):
//           Intersection: visit matched positions only
//           Union:        visit every stored position, zero-test matches only
//           General:      visit every stored position, zero-test everything
// ```
//
// | Operation | Plain elements | Either side may be missing |
// |-----------|----------------|----------------------------|
// | Add, Sub  | Union          | Union                      |
// | Mul       | Intersection   | General                    |
// | Min, Max  | General        | General                    |

/// Merge mode of a binary elementwise operation
///
/// Classifies `f` by how it treats zero operands, which decides the
/// positions the merge-walk must visit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Mode 0: `f(nz, 0) = f(0, nz) = 0`
    ///
    /// Only positions stored in BOTH operands are visited.
    /// Output holds at most `min(nnz(x), nnz(y))` entries.
    /// Example: multiplication of plain numbers.
    Intersection,

    /// Mode 1: `f(nz, 0)` and `f(0, nz)` are nonzero whenever their operand is
    ///
    /// Every position stored in EITHER operand is visited. Matched results
    /// are kept only if nonzero; unmatched results are emitted directly.
    /// Output holds at most `nnz(x) + nnz(y)` entries.
    /// Example: addition, subtraction.
    Union,

    /// Mode 2: no assumption about `f` on zero operands
    ///
    /// Same traversal as `Union`, but every result is zero-tested before
    /// it is kept.
    /// Example: min, max, or any operation on elements that may be missing.
    General,
}

impl MergeMode {
    /// Numeric mode code (0, 1 or 2)
    #[inline]
    pub fn code(&self) -> u8 {
        match self {
            MergeMode::Intersection => 0,
            MergeMode::Union => 1,
            MergeMode::General => 2,
        }
    }

    /// Upper bound on the number of entries the merge can emit
    #[inline]
    pub fn capacity_bound(&self, x_nnz: usize, y_nnz: usize) -> usize {
        match self {
            MergeMode::Intersection => x_nnz.min(y_nnz),
            MergeMode::Union | MergeMode::General => x_nnz + y_nnz,
        }
    }
}

/// Built-in binary elementwise operators
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `x + y`
    Add,
    /// `x - y`
    Sub,
    /// `x * y`
    Mul,
    /// `min(x, y)`
    Min,
    /// `max(x, y)`
    Max,
}

impl BinaryOp {
    /// Returns the operator name as a string
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }

    /// Apply the operator to two values
    ///
    /// # Errors
    ///
    /// `Overflow` if integer arithmetic leaves the range of `T`.
    #[inline]
    pub fn apply<T: NumericElement>(&self, a: T, b: T) -> Result<T> {
        let v = match self {
            BinaryOp::Add => a.checked_add_elem(b),
            BinaryOp::Sub => a.checked_sub_elem(b),
            BinaryOp::Mul => a.checked_mul_elem(b),
            BinaryOp::Min => Some(a.min_elem(b)),
            BinaryOp::Max => Some(a.max_elem(b)),
        };
        v.ok_or(Error::Overflow { op: self.name() })
    }
}

/// Select the merge mode for an operator and the missing-state of both operand types
///
/// Resolved once per call, never per element.
pub fn select_mode(op: BinaryOp, lhs_may_be_missing: bool, rhs_may_be_missing: bool) -> MergeMode {
    let may_be_missing = lhs_may_be_missing || rhs_may_be_missing;
    match op {
        BinaryOp::Add | BinaryOp::Sub => MergeMode::Union,
        BinaryOp::Mul if may_be_missing => MergeMode::General,
        BinaryOp::Mul => MergeMode::Intersection,
        BinaryOp::Min | BinaryOp::Max => MergeMode::General,
    }
}

/// [`select_mode`] keyed by the element types of both operands
#[inline]
pub fn mode_for<T: Element, U: Element>(op: BinaryOp) -> MergeMode {
    select_mode(op, T::MAY_BE_MISSING, U::MAY_BE_MISSING)
}

// =============================================================================
// Merge-walk
// =============================================================================

/// Generic merge-walk computing `z[i] = f(x[i], y[i])`
///
/// # Arguments
///
/// * `mode` - Which positions to visit and which results to zero-test
/// * `f` - Elementwise operation; unmatched positions receive the zero of
///   the missing side
///
/// # Algorithm
///
/// Two pointers advance over the ascending index sequences, always moving
/// whichever has the smaller current index. Equal indices produce exactly
/// one output entry with `f` applied once. In the union modes the tail of
/// the longer operand is drained once the other is exhausted. Output
/// indices are strictly increasing because they are emitted in ascending
/// order; both output buffers are trimmed to the emitted count.
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`.
pub fn merge<T, U, R, X, Y, F>(x: &X, y: &Y, mode: MergeMode, f: F) -> Result<SparseVector<R>>
where
    T: Element,
    U: Element,
    R: Element,
    X: SparseRead<T> + ?Sized,
    Y: SparseRead<U> + ?Sized,
    F: Fn(T, U) -> R,
{
    try_merge(x, y, mode, |a: T, b: U| Ok(f(a, b)))
}

/// [`merge`] with a fallible `f`
///
/// The walk stops at the first error `f` returns.
///
/// # Errors
///
/// `DimensionMismatch` if `x.len() != y.len()`, otherwise the first error of `f`.
pub fn try_merge<T, U, R, X, Y, F>(x: &X, y: &Y, mode: MergeMode, f: F) -> Result<SparseVector<R>>
where
    T: Element,
    U: Element,
    R: Element,
    X: SparseRead<T> + ?Sized,
    Y: SparseRead<U> + ?Sized,
    F: Fn(T, U) -> Result<R>,
{
    if x.len() != y.len() {
        return Err(Error::length_mismatch(x.len(), y.len()));
    }

    let (xi, xv) = (x.indices(), x.values());
    let (yi, yv) = (y.indices(), y.values());
    let (mx, my) = (xi.len(), yi.len());

    let capacity = mode.capacity_bound(mx, my);
    let mut out_ind: Vec<usize> = Vec::with_capacity(capacity);
    let mut out_val: Vec<R> = Vec::with_capacity(capacity);

    let mut i = 0;
    let mut j = 0;

    match mode {
        MergeMode::Intersection => {
            while i < mx && j < my {
                let (ix, iy) = (xi[i], yi[j]);
                if ix < iy {
                    i += 1;
                } else if iy < ix {
                    j += 1;
                } else {
                    let v = f(xv[i], yv[j])?;
                    if !v.is_zero() {
                        out_ind.push(ix);
                        out_val.push(v);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        MergeMode::Union | MergeMode::General => {
            // Mode 1 trusts unmatched results to be nonzero
            let test_unmatched = mode == MergeMode::General;
            let mut emit = |index: usize, v: R, test: bool| {
                if !test || !v.is_zero() {
                    out_ind.push(index);
                    out_val.push(v);
                }
            };

            while i < mx && j < my {
                let (ix, iy) = (xi[i], yi[j]);
                if ix < iy {
                    emit(ix, f(xv[i], U::zero())?, test_unmatched);
                    i += 1;
                } else if iy < ix {
                    emit(iy, f(T::zero(), yv[j])?, test_unmatched);
                    j += 1;
                } else {
                    emit(ix, f(xv[i], yv[j])?, true);
                    i += 1;
                    j += 1;
                }
            }
            while i < mx {
                emit(xi[i], f(xv[i], U::zero())?, test_unmatched);
                i += 1;
            }
            while j < my {
                emit(yi[j], f(T::zero(), yv[j])?, test_unmatched);
                j += 1;
            }
        }
    }

    tracing::debug!(
        mode = mode.code(),
        dtype = %R::DTYPE,
        len = x.len(),
        x_nnz = mx,
        y_nnz = my,
        out_nnz = out_ind.len(),
        "sparse merge"
    );

    out_ind.shrink_to_fit();
    out_val.shrink_to_fit();
    Ok(SparseVector::from_parts_unchecked(x.len(), out_ind, out_val))
}

/// Apply a built-in operator between two sparse operands of the same element type
///
/// # Errors
///
/// `DimensionMismatch` if the lengths differ, `Overflow` if integer
/// arithmetic leaves the range of `T`.
pub fn merge_op<T, X, Y>(x: &X, y: &Y, op: BinaryOp) -> Result<SparseVector<T>>
where
    T: NumericElement,
    X: SparseRead<T> + ?Sized,
    Y: SparseRead<T> + ?Sized,
{
    let mode = mode_for::<T, T>(op);
    tracing::trace!(op = op.name(), mode = mode.code(), "select merge mode");
    try_merge(x, y, mode, |a: T, b: T| op.apply(a, b))
}

// =============================================================================
// Unary map
// =============================================================================

/// Result of a unary map: sparse when zero is preserved, dense otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutput<T: Element> {
    /// `f(0) == 0`: only stored entries were visited
    Sparse(SparseVector<T>),
    /// `f(0) != 0`: every position was materialized
    Dense(Vec<T>),
}

impl<T: Element> MapOutput<T> {
    /// Materialize as a dense vector
    pub fn into_dense(self) -> Vec<T> {
        match self {
            MapOutput::Sparse(v) => v.to_dense(),
            MapOutput::Dense(d) => d,
        }
    }

    /// The sparse result, if the map preserved zero
    pub fn into_sparse(self) -> Option<SparseVector<T>> {
        match self {
            MapOutput::Sparse(v) => Some(v),
            MapOutput::Dense(_) => None,
        }
    }
}

/// Apply `f` to every element of `x`
///
/// With `preserves_zero` the caller asserts `f(0) == 0`: `f` is applied to
/// stored entries only and zero results are dropped. Otherwise the full
/// length is materialized, structural zeros mapping to `f(0)`.
pub fn map<T, R, X, F>(x: &X, preserves_zero: bool, f: F) -> MapOutput<R>
where
    T: Element,
    R: Element,
    X: SparseRead<T> + ?Sized,
    F: Fn(T) -> R,
{
    if preserves_zero {
        MapOutput::Sparse(map_stored(x, f))
    } else {
        let mut dense = vec![f(T::zero()); x.len()];
        for (i, v) in x.iter() {
            dense[i] = f(v);
        }
        MapOutput::Dense(dense)
    }
}

/// Apply `f` to stored entries only, dropping zero results
pub(crate) fn map_stored<T, R, X, F>(x: &X, f: F) -> SparseVector<R>
where
    T: Element,
    R: Element,
    X: SparseRead<T> + ?Sized,
    F: Fn(T) -> R,
{
    let (nzind, nzval) = x
        .iter()
        .map(|(i, v)| (i, f(v)))
        .filter(|&(_, v)| !v.is_zero())
        .unzip();
    SparseVector::from_parts_unchecked(x.len(), nzind, nzval)
}
