//! Sparse vector with a frozen sparsity pattern

use std::sync::Arc;

use crate::dtype::Element;
use crate::error::{Error, Result};

use super::format::{SparseKind, SparseRead, SparseWrite, check_bounds};
use super::locate;
use super::vector::{SparseVector, above_tolerance};

/// Sparse vector whose stored positions never change after construction
///
/// Only the values may be updated. Writing to a position that is not
/// stored is a structural no-op, and filtering zeroes rejected values
/// instead of removing their positions. Consumers can therefore hold on to
/// [`indices`](SparseRead::indices) across any sequence of value updates.
///
/// The index pattern is reference counted: cloning a fixed vector, or
/// creating a [`zeros_like`](Self::zeros_like) companion, shares one
/// pattern allocation between both.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSparseVector<T: Element> {
    n: usize,
    nzind: Arc<Vec<usize>>,
    nzval: Vec<T>,
}

impl<T: Element> FixedSparseVector<T> {
    /// Create a fixed-pattern vector from its components
    ///
    /// The pattern is validated once here since it can never change later.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the counts differ, the indices are not strictly
    /// increasing, or any index is `>= n`.
    pub fn new(n: usize, nzind: Vec<usize>, nzval: Vec<T>) -> Result<Self> {
        SparseVector::new_checked(n, nzind, nzval).map(Self::from_vector)
    }

    /// Freeze the pattern of a mutable vector
    pub fn from_vector(x: SparseVector<T>) -> Self {
        let (n, nzind, nzval) = x.into_parts();
        Self {
            n,
            nzind: Arc::new(nzind),
            nzval,
        }
    }

    /// A vector with the same shared pattern and every stored value zero
    pub fn zeros_like(&self) -> Self {
        Self {
            n: self.n,
            nzind: Arc::clone(&self.nzind),
            nzval: vec![T::zero(); self.nzval.len()],
        }
    }

    /// Replace every stored value, keeping the pattern
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `values.len() != nnz()`.
    pub fn with_values(&self, values: Vec<T>) -> Result<Self> {
        if values.len() != self.nzval.len() {
            return Err(Error::length_mismatch(self.nzval.len(), values.len()));
        }
        Ok(Self {
            n: self.n,
            nzind: Arc::clone(&self.nzind),
            nzval: values,
        })
    }

    /// Returns true if both vectors share one pattern allocation
    pub fn shares_pattern(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.nzind, &other.nzind)
    }

    /// Convert into a vector whose pattern may change
    ///
    /// Reuses the index buffer when this vector is its only owner and
    /// copies it otherwise, leaving the other holders untouched.
    pub fn into_mutable(self) -> SparseVector<T> {
        let nzind = match Arc::try_unwrap(self.nzind) {
            Ok(owned) => owned,
            Err(shared) => {
                tracing::debug!(
                    nnz = shared.len(),
                    "fixed pattern is shared; copying indices"
                );
                shared.as_ref().clone()
            }
        };
        SparseVector::from_parts_unchecked(self.n, nzind, self.nzval)
    }

    /// Independent mutable copy
    pub fn to_mutable(&self) -> SparseVector<T> {
        SparseVector::from_parts_unchecked(self.n, self.nzind.to_vec(), self.nzval.clone())
    }

    /// Zero every stored value whose magnitude is at or below `tol`
    ///
    /// Returns the number of values zeroed. Positions are kept, and missing
    /// or NaN values are left alone.
    pub fn droptol(&mut self, tol: f64) -> usize {
        self.fkeep(|_, v| above_tolerance(v, tol))
    }

    /// Count stored values that are exactly zero
    ///
    /// The pattern is frozen, so stored zeros stay in place; the count is
    /// what a mutable vector would drop.
    pub fn dropzeros(&mut self) -> usize {
        self.fkeep(|_, v| !v.is_zero())
    }
}

impl<T: Element> From<SparseVector<T>> for FixedSparseVector<T> {
    fn from(x: SparseVector<T>) -> Self {
        Self::from_vector(x)
    }
}

impl<T: Element> SparseRead<T> for FixedSparseVector<T> {
    #[inline]
    fn kind(&self) -> SparseKind {
        SparseKind::Fixed
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

impl<T: Element> SparseWrite<T> for FixedSparseVector<T> {
    /// Overwrite the value at a stored position
    ///
    /// A write to an unstored position is silently ignored; bounds are
    /// still checked.
    fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_bounds(index, self.n)?;
        if let Ok(k) = locate::find(&self.nzind, index) {
            self.nzval[k] = value;
        }
        Ok(())
    }

    #[inline]
    fn values_mut(&mut self) -> &mut [T] {
        &mut self.nzval
    }

    /// Zero the values for which `pred(index, value)` fails
    ///
    /// Returns the number of rejected entries. Their positions stay stored.
    fn fkeep<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(usize, T) -> bool,
    {
        let mut rejected = 0;
        for (&i, v) in self.nzind.iter().zip(self.nzval.iter_mut()) {
            if !pred(i, *v) {
                *v = T::zero();
                rejected += 1;
            }
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FixedSparseVector<f64> {
        FixedSparseVector::new(6, vec![1, 3, 4], vec![1.0, -0.5, 2.0]).unwrap()
    }

    #[test]
    fn test_fixed_creation() {
        let x = sample();
        assert_eq!(x.kind(), SparseKind::Fixed);
        assert_eq!(x.len(), 6);
        assert_eq!(x.indices(), &[1, 3, 4]);
        assert!(FixedSparseVector::new(6, vec![3, 1], vec![1.0f64, 2.0]).is_err());
        assert!(FixedSparseVector::new(6, vec![1], vec![1.0f64, 2.0]).is_err());
    }

    #[test]
    fn test_set_stored_and_unstored() {
        let mut x = sample();
        x.set(3, 7.0).unwrap();
        assert_eq!(x.get(3).unwrap(), 7.0);

        x.set(0, 9.0).unwrap();
        assert_eq!(x.indices(), &[1, 3, 4]);
        assert_eq!(x.get(0).unwrap(), 0.0);

        assert!(matches!(
            x.set(6, 1.0),
            Err(Error::IndexOutOfBounds { index: 6, size: 6 })
        ));
    }

    #[test]
    fn test_fkeep_zeroes_but_keeps_positions() {
        let mut x = sample();
        let rejected = x.fkeep(|_, v| v > 0.0);
        assert_eq!(rejected, 1);
        assert_eq!(x.indices(), &[1, 3, 4]);
        assert_eq!(x.values(), &[1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_droptol_and_dropzeros_keep_pattern() {
        let mut x = sample();
        assert_eq!(x.droptol(1.0), 2);
        assert_eq!(x.indices(), &[1, 3, 4]);
        assert_eq!(x.values(), &[0.0, 0.0, 2.0]);
        assert_eq!(x.dropzeros(), 2);
        assert_eq!(x.nnz(), 3);
    }

    #[test]
    fn test_droptol_leaves_missing_values() {
        use crate::dtype::Nullable;

        let mut x = FixedSparseVector::new(
            4,
            vec![0, 2],
            vec![Nullable::<f64>::missing(), Nullable::new(0.25)],
        )
        .unwrap();
        assert_eq!(x.droptol(0.5), 1);
        assert!(x.values()[0].is_missing());
        assert_eq!(x.values()[1], Nullable::new(0.0));
    }

    #[test]
    fn test_pattern_sharing() {
        let x = sample();
        let y = x.clone();
        let z = x.zeros_like();
        assert!(x.shares_pattern(&y));
        assert!(x.shares_pattern(&z));
        assert_eq!(z.values(), &[0.0, 0.0, 0.0]);

        let w = x.with_values(vec![1.0, 2.0, 3.0]).unwrap();
        assert!(w.shares_pattern(&x));
        assert!(x.with_values(vec![1.0]).is_err());

        let unrelated = sample();
        assert!(!x.shares_pattern(&unrelated));
    }

    #[test]
    fn test_into_mutable_unique_and_shared() {
        let x = sample();
        let y = x.clone();

        // shared: y keeps its pattern
        let mut m = x.into_mutable();
        m.set(0, 5.0).unwrap();
        assert_eq!(m.nonzero_indices(), &[0, 1, 3, 4]);
        assert_eq!(y.indices(), &[1, 3, 4]);

        // now unique
        let m2 = y.into_mutable();
        assert_eq!(m2.nonzero_indices(), &[1, 3, 4]);
        assert_eq!(m2.nonzeros(), &[1.0, -0.5, 2.0]);
    }

    #[test]
    fn test_to_mutable_is_independent() {
        let x = sample();
        let mut m = x.to_mutable();
        m.dropzeros();
        m.remove(3).unwrap();
        assert_eq!(x.indices(), &[1, 3, 4]);
        assert_eq!(m.nonzero_indices(), &[1, 4]);
    }

    #[test]
    fn test_fixed_in_merge() {
        let x = sample();
        let y = SparseVector::new(6, vec![0, 3], vec![1.0, 0.5]).unwrap();
        let s = y.add(&x).unwrap();
        assert_eq!(s.nonzero_indices(), &[0, 1, 4]);
    }
}
