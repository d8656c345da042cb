//! Elementwise arithmetic on sparse vectors
//!
//! Every binary operation routes through the merge-walk in
//! [`crate::sparse::merge`]; the merge mode is chosen once per call from the
//! operator and the element types, never per element.

use std::ops::Neg;

use super::SparseVector;
use crate::dtype::{Element, NumericElement};
use crate::error::Result;
use crate::sparse::format::{SparseRead, SparseWrite};
use crate::sparse::merge::{self, BinaryOp, MapOutput, MergeMode};

impl<T: Element> SparseVector<T> {
    /// Apply `f` to every element
    ///
    /// See [`merge::map`] for the meaning of `preserves_zero`.
    pub fn map<R, F>(&self, preserves_zero: bool, f: F) -> MapOutput<R>
    where
        R: Element,
        F: Fn(T) -> R,
    {
        merge::map(self, preserves_zero, f)
    }

    /// Combine with `other` elementwise through a caller-supplied function
    ///
    /// The caller classifies `f` by picking `mode`; picking a mode that
    /// assumes more about `f` than holds silently drops positions.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn map2<U, R, Y, F>(&self, other: &Y, mode: MergeMode, f: F) -> Result<SparseVector<R>>
    where
        U: Element,
        R: Element,
        Y: SparseRead<U> + ?Sized,
        F: Fn(T, U) -> R,
    {
        merge::merge(self, other, mode, f)
    }
}

impl<T: NumericElement> SparseVector<T> {
    /// Elementwise sum
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn add<Y: SparseRead<T> + ?Sized>(&self, other: &Y) -> Result<Self> {
        merge::merge_op(self, other, BinaryOp::Add)
    }

    /// Elementwise difference
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn sub<Y: SparseRead<T> + ?Sized>(&self, other: &Y) -> Result<Self> {
        merge::merge_op(self, other, BinaryOp::Sub)
    }

    /// Elementwise product
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn mul<Y: SparseRead<T> + ?Sized>(&self, other: &Y) -> Result<Self> {
        merge::merge_op(self, other, BinaryOp::Mul)
    }

    /// Elementwise minimum
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn min<Y: SparseRead<T> + ?Sized>(&self, other: &Y) -> Result<Self> {
        merge::merge_op(self, other, BinaryOp::Min)
    }

    /// Elementwise maximum
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn max<Y: SparseRead<T> + ?Sized>(&self, other: &Y) -> Result<Self> {
        merge::merge_op(self, other, BinaryOp::Max)
    }

    /// Elementwise negation
    pub fn neg(&self) -> Self {
        merge::map_stored(self, NumericElement::neg)
    }

    /// Elementwise absolute value
    pub fn abs(&self) -> Self {
        merge::map_stored(self, NumericElement::abs)
    }

    /// Multiply by a scalar, returning a new vector
    ///
    /// The pattern of `self` is kept; see [`scale_in_place`](Self::scale_in_place).
    ///
    /// # Errors
    ///
    /// `Overflow` if an integer product leaves the range of `T`.
    pub fn scale(&self, a: T) -> Result<Self> {
        let mut out = self.clone();
        out.scale_in_place(a)?;
        Ok(out)
    }

    /// Multiply every stored value by `a`
    ///
    /// A zero scalar clears the stored values instead of multiplying, so
    /// the pattern survives as stored zeros. Call
    /// [`dropzeros`](Self::dropzeros) to remove them.
    ///
    /// # Errors
    ///
    /// `Overflow` if an integer product leaves the range of `T`. The
    /// vector is left unchanged in that case.
    pub fn scale_in_place(&mut self, a: T) -> Result<()> {
        if a.is_zero() {
            self.fill_stored(T::zero());
            return Ok(());
        }
        let scaled = self
            .nzval
            .iter()
            .map(|&v| BinaryOp::Mul.apply(v, a))
            .collect::<Result<Vec<T>>>()?;
        self.nzval = scaled;
        Ok(())
    }
}

impl<T: NumericElement> Neg for &SparseVector<T> {
    type Output = SparseVector<T>;

    fn neg(self) -> SparseVector<T> {
        SparseVector::neg(self)
    }
}
