//! Reductions over sparse vectors that account for structural zeros

use std::cmp::Ordering;

use super::SparseVector;
use crate::dtype::{Element, NumericElement};
use crate::error::Result;
use crate::sparse::merge::BinaryOp;

/// Vector norm type
///
/// Norms are computed in `f64` regardless of the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormType {
    /// L1 norm: sum(|x[i]|)
    L1,

    /// L2 (Euclidean) norm: sqrt(sum(x[i]²))
    L2,

    /// Infinity norm: max(|x[i]|)
    ///
    /// Zero for a vector with nothing stored.
    Inf,
}

#[inline]
fn order<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

impl<T: Element> SparseVector<T> {
    /// Norm of the vector
    ///
    /// Structural zeros contribute nothing to any supported norm, so only
    /// stored values are visited.
    pub fn norm(&self, norm_type: NormType) -> f64 {
        let mags = self.nzval.iter().map(|v| v.magnitude());
        match norm_type {
            NormType::L1 => mags.sum(),
            NormType::L2 => mags.map(|m| m * m).sum::<f64>().sqrt(),
            NormType::Inf => mags.fold(0.0, f64::max),
        }
    }

    /// Largest element, structural zeros included
    ///
    /// Returns `None` for a zero-length vector. A vector with fewer stored
    /// entries than its length contains at least one structural zero, which
    /// takes part in the comparison.
    pub fn max_value(&self) -> Option<T> {
        self.extreme(|a, b| order(a, b))
    }

    /// Smallest element, structural zeros included
    ///
    /// Returns `None` for a zero-length vector.
    pub fn min_value(&self) -> Option<T> {
        self.extreme(|a, b| order(b, a))
    }

    fn extreme<F>(&self, cmp: F) -> Option<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if self.n == 0 {
            return None;
        }
        let stored = self.nzval.iter().copied().max_by(&cmp);
        if self.nzval.len() < self.n {
            let zero = T::zero();
            Some(match stored {
                Some(v) if cmp(&v, &zero) == Ordering::Greater => v,
                _ => zero,
            })
        } else {
            stored
        }
    }

    /// Sort the elements of the vector, returning a new sparse vector
    ///
    /// Stored values ordered before zero end up at positions `0..k` and
    /// values ordered after zero at positions `n - m..n`; every other
    /// position, stored zeros included, becomes a structural zero.
    ///
    /// `PartialOrd` of `T` must behave as a total order on the stored
    /// values; incomparable pairs are treated as equal.
    pub fn sort_values(&self) -> Self {
        let zero = T::zero();
        let mut sorted: Vec<T> = self.nzval.iter().copied().filter(|v| !v.is_zero()).collect();
        sorted.sort_by(order);

        let k = sorted.partition_point(|v| order(v, &zero) == Ordering::Less);
        let m = sorted.len() - k;
        let nzind = (0..k).chain(self.n - m..self.n).collect();

        Self::from_parts_unchecked(self.n, nzind, sorted)
    }
}

impl<T: NumericElement> SparseVector<T> {
    /// Sum of all elements
    ///
    /// # Errors
    ///
    /// `Overflow` if an integer sum leaves the range of `T`.
    pub fn sum(&self) -> Result<T> {
        self.nzval
            .iter()
            .try_fold(T::zero(), |acc, &v| BinaryOp::Add.apply(acc, v))
    }
}
