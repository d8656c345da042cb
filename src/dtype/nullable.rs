//! Numeric element with a "missing" state

use super::{DType, Element, NumericElement};
use std::ops::{Add, Div, Mul, Sub};

/// A numeric value that may be missing
///
/// Arithmetic propagates the missing state: any operation with a missing
/// operand yields a missing result. This is what makes zero-absorbing
/// operations unsafe to evaluate on stored positions only, since
/// `missing * 0` is missing rather than zero.
///
/// # Example
///
/// ```
/// use spvec::dtype::Nullable;
///
/// let a = Nullable::new(2.0f64);
/// let m = Nullable::<f64>::missing();
/// assert_eq!(a * Nullable::new(3.0), Nullable::new(6.0));
/// assert!((a * m).is_missing());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Nullable<T>(Option<T>);

impl<T: NumericElement> Nullable<T> {
    /// A present value
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// The missing value
    #[inline]
    pub const fn missing() -> Self {
        Self(None)
    }

    /// Returns true if the value is missing
    #[inline]
    pub fn is_missing(self) -> bool {
        self.0.is_none()
    }

    /// The underlying value, if present
    #[inline]
    pub fn value(self) -> Option<T> {
        self.0
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl FnOnce(T, T) -> T) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self(Some(f(a, b))),
            _ => Self(None),
        }
    }

    /// Like `zip_with`, but `f` may fail; missing operands never fail
    #[inline]
    fn try_zip_with(self, other: Self, f: impl FnOnce(T, T) -> Option<T>) -> Option<Self> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => f(a, b).map(|v| Self(Some(v))),
            _ => Some(Self(None)),
        }
    }
}

impl<T: NumericElement> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: NumericElement> Add for Nullable<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: NumericElement> Sub for Nullable<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: NumericElement> Mul for Nullable<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl<T: NumericElement> Div for Nullable<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl<T: NumericElement> Element for Nullable<T> {
    const DTYPE: DType = T::DTYPE;
    const MAY_BE_MISSING: bool = true;

    /// Missing converts to NaN
    #[inline]
    fn to_f64(self) -> f64 {
        self.0.map_or(f64::NAN, T::to_f64)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        if v.is_nan() && !T::DTYPE.is_float() {
            Self(None)
        } else {
            Self(Some(T::from_f64(v)))
        }
    }

    #[inline]
    fn zero() -> Self {
        Self(Some(T::zero()))
    }

    #[inline]
    fn one() -> Self {
        Self(Some(T::one()))
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.0.is_some_and(T::is_zero)
    }

    #[inline]
    fn combine_duplicate(self, other: Self) -> Option<Self> {
        self.checked_add_elem(other)
    }
}

impl<T: NumericElement> NumericElement for Nullable<T> {
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(T::neg))
    }

    #[inline]
    fn abs(self) -> Self {
        Self(self.0.map(T::abs))
    }

    #[inline]
    fn min_elem(self, other: Self) -> Self {
        self.zip_with(other, T::min_elem)
    }

    #[inline]
    fn max_elem(self, other: Self) -> Self {
        self.zip_with(other, T::max_elem)
    }

    #[inline]
    fn checked_add_elem(self, other: Self) -> Option<Self> {
        self.try_zip_with(other, T::checked_add_elem)
    }

    #[inline]
    fn checked_sub_elem(self, other: Self) -> Option<Self> {
        self.try_zip_with(other, T::checked_sub_elem)
    }

    #[inline]
    fn checked_mul_elem(self, other: Self) -> Option<Self> {
        self.try_zip_with(other, T::checked_mul_elem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_propagates() {
        let m = Nullable::<i32>::missing();
        let two = Nullable::new(2);
        assert!((m + two).is_missing());
        assert!((two - m).is_missing());
        assert!((m * Nullable::zero()).is_missing());
        assert!(m.min_elem(two).is_missing());
        assert_eq!(two + two, Nullable::new(4));
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Nullable::new(u8::MAX);
        assert_eq!(big.checked_add_elem(Nullable::new(1)), None);
        assert_eq!(
            Nullable::new(3u8).checked_sub_elem(Nullable::new(1)),
            Some(Nullable::new(2))
        );
        let m = Nullable::<u8>::missing();
        assert!(big.checked_add_elem(m).is_some_and(|v| v.is_missing()));
    }

    #[test]
    fn test_zero_and_conversion() {
        assert!(Nullable::new(0.0f64).is_zero());
        assert!(!Nullable::<f64>::missing().is_zero());
        assert!(Nullable::<f64>::missing().to_f64().is_nan());
        assert_eq!(Nullable::<i64>::from_f64(3.0).value(), Some(3));
        assert!(Nullable::<i64>::from_f64(f64::NAN).is_missing());
        assert!(<Nullable<f32> as Element>::MAY_BE_MISSING);
        assert_eq!(<Nullable<f32> as Element>::DTYPE, DType::F32);
    }
}
