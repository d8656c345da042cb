//! Element traits mapping Rust types to DType

use super::DType;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be stored in a sparse vector
///
/// This trait connects Rust's type system to spvec's runtime dtype tag and
/// carries the zero-related facts the storage and merge layers depend on.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `PartialEq` - Zero tests compare against the additive identity
/// - `PartialOrd` - Ordering for min/max and value sorting
///
/// Arithmetic is NOT required here since `bool` is a valid element.
/// See [`NumericElement`] for arithmetic element types.
pub trait Element: Copy + Send + Sync + Debug + PartialEq + PartialOrd + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Whether values of this type may carry a "missing" state
    ///
    /// Merge-mode selection consults this flag: operations that are
    /// zero-absorbing on plain numbers stop being so once a missing
    /// operand can meet a structural zero.
    const MAY_BE_MISSING: bool = false;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Returns true if this value equals the additive identity
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Default combine for duplicate coordinates (addition, or logical-or for bool)
    ///
    /// Returns `None` when an integer sum overflows.
    fn combine_duplicate(self, other: Self) -> Option<Self>;

    /// Magnitude used by tolerance-based pruning
    #[inline]
    fn magnitude(self) -> f64 {
        self.to_f64().abs()
    }
}

/// Element types supporting elementwise arithmetic
///
/// Note: `Neg` is NOT required since unsigned types don't support it.
/// Unsigned negation goes through `to_f64`/`from_f64`, saturating at zero.
pub trait NumericElement:
    Element + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Additive inverse
    #[inline]
    fn neg(self) -> Self {
        Self::from_f64(-self.to_f64())
    }

    /// Absolute value
    #[inline]
    fn abs(self) -> Self {
        if self < Self::zero() { self.neg() } else { self }
    }

    /// Smaller of two values
    ///
    /// An unordered operand (NaN) wins from either side.
    #[inline]
    fn min_elem(self, other: Self) -> Self {
        if other.partial_cmp(&other).is_none() || other < self {
            other
        } else {
            self
        }
    }

    /// Larger of two values
    ///
    /// An unordered operand (NaN) wins from either side.
    #[inline]
    fn max_elem(self, other: Self) -> Self {
        if other.partial_cmp(&other).is_none() || other > self {
            other
        } else {
            self
        }
    }

    /// `self + other`, or `None` on integer overflow
    #[inline]
    fn checked_add_elem(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    /// `self - other`, or `None` on integer overflow
    #[inline]
    fn checked_sub_elem(self, other: Self) -> Option<Self> {
        Some(self - other)
    }

    /// `self * other`, or `None` on integer overflow
    #[inline]
    fn checked_mul_elem(self, other: Self) -> Option<Self> {
        Some(self * other)
    }
}

#[inline]
fn unchecked_sum<T: Add<Output = T>>(a: T, b: T) -> Option<T> {
    Some(a + b)
}

macro_rules! impl_element {
    (@impl $t:ty, $dtype:ident, $combine:expr) => {
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn zero() -> Self {
                <$t as Zero>::zero()
            }

            #[inline]
            fn one() -> Self {
                <$t as One>::one()
            }

            #[inline]
            fn combine_duplicate(self, other: Self) -> Option<Self> {
                $combine(self, other)
            }
        }
    };
    ($t:ty, $dtype:ident) => {
        impl_element!(@impl $t, $dtype, unchecked_sum);
    };
    ($t:ty, $dtype:ident, checked) => {
        impl_element!(@impl $t, $dtype, <$t>::checked_add);
    };
}

macro_rules! impl_float_numeric {
    ($($t:ty),*) => {
        $(
            impl NumericElement for $t {
                #[inline]
                fn neg(self) -> Self {
                    -self
                }
            }
        )*
    };
}

// Integer arithmetic is checked; overflow surfaces as `None`
macro_rules! impl_int_numeric {
    ($($t:ty),*) => {
        $(
            impl NumericElement for $t {
                #[inline]
                fn checked_add_elem(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }

                #[inline]
                fn checked_sub_elem(self, other: Self) -> Option<Self> {
                    CheckedSub::checked_sub(&self, &other)
                }

                #[inline]
                fn checked_mul_elem(self, other: Self) -> Option<Self> {
                    CheckedMul::checked_mul(&self, &other)
                }
            }
        )*
    };
}

macro_rules! impl_signed_int_numeric {
    ($($t:ty),*) => {
        $(
            impl NumericElement for $t {
                #[inline]
                fn neg(self) -> Self {
                    -self
                }

                #[inline]
                fn checked_add_elem(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }

                #[inline]
                fn checked_sub_elem(self, other: Self) -> Option<Self> {
                    CheckedSub::checked_sub(&self, &other)
                }

                #[inline]
                fn checked_mul_elem(self, other: Self) -> Option<Self> {
                    CheckedMul::checked_mul(&self, &other)
                }
            }
        )*
    };
}

impl_element!(f64, F64);
impl_element!(f32, F32);
impl_element!(i64, I64, checked);
impl_element!(i32, I32, checked);
impl_element!(i16, I16, checked);
impl_element!(i8, I8, checked);
impl_element!(u64, U64, checked);
impl_element!(u32, U32, checked);
impl_element!(u16, U16, checked);
impl_element!(u8, U8, checked);

impl_float_numeric!(f64, f32);
impl_signed_int_numeric!(i64, i32, i16, i8);
impl_int_numeric!(u64, u32, u16, u8);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v != 0.0
    }

    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn combine_duplicate(self, other: Self) -> Option<Self> {
        Some(self || other)
    }
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
macro_rules! impl_half_element {
    ($t:ty, $dtype:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_f64(self) -> f64 {
                <$t>::to_f64(self)
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                <$t>::from_f64(v)
            }

            #[inline]
            fn zero() -> Self {
                <$t>::ZERO
            }

            #[inline]
            fn one() -> Self {
                <$t>::ONE
            }

            #[inline]
            fn combine_duplicate(self, other: Self) -> Option<Self> {
                Some(self + other)
            }
        }

        impl NumericElement for $t {
            #[inline]
            fn neg(self) -> Self {
                -self
            }
        }
    };
}

#[cfg(feature = "f16")]
impl_half_element!(half::f16, F16);
#[cfg(feature = "f16")]
impl_half_element!(half::bf16, BF16);
