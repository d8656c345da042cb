//! Element type system for sparse vectors
//!
//! This module provides the `DType` tag describing an element type at runtime,
//! the `Element`/`NumericElement` traits connecting Rust types to it, and the
//! `Nullable` wrapper for element types with a "missing" state.

mod element;
mod nullable;

pub use element::{Element, NumericElement};
pub use nullable::Nullable;

use std::fmt;

// ============================================================================
// Accumulation Precision
// ============================================================================

/// Accumulation precision for dot products and matrix-vector products.
///
/// During reductions over stored entries, intermediate results are accumulated.
/// Higher precision accumulation prevents numerical drift from repeated additions
/// on low-precision element types.
///
/// | Precision  | Accumulator          | Use Case |
/// |------------|----------------------|----------|
/// | **Native** | the element type     | Exact integer arithmetic, default |
/// | **F64**    | `f64`, cast back     | F32/F16 inputs with long accumulations |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AccumulationPrecision {
    /// Accumulate in the element type itself
    #[default]
    Native,
    /// Accumulate in F64 and convert the result back
    F64,
}

// ============================================================================
// DType Enum
// ============================================================================

/// Element types supported by spvec
///
/// # Discriminant Values
///
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13)
/// - Unsigned ints: 20-29 (U64=20, U32=21, U16=22, U8=23)
/// - Bool: 30
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    // Floating point types (0-9)
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,

    // Integer types
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    // Unsigned integer types
    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,

    /// Boolean
    Bool = 30,
}

impl DType {
    /// Returns true for floating point types
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32 | Self::F16 | Self::BF16)
    }

    /// Short lowercase name, as used in log output
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
