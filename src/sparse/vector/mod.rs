//! Compressed sparse vector with a mutable sparsity pattern
//!
//! Stores the nonzero structure of a one-dimensional array as a strictly
//! increasing index list paired with a value list:
//!
//! ```text
//! Dense:  [5, 6, 0, 7]
//!
//! n     = 4
//! nzind = [0, 1, 3]
//! nzval = [5, 6, 7]
//! ```
//!
//! Reads locate positions by binary search. Writes to unstored positions
//! shift the tail of both arrays, so bulk assembly should go through the
//! coordinate or dense constructors.

mod access;
mod conversion;
mod core;
mod elementwise;
mod maintenance;
mod reduce;

pub use core::SparseVector;
pub(crate) use maintenance::above_tolerance;
pub use reduce::NormType;
