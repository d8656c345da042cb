//! # spvec
//!
//! **Compressed, index-ordered sparse vectors for Rust.**
//!
//! spvec stores one-dimensional arrays with mostly zero elements as a
//! strictly increasing list of stored positions paired with their values,
//! and implements elementwise arithmetic, structural maintenance and
//! linear-algebra adapters directly on that representation, without
//! materializing dense intermediates.
//!
//! ## Features
//!
//! - **Two owned kinds**: [`SparseVector`](sparse::SparseVector) with a mutable
//!   pattern, [`FixedSparseVector`](sparse::FixedSparseVector) with a frozen one
//! - **Column views**: read-only columns of a compressed sparse column matrix
//! - **Merge engine**: one merge-walk with three modes behind add, sub, mul,
//!   min, max and caller-supplied binary functions
//! - **Construction**: coordinate lists with duplicate combining, maps, dense
//!   slices
//! - **Linear algebra**: dot, axpy, matrix-vector products, triangular solves
//! - **Element types**: f64, f32, integers, bool, a nullable wrapper, and
//!   f16/bf16 behind a feature
//!
//! ## Quick Start
//!
//! ```
//! use spvec::prelude::*;
//!
//! let x = SparseVector::new(4, vec![0, 1, 3], vec![5.0f64, 6.0, 7.0])?;
//! assert_eq!(x.to_dense(), vec![5.0, 6.0, 0.0, 7.0]);
//!
//! let y = SparseVector::from_dense(&[1.0, 0.0, 0.0, -7.0]);
//! let z = x.add(&y)?;
//! assert_eq!(z.nonzero_indices(), &[0, 1]);
//! assert_eq!(dot(&x, &y)?, 5.0 - 49.0);
//! # Ok::<(), spvec::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16`: Half-precision element types (F16, BF16)
//!
//! ## Logging
//!
//! The library emits `tracing` events at `debug` and `trace` level and never
//! installs a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod linalg;
pub mod sparse;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{AccumulationPrecision, DType, Element, NumericElement, Nullable};
    pub use crate::error::{Error, Result};
    pub use crate::linalg::{DenseMatrix, Triangle, axpy, dot, dot_dense};
    pub use crate::sparse::{
        BinaryOp, CscMatrix, FixedSparseVector, MergeMode, SparseKind, SparseRead, SparseVector,
        SparseWrite,
    };
}
