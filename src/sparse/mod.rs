//! Sparse vector storage and arithmetic
//!
//! This module provides index-ordered compressed sparse vectors and the
//! merge engine behind their elementwise operations.
//!
//! # Vector Kinds
//!
//! Three kinds share the [`SparseRead`] interface:
//!
//! - **Mutable** ([`SparseVector`]): owns its storage; writes may insert or
//!   remove stored positions. Best for assembly and arithmetic results.
//!
//! - **Fixed** ([`FixedSparseVector`]): owns its values over a frozen,
//!   shareable set of stored positions. Best for iterative numerical updates
//!   on a stable pattern.
//!
//! - **Column view** ([`SparseColumnView`]): a read-only borrow of one
//!   column of a [`CscMatrix`].
//!
//! # Usage
//!
//! ```
//! use spvec::sparse::{SparseRead, SparseVector};
//!
//! // Duplicate coordinates are combined (summed by default)
//! let x = SparseVector::from_coo(&[0, 2, 2, 4], &[0.1f64, 0.2, 0.3, 0.2], None)?;
//! assert_eq!(x.nonzero_indices(), &[0, 2, 4]);
//!
//! let y = SparseVector::from_dense(&[1.0, 0.0, 0.0, 0.0, -0.2]);
//! let z = x.add(&y)?;
//! assert_eq!(z.nonzero_indices(), &[0, 2]);
//! # Ok::<(), spvec::error::Error>(())
//! ```

mod csc;
mod fixed;
mod format;
mod locate;
pub mod merge;
mod vector;

pub use csc::{CscMatrix, SparseColumnView};
pub use fixed::FixedSparseVector;
pub use format::{SparseKind, SparseRead, SparseWrite};
pub use merge::{
    BinaryOp, MapOutput, MergeMode, map, merge, merge_op, mode_for, select_mode, try_merge,
};
pub use vector::{NormType, SparseVector};
