//! Linear-algebra adapters over sparse vectors
//!
//! - [`dot`], [`dot_with_precision`], [`dot_dense`]: inner products
//! - [`axpy`]: scaled accumulation into a dense target
//! - [`matvec`], [`matvec_transpose`], [`matvec_csc`], [`matvec_transpose_csc`]:
//!   matrix-vector products with a sparse vector operand
//! - [`solve_triangular`], [`triangular_matvec`]: triangular systems with a
//!   sparse right-hand side
//!
//! Every adapter fails with `DimensionMismatch` when operand shapes disagree.

mod dense;
mod dot;
mod matvec;
mod triangular;

pub use dense::DenseMatrix;
pub use dot::{axpy, dot, dot_dense, dot_with_precision};
pub use matvec::{matvec, matvec_csc, matvec_transpose, matvec_transpose_csc};
pub use triangular::{Triangle, solve_triangular, solve_triangular_in_place, triangular_matvec};
