//! Error types for spvec

use thiserror::Error;

/// Result type alias using spvec's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparse vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Single-element access outside `[0, size)`
    #[error("Index {index} out of bounds for vector of length {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Length of the vector
        size: usize,
    },

    /// Operand shapes disagree
    #[error("Dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Integer arithmetic left the range of the element type
    #[error("Arithmetic overflow in {op}")]
    Overflow {
        /// The operation that overflowed
        op: &'static str,
    },

    /// Zero pivot met during a triangular solve
    #[error("Singular matrix: zero pivot at diagonal {index}")]
    Singular {
        /// Diagonal position of the zero pivot
        index: usize,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a dimension mismatch error for two vector lengths
    pub fn length_mismatch(expected: usize, got: usize) -> Self {
        Self::dimension_mismatch(&[expected], &[got])
    }
}
