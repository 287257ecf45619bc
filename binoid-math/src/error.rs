//! Error types for exact algebra.

use thiserror::Error;

/// Errors raised by field, polynomial, ideal and lattice operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Inversion of zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A square matrix expected to be invertible is singular.
    #[error("matrix is singular")]
    SingularMatrix,
    /// Operand shapes do not fit together.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Dimension actually supplied.
        found: usize,
    },
    /// A root exists only outside the representable cyclotomic elements.
    #[error("{degree}-th root of {value} is not representable exactly")]
    NoExactRoot {
        /// Printed radicand.
        value: String,
        /// Root degree.
        degree: u32,
    },
    /// Exponent too large for repeated squaring bookkeeping.
    #[error("exponent out of range: {0}")]
    ExponentOverflow(String),
    /// Ideals from different rings were combined.
    #[error("ring mismatch: {left} variables vs {right} variables")]
    RingMismatch {
        /// Variables of the left operand's ring.
        left: usize,
        /// Variables of the right operand's ring.
        right: usize,
    },
    /// Argument outside the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for exact algebra.
pub type MathResult<T> = Result<T, MathError>;
