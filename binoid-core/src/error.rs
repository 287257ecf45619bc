//! Error types for binomial ideal decomposition.

use binoid_math::{MathError, Var};
use std::process::ExitStatus;
use thiserror::Error;

/// Error type for decomposition operations
#[derive(Error, Debug)]
pub enum BinomialError {
    /// The input ideal is not generated by binomials
    #[error("ideal is not binomial")]
    NotBinomial,
    /// The input ideal is not generated by pure differences of monomials
    #[error("ideal is not unital")]
    NotUnital,
    /// The input ideal is not cellular; the variable is a zero-divisor that is not nilpotent
    #[error("ideal is not cellular: x{0} is a non-nilpotent zero-divisor")]
    NotCellular(Var),
    /// The input ideal is the whole ring
    #[error("ideal is not proper")]
    NotProper,
    /// The input ideal is zero where a nonzero ideal is required
    #[error("ideal is zero")]
    ZeroIdeal,
    /// A vector outside the lattice of a partial character
    #[error("vector is not in the lattice of the character")]
    NotInLattice,
    /// Shapes of vectors, matrices or rings do not fit
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Dimension actually supplied
        found: usize,
    },
    /// Character saturation would try more root combinations than allowed
    #[error("saturation needs {candidates} root combinations, limit is {limit}")]
    SaturationLimit {
        /// Combinations required (saturating at `usize::MAX`)
        candidates: usize,
        /// Configured limit
        limit: usize,
    },
    /// The external lattice-basis program exited unsuccessfully
    #[error("lattice oracle `{command}` failed with {status}")]
    OracleFailure {
        /// Program that was run
        command: String,
        /// Its exit status
        status: ExitStatus,
    },
    /// The external lattice-basis program produced unreadable output
    #[error("malformed lattice oracle output: {0}")]
    OracleParse(String),
    /// IO error while talking to the lattice oracle
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error from the underlying exact algebra
    #[error(transparent)]
    Math(#[from] MathError),
    /// An internal invariant was violated
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for decomposition operations
pub type Result<T> = std::result::Result<T, BinomialError>;
