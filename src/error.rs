//! Error types for engine and bit-vector operations.

use thiserror::Error;

/// The error type of all fallible engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Zero literal, or a literal whose variable was never allocated.
    #[error("Invalid literal: {0}")]
    InvalidLiteral(i32),

    /// Vector operation on operands of different lengths.
    #[error("Length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A non-constant literal (or a variable allocation) reached a calculator engine.
    #[error("Calculator engine accepts only TRUE and FALSE, got {0}")]
    InvalidCalculatorLiteral(i32),

    /// The backend terminated without a verdict.
    #[error("Solving was aborted without a result")]
    SolveAborted,

    /// Model access without a current satisfying assignment.
    #[error("No valid solution is available")]
    StaleSolutionAccess,

    /// Operands are bound to two different solver engines.
    #[error("Operands belong to different solver engines")]
    ConflictingEngines,

    /// A constraint evaluated to false on a calculator engine.
    #[error("Constraint violated: {0}")]
    ConstraintViolated(&'static str),

    /// The backend could not be constructed or configured.
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
