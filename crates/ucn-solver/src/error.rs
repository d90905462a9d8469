//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur during root finding or integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    /// The residual or right-hand side could not be evaluated.
    #[error("Evaluation failed: {what}")]
    Evaluation { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
