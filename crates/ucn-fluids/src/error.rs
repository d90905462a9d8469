//! Fluid property and boiling-data errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// State outside the range covered by the property correlations.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

/// Errors raised while building the boiling-curve table.
///
/// All of these are fatal: without the table no solve can run.
#[derive(Error, Debug)]
pub enum BoilingDataError {
    #[error("Cannot read boiling data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed boiling data in {path} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Boiling data needs at least three non-collinear points, got {points}")]
    Degenerate { points: usize },
}
