//! Error types for the ucn-app service layer.

use std::path::PathBuf;
use ucn_components::ComponentError;
use ucn_core::CoreError;
use ucn_fluids::{BoilingDataError, FluidError};
use ucn_solver::SolverError;

/// Application error type wrapping the lower crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No self-consistent solution at these parameters.
    #[error("Solution did not converge: {what}")]
    NotConverged { what: String },

    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("Parameter {name} = {value} outside its range [{min}, {max}]")]
    ParameterOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Failed to read parameter file: {path}")]
    ParameterFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse parameter file {path}: {message}")]
    ParameterFileFormat { path: PathBuf, message: String },

    #[error("Boiling data error: {0}")]
    BoilingData(#[from] BoilingDataError),

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Solver error: {0}")]
    Solver(SolverError),

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ucn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<SolverError> for AppError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::ConvergenceFailed { what } => AppError::NotConverged { what },
            other => AppError::Solver(other),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
