//! Error types for sub-model evaluations.

use thiserror::Error;
use ucn_fluids::FluidError;
use ucn_solver::SolverError;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fluid model error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Integration error: {0}")]
    Integration(#[from] SolverError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;
