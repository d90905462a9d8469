use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;
use ucn_app::AppError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ucn_fluids::BoilingDataError> for CliError {
    fn from(err: ucn_fluids::BoilingDataError) -> Self {
        CliError::App(err.into())
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for CliError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        CliError::Plot(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
