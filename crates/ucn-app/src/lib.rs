//! Application layer of the UCN source cooling model.
//!
//! Ties the sub-models into the coupled equation set, solves it, expands the
//! root into a result record and runs parameter sweeps. The CLI talks to the
//! model only through this crate.
//!
//! ```no_run
//! use ucn_app::{ParameterSet, SourceModel, report};
//! use ucn_fluids::BoilingCurve;
//!
//! let boiling = BoilingCurve::load_dir("data/he3_boiling")?;
//! let model = SourceModel::with_correlations(&boiling);
//! let solved = model.solve(&ParameterSet::default())?;
//! println!("{}", report::summary(&solved.result));
//! # Ok::<(), ucn_app::AppError>(())
//! ```

pub mod equations;
pub mod error;
pub mod parameters;
pub mod report;
pub mod result;
pub mod solve;
pub mod sweep;

pub use equations::{SourceInputs, SourceModel, StateVector};
pub use error::{AppError, AppResult};
pub use parameters::{Parameter, ParameterId, ParameterSet};
pub use result::SourceResult;
pub use solve::{INITIAL_GUESS, SourceReport};
pub use sweep::{SWEEP_POINTS, SweepSeries, run_all_sweeps, run_sweep, run_sweep_with};
