//! One-at-a-time parameter sweeps.
//!
//! Each sweep varies one parameter over 11 equally spaced values spanning
//! its range, every other parameter held at the base value. Points are
//! independent and solved in parallel; a point without a solution is left
//! out of the series and counted.

use crate::equations::SourceModel;
use crate::error::AppResult;
use crate::parameters::{ParameterId, ParameterSet};
use crate::result::SourceResult;
use crate::solve::{SourceReport, is_not_converged};
use rayon::prelude::*;
use tracing::{info, warn};
use ucn_core::linspace;

/// Sample count per sweep.
pub const SWEEP_POINTS: usize = 11;

/// Converged points of one sweep.
#[derive(Clone, Debug)]
pub struct SweepSeries {
    pub parameter: ParameterId,
    pub unit: String,
    /// Parameter values of the converged points, ascending.
    pub values: Vec<f64>,
    /// Results aligned with `values`.
    pub results: Vec<SourceResult>,
    /// Points without a result.
    pub failed: usize,
}

impl SweepSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One quantity across the converged points.
    pub fn series(&self, quantity: impl Fn(&SourceResult) -> f64) -> Vec<f64> {
        self.results.iter().map(quantity).collect()
    }

    /// Axis label, e.g. `Beam heating (W)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.parameter.name(), self.unit)
    }
}

/// The sample values of a sweep over `id`.
pub fn sweep_values(base: &ParameterSet, id: ParameterId) -> AppResult<Vec<f64>> {
    let parameter = base.get(id);
    Ok(linspace(parameter.min(), parameter.max(), SWEEP_POINTS)?)
}

/// Sweep `id` with `solve` evaluating each point.
pub fn run_sweep_with<F>(base: &ParameterSet, id: ParameterId, solve: F) -> AppResult<SweepSeries>
where
    F: Fn(&ParameterSet) -> AppResult<SourceReport> + Sync,
{
    let samples = sweep_values(base, id)?;
    let outcomes: Vec<(f64, AppResult<SourceReport>)> = samples
        .par_iter()
        .map(|&value| (value, base.with_value(id, value).and_then(|p| solve(&p))))
        .collect();

    let mut series = SweepSeries {
        parameter: id,
        unit: base.get(id).unit.clone(),
        values: Vec::with_capacity(samples.len()),
        results: Vec::with_capacity(samples.len()),
        failed: 0,
    };
    for (value, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                series.values.push(value);
                series.results.push(report.result);
            }
            Err(err) => {
                if is_not_converged(&err) {
                    info!(parameter = %id, value, "no solution; point skipped");
                } else {
                    warn!(parameter = %id, value, error = %err, "point failed; skipped");
                }
                series.failed += 1;
            }
        }
    }
    Ok(series)
}

/// Sweep `id` with the source model.
pub fn run_sweep(model: &SourceModel<'_>, base: &ParameterSet, id: ParameterId) -> AppResult<SweepSeries> {
    run_sweep_with(base, id, |params| model.solve(params))
}

/// Sweep every parameter in table order.
pub fn run_all_sweeps(model: &SourceModel<'_>, base: &ParameterSet) -> AppResult<Vec<SweepSeries>> {
    ParameterId::ALL
        .iter()
        .map(|&id| {
            let series = run_sweep(model, base, id)?;
            info!(
                parameter = %id,
                converged = series.len(),
                failed = series.failed,
                "sweep finished"
            );
            Ok(series)
        })
        .collect()
}
