//! Root finding and the expansion pass.
//!
//! Solving is two-phase: the hybrid root finder only sees the three coupled
//! unknowns, then [`SourceModel::expand`] evaluates every dependent quantity
//! once at the root.

use crate::equations::{SourceInputs, SourceModel, StateVector};
use crate::error::{AppError, AppResult};
use crate::parameters::ParameterSet;
use crate::result::SourceResult;
use nalgebra::DVector;
use tracing::{debug, info};
use ucn_components::{
    he_ii_temperature, he3_temperature, hex1_temperature, one_k_pot_evaporation,
    reservoir_evaporation, shield_flows,
};
use ucn_core::units::constants::{ATMOSPHERE_PA, G0_MPS2};
use ucn_core::units::{k, kgps, pa};
use ucn_core::{DiagnosticKind, Diagnostics};
use ucn_solver::{HybridConfig, SolverError, hybrid_solve};

/// Starting point of every solve.
pub const INITIAL_GUESS: StateVector = StateVector {
    he3_flow: 0.002,
    pot_temperature: 1.8,
    he4_temperature: 1.0,
};

/// Converged solve with its diagnostics.
#[derive(Clone, Debug)]
pub struct SourceReport {
    pub result: SourceResult,
    /// Fallbacks taken while expanding the root.
    pub diagnostics: Diagnostics,
    /// Residual evaluations used by the root finder.
    pub evaluations: usize,
}

/// kg/s of liquid to L/h.
const LITERS_PER_HOUR: f64 = 1000.0 * 3600.0;

impl SourceModel<'_> {
    /// Solve the source at `params`.
    ///
    /// Fails with [`AppError::NotConverged`] when there is no consistent
    /// operating point.
    pub fn solve(&self, params: &ParameterSet) -> AppResult<SourceReport> {
        let inputs = SourceInputs::from_parameters(params);
        let (root, evaluations) = self.find_root(&inputs)?;

        let mut diagnostics = Diagnostics::new();
        let result = self.expand(&inputs, &root, &mut diagnostics)?;
        info!(
            evaluations,
            he3_flow = result.he3_flow,
            t_he_ii = result.t_he_ii,
            "source solved"
        );
        Ok(SourceReport {
            result,
            diagnostics,
            evaluations,
        })
    }

    /// Root of the equation set from [`INITIAL_GUESS`].
    pub fn find_root(&self, inputs: &SourceInputs) -> AppResult<(StateVector, usize)> {
        let mut trial = Diagnostics::muted();
        let residual = |x: &DVector<f64>| {
            trial.clear();
            self.residual(inputs, &StateVector::from_slice(x.as_slice()), &mut trial)
                .map(|r| DVector::from_row_slice(&r))
                .map_err(|e| SolverError::Evaluation {
                    what: e.to_string(),
                })
        };
        let solution = hybrid_solve(INITIAL_GUESS.to_vector(), residual, &HybridConfig::default())?;
        debug!(
            residual_norm = solution.residual_norm,
            iterations = solution.iterations,
            "equation set converged"
        );
        Ok((
            StateVector::from_slice(solution.x.as_slice()),
            solution.evaluations,
        ))
    }

    /// Evaluate every dependent quantity at `root`.
    pub fn expand(
        &self,
        inputs: &SourceInputs,
        root: &StateVector,
        diagnostics: &mut Diagnostics,
    ) -> AppResult<SourceResult> {
        let he4 = self.he4;
        let t_pot = k(root.pot_temperature);
        let t_4he = k(root.he4_temperature);

        let t_res = he4.saturation_temperature(inputs.reservoir_pressure)?;
        let pot_flow = one_k_pot_evaporation(
            he4,
            self.he3,
            &inputs.he3_supply(root.he3_flow, inputs.pot_inlet_temperature),
            &inputs.isopure_from(t_res),
            inputs.reservoir_pressure,
            inputs.pot_inlet_temperature,
            t_pot,
        )?;
        let reservoir_flow = reservoir_evaporation(
            he4,
            self.he3,
            &inputs.he3_supply(root.he3_flow, inputs.reservoir_inlet_temperature),
            &inputs.isopure,
            inputs.reservoir_pressure,
        )?;

        let liquid_density = he4
            .saturated_liquid_density(he4.saturation_temperature(pa(ATMOSPHERE_PA))?)?
            .value;
        let shields = shield_flows(he4, &inputs.isopure, inputs.reservoir_pressure)?;

        let t_3he = he3_temperature(self.he3, kgps(root.he3_flow), &inputs.he3_line)?;
        let load = self.heat_load(inputs, t_pot, t_4he)?;
        let t_cu = hex1_temperature(self.boiling, t_3he, &inputs.hex1, load, diagnostics)?;

        let mut result = SourceResult {
            he3_flow: root.he3_flow,
            one_k_pot_temperature: root.pot_temperature,
            t_4he: root.he4_temperature,
            he_reservoir_temperature: t_res.value,
            one_k_pot_flow: pot_flow.value,
            he_reservoir_flow: reservoir_flow.value,
            he_consumption: (reservoir_flow.value + pot_flow.value) / liquid_density
                * LITERS_PER_HOUR,
            shield_flow_20k: shields.flow_20k.value,
            shield_flow_100k: shields.flow_100k.value,
            shield_consumption: shields.max().value / liquid_density * LITERS_PER_HOUR,
            t_3he: t_3he.value,
            t_cu: t_cu.value,
            ..SourceResult::default()
        };

        let t_min = he4.min_temperature();
        if t_4he < t_min {
            diagnostics.push(
                DiagnosticKind::SuperfluidBranchInapplicable,
                format!(
                    "T_4He = {:.3} K is below {} K; He-II outputs set to zero",
                    t_4he.value, t_min.value
                ),
            );
            return Ok(result);
        }

        let vapor_pressure = he4.saturation_pressure(t_4he)?;
        let head = he4.saturated_liquid_density(t_4he)?.value * G0_MPS2 * inputs.overfill.value;
        let t_he_ii = he_ii_temperature(
            he4,
            &inputs.channel,
            t_4he,
            pa(vapor_pressure.value + head),
            inputs.beam_heating,
            diagnostics,
        )?;

        result.he_ii_vapor_pressure = vapor_pressure.value;
        result.he_ii_pressure_head = head;
        result.t_he_ii = t_he_ii.value;
        Ok(result)
    }
}

/// True when `err` only means "no operating point here".
pub fn is_not_converged(err: &AppError) -> bool {
    matches!(err, AppError::NotConverged { .. })
}
