//! End-to-end solves against the shipped boiling curves.

use std::path::PathBuf;
use ucn_app::{ParameterId, ParameterSet, SourceInputs, SourceModel, StateVector, run_sweep};
use ucn_core::{DiagnosticKind, Diagnostics};
use ucn_fluids::BoilingCurve;

fn boiling_curve() -> BoilingCurve {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/he3_boiling");
    BoilingCurve::load_dir(&dir).expect("boiling data should load")
}

#[test]
fn default_parameters_converge() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let report = model.solve(&ParameterSet::default()).expect("solve");
    let r = &report.result;

    assert!(r.he3_flow > 1e-4 && r.he3_flow < 1e-2, "he3_flow = {}", r.he3_flow);
    assert!(r.one_k_pot_temperature > 1.2 && r.one_k_pot_temperature < 2.17);
    assert!(r.t_3he < r.t_cu, "{} !< {}", r.t_3he, r.t_cu);
    assert!(r.t_cu < r.t_4he, "{} !< {}", r.t_cu, r.t_4he);
    assert!(r.t_4he < r.t_he_ii && r.t_he_ii < 2.17, "T_HeII = {}", r.t_he_ii);
    assert!(r.he_ii_vapor_pressure > 0.0);
    assert!(r.he_ii_pressure_head > 0.0);
    assert!(r.he_consumption > 0.0);
    assert!(r.shield_consumption > 0.0);
    assert!(!report.diagnostics.contains(DiagnosticKind::SuperfluidBranchInapplicable));
    assert!(!report.diagnostics.contains(DiagnosticKind::BoilingCurveOutOfRange));
    assert!(report.evaluations > 0);
}

#[test]
fn solve_is_deterministic() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let params = ParameterSet::default();
    let first = model.solve(&params).expect("first solve");
    let second = model.solve(&params).expect("second solve");
    assert_eq!(first.result, second.result);
    assert_eq!(first.evaluations, second.evaluations);
}

#[test]
fn root_satisfies_equations() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let inputs = SourceInputs::from_parameters(&ParameterSet::default());
    let (root, _) = model.find_root(&inputs).expect("root");

    let mut diagnostics = Diagnostics::muted();
    let residual = model.residual(&inputs, &root, &mut diagnostics).expect("residual");
    for r in residual {
        assert!(r.abs() < 1e-6, "residual {r}");
    }
}

#[test]
fn more_beam_needs_more_cooling() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let series = run_sweep(&model, &ParameterSet::default(), ParameterId::BeamHeating)
        .expect("sweep");
    assert_eq!(series.failed, 0);
    assert_eq!(series.len(), 11);

    let he3 = series.series(|r| r.he3_flow);
    let reservoir = series.series(|r| r.he_reservoir_flow);
    for i in 1..series.len() {
        assert!(he3[i] > he3[i - 1], "he3 flow at {}", series.values[i]);
        assert!(reservoir[i] > reservoir[i - 1], "reservoir flow at {}", series.values[i]);
    }
}

#[test]
fn cold_interface_zeroes_superfluid_outputs() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let inputs = SourceInputs::from_parameters(&ParameterSet::default());
    let root = StateVector {
        he3_flow: 1e-4,
        pot_temperature: 1.4,
        he4_temperature: 0.7,
    };

    let mut diagnostics = Diagnostics::new();
    let result = model.expand(&inputs, &root, &mut diagnostics).expect("expand");
    assert_eq!(result.he_ii_vapor_pressure, 0.0);
    assert_eq!(result.he_ii_pressure_head, 0.0);
    assert_eq!(result.t_he_ii, 0.0);
    assert_eq!(result.t_4he, 0.7);
    assert!(result.t_3he > 0.0);
    assert!(diagnostics.contains(DiagnosticKind::SuperfluidBranchInapplicable));
}

#[test]
fn no_beam_falls_below_superfluid_range() {
    let boiling = boiling_curve();
    let model = SourceModel::with_correlations(&boiling);
    let params = ParameterSet::default()
        .with_value(ParameterId::BeamHeating, 0.0)
        .expect("in range");
    let report = model.solve(&params).expect("solve");

    assert!(report.result.t_4he < 0.8, "T_4He = {}", report.result.t_4he);
    assert_eq!(report.result.t_he_ii, 0.0);
    assert!(report.diagnostics.contains(DiagnosticKind::SuperfluidBranchInapplicable));
}
