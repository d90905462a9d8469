//! Hybrid Powell root finder (dogleg trust region with Broyden updates).
//!
//! Follows the structure of MINPACK `hybrd`:
//! - the Jacobian is approximated by forward differences at the start and
//!   whenever two consecutive steps fail to reduce the residual enough
//! - every other iteration uses a Broyden rank-one update of the last Jacobian
//! - variables are scaled by the running maximum of the Jacobian column norms
//! - each step is a dogleg between the Gauss-Newton and scaled steepest
//!   descent directions, limited by the trust radius `delta`
//!
//! A residual that cannot be evaluated at a trial point counts as an infinite
//! residual norm, so the step is rejected and the trust region shrinks.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::{DMatrix, DVector};

/// Hybrid solver configuration.
#[derive(Clone, Debug)]
pub struct HybridConfig {
    /// Relative tolerance on the scaled step between iterates.
    pub xtol: f64,
    /// Maximum residual evaluations; `None` means `200·(n+1)`.
    pub max_evaluations: Option<usize>,
    /// Initial trust radius as a multiple of the scaled initial guess norm.
    pub step_bound_factor: f64,
    /// Relative forward-difference step for the Jacobian.
    pub jacobian_step: f64,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            xtol: 1.49012e-8,
            max_evaluations: None,
            step_bound_factor: 100.0,
            jacobian_step: f64::EPSILON.sqrt(),
        }
    }
}

/// Converged root.
#[derive(Clone, Debug)]
pub struct HybridResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of residual evaluations, Jacobian columns included
    pub evaluations: usize,
    /// Number of trust-region steps taken
    pub iterations: usize,
}

/// Reject steps that reduce the residual by less than this fraction of the
/// predicted reduction.
const ACCEPT_RATIO: f64 = 1e-4;

fn scaled_norm(diag: &DVector<f64>, v: &DVector<f64>) -> f64 {
    diag.component_mul(v).norm()
}

fn evaluate<F>(f: &mut F, x: &DVector<f64>) -> Option<DVector<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    match f(x) {
        Ok(v) if v.iter().all(|e| e.is_finite()) => Some(v),
        Ok(_) => {
            tracing::debug!("non-finite residual at trial point");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "residual evaluation failed at trial point");
            None
        }
    }
}

/// Dogleg step for the linear model `f + J p` inside the scaled trust region.
fn dogleg(jac: &DMatrix<f64>, f: &DVector<f64>, diag: &DVector<f64>, delta: f64) -> DVector<f64> {
    let n = diag.len();
    let gauss_newton = jac
        .clone()
        .lu()
        .solve(&(-f.clone()))
        .filter(|p| p.iter().all(|e| e.is_finite()));

    if let Some(p) = &gauss_newton
        && scaled_norm(diag, p) <= delta
    {
        return p.clone();
    }

    // Scaled gradient of ½|f|²
    let gradient = (jac.transpose() * f).component_div(diag);
    let gnorm = gradient.norm();
    if gnorm == 0.0 {
        return gauss_newton.unwrap_or_else(|| DVector::zeros(n));
    }

    let jg = jac * gradient.component_div(diag);
    let jg_norm2 = jg.norm_squared();
    let cauchy_length = if jg_norm2 > 0.0 {
        gnorm * gnorm / jg_norm2
    } else {
        delta / gnorm
    };
    let cauchy = &gradient * (-cauchy_length);
    let cauchy_norm = cauchy.norm();

    let scaled_step = match gauss_newton {
        Some(p) if cauchy_norm < delta => {
            // Walk from the Cauchy point towards Gauss-Newton until |p| = delta
            let d = diag.component_mul(&p) - &cauchy;
            let a = d.norm_squared();
            let b = 2.0 * cauchy.dot(&d);
            let c = cauchy_norm * cauchy_norm - delta * delta;
            let tau = (-b + (b * b - 4.0 * a * c).max(0.0).sqrt()) / (2.0 * a);
            &cauchy + d * tau
        }
        _ => &gradient * (-(delta / gnorm)),
    };
    scaled_step.component_div(diag)
}

/// Solve `f(x) = 0` from `x0`.
///
/// Returns [`SolverError::ConvergenceFailed`] when the iteration stalls, runs
/// out of evaluations, or when the residual cannot be evaluated at `x0`.
pub fn hybrid_solve<F>(
    x0: DVector<f64>,
    mut residual_fn: F,
    config: &HybridConfig,
) -> SolverResult<HybridResult>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x0.len();
    if n == 0 {
        return Err(SolverError::Numeric {
            what: "empty unknown vector".to_string(),
        });
    }
    let max_evaluations = config.max_evaluations.unwrap_or(200 * (n + 1));

    let mut x = x0;
    let mut fx = residual_fn(&x).map_err(|e| SolverError::ConvergenceFailed {
        what: format!("residual cannot be evaluated at the initial guess: {e}"),
    })?;
    if fx.len() != n {
        return Err(SolverError::Numeric {
            what: format!("{} residuals for {} unknowns", fx.len(), n),
        });
    }
    if !fx.iter().all(|e| e.is_finite()) {
        return Err(SolverError::ConvergenceFailed {
            what: "non-finite residual at the initial guess".to_string(),
        });
    }
    let mut fnorm = fx.norm();
    let mut evaluations = 1;
    let mut iterations = 0;

    let converged = |x: DVector<f64>,
                     fnorm: f64,
                     evaluations: usize,
                     iterations: usize|
     -> SolverResult<HybridResult> {
        tracing::debug!(evaluations, iterations, residual_norm = fnorm, "hybrid solver converged");
        Ok(HybridResult {
            x,
            residual_norm: fnorm,
            evaluations,
            iterations,
        })
    };
    if fnorm == 0.0 {
        return converged(x, fnorm, evaluations, iterations);
    }

    let mut diag: Option<DVector<f64>> = None;
    let mut delta = 0.0;
    let mut xnorm = 0.0;
    let mut nslow = 0;

    loop {
        let mut jac = finite_difference_jacobian(&x, &fx, &mut residual_fn, config.jacobian_step)
            .map_err(|e| SolverError::ConvergenceFailed {
                what: format!("Jacobian evaluation failed: {e}"),
            })?;
        evaluations += n;

        let column_norms =
            DVector::from_iterator(n, jac.column_iter().map(|c| c.norm()));
        let scale = match diag.take() {
            None => {
                let d = column_norms.map(|c| if c > 0.0 { c } else { 1.0 });
                xnorm = scaled_norm(&d, &x);
                delta = config.step_bound_factor * xnorm;
                if delta == 0.0 {
                    delta = config.step_bound_factor;
                }
                d
            }
            Some(d) => d.zip_map(&column_norms, f64::max),
        };

        let mut successes = 0;
        let mut failures = 0;

        loop {
            let p = dogleg(&jac, &fx, &scale, delta);
            let pnorm = scaled_norm(&scale, &p);
            if iterations == 0 {
                delta = delta.min(pnorm);
            }

            let x_trial = &x + &p;
            let f_trial = evaluate(&mut residual_fn, &x_trial);
            evaluations += 1;
            let fnorm_trial = f_trial.as_ref().map_or(f64::INFINITY, |f| f.norm());

            let actual_reduction = if fnorm_trial < fnorm {
                1.0 - (fnorm_trial / fnorm).powi(2)
            } else {
                -1.0
            };
            let jp = &jac * &p;
            let linear_norm = (&fx + &jp).norm();
            let predicted_reduction = if linear_norm < fnorm {
                1.0 - (linear_norm / fnorm).powi(2)
            } else {
                0.0
            };
            let ratio = if predicted_reduction > 0.0 {
                actual_reduction / predicted_reduction
            } else {
                0.0
            };

            if ratio < 0.1 {
                successes = 0;
                failures += 1;
                delta *= 0.5;
            } else {
                failures = 0;
                successes += 1;
                if ratio >= 0.5 || successes > 1 {
                    delta = delta.max(pnorm / 0.5);
                }
                if (ratio - 1.0).abs() <= 0.1 {
                    delta = pnorm / 0.5;
                }
            }
            iterations += 1;

            let f_previous = fx.clone();
            if ratio >= ACCEPT_RATIO
                && let Some(f_new) = &f_trial
            {
                x = x_trial;
                fx = f_new.clone();
                fnorm = fnorm_trial;
                xnorm = scaled_norm(&scale, &x);
            }

            nslow = if actual_reduction < 1e-3 { nslow + 1 } else { 0 };

            tracing::debug!(
                iterations,
                evaluations,
                residual_norm = fnorm,
                delta,
                ratio,
                "hybrid step"
            );

            if delta <= config.xtol * xnorm || fnorm == 0.0 {
                return converged(x, fnorm, evaluations, iterations);
            }
            if evaluations >= max_evaluations {
                return Err(SolverError::ConvergenceFailed {
                    what: format!(
                        "maximum evaluations {} reached, residual = {}",
                        max_evaluations, fnorm
                    ),
                });
            }
            if 0.1 * (0.1 * delta).max(pnorm) <= f64::EPSILON * xnorm {
                return Err(SolverError::ConvergenceFailed {
                    what: "xtol is too small, no further improvement possible".to_string(),
                });
            }
            if nslow == 10 {
                return Err(SolverError::ConvergenceFailed {
                    what: format!("iteration is not making good progress, residual = {}", fnorm),
                });
            }

            if failures == 2 {
                break;
            }

            // Broyden rank-one update with the scaled step
            if let Some(f_new) = &f_trial
                && pnorm > 0.0
            {
                let correction = (f_new - &f_previous) - &jp;
                let weights = scale.component_mul(&scale).component_mul(&p) / (pnorm * pnorm);
                jac += correction * weights.transpose();
            }
        }

        diag = Some(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_with<F>(x0: Vec<f64>, f: F) -> SolverResult<HybridResult>
    where
        F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
    {
        hybrid_solve(DVector::from_vec(x0), f, &HybridConfig::default())
    }

    #[test]
    fn linear_system() {
        let result = solve_with(vec![0.0, 0.0], |x| {
            Ok(DVector::from_vec(vec![
                x[0] + 2.0 * x[1] - 3.0,
                3.0 * x[0] - x[1] - 2.0,
            ]))
        })
        .unwrap();

        assert!((result.x[0] - 1.0).abs() < 1e-8);
        assert!((result.x[1] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn rosenbrock_system() {
        let result = solve_with(vec![-1.2, 1.0], |x| {
            Ok(DVector::from_vec(vec![
                10.0 * (x[1] - x[0] * x[0]),
                1.0 - x[0],
            ]))
        })
        .unwrap();

        assert!((result.x[0] - 1.0).abs() < 1e-7);
        assert!((result.x[1] - 1.0).abs() < 1e-7);
        assert!(result.residual_norm < 1e-6);
    }

    #[test]
    fn three_unknowns() {
        // root at (1, 1, 1)
        let result = solve_with(vec![0.5, 0.5, 0.5], |x| {
            Ok(DVector::from_vec(vec![
                x[0] * x[0] + x[1] * x[1] + x[2] * x[2] - 3.0,
                x[0] * x[1] - x[2],
                x[0].exp() - std::f64::consts::E * x[2],
            ]))
        })
        .unwrap();

        for i in 0..3 {
            assert!((result.x[i] - 1.0).abs() < 1e-7, "x[{i}] = {}", result.x[i]);
        }
    }

    #[test]
    fn failed_trial_points_are_rejected() {
        // sqrt(x) - 2 is undefined for x < 0; root at 4
        let result = solve_with(vec![1.0], |x| {
            if x[0] < 0.0 {
                return Err(SolverError::Evaluation {
                    what: "negative argument".into(),
                });
            }
            Ok(DVector::from_element(1, x[0].sqrt() - 2.0))
        })
        .unwrap();

        assert!((result.x[0] - 4.0).abs() < 1e-8);
    }

    #[test]
    fn no_root_reports_failure() {
        let err = solve_with(vec![3.0], |x| Ok(DVector::from_element(1, x[0] * x[0] + 1.0)))
            .unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn initial_guess_failure_is_convergence_failure() {
        let err = solve_with(vec![1.0], |_| {
            Err(SolverError::Evaluation {
                what: "always".into(),
            })
        })
        .unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn evaluation_budget_is_respected() {
        let mut calls = 0;
        let config = HybridConfig {
            max_evaluations: Some(10),
            ..HybridConfig::default()
        };
        let result = hybrid_solve(
            DVector::from_vec(vec![-1.2, 1.0]),
            |x: &DVector<f64>| {
                calls += 1;
                Ok(DVector::from_vec(vec![
                    10.0 * (x[1] - x[0] * x[0]),
                    1.0 - x[0],
                ]))
            },
            &config,
        );
        assert!(result.is_err());
        assert!(calls <= 10 + 2);
    }
}
