//! Fixed-step integrators for scalar ODEs `dy/dx = f(x, y)`.

use crate::error::{SolverError, SolverResult};

/// Trait for single-step integrators.
pub trait Integrator {
    /// Advance `y` from `x` to `x + h`.
    fn step<F>(&self, f: &mut F, x: f64, y: f64, h: f64) -> f64
    where
        F: FnMut(f64, f64) -> f64;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<F>(&self, f: &mut F, x: f64, y: f64, h: f64) -> f64
    where
        F: FnMut(f64, f64) -> f64,
    {
        let k1 = f(x, y);
        let k2 = f(x + 0.5 * h, y + 0.5 * h * k1);
        let k3 = f(x + 0.5 * h, y + 0.5 * h * k2);
        let k4 = f(x + h, y + h * k3);

        // Combine: y_new = y + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
        y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }
}

/// Integrate from `x0` to `x1` in `steps` equal steps starting at `y0`.
pub fn integrate<I, F>(
    integrator: &I,
    mut f: F,
    x0: f64,
    x1: f64,
    y0: f64,
    steps: usize,
) -> SolverResult<f64>
where
    I: Integrator,
    F: FnMut(f64, f64) -> f64,
{
    if steps == 0 {
        return Err(SolverError::Numeric {
            what: "integration needs at least one step".to_string(),
        });
    }
    let h = (x1 - x0) / steps as f64;
    let mut y = y0;
    for i in 0..steps {
        let x = x0 + i as f64 * h;
        y = integrator.step(&mut f, x, y, h);
        if !y.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("integration diverged at x = {}", x + h),
            });
        }
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_growth() {
        // dy/dx = y, y(0) = 1 -> y(1) = e
        let y = integrate(&RK4, |_, y| y, 0.0, 1.0, 1.0, 100).unwrap();
        assert!((y - std::f64::consts::E).abs() < 1e-9);
    }

    #[test]
    fn zero_rhs_keeps_initial_value() {
        let y = integrate(&RK4, |_, _| 0.0, 0.0, 2.5, 1.7, 200).unwrap();
        assert_eq!(y, 1.7);
    }

    #[test]
    fn cubic_quadrature_is_exact() {
        // dy/dx = 3x², y(0) = 0 -> y(2) = 8; RK4 is exact for cubics
        let y = integrate(&RK4, |x, _| 3.0 * x * x, 0.0, 2.0, 0.0, 4).unwrap();
        assert!((y - 8.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_steps_and_divergence() {
        assert!(integrate(&RK4, |_, y| y, 0.0, 1.0, 1.0, 0).is_err());
        assert!(integrate(&RK4, |_, y| y * y, 0.0, 2.0, 1.0, 10).is_err());
    }
}
