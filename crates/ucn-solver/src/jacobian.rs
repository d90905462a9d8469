//! Finite difference Jacobian computation.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Compute Jacobian using forward finite differences.
///
/// For each column j, perturbs x[j] by `epsilon·|x[j]|` (or `epsilon` when
/// x[j] is zero) and computes (f(x+e) - f(x))/e. `f_x` is the residual at `x`,
/// already known to the caller.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: &mut F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let m = f_x.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let mut x_perturbed = x.clone();
        let dx = if x[j] == 0.0 {
            epsilon
        } else {
            epsilon * x[j].abs()
        };
        x_perturbed[j] += dx;

        let f_perturbed = f(&x_perturbed)?;
        if f_perturbed.len() != m {
            return Err(SolverError::Numeric {
                what: format!("residual length changed from {} to {}", m, f_perturbed.len()),
            });
        }
        let df = (f_perturbed - f_x) / dx;
        jac.set_column(j, &df);
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let f_x = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &f_x, &mut f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_coupled() {
        // f = (x0*x1, x0 + x1^2), J = [[x1, x0], [1, 2 x1]]
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] * x[1], x[0] + x[1] * x[1]]))
        };

        let x = DVector::from_vec(vec![0.0, 2.0]);
        let f_x = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &f_x, &mut f, 1.5e-8).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
        assert!(jac[(0, 1)].abs() < 1e-5);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn evaluation_error_propagates() {
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] > 1.0 {
                Err(SolverError::Evaluation {
                    what: "outside domain".into(),
                })
            } else {
                Ok(x.clone())
            }
        };
        let x = DVector::from_element(1, 1.0);
        let f_x = f(&x).unwrap();
        assert!(finite_difference_jacobian(&x, &f_x, &mut f, 1e-3).is_err());
    }
}
