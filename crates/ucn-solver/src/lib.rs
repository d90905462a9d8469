//! Nonlinear root finding and ODE integration for the UCN source model.
//!
//! The steady-state balance is a small dense system without an analytic
//! Jacobian, so the root finder is a derivative-free hybrid Powell method:
//! forward-difference Jacobian, dogleg trust-region steps and Broyden rank-one
//! updates between Jacobian refreshes. The He-II channel profile is a scalar
//! ODE integrated with fixed-step RK4.

pub mod error;
pub mod hybrid;
pub mod integrator;
pub mod jacobian;

pub use error::{SolverError, SolverResult};
pub use hybrid::{HybridConfig, HybridResult, hybrid_solve};
pub use integrator::{Integrator, RK4, integrate};
pub use jacobian::finite_difference_jacobian;
