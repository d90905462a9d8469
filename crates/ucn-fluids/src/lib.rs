//! ucn-fluids: helium property oracles and the He-3 boiling-curve table.
//!
//! Provides:
//! - `He4Properties` / `He3Properties` oracle traits
//! - Correlation backends (`Helium4`, `Helium3`) built on ITS-90 vapor-pressure
//!   equations and fitted saturated-state data
//! - `BoilingCurve`, the triangulated interpolator over measured He-3
//!   pool-boiling data
//!
//! # Architecture
//!
//! The rest of the workspace talks to helium properties only through the
//! oracle traits, so a tabulated backend can replace the correlations without
//! touching the sub-models. Every oracle call fails with
//! [`FluidError::OutOfRange`] outside its validity range; callers decide
//! whether that is fatal or a documented fallback.
//!
//! # Example
//!
//! ```
//! use ucn_fluids::{He4Properties, Helium4};
//! use ucn_core::units::pa;
//!
//! let he4 = Helium4::new();
//! let t = he4.saturation_temperature(pa(101_325.0)).unwrap();
//! assert!((t.value - 4.22).abs() < 0.01);
//! ```

pub mod boiling;
pub mod error;
pub mod helium3;
pub mod helium4;
pub mod model;
pub mod saturation;

pub use boiling::{BoilingCurve, BoilingSample};
pub use error::{BoilingDataError, FluidError, FluidResult};
pub use helium3::Helium3;
pub use helium4::Helium4;
pub use model::{He3Properties, He4Properties};
