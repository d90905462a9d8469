//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use ucn_core::numeric::ensure_finite;
use ucn_core::units::{MassRate, Pressure, Temperature};

/// A helium stream entering a heat exchanger or pot.
#[derive(Clone, Copy, Debug)]
pub struct Stream {
    pub flow: MassRate,
    pub pressure: Pressure,
    pub inlet_temperature: Temperature,
}

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Liquid mass fraction after throttling a stream of enthalpy `h_in` into a
/// saturated bath with vapor/liquid enthalpies `h_vapor`/`h_liquid`.
pub fn liquid_fraction(h_in: f64, h_vapor: f64, h_liquid: f64) -> ComponentResult<f64> {
    let span = h_liquid - h_vapor;
    if span == 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "saturated liquid and vapor enthalpies coincide",
        });
    }
    check_finite((h_in - h_vapor) / span, "liquid fraction")
}
