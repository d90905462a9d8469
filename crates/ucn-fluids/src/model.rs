//! Helium property oracle traits and validation helpers.

use crate::error::{FluidError, FluidResult};
use ucn_core::units::{
    Density, GmConductivity, Pressure, SpecEnthalpy, SpecGasConstant, Temperature,
};

/// Property oracle for helium-4.
///
/// Implementations must be thread-safe (Send + Sync) so sweep points can be
/// solved in parallel. Every query fails with [`FluidError::OutOfRange`] when
/// the requested state lies outside the backend's validity range.
pub trait He4Properties: Send + Sync {
    /// Lowest temperature the backend accepts.
    fn min_temperature(&self) -> Temperature;

    /// Specific gas constant [J/(kg·K)].
    fn gas_constant(&self) -> SpecGasConstant;

    /// Saturation temperature at pressure `p`.
    fn saturation_temperature(&self, p: Pressure) -> FluidResult<Temperature>;

    /// Saturated vapor pressure at temperature `t`.
    fn saturation_pressure(&self, t: Temperature) -> FluidResult<Pressure>;

    /// Specific enthalpy [J/kg] of the single-phase state (p, t).
    fn enthalpy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn saturated_liquid_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn saturated_vapor_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn saturated_liquid_density(&self, t: Temperature) -> FluidResult<Density>;

    /// He-II heat conductivity function f(p, t) of the Gorter-Mellink law.
    ///
    /// Zero or negative outside the superfluid phase.
    fn gm_conductivity(&self, p: Pressure, t: Temperature) -> FluidResult<GmConductivity>;

    /// Latent heat of vaporization [J/kg] at temperature `t`.
    fn latent_heat(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        let latent = self.saturated_vapor_enthalpy(t)? - self.saturated_liquid_enthalpy(t)?;
        validation::validate_latent_heat(latent)?;
        Ok(latent)
    }
}

/// Property oracle for helium-3.
pub trait He3Properties: Send + Sync {
    fn min_temperature(&self) -> Temperature;

    /// Specific gas constant [J/(kg·K)].
    fn gas_constant(&self) -> SpecGasConstant;

    fn saturation_temperature(&self, p: Pressure) -> FluidResult<Temperature>;

    fn saturation_pressure(&self, t: Temperature) -> FluidResult<Pressure>;

    /// Density of the state (p, t); liquid above the vapor pressure, gas below.
    fn density(&self, p: Pressure, t: Temperature) -> FluidResult<Density>;

    /// Specific enthalpy [J/kg] from density and temperature.
    ///
    /// Inside the two-phase dome the result is the quality-weighted mixture.
    fn enthalpy(&self, rho: Density, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn saturated_liquid_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn saturated_vapor_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy>;

    fn latent_heat(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        let latent = self.saturated_vapor_enthalpy(t)? - self.saturated_liquid_enthalpy(t)?;
        validation::validate_latent_heat(latent)?;
        Ok(latent)
    }
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_latent_heat(latent: f64) -> FluidResult<()> {
        if !latent.is_finite() || latent <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "latent heat must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure `value` lies in `[min, max]`.
    pub fn check_range(value: f64, min: f64, max: f64, what: &'static str) -> FluidResult<()> {
        if !(min..=max).contains(&value) {
            return Err(FluidError::OutOfRange { what, value });
        }
        Ok(())
    }
}
