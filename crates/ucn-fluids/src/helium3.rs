//! Correlation backend for helium-3.

use crate::error::{FluidError, FluidResult};
use crate::model::He3Properties;
use crate::model::validation::{check_range, validate_density, validate_pressure, validate_temperature};
use crate::saturation::{SaturationCurve, VaporPressureEquation};
use ucn_core::units::{Density, Pressure, SpecEnthalpy, SpecGasConstant, Temperature, k, kgpm3, pa};

pub const CRITICAL_TEMPERATURE_K: f64 = 3.3157;
pub const CRITICAL_PRESSURE_PA: f64 = 114_600.0;
pub const MIN_TEMPERATURE_K: f64 = 0.3;
/// Gas constant over molar mass of He-3 [J/(kg·K)].
pub const GAS_CONSTANT: SpecGasConstant = 2756.7579;

static SATURATION_SEGMENTS: [VaporPressureEquation; 1] = [VaporPressureEquation {
    coefficients: [
        1.053447, 0.980106, 0.676380, 0.372692, 0.151656, -0.002263, 0.006596, 0.088966,
        -0.004770, -0.054943,
    ],
    b: 7.3,
    c: 4.3,
    p_min: 114.0,
    p_max: CRITICAL_PRESSURE_PA,
}];

static SATURATION: SaturationCurve = SaturationCurve {
    segments: &SATURATION_SEGMENTS,
    t_min: MIN_TEMPERATURE_K,
    t_max: CRITICAL_TEMPERATURE_K,
    what: "He-3 saturation",
};

/// Helium-3 property backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Helium3;

impl Helium3 {
    pub fn new() -> Self {
        Self
    }

    fn check_saturated(t: f64) -> FluidResult<()> {
        check_range(t, MIN_TEMPERATURE_K, CRITICAL_TEMPERATURE_K, "He-3 saturation temperature")
    }

    fn liquid_enthalpy(t: f64) -> f64 {
        650.0 * t * t
    }

    /// Ideal-gas enthalpy with a correction for the non-ideal vapor near Tc.
    fn gas_enthalpy(t: f64) -> f64 {
        let reduced = t / CRITICAL_TEMPERATURE_K;
        let departure = if reduced <= 1.0 {
            22_536.0 * reduced.powi(8)
        } else {
            22_536.0 * reduced.powi(-8)
        };
        6830.0 + 2.5 * GAS_CONSTANT * t - departure
    }

    fn liquid_density(t: f64) -> f64 {
        let reduced = (1.0 - t / CRITICAL_TEMPERATURE_K).max(0.0);
        41.4 + 40.6 * reduced.powf(0.35)
    }
}

impl He3Properties for Helium3 {
    fn min_temperature(&self) -> Temperature {
        k(MIN_TEMPERATURE_K)
    }

    fn gas_constant(&self) -> SpecGasConstant {
        GAS_CONSTANT
    }

    fn saturation_temperature(&self, p: Pressure) -> FluidResult<Temperature> {
        SATURATION.temperature(p.value).map(k)
    }

    fn saturation_pressure(&self, t: Temperature) -> FluidResult<Pressure> {
        SATURATION.pressure(t.value).map(pa)
    }

    fn density(&self, p: Pressure, t: Temperature) -> FluidResult<Density> {
        validate_pressure(p)?;
        validate_temperature(t)?;
        let (p, t) = (p.value, t.value);
        if t < MIN_TEMPERATURE_K {
            return Err(FluidError::OutOfRange {
                what: "He-3 temperature",
                value: t,
            });
        }
        if t < CRITICAL_TEMPERATURE_K && p > SATURATION.pressure(t)? {
            return Ok(kgpm3(Self::liquid_density(t)));
        }
        Ok(kgpm3(p / (GAS_CONSTANT * t)))
    }

    fn enthalpy(&self, rho: Density, t: Temperature) -> FluidResult<SpecEnthalpy> {
        validate_density(rho)?;
        validate_temperature(t)?;
        let t = t.value;
        if t >= CRITICAL_TEMPERATURE_K {
            return Ok(Self::gas_enthalpy(t));
        }
        Self::check_saturated(t)?;

        let rho_liquid = Self::liquid_density(t);
        let rho_vapor = SATURATION.pressure(t)? / (GAS_CONSTANT * t);
        let rho = rho.value;
        if rho >= rho_liquid {
            return Ok(Self::liquid_enthalpy(t));
        }
        if rho <= rho_vapor {
            return Ok(Self::gas_enthalpy(t));
        }

        // Vapor mass fraction from the lever rule on specific volume
        let quality = (1.0 / rho - 1.0 / rho_liquid) / (1.0 / rho_vapor - 1.0 / rho_liquid);
        Ok((1.0 - quality) * Self::liquid_enthalpy(t) + quality * Self::gas_enthalpy(t))
    }

    fn saturated_liquid_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        Self::check_saturated(t.value)?;
        Ok(Self::liquid_enthalpy(t.value))
    }

    fn saturated_vapor_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        Self::check_saturated(t.value)?;
        Ok(Self::gas_enthalpy(t.value))
    }
}
