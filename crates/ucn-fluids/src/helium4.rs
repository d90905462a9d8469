//! Correlation backend for helium-4.
//!
//! Saturation follows the ITS-90 helium-4 vapor-pressure equations (two
//! ranges split at the lambda point). Saturated enthalpies and liquid density
//! are fitted to tabulated data between 0.8 K and the critical point.

use crate::error::{FluidError, FluidResult};
use crate::model::He4Properties;
use crate::model::validation::{check_range, validate_pressure, validate_temperature};
use crate::saturation::{SaturationCurve, VaporPressureEquation};
use ucn_core::units::{
    Density, GmConductivity, Pressure, SpecEnthalpy, SpecGasConstant, Temperature, k, kgpm3, pa,
};

pub const LAMBDA_TEMPERATURE_K: f64 = 2.1768;
pub const LAMBDA_PRESSURE_PA: f64 = 5041.8;
pub const CRITICAL_TEMPERATURE_K: f64 = 5.1953;
pub const CRITICAL_PRESSURE_PA: f64 = 227_460.0;
pub const MIN_TEMPERATURE_K: f64 = 0.8;
pub const GAS_CONSTANT: SpecGasConstant = 2077.1;

/// Ideal monatomic vapor heat capacity.
const CP_VAPOR: f64 = 2.5 * GAS_CONSTANT;

/// Slope of the lambda line dTλ/dP [K/Pa].
const LAMBDA_LINE_SLOPE: f64 = -8.8e-8;

/// Prefactor of the He-II conductivity function [W³/(m⁵·K)].
const GM_PREFACTOR: f64 = 7.7e14;

static SATURATION_SEGMENTS: [VaporPressureEquation; 2] = [
    VaporPressureEquation {
        coefficients: [
            1.392408, 0.527153, 0.166756, 0.050988, 0.026514, 0.001975, -0.017976, 0.005409,
            0.013259, 0.0,
        ],
        b: 5.6,
        c: 2.9,
        p_min: 115.0,
        p_max: LAMBDA_PRESSURE_PA,
    },
    VaporPressureEquation {
        coefficients: [
            3.146631, 1.357655, 0.413923, 0.091159, 0.016349, 0.001826, -0.004325, -0.004973,
            0.0, 0.0,
        ],
        b: 10.3,
        c: 1.9,
        p_min: LAMBDA_PRESSURE_PA,
        p_max: CRITICAL_PRESSURE_PA,
    },
];

static SATURATION: SaturationCurve = SaturationCurve {
    segments: &SATURATION_SEGMENTS,
    t_min: MIN_TEMPERATURE_K,
    t_max: CRITICAL_TEMPERATURE_K,
    what: "He-4 saturation",
};

/// (T [K], h_liquid [J/kg], h_vapor [J/kg]) on the saturation line above Tλ.
const SATURATED_ENTHALPY: [(f64, f64, f64); 9] = [
    (LAMBDA_TEMPERATURE_K, 2900.0, 26204.0),
    (2.5, 4006.0, 27882.0),
    (3.0, 5717.0, 29345.0),
    (3.5, 7429.0, 30500.0),
    (4.0, 9140.0, 30900.0),
    (4.222, 9900.0, 30600.0),
    (4.5, 11000.0, 30400.0),
    (5.0, 14000.0, 27500.0),
    (CRITICAL_TEMPERATURE_K, 20500.0, 20500.0),
];

fn interpolate_saturated(t: f64, pick: impl Fn(&(f64, f64, f64)) -> f64) -> FluidResult<f64> {
    SATURATED_ENTHALPY
        .windows(2)
        .find(|w| w[0].0 <= t && t <= w[1].0)
        .map(|w| {
            let frac = (t - w[0].0) / (w[1].0 - w[0].0);
            pick(&w[0]) + frac * (pick(&w[1]) - pick(&w[0]))
        })
        .ok_or(FluidError::OutOfRange {
            what: "He-4 saturated enthalpy temperature",
            value: t,
        })
}

/// Helium-4 property backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Helium4;

impl Helium4 {
    pub fn new() -> Self {
        Self
    }

    fn check_temperature(t: f64) -> FluidResult<()> {
        check_range(t, MIN_TEMPERATURE_K, CRITICAL_TEMPERATURE_K, "He-4 temperature")
    }

    fn liquid_enthalpy(t: f64) -> FluidResult<f64> {
        Self::check_temperature(t)?;
        if t <= LAMBDA_TEMPERATURE_K {
            Ok(2900.0 * (t / LAMBDA_TEMPERATURE_K).powf(6.6))
        } else {
            interpolate_saturated(t, |row| row.1)
        }
    }

    fn vapor_enthalpy(t: f64) -> FluidResult<f64> {
        Self::check_temperature(t)?;
        if t <= LAMBDA_TEMPERATURE_K {
            Ok(14900.0 + CP_VAPOR * t)
        } else {
            interpolate_saturated(t, |row| row.2)
        }
    }

    fn liquid_density(t: f64) -> FluidResult<f64> {
        Self::check_temperature(t)?;
        if t <= LAMBDA_TEMPERATURE_K {
            Ok(145.1 + (t / LAMBDA_TEMPERATURE_K).powi(6))
        } else {
            let reduced = (CRITICAL_TEMPERATURE_K - t) / (CRITICAL_TEMPERATURE_K - LAMBDA_TEMPERATURE_K);
            Ok(69.6 + 76.5 * reduced.powf(0.36))
        }
    }

    /// Compressed-liquid enthalpy: saturated liquid plus the flow work of the
    /// excess pressure.
    fn compressed_liquid_enthalpy(p: f64, t: f64) -> FluidResult<f64> {
        let p_sat = SATURATION.pressure(t)?;
        Ok(Self::liquid_enthalpy(t)? + (p - p_sat) / Self::liquid_density(t)?)
    }
}

impl He4Properties for Helium4 {
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

    fn enthalpy(&self, p: Pressure, t: Temperature) -> FluidResult<SpecEnthalpy> {
        validate_pressure(p)?;
        validate_temperature(t)?;
        let (p, t) = (p.value, t.value);
        if t < MIN_TEMPERATURE_K {
            return Err(FluidError::OutOfRange {
                what: "He-4 temperature",
                value: t,
            });
        }

        if p < CRITICAL_PRESSURE_PA {
            let t_sat = SATURATION.temperature(p)?;
            if t < t_sat {
                return Self::compressed_liquid_enthalpy(p, t);
            }
            return Ok(Self::vapor_enthalpy(t_sat)? + CP_VAPOR * (t - t_sat));
        }

        if t < CRITICAL_TEMPERATURE_K {
            Self::compressed_liquid_enthalpy(p, t)
        } else {
            Ok(Self::vapor_enthalpy(CRITICAL_TEMPERATURE_K)? + CP_VAPOR * (t - CRITICAL_TEMPERATURE_K))
        }
    }

    fn saturated_liquid_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        Self::liquid_enthalpy(t.value)
    }

    fn saturated_vapor_enthalpy(&self, t: Temperature) -> FluidResult<SpecEnthalpy> {
        Self::vapor_enthalpy(t.value)
    }

    fn saturated_liquid_density(&self, t: Temperature) -> FluidResult<Density> {
        Self::liquid_density(t.value).map(kgpm3)
    }

    fn gm_conductivity(&self, p: Pressure, t: Temperature) -> FluidResult<GmConductivity> {
        validate_pressure(p)?;
        Self::check_temperature(t.value)?;
        let t_lambda = LAMBDA_TEMPERATURE_K + LAMBDA_LINE_SLOPE * (p.value - LAMBDA_PRESSURE_PA);
        let reduced = (t.value / t_lambda).powf(5.7);
        Ok(GM_PREFACTOR * (reduced * (1.0 - reduced)).powi(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_boiling_point() {
        let he4 = Helium4::new();
        let t = he4.saturation_temperature(pa(101_325.0)).unwrap();
        assert!((t.value - 4.222).abs() < 0.01, "T_nbp = {}", t.value);
    }

    #[test]
    fn lambda_point_is_continuous() {
        let he4 = Helium4::new();
        let t = he4.saturation_temperature(pa(LAMBDA_PRESSURE_PA)).unwrap();
        assert!((t.value - LAMBDA_TEMPERATURE_K).abs() < 2e-3);

        let below = he4.saturated_liquid_enthalpy(k(LAMBDA_TEMPERATURE_K - 1e-9)).unwrap();
        let above = he4.saturated_liquid_enthalpy(k(LAMBDA_TEMPERATURE_K + 1e-9)).unwrap();
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn saturation_round_trip() {
        let he4 = Helium4::new();
        for &t in &[0.9, 1.2, 1.8, 2.5, 4.2, 5.0] {
            let p = he4.saturation_pressure(k(t)).unwrap();
            let back = he4.saturation_temperature(p).unwrap();
            assert!((back.value - t).abs() < 1e-9, "T={t} back={}", back.value);
        }
    }

    #[test]
    fn latent_heat_positive_below_critical() {
        let he4 = Helium4::new();
        for &t in &[0.8, 1.5, 2.0, 3.0, 4.2, 5.0] {
            let latent = he4.latent_heat(k(t)).unwrap();
            assert!(latent > 0.0, "L({t}) = {latent}");
        }
    }

    #[test]
    fn enthalpy_rises_with_temperature() {
        let he4 = Helium4::new();
        let p = pa(1.2e5);
        let mut last = f64::NEG_INFINITY;
        for &t in &[1.0, 2.0, 3.0, 4.0, 4.4, 10.0, 100.0, 300.0] {
            let h = he4.enthalpy(p, k(t)).unwrap();
            assert!(h > last, "h({t}) = {h} <= {last}");
            last = h;
        }
    }

    #[test]
    fn conductivity_vanishes_above_lambda() {
        let he4 = Helium4::new();
        let p = pa(100.0);
        assert!(he4.gm_conductivity(p, k(1.8)).unwrap() > 0.0);
        assert!(he4.gm_conductivity(p, k(2.3)).unwrap() <= 0.0);
    }

    #[test]
    fn below_minimum_is_out_of_range() {
        let he4 = Helium4::new();
        assert!(matches!(
            he4.saturation_pressure(k(0.7)),
            Err(FluidError::OutOfRange { .. })
        ));
        assert!(he4.enthalpy(pa(1e4), k(0.5)).is_err());
        assert!(he4.saturated_liquid_density(k(6.0)).is_err());
    }
}
