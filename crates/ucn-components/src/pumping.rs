//! Bath temperatures set by a pumping line.
//!
//! The pump sees the evaporated gas at its inlet temperature. The ideal-gas
//! law gives the inlet pressure for a given mass flow and volumetric speed;
//! the bath sits at the saturation temperature of that pressure plus the
//! line's pressure drop.

use crate::common::check_finite;
use crate::error::ComponentResult;
use ucn_core::units::{MassRate, Pressure, SpecGasConstant, Temperature, VolumeRate, pa};
use ucn_fluids::{He3Properties, He4Properties};

/// Largest 1K-pot gas flow the pumping relation accepts [kg/s].
pub const MAX_POT_FLOW_KGPS: f64 = 0.1;

/// A pumping line from a bath to a room-temperature pump.
#[derive(Clone, Copy, Debug)]
pub struct PumpingLine {
    /// Volumetric pumping speed.
    pub speed: VolumeRate,
    /// Gas temperature at the pump inlet.
    pub inlet_temperature: Temperature,
    /// Pressure drop between the bath and the pump inlet.
    pub pressure_drop: Pressure,
}

impl PumpingLine {
    /// Bath pressure needed to push `flow` through the line.
    pub fn bath_pressure(&self, flow: f64, gas_constant: SpecGasConstant) -> ComponentResult<Pressure> {
        let inlet = flow * gas_constant * self.inlet_temperature.value / self.speed.value;
        let bath = check_finite(inlet + self.pressure_drop.value, "pumping line pressure")?;
        Ok(pa(bath))
    }
}

/// 1K-pot temperature for an evaporated He-4 flow.
///
/// The flow is clamped to `[0, MAX_POT_FLOW_KGPS]`.
pub fn one_k_pot_temperature(
    he4: &dyn He4Properties,
    flow: MassRate,
    line: &PumpingLine,
) -> ComponentResult<Temperature> {
    let flow = flow.value.clamp(0.0, MAX_POT_FLOW_KGPS);
    let p = line.bath_pressure(flow, he4.gas_constant())?;
    Ok(he4.saturation_temperature(p)?)
}

/// He-3 bath temperature for an evaporated He-3 flow.
pub fn he3_temperature(
    he3: &dyn He3Properties,
    flow: MassRate,
    line: &PumpingLine,
) -> ComponentResult<Temperature> {
    let p = line.bath_pressure(flow.value, he3.gas_constant())?;
    Ok(he3.saturation_temperature(p)?)
}
