//! Evaporation rates of the saturated baths.
//!
//! Each bath absorbs a heat load by boiling off liquid. When the bath is fed
//! through a throttle, only the liquid fraction of the flashed feed can boil,
//! so the required feed is the boil-off divided by that fraction.

use crate::common::{Stream, check_finite, liquid_fraction};
use crate::cooling::{cooling_load, he3_cooling_load};
use crate::error::ComponentResult;
use ucn_core::units::{MassRate, Power, Pressure, Temperature, kgps};
use ucn_fluids::{He3Properties, He4Properties};

/// Heat load of the He-3 supply and the isopure stream when both are cooled
/// to `t_bath`.
fn precooling_load(
    he4: &dyn He4Properties,
    he3: &dyn He3Properties,
    he3_supply: &Stream,
    isopure: &Stream,
    t_bath: Temperature,
) -> ComponentResult<Power> {
    let he3_load = he3_cooling_load(
        he3,
        he3_supply.flow,
        he3_supply.pressure,
        he3_supply.inlet_temperature,
        t_bath,
    )?;
    let isopure_load = cooling_load(
        he4,
        isopure.flow,
        isopure.pressure,
        isopure.inlet_temperature,
        t_bath,
    )?;
    Ok(he3_load + isopure_load)
}

/// Boil-off of the LHe reservoir at `reservoir_pressure`.
pub fn reservoir_evaporation(
    he4: &dyn He4Properties,
    he3: &dyn He3Properties,
    he3_supply: &Stream,
    isopure: &Stream,
    reservoir_pressure: Pressure,
) -> ComponentResult<MassRate> {
    let t_res = he4.saturation_temperature(reservoir_pressure)?;
    let load = precooling_load(he4, he3, he3_supply, isopure, t_res)?;
    let flow = load.value / he4.latent_heat(t_res)?;
    Ok(kgps(check_finite(flow, "reservoir evaporation")?))
}

/// He-4 feed the 1K pot needs at `pot_temperature`.
///
/// The pot is filled from the reservoir at (`feed_pressure`,
/// `feed_temperature`) through a throttle.
pub fn one_k_pot_evaporation(
    he4: &dyn He4Properties,
    he3: &dyn He3Properties,
    he3_supply: &Stream,
    isopure: &Stream,
    feed_pressure: Pressure,
    feed_temperature: Temperature,
    pot_temperature: Temperature,
) -> ComponentResult<MassRate> {
    let load = precooling_load(he4, he3, he3_supply, isopure, pot_temperature)?;

    let h_in = he4.enthalpy(feed_pressure, feed_temperature)?;
    let h_vapor = he4.saturated_vapor_enthalpy(pot_temperature)?;
    let h_liquid = he4.saturated_liquid_enthalpy(pot_temperature)?;
    let fraction = liquid_fraction(h_in, h_vapor, h_liquid)?;

    let boil_off = load.value / he4.latent_heat(pot_temperature)?;
    Ok(kgps(check_finite(boil_off / fraction, "1K pot evaporation")?))
}

/// He-3 flow through the Joule-Thomson valve that removes `load` at the
/// He-3 bath temperature `t_bath`.
pub fn he3_valve_flow(
    he3: &dyn He3Properties,
    inlet_temperature: Temperature,
    inlet_pressure: Pressure,
    t_bath: Temperature,
    load: Power,
) -> ComponentResult<MassRate> {
    let h_in = he3.enthalpy(he3.density(inlet_pressure, inlet_temperature)?, inlet_temperature)?;
    let h_vapor = he3.saturated_vapor_enthalpy(t_bath)?;
    let h_liquid = he3.saturated_liquid_enthalpy(t_bath)?;
    let fraction = liquid_fraction(h_in, h_vapor, h_liquid)?;

    let boil_off = load.value / he3.latent_heat(t_bath)?;
    Ok(kgps(check_finite(boil_off / fraction, "He-3 valve flow")?))
}
