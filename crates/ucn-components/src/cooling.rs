//! Enthalpy-balance cooling loads and flows.
//!
//! `cooling_load` and `cooling_flow` share one argument order: the stream
//! enters at `t_in` and leaves at `t_out`, so the load is positive when
//! `t_in > t_out`. Both clamp `t_out` to the lowest He-4 temperature the
//! oracle accepts, which keeps them exact inverses of each other.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use ucn_core::units::{MassRate, Power, Pressure, Temperature, k, kgps, watts};
use ucn_fluids::{He3Properties, He4Properties};

fn he4_enthalpy_drop(
    he4: &dyn He4Properties,
    p: Pressure,
    t_in: Temperature,
    t_out: Temperature,
) -> ComponentResult<f64> {
    let t_out = k(t_out.value.max(he4.min_temperature().value));
    let dh = he4.enthalpy(p, t_in)? - he4.enthalpy(p, t_out)?;
    check_finite(dh, "He-4 enthalpy difference")
}

/// Power needed to cool a He-4 stream from `t_in` to `t_out` at pressure `p`.
pub fn cooling_load(
    he4: &dyn He4Properties,
    flow: MassRate,
    p: Pressure,
    t_in: Temperature,
    t_out: Temperature,
) -> ComponentResult<Power> {
    if flow.value == 0.0 {
        return Ok(watts(0.0));
    }
    let dh = he4_enthalpy_drop(he4, p, t_in, t_out)?;
    Ok(watts(flow.value * dh))
}

/// He-4 flow that absorbs `load` when warming/cooling between `t_in` and
/// `t_out`; the inverse of [`cooling_load`].
pub fn cooling_flow(
    he4: &dyn He4Properties,
    load: Power,
    p: Pressure,
    t_in: Temperature,
    t_out: Temperature,
) -> ComponentResult<MassRate> {
    let dh = he4_enthalpy_drop(he4, p, t_in, t_out)?;
    if dh == 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "zero enthalpy difference in cooling flow",
        });
    }
    Ok(kgps(check_finite(load.value / dh, "cooling flow")?))
}

/// Power needed to cool a He-3 stream from `t_in` to `t_out` at pressure `p`.
///
/// Both ends use the He-3 enthalpy at the density the stream has at (p, T).
pub fn he3_cooling_load(
    he3: &dyn He3Properties,
    flow: MassRate,
    p: Pressure,
    t_in: Temperature,
    t_out: Temperature,
) -> ComponentResult<Power> {
    let h_in = he3.enthalpy(he3.density(p, t_in)?, t_in)?;
    let h_out = he3.enthalpy(he3.density(p, t_out)?, t_out)?;
    let load = check_finite(flow.value * (h_in - h_out), "He-3 cooling load")?;
    Ok(watts(load))
}
