//! Coolant flows of the 20 K and 100 K radiation shields.
//!
//! Both shields are cooled by gas boiled off the reservoir. Their heat loads
//! are fixed apparatus values plus the load of precooling the isopure stream
//! on its way down.

use crate::common::Stream;
use crate::cooling::{cooling_flow, cooling_load};
use crate::error::ComponentResult;
use tracing::debug;
use ucn_core::units::{MassRate, Pressure, k, watts};
use ucn_fluids::He4Properties;

/// Static loads on the 20 K shield [W].
pub const STATIC_LOADS_20K_W: [f64; 5] = [4.3, 0.7, 1.1, 2.0, 6.6];
/// Static loads on the 100 K shield [W].
pub const STATIC_LOADS_100K_W: [f64; 4] = [49.0, 8.9, 5.7, 14.0];

/// Required coolant flow per shield stage.
#[derive(Clone, Copy, Debug)]
pub struct ShieldFlows {
    pub flow_20k: MassRate,
    pub flow_100k: MassRate,
}

impl ShieldFlows {
    /// The larger of the two flows, which sets the reservoir draw.
    pub fn max(&self) -> MassRate {
        if self.flow_20k.value >= self.flow_100k.value {
            self.flow_20k
        } else {
            self.flow_100k
        }
    }
}

/// Coolant flows for both shields with coolant at `coolant_pressure`.
///
/// The 20 K coolant warms from 10 K to 20 K, the 100 K coolant from 30 K to
/// 100 K.
pub fn shield_flows(
    he4: &dyn He4Properties,
    isopure: &Stream,
    coolant_pressure: Pressure,
) -> ComponentResult<ShieldFlows> {
    let isopure_20k = cooling_load(he4, isopure.flow, isopure.pressure, k(100.0), k(20.0))?;
    let isopure_100k = cooling_load(he4, isopure.flow, isopure.pressure, k(300.0), k(100.0))?;

    let load_20k = watts(STATIC_LOADS_20K_W.iter().sum::<f64>()) + isopure_20k;
    let load_100k = watts(STATIC_LOADS_100K_W.iter().sum::<f64>()) + isopure_100k;
    debug!(
        load_20k = load_20k.value,
        load_100k = load_100k.value,
        "shield loads"
    );

    Ok(ShieldFlows {
        flow_20k: cooling_flow(he4, load_20k, coolant_pressure, k(20.0), k(10.0))?,
        flow_100k: cooling_flow(he4, load_100k, coolant_pressure, k(100.0), k(30.0))?,
    })
}
