//! ucn-components: physical sub-models of the UCN source cooling loop.
//!
//! Each function is a stateless relation evaluated through the property
//! oracles of `ucn-fluids`:
//! - `cooling`: enthalpy-balance loads and flows
//! - `evaporation`: bath boil-off and throttled feed flows
//! - `pumping`: bath temperatures set by a pumping line
//! - `shields`: 20 K / 100 K shield coolant flows
//! - `hex1`: He-3 boiling on the finned exchanger and the Kapitza boundary
//! - `channel`: Gorter-Mellink conduction along the He-II channel
//!
//! Documented fallbacks (no boiling data, floored conductivity) are recorded
//! in a [`ucn_core::Diagnostics`] collector; every other property failure is
//! returned as a [`ComponentError`].

pub mod channel;
pub mod common;
pub mod cooling;
pub mod error;
pub mod evaporation;
pub mod hex1;
pub mod pumping;
pub mod shields;

pub use channel::{HeIIChannel, he_ii_temperature};
pub use common::Stream;
pub use cooling::{cooling_flow, cooling_load, he3_cooling_load};
pub use error::{ComponentError, ComponentResult};
pub use evaporation::{he3_valve_flow, one_k_pot_evaporation, reservoir_evaporation};
pub use hex1::{FinnedTube, hex1_temperature, kapitza_temperature};
pub use pumping::{PumpingLine, he3_temperature, one_k_pot_temperature};
pub use shields::{ShieldFlows, shield_flows};
