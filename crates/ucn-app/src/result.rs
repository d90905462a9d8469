//! The result record of one solve.

use serde::Serialize;
use std::collections::BTreeMap;

/// Every derived quantity of a converged solve, in SI units except the
/// consumptions (L/h of liquid).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SourceResult {
    /// [kg/s]
    pub he3_flow: f64,
    /// [K]
    pub one_k_pot_temperature: f64,
    /// He-4 temperature at HEX1 [K].
    pub t_4he: f64,
    /// [K]
    pub he_reservoir_temperature: f64,
    /// [kg/s]
    pub one_k_pot_flow: f64,
    /// [kg/s]
    pub he_reservoir_flow: f64,
    /// Reservoir plus 1K pot [L/h].
    pub he_consumption: f64,
    /// [kg/s]
    pub shield_flow_20k: f64,
    /// [kg/s]
    pub shield_flow_100k: f64,
    /// Larger shield flow [L/h].
    pub shield_consumption: f64,
    /// He-3 bath temperature [K].
    pub t_3he: f64,
    /// HEX1 copper temperature [K].
    pub t_cu: f64,
    /// [Pa]
    pub he_ii_vapor_pressure: f64,
    /// [Pa]
    pub he_ii_pressure_head: f64,
    /// Warm end of the He-II channel [K].
    pub t_he_ii: f64,
}

impl SourceResult {
    /// Record entries as (name, value) in display order.
    pub fn entries(&self) -> [(&'static str, f64); 15] {
        [
            ("3He flow", self.he3_flow),
            ("1K pot temperature", self.one_k_pot_temperature),
            ("T_4He", self.t_4he),
            ("He reservoir temperature", self.he_reservoir_temperature),
            ("1K pot flow", self.one_k_pot_flow),
            ("He reservoir flow", self.he_reservoir_flow),
            ("He consumption", self.he_consumption),
            ("20K shield flow", self.shield_flow_20k),
            ("100K shield flow", self.shield_flow_100k),
            ("Shield consumption", self.shield_consumption),
            ("T_3He", self.t_3he),
            ("T_Cu", self.t_cu),
            ("HeII vapor pressure", self.he_ii_vapor_pressure),
            ("HeII pressure head", self.he_ii_pressure_head),
            ("T_HeII", self.t_he_ii),
        ]
    }

    /// Name-keyed form of the record.
    pub fn to_record(&self) -> BTreeMap<&'static str, f64> {
        self.entries().into_iter().collect()
    }

    /// Larger of the two shield flows [kg/s].
    pub fn max_shield_flow(&self) -> f64 {
        self.shield_flow_20k.max(self.shield_flow_100k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_has_every_entry() {
        let result = SourceResult {
            he3_flow: 8e-4,
            t_he_ii: 1.08,
            ..SourceResult::default()
        };
        let record = result.to_record();
        assert_eq!(record.len(), 15);
        assert_eq!(record["3He flow"], 8e-4);
        assert_eq!(record["T_HeII"], 1.08);
    }
}
