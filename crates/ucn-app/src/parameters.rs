//! The parameter table: every physical input of the source model with its
//! value, valid range and display unit.
//!
//! A [`ParameterSet`] always holds all [`ParameterId::ALL`] entries with
//! finite values inside their ranges. Files use the same schema as
//! `ucn params` prints:
//!
//! ```yaml
//! Beam heating:
//!   value: 8.1
//!   range: [0.0, 10.0]
//!   unit: W
//! ```

use crate::error::{AppError, AppResult};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a recognised parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterId {
    He3PumpingSpeed,
    HePumpingSpeed,
    PumpInletTemperature,
    He3InletPressure,
    BeamHeating,
    StaticHeat,
    He3PressureDrop,
    HePressureDrop,
    ChannelDiameter,
    ChannelLength,
    Hex1Length,
    Hex1FinHeight,
    Hex1FinPitch,
    HeIIOverfill,
    HeReservoirPressure,
    OneKPotInletTemperature,
    HeReservoirInletTemperature,
    IsopureFlow,
    IsopureInletTemperature,
    IsopurePressure,
}

impl ParameterId {
    /// All parameters in table order.
    pub const ALL: [ParameterId; 20] = [
        ParameterId::He3PumpingSpeed,
        ParameterId::HePumpingSpeed,
        ParameterId::PumpInletTemperature,
        ParameterId::He3InletPressure,
        ParameterId::BeamHeating,
        ParameterId::StaticHeat,
        ParameterId::He3PressureDrop,
        ParameterId::HePressureDrop,
        ParameterId::ChannelDiameter,
        ParameterId::ChannelLength,
        ParameterId::Hex1Length,
        ParameterId::Hex1FinHeight,
        ParameterId::Hex1FinPitch,
        ParameterId::HeIIOverfill,
        ParameterId::HeReservoirPressure,
        ParameterId::OneKPotInletTemperature,
        ParameterId::HeReservoirInletTemperature,
        ParameterId::IsopureFlow,
        ParameterId::IsopureInletTemperature,
        ParameterId::IsopurePressure,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Name used in parameter files and plot labels.
    pub fn name(self) -> &'static str {
        self.table_entry().0
    }

    /// The built-in table entry.
    pub fn default_parameter(self) -> Parameter {
        let (_, value, min, max, unit) = self.table_entry();
        Parameter {
            value,
            range: [min, max],
            unit: unit.to_string(),
        }
    }

    fn table_entry(self) -> (&'static str, f64, f64, f64, &'static str) {
        match self {
            ParameterId::He3PumpingSpeed => ("3He pumping speed", 5000.0, 300.0, 10_000.0, "m³/h"),
            ParameterId::HePumpingSpeed => ("He pumping speed", 2000.0, 500.0, 5000.0, "m³/h"),
            ParameterId::PumpInletTemperature => ("Pump inlet temperature", 290.0, 100.0, 300.0, "K"),
            ParameterId::He3InletPressure => ("3He inlet pressure", 50_000.0, 50_000.0, 100_000.0, "Pa"),
            ParameterId::BeamHeating => ("Beam heating", 8.1, 0.0, 10.0, "W"),
            ParameterId::StaticHeat => ("Static heat", 1.0, 0.1, 2.0, "W"),
            ParameterId::He3PressureDrop => ("3He pressure drop", 200.0, 0.0, 1000.0, "Pa"),
            ParameterId::HePressureDrop => ("He pressure drop", 200.0, 0.0, 1000.0, "Pa"),
            ParameterId::ChannelDiameter => ("Channel diameter", 0.148, 0.1, 0.2, "m"),
            ParameterId::ChannelLength => ("Channel length", 2.5, 1.0, 4.0, "m"),
            ParameterId::Hex1Length => ("HEX1 length", 0.6, 0.1, 0.6, "m"),
            ParameterId::Hex1FinHeight => ("HEX1 fin height", 0.001, 0.0, 0.003, "m"),
            ParameterId::Hex1FinPitch => ("HEX1 fin pitch", 0.002, 0.0005, 0.005, "m"),
            ParameterId::HeIIOverfill => ("HeII overfill", 0.05, 0.01, 0.2, "m"),
            ParameterId::HeReservoirPressure => ("He reservoir pressure", 1.2e5, 0.9e5, 1.5e5, "Pa"),
            ParameterId::OneKPotInletTemperature => ("1K pot inlet temperature", 2.8, 2.0, 4.0, "K"),
            ParameterId::HeReservoirInletTemperature => {
                ("He reservoir inlet temperature", 8.0, 6.0, 12.0, "K")
            }
            ParameterId::IsopureFlow => ("Isopure He flow", 0.0, 0.0, 0.0, "kg/s"),
            ParameterId::IsopureInletTemperature => {
                ("Isopure He inlet temperature", 20.0, 10.0, 40.0, "K")
            }
            ParameterId::IsopurePressure => ("Isopure He pressure", 1e4, 1e3, 5e4, "Pa"),
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        ParameterId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| AppError::UnknownParameter {
                name: s.to_string(),
            })
    }
}

/// One table entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub value: f64,
    /// Inclusive `[min, max]`.
    pub range: [f64; 2],
    /// Display unit.
    pub unit: String,
}

impl Parameter {
    pub fn min(&self) -> f64 {
        self.range[0]
    }

    pub fn max(&self) -> f64 {
        self.range[1]
    }

    fn check(&self, id: ParameterId) -> AppResult<()> {
        let [min, max] = self.range;
        let valid = self.value.is_finite()
            && min.is_finite()
            && max.is_finite()
            && min <= max
            && (min..=max).contains(&self.value);
        if valid {
            Ok(())
        } else {
            Err(AppError::ParameterOutOfRange {
                name: id.name().to_string(),
                value: self.value,
                min,
                max,
            })
        }
    }
}

/// A complete, validated parameter table.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    entries: Vec<Parameter>,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            entries: ParameterId::ALL
                .iter()
                .map(|id| id.default_parameter())
                .collect(),
        }
    }
}

impl ParameterSet {
    /// Build from name-keyed entries, rejecting unknown and missing names
    /// and out-of-range values.
    pub fn from_entries(entries: BTreeMap<String, Parameter>) -> AppResult<Self> {
        let mut slots: Vec<Option<Parameter>> = vec![None; ParameterId::ALL.len()];
        for (name, parameter) in entries {
            let id: ParameterId = name.parse()?;
            parameter.check(id)?;
            slots[id.index()] = Some(parameter);
        }

        let entries = ParameterId::ALL
            .iter()
            .zip(slots)
            .map(|(id, slot)| {
                slot.ok_or_else(|| AppError::MissingParameter {
                    name: id.name().to_string(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Load from a YAML or JSON file (chosen by extension, YAML otherwise).
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ParameterFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let format_error = |message: String| AppError::ParameterFileFormat {
            path: path.to_path_buf(),
            message,
        };

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let entries: BTreeMap<String, Parameter> = if is_json {
            serde_json::from_str(&content).map_err(|e| format_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| format_error(e.to_string()))?
        };
        let set = Self::from_entries(entries)?;
        tracing::info!(path = %path.display(), "loaded parameter table");
        Ok(set)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn get(&self, id: ParameterId) -> &Parameter {
        &self.entries[id.index()]
    }

    pub fn value(&self, id: ParameterId) -> f64 {
        self.get(id).value
    }

    /// Set one value, keeping the set valid.
    pub fn set_value(&mut self, id: ParameterId, value: f64) -> AppResult<()> {
        let candidate = Parameter {
            value,
            ..self.get(id).clone()
        };
        candidate.check(id)?;
        self.entries[id.index()] = candidate;
        Ok(())
    }

    /// A copy with one value replaced.
    pub fn with_value(&self, id: ParameterId, value: f64) -> AppResult<Self> {
        let mut copy = self.clone();
        copy.set_value(id, value)?;
        Ok(copy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, &Parameter)> {
        ParameterId::ALL.into_iter().zip(self.entries.iter())
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, parameter) in self.iter() {
            map.serialize_entry(id.name(), parameter)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let set = ParameterSet::default();
        for (id, parameter) in set.iter() {
            assert!(parameter.check(id).is_ok(), "{id}");
        }
        assert_eq!(set.value(ParameterId::He3PumpingSpeed), 5000.0);
        assert_eq!(set.value(ParameterId::BeamHeating), 8.1);
        assert_eq!(set.value(ParameterId::IsopureFlow), 0.0);
    }

    #[test]
    fn names_round_trip() {
        for id in ParameterId::ALL {
            assert_eq!(id.name().parse::<ParameterId>().unwrap(), id);
        }
        assert!("Beam heat".parse::<ParameterId>().is_err());
    }

    #[test]
    fn with_value_rejects_out_of_range() {
        let set = ParameterSet::default();
        let hot = set.with_value(ParameterId::BeamHeating, 10.0).unwrap();
        assert_eq!(hot.value(ParameterId::BeamHeating), 10.0);
        assert_eq!(set.value(ParameterId::BeamHeating), 8.1);

        let err = set.with_value(ParameterId::BeamHeating, 10.5).unwrap_err();
        assert!(matches!(err, AppError::ParameterOutOfRange { .. }));
        assert!(set.with_value(ParameterId::BeamHeating, f64::NAN).is_err());
    }

    #[test]
    fn yaml_keeps_table_order() {
        let yaml = ParameterSet::default().to_yaml().unwrap();
        let first = yaml.find("3He pumping speed").unwrap();
        let last = yaml.find("Isopure He pressure").unwrap();
        assert!(first < last);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_value_accepts_exactly_the_range(index in 0usize..20, frac in -0.5f64..1.5) {
                let id = ParameterId::ALL[index];
                let base = ParameterSet::default();
                let p = base.get(id);
                let value = p.min() + frac * (p.max() - p.min());

                let outcome = base.with_value(id, value);
                if (p.min()..=p.max()).contains(&value) {
                    prop_assert_eq!(outcome.unwrap().value(id), value);
                } else {
                    prop_assert!(outcome.is_err());
                }
            }
        }
    }
}
