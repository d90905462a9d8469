//! The coupled equation set of the source.
//!
//! Three unknowns close the loop: the He-3 flow, the 1K-pot temperature and
//! the He-4 temperature at HEX1. Each residual is the value the sub-models
//! derive from a guess minus the guess itself, so a root is a fixed point of
//! the loop.

use crate::error::AppResult;
use crate::parameters::{ParameterId, ParameterSet};
use nalgebra::DVector;
use ucn_components::{
    FinnedTube, HeIIChannel, PumpingLine, Stream, cooling_load, he3_temperature, he3_valve_flow,
    hex1_temperature, kapitza_temperature, one_k_pot_evaporation, one_k_pot_temperature,
};
use ucn_core::Diagnostics;
use ucn_core::units::{Length, Power, Pressure, Temperature, k, kgps, m, m3ph, pa, watts};
use ucn_fluids::{BoilingCurve, He3Properties, He4Properties, Helium3, Helium4};

/// Guess or solution of the coupled unknowns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateVector {
    /// He-3 flow [kg/s].
    pub he3_flow: f64,
    /// 1K-pot temperature [K].
    pub pot_temperature: f64,
    /// He-4 temperature at HEX1 [K].
    pub he4_temperature: f64,
}

impl StateVector {
    pub fn to_vector(self) -> DVector<f64> {
        DVector::from_vec(vec![self.he3_flow, self.pot_temperature, self.he4_temperature])
    }

    pub fn from_slice(x: &[f64]) -> Self {
        Self {
            he3_flow: x[0],
            pot_temperature: x[1],
            he4_temperature: x[2],
        }
    }
}

/// Typed view of a [`ParameterSet`].
#[derive(Clone, Copy, Debug)]
pub struct SourceInputs {
    pub he3_line: PumpingLine,
    pub he4_line: PumpingLine,
    pub he3_inlet_pressure: Pressure,
    pub beam_heating: Power,
    pub static_heat: Power,
    pub hex1: FinnedTube,
    pub channel: HeIIChannel,
    pub overfill: Length,
    pub reservoir_pressure: Pressure,
    pub pot_inlet_temperature: Temperature,
    pub reservoir_inlet_temperature: Temperature,
    /// Isopure stream; `inlet_temperature` is its temperature entering the
    /// cryostat.
    pub isopure: Stream,
}

impl SourceInputs {
    pub fn from_parameters(params: &ParameterSet) -> Self {
        let v = |id| params.value(id);
        let pump_inlet = k(v(ParameterId::PumpInletTemperature));
        let diameter = m(v(ParameterId::ChannelDiameter));
        Self {
            he3_line: PumpingLine {
                speed: m3ph(v(ParameterId::He3PumpingSpeed)),
                inlet_temperature: pump_inlet,
                pressure_drop: pa(v(ParameterId::He3PressureDrop)),
            },
            he4_line: PumpingLine {
                speed: m3ph(v(ParameterId::HePumpingSpeed)),
                inlet_temperature: pump_inlet,
                pressure_drop: pa(v(ParameterId::HePressureDrop)),
            },
            he3_inlet_pressure: pa(v(ParameterId::He3InletPressure)),
            beam_heating: watts(v(ParameterId::BeamHeating)),
            static_heat: watts(v(ParameterId::StaticHeat)),
            hex1: FinnedTube {
                length: m(v(ParameterId::Hex1Length)),
                diameter,
                fin_height: m(v(ParameterId::Hex1FinHeight)),
                fin_pitch: m(v(ParameterId::Hex1FinPitch)),
            },
            channel: HeIIChannel {
                length: m(v(ParameterId::ChannelLength)),
                diameter,
            },
            overfill: m(v(ParameterId::HeIIOverfill)),
            reservoir_pressure: pa(v(ParameterId::HeReservoirPressure)),
            pot_inlet_temperature: k(v(ParameterId::OneKPotInletTemperature)),
            reservoir_inlet_temperature: k(v(ParameterId::HeReservoirInletTemperature)),
            isopure: Stream {
                flow: kgps(v(ParameterId::IsopureFlow)),
                pressure: pa(v(ParameterId::IsopurePressure)),
                inlet_temperature: k(v(ParameterId::IsopureInletTemperature)),
            },
        }
    }

    /// He-3 supply stream of `flow` entering at `inlet_temperature`.
    pub fn he3_supply(&self, flow: f64, inlet_temperature: Temperature) -> Stream {
        Stream {
            flow: kgps(flow),
            pressure: self.he3_inlet_pressure,
            inlet_temperature,
        }
    }

    /// Isopure stream entering at `inlet_temperature`.
    pub fn isopure_from(&self, inlet_temperature: Temperature) -> Stream {
        Stream {
            inlet_temperature,
            ..self.isopure
        }
    }
}

/// The source model: property oracles and boiling data, shared read-only by
/// every solve.
#[derive(Clone, Copy)]
pub struct SourceModel<'a> {
    pub he4: &'a dyn He4Properties,
    pub he3: &'a dyn He3Properties,
    pub boiling: &'a BoilingCurve,
}

impl<'a> SourceModel<'a> {
    pub fn new(
        he4: &'a dyn He4Properties,
        he3: &'a dyn He3Properties,
        boiling: &'a BoilingCurve,
    ) -> Self {
        Self { he4, he3, boiling }
    }

    /// Model using the built-in correlation backends.
    pub fn with_correlations(boiling: &'a BoilingCurve) -> Self {
        Self::new(&Helium4, &Helium3, boiling)
    }

    /// Heat load on HEX1: beam, static heat and the isopure stream cooled
    /// from the 1K pot to the He-II.
    pub fn heat_load(
        &self,
        inputs: &SourceInputs,
        pot_temperature: Temperature,
        he4_temperature: Temperature,
    ) -> AppResult<Power> {
        let isopure = cooling_load(
            self.he4,
            inputs.isopure.flow,
            inputs.isopure.pressure,
            pot_temperature,
            he4_temperature,
        )?;
        Ok(inputs.beam_heating + inputs.static_heat + isopure)
    }

    /// Residuals `derived - guessed` for the three unknowns.
    pub fn residual(
        &self,
        inputs: &SourceInputs,
        x: &StateVector,
        diagnostics: &mut Diagnostics,
    ) -> AppResult<[f64; 3]> {
        let t_pot = k(x.pot_temperature);
        let load = self.heat_load(inputs, t_pot, k(x.he4_temperature))?;

        let t_he3 = he3_temperature(self.he3, kgps(x.he3_flow), &inputs.he3_line)?;
        let he3_flow = he3_valve_flow(self.he3, t_pot, inputs.he3_inlet_pressure, t_he3, load)?;

        let t_res = self.he4.saturation_temperature(inputs.reservoir_pressure)?;
        let pot_flow = one_k_pot_evaporation(
            self.he4,
            self.he3,
            &inputs.he3_supply(x.he3_flow, inputs.pot_inlet_temperature),
            &inputs.isopure_from(t_res),
            inputs.reservoir_pressure,
            inputs.pot_inlet_temperature,
            t_pot,
        )?;
        let pot_temperature = one_k_pot_temperature(self.he4, pot_flow, &inputs.he4_line)?;

        let t_cu = hex1_temperature(self.boiling, t_he3, &inputs.hex1, load, diagnostics)?;
        let he4_temperature = kapitza_temperature(t_cu, &inputs.hex1, load)?;

        Ok([
            he3_flow.value - x.he3_flow,
            pot_temperature.value - x.pot_temperature,
            he4_temperature.value - x.he4_temperature,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucn_fluids::BoilingSample;

    fn wide_curve() -> BoilingCurve {
        let points = [(0.3, 0.1), (0.3, 1e5), (2.5, 0.1), (2.5, 1e5), (1.0, 100.0)];
        let samples: Vec<BoilingSample> = points
            .iter()
            .map(|&(t, q)| BoilingSample {
                bath_temperature: t,
                heat_flux: q,
                delta_t: 0.02,
            })
            .collect();
        BoilingCurve::from_samples(&samples).unwrap()
    }

    #[test]
    fn inputs_follow_parameters() {
        let params = ParameterSet::default()
            .with_value(ParameterId::ChannelDiameter, 0.12)
            .unwrap();
        let inputs = SourceInputs::from_parameters(&params);
        assert_eq!(inputs.hex1.diameter.value, 0.12);
        assert_eq!(inputs.channel.diameter.value, 0.12);
        assert!((inputs.he3_line.speed.value - 5000.0 / 3600.0).abs() < 1e-12);
    }

    #[test]
    fn heat_load_without_isopure_is_beam_plus_static() {
        let curve = wide_curve();
        let model = SourceModel::with_correlations(&curve);
        let inputs = SourceInputs::from_parameters(&ParameterSet::default());
        let q = model.heat_load(&inputs, k(1.7), k(0.5)).unwrap();
        assert!((q.value - 9.1).abs() < 1e-12);
    }

    #[test]
    fn residual_is_finite_at_initial_guess() {
        let curve = wide_curve();
        let model = SourceModel::with_correlations(&curve);
        let inputs = SourceInputs::from_parameters(&ParameterSet::default());
        let x = StateVector {
            he3_flow: 0.002,
            pot_temperature: 1.8,
            he4_temperature: 1.0,
        };
        let mut diag = Diagnostics::new();
        let r = model.residual(&inputs, &x, &mut diag).unwrap();
        assert!(r.iter().all(|v| v.is_finite()));
        // a 2 g/s guess is far more than 9.1 W needs
        assert!(r[0] < 0.0);
    }

    #[test]
    fn negative_flow_guess_is_an_error() {
        let curve = wide_curve();
        let model = SourceModel::with_correlations(&curve);
        let inputs = SourceInputs::from_parameters(&ParameterSet::default());
        let x = StateVector {
            he3_flow: -0.1,
            pot_temperature: 1.8,
            he4_temperature: 1.0,
        };
        let mut diag = Diagnostics::new();
        assert!(model.residual(&inputs, &x, &mut diag).is_err());
    }
}
