//! HEX1: the finned copper heat exchanger between the He-3 bath and the
//! He-II, and the Kapitza boundary on its He-II side.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use std::f64::consts::PI;
use tracing::trace;
use ucn_core::diagnostics::{DiagnosticKind, Diagnostics};
use ucn_core::units::{Area, Length, Power, Temperature, k, m2};
use ucn_fluids::BoilingCurve;

/// Kapitza conductance coefficient for copper to He-II [W/(m²·K⁴)].
pub const KAPITZA_COEFFICIENT: f64 = 900.0;

/// Finned copper tube, He-3 boiling outside, He-II inside.
#[derive(Clone, Copy, Debug)]
pub struct FinnedTube {
    pub length: Length,
    pub diameter: Length,
    pub fin_height: Length,
    pub fin_pitch: Length,
}

impl FinnedTube {
    /// Wetted area on the He-3 side.
    ///
    /// Half the length is bare tube and half fin tips; each fin adds two
    /// annular faces.
    pub fn area(&self) -> Area {
        let (l, d, h) = (self.length.value, self.diameter.value, self.fin_height.value);
        let fins = l / self.fin_pitch.value;
        let base = d * PI * l / 2.0;
        let tips = (d + 2.0 * h) * PI * l / 2.0;
        let faces = ((d / 2.0 + h).powi(2) - (d / 2.0).powi(2)) * PI * fins * 2.0;
        m2(base + tips + faces)
    }

    /// Inner cylindrical area on the He-II side.
    pub fn inner_area(&self) -> Area {
        m2(PI * self.diameter.value * self.length.value)
    }
}

/// Copper wall temperature of HEX1 carrying `load` into a He-3 bath at
/// `t_he3`.
///
/// Outside the measured boiling data the wall is taken at bath temperature
/// and a [`DiagnosticKind::BoilingCurveOutOfRange`] entry is recorded.
pub fn hex1_temperature(
    boiling: &BoilingCurve,
    t_he3: Temperature,
    tube: &FinnedTube,
    load: Power,
    diagnostics: &mut Diagnostics,
) -> ComponentResult<Temperature> {
    if load.value <= 0.0 {
        return Ok(t_he3);
    }
    let area = tube.area().value;
    if !area.is_finite() || area <= 0.0 {
        return Err(ComponentError::InvalidArg {
            what: "HEX1 geometry",
        });
    }
    let flux = check_finite(load.value / area, "HEX1 heat flux")?;
    trace!(t_he3 = t_he3.value, flux, "HEX1 boiling lookup");

    match boiling.delta_t(t_he3.value, flux) {
        Some(dt) => Ok(k(t_he3.value + dt)),
        None => {
            diagnostics.push(
                DiagnosticKind::BoilingCurveOutOfRange,
                format!(
                    "no boiling data at T = {:.4} K, q = {:.4e} W/m²; using bath temperature",
                    t_he3.value, flux
                ),
            );
            Ok(t_he3)
        }
    }
}

/// He-II temperature behind the Kapitza boundary of a wall at `t_cu`.
pub fn kapitza_temperature(
    t_cu: Temperature,
    tube: &FinnedTube,
    load: Power,
) -> ComponentResult<Temperature> {
    let flux = load.value / tube.inner_area().value;
    let conductance = KAPITZA_COEFFICIENT * t_cu.value.powi(3);
    let t = check_finite(t_cu.value + flux / conductance, "Kapitza temperature")?;
    Ok(k(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucn_core::units::{m, watts};
    use ucn_fluids::BoilingSample;

    fn tube() -> FinnedTube {
        FinnedTube {
            length: m(0.6),
            diameter: m(0.148),
            fin_height: m(0.001),
            fin_pitch: m(0.002),
        }
    }

    /// ΔT = 0.01 K everywhere on 0.5..2 K, 1..1e5 W/m².
    fn flat_curve() -> BoilingCurve {
        let corners = [(0.5, 1.0), (0.5, 1e5), (2.0, 1.0), (2.0, 1e5), (1.2, 3e4)];
        let samples: Vec<BoilingSample> = corners
            .iter()
            .map(|&(t, q)| BoilingSample {
                bath_temperature: t,
                heat_flux: q,
                delta_t: 0.01,
            })
            .collect();
        BoilingCurve::from_samples(&samples).unwrap()
    }

    #[test]
    fn area_of_default_geometry() {
        let a = tube().area().value;
        // bare 0.1395, tips 0.1414, 300 fins × 2 faces × 4.68e-4
        assert!((a - 0.5615).abs() < 1e-3, "A = {a}");
    }

    #[test]
    fn superheat_added_to_bath() {
        let mut diag = Diagnostics::new();
        let t = hex1_temperature(&flat_curve(), k(0.9), &tube(), watts(9.1), &mut diag).unwrap();
        assert!((t.value - 0.91).abs() < 1e-9);
        assert!(diag.is_empty());
    }

    #[test]
    fn outside_data_falls_back_to_bath() {
        let mut diag = Diagnostics::new();
        let t = hex1_temperature(&flat_curve(), k(2.5), &tube(), watts(9.1), &mut diag).unwrap();
        assert_eq!(t.value, 2.5);
        assert!(diag.contains(DiagnosticKind::BoilingCurveOutOfRange));
    }

    #[test]
    fn kapitza_step() {
        let t = kapitza_temperature(k(1.0), &tube(), watts(9.1)).unwrap();
        let expected = 1.0 + 9.1 / (PI * 0.148 * 0.6) / 900.0;
        assert!((t.value - expected).abs() < 1e-12);
        assert_eq!(kapitza_temperature(k(1.0), &tube(), watts(0.0)).unwrap().value, 1.0);
    }
}
