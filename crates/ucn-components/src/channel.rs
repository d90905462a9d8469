//! Gorter-Mellink conduction along the He-II channel.
//!
//! In the mutual-friction regime the temperature gradient is
//! `dT/dx = (Q/A)³ / f(P, T)` with the He-II conductivity function `f`.

use crate::error::{ComponentError, ComponentResult};
use std::f64::consts::PI;
use ucn_core::diagnostics::{DiagnosticKind, Diagnostics};
use ucn_core::units::{Length, Power, Pressure, Temperature, k};
use ucn_fluids::He4Properties;
use ucn_solver::{RK4, integrate};

/// RK4 steps along the channel.
pub const CHANNEL_STEPS: usize = 200;

/// A straight He-II-filled channel.
#[derive(Clone, Copy, Debug)]
pub struct HeIIChannel {
    pub length: Length,
    pub diameter: Length,
}

impl HeIIChannel {
    pub fn cross_section(&self) -> f64 {
        PI * self.diameter.value.powi(2) / 4.0
    }
}

#[derive(Default)]
struct Floored {
    below_minimum: usize,
    non_positive: usize,
    first_below: Option<f64>,
    first_non_positive: Option<f64>,
}

/// Temperature at the far end of the channel when `load` flows in at the
/// cold end, held at `t_low`.
///
/// Where the temperature leaves the He-4 range or the conductivity is not
/// positive the gradient is taken as zero; each kind of fallback is reported
/// once per call with a count.
pub fn he_ii_temperature(
    he4: &dyn He4Properties,
    channel: &HeIIChannel,
    t_low: Temperature,
    pressure: Pressure,
    load: Power,
    diagnostics: &mut Diagnostics,
) -> ComponentResult<Temperature> {
    if load.value == 0.0 {
        return Ok(t_low);
    }
    let area = channel.cross_section();
    if !area.is_finite() || area <= 0.0 {
        return Err(ComponentError::InvalidArg {
            what: "He-II channel diameter",
        });
    }

    let drive = (load.value / area).powi(3);
    let t_min = he4.min_temperature().value;
    let mut floored = Floored::default();

    let gradient = |_x: f64, t: f64| -> f64 {
        if t < t_min {
            floored.below_minimum += 1;
            floored.first_below.get_or_insert(t);
            return 0.0;
        }
        match he4.gm_conductivity(pressure, k(t)) {
            Ok(conductivity) if conductivity > 0.0 => drive / conductivity,
            _ => {
                floored.non_positive += 1;
                floored.first_non_positive.get_or_insert(t);
                0.0
            }
        }
    };
    let t_high = integrate(
        &RK4,
        gradient,
        0.0,
        channel.length.value,
        t_low.value,
        CHANNEL_STEPS,
    )?;

    if let Some(t) = floored.first_below {
        diagnostics.push(
            DiagnosticKind::BelowMinimumTemperature,
            format!(
                "He-II gradient zeroed at {} evaluations below {t_min} K (first at {t:.4} K)",
                floored.below_minimum
            ),
        );
    }
    if let Some(t) = floored.first_non_positive {
        diagnostics.push(
            DiagnosticKind::NonPositiveConductivity,
            format!(
                "He-II gradient zeroed at {} evaluations without positive conductivity (first at {t:.4} K)",
                floored.non_positive
            ),
        );
    }
    Ok(k(t_high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucn_core::units::{m, pa, watts};
    use ucn_fluids::Helium4;

    fn channel() -> HeIIChannel {
        HeIIChannel {
            length: m(2.5),
            diameter: m(0.148),
        }
    }

    #[test]
    fn typical_gradient_is_small_and_positive() {
        let mut diag = Diagnostics::new();
        let t = he_ii_temperature(&Helium4::new(), &channel(), k(0.97), pa(6000.0), watts(8.1), &mut diag)
            .unwrap();
        assert!(t.value > 0.97 && t.value < 2.1, "T = {}", t.value);
        assert!(diag.is_empty());
    }

    #[test]
    fn below_minimum_is_floored_once() {
        let mut diag = Diagnostics::new();
        let t = he_ii_temperature(&Helium4::new(), &channel(), k(0.5), pa(6000.0), watts(8.1), &mut diag)
            .unwrap();
        assert_eq!(t.value, 0.5);
        assert_eq!(diag.count(DiagnosticKind::BelowMinimumTemperature), 1);
    }

    #[test]
    fn above_lambda_conductivity_is_floored() {
        let mut diag = Diagnostics::new();
        // T/Tλ > 1 makes the conductivity function negative
        let t = he_ii_temperature(&Helium4::new(), &channel(), k(2.3), pa(6000.0), watts(8.1), &mut diag)
            .unwrap();
        assert_eq!(t.value, 2.3);
        assert_eq!(diag.count(DiagnosticKind::NonPositiveConductivity), 1);
    }

    #[test]
    fn zero_load_skips_integration() {
        let mut diag = Diagnostics::new();
        let narrow = HeIIChannel {
            length: m(100.0),
            diameter: m(0.0),
        };
        let t = he_ii_temperature(&Helium4::new(), &narrow, k(1.1), pa(6000.0), watts(0.0), &mut diag)
            .unwrap();
        assert_eq!(t.value, 1.1);
    }
}
