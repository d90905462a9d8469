//! Integration tests for ucn-components with the correlation backends.

use proptest::prelude::*;
use ucn_components::{
    FinnedTube, HeIIChannel, cooling_flow, cooling_load, he_ii_temperature, hex1_temperature,
};
use ucn_core::units::{k, kgps, m, pa, watts};
use ucn_core::{DiagnosticKind, Diagnostics};
use ucn_fluids::{BoilingCurve, BoilingSample, Helium4};

fn small_curve() -> BoilingCurve {
    let points = [
        (0.5, 1.0, 0.01),
        (0.5, 1e4, 0.2),
        (2.0, 1.0, 0.005),
        (2.0, 1e4, 0.1),
        (1.2, 5e3, 0.08),
    ];
    let samples: Vec<BoilingSample> = points
        .iter()
        .map(|&(t, q, dt)| BoilingSample {
            bath_temperature: t,
            heat_flux: q,
            delta_t: dt,
        })
        .collect();
    BoilingCurve::from_samples(&samples).unwrap()
}

#[test]
fn shield_style_round_trip() {
    let he4 = Helium4::new();
    let p = pa(1.2e5);
    let load = cooling_load(&he4, kgps(2.8e-4), p, k(20.0), k(10.0)).unwrap();
    let flow = cooling_flow(&he4, load, p, k(20.0), k(10.0)).unwrap();
    assert!((flow.value - 2.8e-4).abs() < 1e-15);
}

#[test]
fn hex1_boiling_fallback_is_recorded() {
    let tube = FinnedTube {
        length: m(0.6),
        diameter: m(0.148),
        fin_height: m(0.001),
        fin_pitch: m(0.002),
    };
    let mut diag = Diagnostics::new();
    // 1e4 W into 0.56 m² is far above the measured fluxes
    let t = hex1_temperature(&small_curve(), k(0.9), &tube, watts(1e4), &mut diag).unwrap();
    assert_eq!(t.value, 0.9);
    assert!(diag.contains(DiagnosticKind::BoilingCurveOutOfRange));
}

proptest! {
    #[test]
    fn cooling_flow_inverts_cooling_load(
        flow in 1e-5f64..0.1,
        p in 1e3f64..2e5,
        t_in in 0.8f64..300.0,
        t_out in 0.8f64..300.0,
    ) {
        prop_assume!((t_in - t_out).abs() > 0.1);
        let he4 = Helium4::new();
        let load = cooling_load(&he4, kgps(flow), pa(p), k(t_in), k(t_out)).unwrap();
        let back = cooling_flow(&he4, load, pa(p), k(t_in), k(t_out)).unwrap();
        prop_assert!((back.value - flow).abs() <= 1e-9 * flow);
    }

    #[test]
    fn hex1_zero_load_returns_bath_temperature(
        t in 0.3f64..3.0,
        length in 0.01f64..2.0,
        diameter in 0.01f64..0.5,
        fin_height in 0.0f64..0.01,
        fin_pitch in 1e-4f64..0.01,
    ) {
        let tube = FinnedTube {
            length: m(length),
            diameter: m(diameter),
            fin_height: m(fin_height),
            fin_pitch: m(fin_pitch),
        };
        let mut diag = Diagnostics::new();
        let out = hex1_temperature(&small_curve(), k(t), &tube, watts(0.0), &mut diag).unwrap();
        prop_assert_eq!(out.value, t);
        prop_assert!(diag.is_empty());
    }

    #[test]
    fn he_ii_zero_load_returns_boundary_temperature(
        t in 0.8f64..2.1,
        length in 0.1f64..10.0,
        diameter in 0.01f64..0.5,
        p in 1e3f64..2e5,
    ) {
        let channel = HeIIChannel { length: m(length), diameter: m(diameter) };
        let mut diag = Diagnostics::new();
        let out = he_ii_temperature(&Helium4::new(), &channel, k(t), pa(p), watts(0.0), &mut diag)
            .unwrap();
        prop_assert_eq!(out.value, t);
        prop_assert!(diag.is_empty());
    }
}
