//! Saturated vapor pressure curves.
//!
//! Each segment is an ITS-90 style inverse equation
//! `T = Σ aᵢ·uⁱ` with `u = (ln P − b)/c`. Below the lowest tabulated pressure
//! the curve continues along a Clausius-Clapeyron tail that matches the value
//! and slope at the segment boundary. `P(T)` is found by bisection in `ln P`.

use crate::error::{FluidError, FluidResult};

/// One segment of an inverse vapor-pressure equation.
#[derive(Clone, Copy, Debug)]
pub struct VaporPressureEquation {
    pub coefficients: [f64; 10],
    pub b: f64,
    pub c: f64,
    /// Lowest pressure [Pa] covered by the polynomial.
    pub p_min: f64,
    /// Highest pressure [Pa] covered by the polynomial.
    pub p_max: f64,
}

impl VaporPressureEquation {
    fn u(&self, p: f64) -> f64 {
        (p.ln() - self.b) / self.c
    }

    fn polynomial(&self, u: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, a| acc * u + a)
    }

    fn slope(&self, u: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, a)| acc * u + i as f64 * a)
    }

    /// Saturation temperature [K], without range checks on the result.
    fn temperature(&self, p: f64) -> f64 {
        if p >= self.p_min {
            return self.polynomial(self.u(p));
        }

        // ln P linear in 1/T below the tabulated range
        let u0 = self.u(self.p_min);
        let t0 = self.polynomial(u0);
        let dt_dlnp = self.slope(u0) / self.c;
        let inv_t = 1.0 / t0 - (p / self.p_min).ln() * dt_dlnp / (t0 * t0);
        1.0 / inv_t
    }
}

/// Piecewise saturation curve for one fluid.
#[derive(Clone, Copy, Debug)]
pub struct SaturationCurve {
    pub segments: &'static [VaporPressureEquation],
    pub t_min: f64,
    pub t_max: f64,
    pub what: &'static str,
}

/// Lower bisection bound on ln P.
const LN_P_FLOOR: f64 = -13.815_510_557_964_274; // ln(1e-6)

impl SaturationCurve {
    fn critical_pressure(&self) -> f64 {
        self.segments.last().map(|s| s.p_max).unwrap_or(0.0)
    }

    fn raw_temperature(&self, p: f64) -> Option<f64> {
        self.segments
            .iter()
            .find(|s| p <= s.p_max)
            .map(|s| s.temperature(p))
    }

    /// Saturation temperature [K] at pressure `p` [Pa].
    pub fn temperature(&self, p: f64) -> FluidResult<f64> {
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "saturation pressure must be positive and finite",
            });
        }
        let t = self
            .raw_temperature(p)
            .ok_or(FluidError::OutOfRange {
                what: self.what,
                value: p,
            })?;
        if !t.is_finite() || t < self.t_min {
            return Err(FluidError::OutOfRange {
                what: self.what,
                value: p,
            });
        }
        Ok(t.min(self.t_max))
    }

    /// Saturated vapor pressure [Pa] at temperature `t` [K].
    pub fn pressure(&self, t: f64) -> FluidResult<f64> {
        if !(self.t_min..=self.t_max).contains(&t) {
            return Err(FluidError::OutOfRange {
                what: self.what,
                value: t,
            });
        }

        let mut lo = LN_P_FLOOR;
        let mut hi = self.critical_pressure().ln();
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            match self.raw_temperature(mid.exp()) {
                Some(t_mid) if t_mid < t => lo = mid,
                _ => hi = mid,
            }
            if hi - lo < 1e-13 {
                break;
            }
        }
        Ok((0.5 * (lo + hi)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR: [VaporPressureEquation; 1] = [VaporPressureEquation {
        coefficients: [2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        b: 5.0,
        c: 2.0,
        p_min: 100.0,
        p_max: 10_000.0,
    }];

    fn curve() -> SaturationCurve {
        SaturationCurve {
            segments: &LINEAR,
            t_min: 0.1,
            t_max: 4.0,
            what: "test curve",
        }
    }

    #[test]
    fn polynomial_branch_matches_closed_form() {
        let p = 1000.0_f64;
        let expected = 2.0 + (p.ln() - 5.0) / 2.0;
        assert!((curve().temperature(p).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn tail_is_continuous_at_boundary() {
        let c = curve();
        let above = c.temperature(100.0).unwrap();
        let below = c.temperature(100.0 * (1.0 - 1e-9)).unwrap();
        assert!((above - below).abs() < 1e-6);
        assert!(c.temperature(10.0).unwrap() < above);
    }

    #[test]
    fn pressure_inverts_temperature() {
        let c = curve();
        for &p in &[20.0, 150.0, 900.0, 8000.0] {
            let t = c.temperature(p).unwrap();
            let back = c.pressure(t).unwrap();
            assert!((back - p).abs() / p < 1e-9, "p={p} back={back}");
        }
    }

    #[test]
    fn out_of_range_queries_fail() {
        let c = curve();
        assert!(c.temperature(-1.0).is_err());
        assert!(c.temperature(2e4).is_err());
        assert!(c.pressure(5.0).is_err());
        assert!(c.pressure(0.05).is_err());
    }
}
