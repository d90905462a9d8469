//! He-3 pool-boiling curves.
//!
//! Measured heat flux vs. wall superheat at a handful of bath temperatures,
//! interpolated linearly on a Delaunay triangulation of the scattered
//! (bath temperature, heat flux) samples. Both coordinates are rescaled
//! (centred on the mean, divided by the spread) before triangulating so the
//! triangles are not dominated by the much larger heat-flux axis.
//!
//! Data sources for the standard file set: Maeda et al., Cryogenics 40 (2000)
//! 713 and Tanaka & Kodama, Cryogenics 29 (1989) 203.

use crate::error::BoilingDataError;
use delaunator::{Point, triangulate};
use std::fs::File;
use std::path::{Path, PathBuf};

/// W/cm² to W/m².
const FLUX_SCALE: f64 = 1e4;

/// Barycentric slack when locating a query on a shared edge or the hull.
const INSIDE_EPS: f64 = 1e-10;

/// Reference bath temperatures [K] and file labels of the standard data set.
pub const STANDARD_CURVES: [(f64, &str); 7] = [
    (0.55, "0.55K"),
    (0.6, "0.6K"),
    (0.7, "0.7K"),
    (0.8, "0.8K"),
    (1.0, "1K"),
    (1.48, "1.48K"),
    (2.0, "2K"),
];

/// File name of the curve with the given label.
pub fn curve_file_name(label: &str) -> String {
    format!("He3boiling_{label}.csv")
}

/// One measured point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoilingSample {
    /// Bath temperature [K].
    pub bath_temperature: f64,
    /// Heat flux [W/m²].
    pub heat_flux: f64,
    /// Wall superheat [K].
    pub delta_t: f64,
}

#[derive(Clone, Copy, Debug)]
struct AxisScale {
    offset: f64,
    spread: f64,
}

impl AxisScale {
    fn fit(values: impl Iterator<Item = f64> + Clone) -> Self {
        let n = values.clone().count().max(1) as f64;
        let offset = values.clone().sum::<f64>() / n;
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let spread = if hi > lo { hi - lo } else { 1.0 };
        Self { offset, spread }
    }

    fn apply(&self, v: f64) -> f64 {
        (v - self.offset) / self.spread
    }
}

/// Read-only interpolator over the measured boiling curves.
#[derive(Clone, Debug)]
pub struct BoilingCurve {
    nodes: Vec<[f64; 2]>,
    values: Vec<f64>,
    triangles: Vec<[usize; 3]>,
    temperature_axis: AxisScale,
    flux_axis: AxisScale,
}

impl BoilingCurve {
    /// Build the interpolator from samples.
    pub fn from_samples(samples: &[BoilingSample]) -> Result<Self, BoilingDataError> {
        let temperature_axis = AxisScale::fit(samples.iter().map(|s| s.bath_temperature));
        let flux_axis = AxisScale::fit(samples.iter().map(|s| s.heat_flux));

        let nodes: Vec<[f64; 2]> = samples
            .iter()
            .map(|s| {
                [
                    temperature_axis.apply(s.bath_temperature),
                    flux_axis.apply(s.heat_flux),
                ]
            })
            .collect();
        let points: Vec<Point> = nodes.iter().map(|&[x, y]| Point { x, y }).collect();

        let triangles: Vec<[usize; 3]> = triangulate(&points)
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        if triangles.is_empty() {
            return Err(BoilingDataError::Degenerate {
                points: samples.len(),
            });
        }

        tracing::debug!(
            samples = samples.len(),
            triangles = triangles.len(),
            "boiling curve triangulated"
        );

        Ok(Self {
            nodes,
            values: samples.iter().map(|s| s.delta_t).collect(),
            triangles,
            temperature_axis,
            flux_axis,
        })
    }

    /// Load the standard curve set from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, BoilingDataError> {
        let dir = dir.as_ref();
        let mut samples = Vec::new();
        for (temperature, label) in STANDARD_CURVES {
            let path = dir.join(curve_file_name(label));
            samples.extend(read_curve_file(&path, temperature)?);
        }
        tracing::info!(dir = %dir.display(), samples = samples.len(), "loaded He-3 boiling curves");
        Self::from_samples(&samples)
    }

    /// Wall superheat [K] at bath temperature `t` [K] and heat flux `q` [W/m²].
    ///
    /// Returns `None` outside the convex hull of the measured samples.
    pub fn delta_t(&self, t: f64, q: f64) -> Option<f64> {
        if !t.is_finite() || !q.is_finite() {
            return None;
        }
        let x = self.temperature_axis.apply(t);
        let y = self.flux_axis.apply(q);

        self.triangles.iter().find_map(|&[a, b, c]| {
            let ([ax, ay], [bx, by], [cx, cy]) = (self.nodes[a], self.nodes[b], self.nodes[c]);
            let det = (by - cy) * (ax - cx) + (cx - bx) * (ay - cy);
            if det == 0.0 {
                return None;
            }
            let wa = ((by - cy) * (x - cx) + (cx - bx) * (y - cy)) / det;
            let wb = ((cy - ay) * (x - cx) + (ax - cx) * (y - cy)) / det;
            let wc = 1.0 - wa - wb;
            if wa < -INSIDE_EPS || wb < -INSIDE_EPS || wc < -INSIDE_EPS {
                return None;
            }
            Some(wa * self.values[a] + wb * self.values[b] + wc * self.values[c])
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read one curve file: rows of `ΔT [K], q [W/cm²]`, no header.
pub fn read_curve_file(
    path: &Path,
    bath_temperature: f64,
) -> Result<Vec<BoilingSample>, BoilingDataError> {
    let file = File::open(path).map_err(|source| BoilingDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let malformed = |line: u64, reason: String| BoilingDataError::Malformed {
        path: PathBuf::from(path),
        line,
        reason,
    };

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            malformed(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 2 {
            return Err(malformed(line, format!("expected 2 fields, got {}", record.len())));
        }

        let parse = |idx: usize, what: &str| -> Result<f64, BoilingDataError> {
            let value: f64 = record[idx]
                .parse()
                .map_err(|e| malformed(line, format!("{what} {:?}: {e}", &record[idx])))?;
            if !value.is_finite() {
                return Err(malformed(line, format!("{what} is not finite")));
            }
            Ok(value)
        };
        let delta_t = parse(0, "temperature difference")?;
        let flux_w_per_cm2 = parse(1, "heat flux")?;

        samples.push(BoilingSample {
            bath_temperature,
            heat_flux: flux_w_per_cm2 * FLUX_SCALE,
            delta_t,
        });
    }
    Ok(samples)
}
