//! SVG rendering of sweeps and of the boiling-curve table.

use crate::error::CliResult;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use ucn_app::{SourceResult, SweepSeries};
use ucn_fluids::BoilingCurve;

const PANEL_ROWS: usize = 4;
const PANEL_COLS: usize = 5;

struct Trace {
    label: &'static str,
    color: RGBColor,
    value: fn(&SourceResult) -> f64,
}

/// Left axis, g/s.
const FLOW_TRACES: [Trace; 4] = [
    Trace {
        label: "He reservoir",
        color: BLUE,
        value: |r| r.he_reservoir_flow * 1e3,
    },
    Trace {
        label: "3He",
        color: GREEN,
        value: |r| r.he3_flow * 1e3,
    },
    Trace {
        label: "1K pot",
        color: CYAN,
        value: |r| r.one_k_pot_flow * 1e3,
    },
    Trace {
        label: "Shield (max)",
        color: MAGENTA,
        value: |r| r.max_shield_flow() * 1e3,
    },
];

/// Right axis, K.
const TEMPERATURE_TRACES: [Trace; 5] = [
    Trace {
        label: "T_HeII",
        color: RED,
        value: |r| r.t_he_ii,
    },
    Trace {
        label: "T_3He",
        color: RGBColor(255, 140, 0),
        value: |r| r.t_3he,
    },
    Trace {
        label: "T_4He",
        color: RGBColor(139, 0, 0),
        value: |r| r.t_4he,
    },
    Trace {
        label: "T_pot",
        color: BLACK,
        value: |r| r.one_k_pot_temperature,
    },
    Trace {
        label: "T_Cu",
        color: RGBColor(128, 0, 128),
        value: |r| r.t_cu,
    },
];

/// Padded `[min, max)` over `values`, never empty.
fn axis_range(values: impl IntoIterator<Item = f64>, floor_at_zero: bool) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 * hi.abs().max(1.0) };
    let lo = if floor_at_zero { 0.0f64.min(lo) } else { lo - pad };
    lo..hi + pad
}

/// Render every sweep as one panel of a 4×5 grid.
pub fn render_sweeps(sweeps: &[SweepSeries]) -> CliResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (2400, 1600)).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((PANEL_ROWS, PANEL_COLS));
        for (index, (panel, sweep)) in panels.iter().zip(sweeps).enumerate() {
            draw_sweep_panel(panel, sweep, index == 0)?;
        }
        root.present()?;
    }
    Ok(svg)
}

fn draw_sweep_panel(
    panel: &DrawingArea<SVGBackend<'_>, Shift>,
    sweep: &SweepSeries,
    with_legend: bool,
) -> CliResult<()> {
    let x_range = axis_range(sweep.values.iter().copied(), false);
    let flow_range = axis_range(FLOW_TRACES.iter().flat_map(|t| sweep.series(t.value)), true);
    let temperature_range = axis_range(
        TEMPERATURE_TRACES
            .iter()
            .flat_map(|t| sweep.series(t.value))
            .filter(|&v| v > 0.0),
        false,
    );

    let mut chart = ChartBuilder::on(panel)
        .margin(8)
        .caption(sweep.label(), ("sans-serif", 14))
        .x_label_area_size(24)
        .y_label_area_size(40)
        .right_y_label_area_size(40)
        .build_cartesian_2d(x_range.clone(), flow_range)?
        .set_secondary_coord(x_range, temperature_range);

    chart
        .configure_mesh()
        .y_desc("Flow (g/s)")
        .label_style(("sans-serif", 10))
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Temperature (K)")
        .label_style(("sans-serif", 10))
        .draw()?;

    for trace in &FLOW_TRACES {
        let points: Vec<(f64, f64)> = sweep
            .values
            .iter()
            .copied()
            .zip(sweep.series(trace.value))
            .collect();
        let color = trace.color;
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(trace.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }
    for trace in &TEMPERATURE_TRACES {
        // zeros mark He-II outputs that were not computed
        let points: Vec<(f64, f64)> = sweep
            .values
            .iter()
            .copied()
            .zip(sweep.series(trace.value))
            .filter(|&(_, t)| t > 0.0)
            .collect();
        let color = trace.color;
        chart
            .draw_secondary_series(LineSeries::new(points, color.stroke_width(1)))?
            .label(trace.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    if with_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 10))
            .draw()?;
    }
    Ok(())
}

/// Bath temperature span of the boiling map [K].
pub const MAP_TEMPERATURE: Range<f64> = 0.5..2.1;
/// log10 heat-flux span of the boiling map [W/m²].
pub const MAP_LOG_FLUX: Range<f64> = -2.0..4.0;
/// Cells per map axis.
pub const MAP_CELLS: usize = 50;

/// One map cell: lower-left corner and the superheat at its centre, if the
/// centre lies inside the measured data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapCell {
    pub temperature: f64,
    pub log_flux: f64,
    pub delta_t: Option<f64>,
}

fn cell_size() -> (f64, f64) {
    (
        (MAP_TEMPERATURE.end - MAP_TEMPERATURE.start) / MAP_CELLS as f64,
        (MAP_LOG_FLUX.end - MAP_LOG_FLUX.start) / MAP_CELLS as f64,
    )
}

/// Sample `curve` over the map grid, row-major in flux.
pub fn boiling_grid(curve: &BoilingCurve) -> Vec<MapCell> {
    let (dt, dq) = cell_size();
    (0..MAP_CELLS)
        .flat_map(|j| (0..MAP_CELLS).map(move |i| (i, j)))
        .map(|(i, j)| {
            let temperature = MAP_TEMPERATURE.start + i as f64 * dt;
            let log_flux = MAP_LOG_FLUX.start + j as f64 * dq;
            let centre = (temperature + 0.5 * dt, 10f64.powf(log_flux + 0.5 * dq));
            MapCell {
                temperature,
                log_flux,
                delta_t: curve.delta_t(centre.0, centre.1),
            }
        })
        .collect()
}

/// Render the boiling table as a colour map of ΔT. Cells outside the data
/// stay blank.
pub fn render_boiling_map(curve: &BoilingCurve) -> CliResult<String> {
    let cells = boiling_grid(curve);
    let (lo, hi) = cells
        .iter()
        .filter_map(|c| c.delta_t)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let span = if hi > lo { hi - lo } else { 1.0 };
    let (dt, dq) = cell_size();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (900, 700)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("He-3 boiling superheat ΔT (K)", ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(MAP_TEMPERATURE, MAP_LOG_FLUX)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Bath temperature (K)")
            .y_desc("log10 heat flux (W/m²)")
            .draw()?;

        chart.draw_series(cells.iter().filter_map(|cell| {
            let delta_t = cell.delta_t?;
            let hue = 0.66 * (1.0 - (delta_t - lo) / span);
            Some(Rectangle::new(
                [
                    (cell.temperature, cell.log_flux),
                    (cell.temperature + dt, cell.log_flux + dq),
                ],
                HSLColor(hue, 0.9, 0.5).filled(),
            ))
        }))?;
        root.present()?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucn_app::ParameterId;
    use ucn_fluids::BoilingSample;

    fn small_curve() -> BoilingCurve {
        let points = [(0.6, 10.0), (0.6, 1e4), (2.0, 10.0), (2.0, 1e4), (1.2, 300.0)];
        let samples: Vec<BoilingSample> = points
            .iter()
            .map(|&(t, q)| BoilingSample {
                bath_temperature: t,
                heat_flux: q,
                delta_t: 0.01 * t + 1e-5 * q,
            })
            .collect();
        BoilingCurve::from_samples(&samples).unwrap()
    }

    #[test]
    fn axis_range_pads_and_survives_degenerate_input() {
        let r = axis_range([1.0, 3.0], false);
        assert!((r.start - 0.9).abs() < 1e-12 && (r.end - 3.1).abs() < 1e-12);
        assert_eq!(axis_range([0.5, 2.0], true).start, 0.0);

        let flat = axis_range([0.0, 0.0], false);
        assert!(flat.end > flat.start);
        assert_eq!(axis_range(std::iter::empty(), false), 0.0..1.0);
        assert_eq!(axis_range([f64::NAN], true), 0.0..1.0);
    }

    #[test]
    fn grid_blanks_cells_outside_the_data() {
        let cells = boiling_grid(&small_curve());
        assert_eq!(cells.len(), MAP_CELLS * MAP_CELLS);
        // T = 0.5 column lies below the lowest sample temperature
        assert!(cells[0].delta_t.is_none());
        let inside = cells
            .iter()
            .find(|c| (1.0..1.1).contains(&c.temperature) && (2.0..2.2).contains(&c.log_flux))
            .unwrap();
        assert!(inside.delta_t.is_some());
    }

    #[test]
    fn renders_svg_documents() {
        let map = render_boiling_map(&small_curve()).unwrap();
        assert!(map.contains("<svg"));
        assert!(map.contains("<rect"));

        let sweep = SweepSeries {
            parameter: ParameterId::BeamHeating,
            unit: "W".to_string(),
            values: vec![0.0, 5.0, 10.0],
            results: vec![
                SourceResult {
                    he3_flow: 1e-4,
                    t_he_ii: 0.0,
                    t_4he: 0.76,
                    ..SourceResult::default()
                },
                SourceResult {
                    he3_flow: 5e-4,
                    t_he_ii: 1.0,
                    t_4he: 0.9,
                    ..SourceResult::default()
                },
                SourceResult {
                    he3_flow: 1e-3,
                    t_he_ii: 1.12,
                    t_4he: 1.0,
                    ..SourceResult::default()
                },
            ],
            failed: 0,
        };
        let svg = render_sweeps(&[sweep]).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Beam heating (W)"));
    }
}
