//! Text and JSON rendering of a solve.

use crate::error::AppResult;
use crate::result::SourceResult;
use crate::solve::SourceReport;
use serde::Serialize;
use std::collections::BTreeMap;
use ucn_core::Diagnostic;

/// Format `value` with `digits` significant digits, switching to exponent
/// notation for very small or large magnitudes, without trailing zeros.
pub fn format_sig(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        format!("{}e{}", trim_fraction(mantissa), exponent)
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Seven-line operator summary of one result.
pub fn summary(result: &SourceResult) -> String {
    let g = |kgps: f64, digits| format_sig(kgps * 1000.0, digits);
    [
        format!("3He flow: {} g/s", g(result.he3_flow, 4)),
        format!("He reservoir evaporation: {} g/s", g(result.he_reservoir_flow, 4)),
        format!(
            "1K pot: {} K, {} g/s",
            format_sig(result.one_k_pot_temperature, 4),
            g(result.one_k_pot_flow, 4)
        ),
        format!("He consumption: {} L/h", format_sig(result.he_consumption, 3)),
        format!(
            "Required shield flows: {} g/s, {} g/s",
            g(result.shield_flow_20k, 3),
            g(result.shield_flow_100k, 3)
        ),
        format!(
            "He-II pressure: {} + {} Pa",
            format_sig(result.he_ii_vapor_pressure, 4),
            format_sig(result.he_ii_pressure_head, 4)
        ),
        format!(
            "T: {} -> {} -> {} -> {} K",
            format_sig(result.t_3he, 4),
            format_sig(result.t_cu, 4),
            format_sig(result.t_4he, 4),
            format_sig(result.t_he_ii, 4)
        ),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: BTreeMap<&'static str, f64>,
    diagnostics: Vec<&'a Diagnostic>,
    evaluations: usize,
}

/// The result record and diagnostics as pretty JSON.
pub fn to_json(report: &SourceReport) -> AppResult<String> {
    let json = JsonReport {
        result: report.result.to_record(),
        diagnostics: report.diagnostics.iter().collect(),
        evaluations: report.evaluations,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
