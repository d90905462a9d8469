//! Structured record of fallback paths taken during a computation.
//!
//! Sub-models that substitute a conservative value for an out-of-range
//! property query push a [`Diagnostic`] here instead of failing. Every push
//! is also forwarded to `tracing`, so the same event shows up in logs and can
//! be asserted on by tests through [`Diagnostics::contains`].

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What kind of fallback was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// Boiling-curve query outside the measured data; bath temperature used.
    BoilingCurveOutOfRange,
    /// Temperature below the He-4 property range during channel integration.
    BelowMinimumTemperature,
    /// He-II conductivity function evaluated to zero or less.
    NonPositiveConductivity,
    /// Interface temperature below the He-4 range; He-II outputs zeroed.
    SuperfluidBranchInapplicable,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::BoilingCurveOutOfRange
            | DiagnosticKind::BelowMinimumTemperature
            | DiagnosticKind::NonPositiveConductivity
            | DiagnosticKind::SuperfluidBranchInapplicable => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::BoilingCurveOutOfRange => "boiling curve out of range",
            DiagnosticKind::BelowMinimumTemperature => "below minimum temperature",
            DiagnosticKind::NonPositiveConductivity => "non-positive conductivity",
            DiagnosticKind::SuperfluidBranchInapplicable => "superfluid branch inapplicable",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

/// Collector for diagnostics raised while evaluating one solve.
///
/// A muted collector still records every event but logs at `debug` level.
/// The root finder evaluates many trial points and uses a muted collector so
/// that rejected guesses do not flood the log.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    muted: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn muted() -> Self {
        Self {
            entries: Vec::new(),
            muted: true,
        }
    }

    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        let severity = kind.severity();
        if self.muted {
            tracing::debug!(%kind, "{message}");
        } else {
            match severity {
                Severity::Info => tracing::info!(%kind, "{message}"),
                Severity::Warning => tracing::warn!(%kind, "{message}"),
                Severity::Error => tracing::error!(%kind, "{message}"),
            }
        }
        self.entries.push(Diagnostic {
            kind,
            severity,
            message,
        });
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
