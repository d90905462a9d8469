//! ucn-core: shared foundation for the UCN source model.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - diagnostics (structured record of fallback paths)
//! - error (shared error types)

pub mod diagnostics;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
