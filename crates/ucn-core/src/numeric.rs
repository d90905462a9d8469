use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// `count` equally spaced points from `start` to `end` inclusive.
///
/// The last point is set to `end` exactly so that floating point drift never
/// leaves a sweep short of its upper bound.
pub fn linspace(start: Real, end: Real, count: usize) -> Result<Vec<Real>, CoreError> {
    ensure_finite(start, "linspace start")?;
    ensure_finite(end, "linspace end")?;
    if count < 2 {
        return Err(CoreError::InvalidArg {
            what: "linspace needs at least two points",
        });
    }

    let intervals = (count - 1) as Real;
    let mut points: Vec<Real> = (0..count)
        .map(|j| start + (j as Real) / intervals * (end - start))
        .collect();
    points[count - 1] = end;
    Ok(points)
}
