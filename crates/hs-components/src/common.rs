//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hs_core::numeric::ensure_finite;

/// Flows below this are treated as no flow [GPM]
pub const EPSILON_FLOW: f64 = 1e-9;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

/// Linear interpolation of `y` at `x` between (x0, y0) and (x1, y1).
pub fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
