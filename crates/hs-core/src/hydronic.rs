//! The governing hydronic relation.
//!
//! ```text
//! Q [BTU/hr] = 500 × flow [GPM] × ΔT [°F]
//! ```
//!
//! 500 ≈ 8.33 lb/gal × 60 min/hr × 1 BTU/(lb·°F). It is a fixed conversion
//! constant for water-like fluids and is applied to every fluid selection.

use crate::error::{HsError, HsResult};
use crate::numeric::{ensure_finite, ensure_positive};

pub const HEAT_FLOW_FACTOR: f64 = 500.0;

/// Flow [GPM] required to carry `load_btu_hr` at a temperature drop of `delta_t_f`.
pub fn required_flow(load_btu_hr: f64, delta_t_f: f64) -> HsResult<f64> {
    ensure_finite(load_btu_hr, "heat load")?;
    ensure_positive(delta_t_f, "temperature drop")?;
    if load_btu_hr < 0.0 {
        return Err(HsError::InvalidArg {
            what: "heat load must be non-negative",
        });
    }
    Ok(load_btu_hr / (HEAT_FLOW_FACTOR * delta_t_f))
}

/// Heat [BTU/hr] carried by `flow_gpm` at a temperature drop of `delta_t_f`.
#[inline]
pub fn heat_for_flow(flow_gpm: f64, delta_t_f: f64) -> f64 {
    HEAT_FLOW_FACTOR * flow_gpm * delta_t_f
}
