//! The operating point a zone actually runs at.
//!
//! Flow is always the requested flow for the zone's design ΔT and is never
//! reduced by pipe or emitter limits. The emitter is checked at that flow
//! and at the average water temperature `supply − ΔT/2`:
//! - adequate (capacity ≥ load): the zone runs at its design ΔT
//! - emitter-limited: the zone delivers only the emitter's capacity and the
//!   ΔT that carries that capacity at the requested flow becomes the
//!   effective ΔT, floored at the emitter type's minimum
//!
//! Emitter length therefore changes nothing while the emitter is adequate.

use crate::error::{SolverError, SolverResult};
use hs_components::{EmitterCurve, OutputSource};
use hs_core::hydronic::{HEAT_FLOW_FACTOR, required_flow};
use serde::Serialize;
use tracing::debug;

/// A zone's emitter curve and installed length.
#[derive(Clone, Copy)]
pub struct EmitterRun<'a> {
    pub curve: &'a dyn EmitterCurve,
    pub length_ft: f64,
}

/// Emitter side of the operating point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitterCheck {
    pub length_ft: f64,
    /// Average water temperature used for the check [°F]
    pub avg_water_temp_f: f64,
    pub output_btu_per_ft: f64,
    pub capacity_btu_hr: f64,
    pub source: OutputSource,
    pub emitter_limited: bool,
}

/// Resolved flow and temperature drop for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingPoint {
    /// ΔT the flow was sized for [°F]
    pub design_delta_t_f: f64,
    /// ΔT the zone actually runs at [°F]
    pub effective_delta_t_f: f64,
    /// Requested flow [GPM]
    pub flow_gpm: f64,
    pub requested_btu_hr: f64,
    pub delivered_btu_hr: f64,
    pub emitter: Option<EmitterCheck>,
}

impl OperatingPoint {
    pub fn emitter_limited(&self) -> bool {
        self.emitter.as_ref().is_some_and(|e| e.emitter_limited)
    }
}

/// Resolve a zone's operating point.
///
/// `emitter` is `None` for a zone without an emitter.
pub fn operating_point(
    load_btu_hr: f64,
    design_delta_t_f: f64,
    supply_temp_f: f64,
    emitter: Option<EmitterRun<'_>>,
) -> SolverResult<OperatingPoint> {
    if !(design_delta_t_f.is_finite() && design_delta_t_f > 0.0) {
        return Err(SolverError::InvalidInput {
            what: "design ΔT must be positive",
        });
    }
    if !(load_btu_hr.is_finite() && load_btu_hr >= 0.0) {
        return Err(SolverError::InvalidInput {
            what: "heat load must be finite and non-negative",
        });
    }
    let flow = required_flow(load_btu_hr, design_delta_t_f)?;

    let Some(EmitterRun { curve, length_ft }) = emitter else {
        return Ok(OperatingPoint {
            design_delta_t_f,
            effective_delta_t_f: design_delta_t_f,
            flow_gpm: flow,
            requested_btu_hr: load_btu_hr,
            delivered_btu_hr: load_btu_hr,
            emitter: None,
        });
    };

    if !(length_ft.is_finite() && length_ft > 0.0) {
        return Err(SolverError::InvalidInput {
            what: "emitter length must be positive",
        });
    }
    if !supply_temp_f.is_finite() {
        return Err(SolverError::InvalidInput {
            what: "supply temperature must be finite",
        });
    }

    let awt = supply_temp_f - design_delta_t_f / 2.0;
    let output = curve.output_per_ft(awt, flow);
    let capacity = length_ft * output.btu_per_ft;
    let limited = capacity < load_btu_hr;

    let (delivered, effective_dt) = if limited {
        let carried = capacity / (HEAT_FLOW_FACTOR * flow);
        (capacity, carried.max(curve.model().min_delta_t_f))
    } else {
        (load_btu_hr, design_delta_t_f)
    };

    debug!(
        flow_gpm = flow,
        design_delta_t = design_delta_t_f,
        effective_delta_t = effective_dt,
        capacity_btu_hr = capacity,
        emitter_limited = limited,
        "resolved operating point"
    );

    Ok(OperatingPoint {
        design_delta_t_f,
        effective_delta_t_f: effective_dt,
        flow_gpm: flow,
        requested_btu_hr: load_btu_hr,
        delivered_btu_hr: delivered,
        emitter: Some(EmitterCheck {
            length_ft,
            avg_water_temp_f: awt,
            output_btu_per_ft: output.btu_per_ft,
            capacity_btu_hr: capacity,
            source: output.source,
            emitter_limited: limited,
        }),
    })
}
