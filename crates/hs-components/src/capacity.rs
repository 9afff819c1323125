//! Hydraulic capacity of a pipe under velocity limits.
//!
//! Each velocity ceiling becomes a maximum flow (`v · A`) and, at the zone's
//! design ΔT, a maximum heat delivery. The recommended ceiling is a soft
//! target; the absolute ceiling is a hard limit. A load sitting exactly on
//! a ceiling does not exceed it.

use crate::advisory::{Advisory, AdvisoryCode};
use crate::common::check_non_negative;
use crate::error::{ComponentError, ComponentResult};
use hs_catalog::{Catalog, NominalSize, PipeMaterial, PipeSpec, VelocityLimits};
use hs_core::hydronic::heat_for_flow;
use hs_core::numeric::{Tolerances, exceeds};
use hs_core::units::cfs_to_gpm;
use serde::Serialize;

/// Result of checking one zone's load against its pipe's limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityCheck {
    pub max_recommended_flow_gpm: f64,
    pub max_absolute_flow_gpm: f64,
    pub recommended_capacity_btu_hr: f64,
    pub absolute_capacity_btu_hr: f64,
    /// Load as a percentage of the absolute capacity
    pub utilization_pct: f64,
    /// Above the soft limit but not above the hard one
    pub exceeds_recommended: bool,
    pub exceeds_absolute: bool,
}

/// Flow [GPM] that moves through `pipe` at `velocity_fps`.
pub fn max_flow_for_velocity(pipe: &PipeSpec, velocity_fps: f64) -> f64 {
    cfs_to_gpm(velocity_fps * pipe.flow_area_ft2())
}

/// Compare `load_btu_hr` carried at `delta_t_f` against the pipe's limits.
pub fn check_capacity(
    pipe: &PipeSpec,
    limits: &VelocityLimits,
    load_btu_hr: f64,
    delta_t_f: f64,
) -> ComponentResult<CapacityCheck> {
    check_non_negative(load_btu_hr, "heat load")?;
    if !(delta_t_f.is_finite() && delta_t_f > 0.0) {
        return Err(ComponentError::InvalidArg {
            what: "temperature drop must be positive",
        });
    }

    let max_recommended_flow = max_flow_for_velocity(pipe, limits.recommended_fps);
    let max_absolute_flow = max_flow_for_velocity(pipe, limits.absolute_fps);
    let recommended_capacity = heat_for_flow(max_recommended_flow, delta_t_f);
    let absolute_capacity = heat_for_flow(max_absolute_flow, delta_t_f);

    if !(absolute_capacity.is_finite() && absolute_capacity > 0.0) {
        return Err(ComponentError::NonPhysical {
            what: "absolute capacity",
        });
    }

    let tol = Tolerances::default();
    let exceeds_absolute = exceeds(load_btu_hr, absolute_capacity, tol);
    let exceeds_recommended =
        !exceeds_absolute && exceeds(load_btu_hr, recommended_capacity, tol);

    Ok(CapacityCheck {
        max_recommended_flow_gpm: max_recommended_flow,
        max_absolute_flow_gpm: max_absolute_flow,
        recommended_capacity_btu_hr: recommended_capacity,
        absolute_capacity_btu_hr: absolute_capacity,
        utilization_pct: load_btu_hr / absolute_capacity * 100.0,
        exceeds_recommended,
        exceeds_absolute,
    })
}

/// Smallest catalog size of `material` that carries `flow_gpm` at or
/// below `velocity_fps`.
pub fn suggest_pipe_size(
    catalog: &Catalog,
    material: PipeMaterial,
    flow_gpm: f64,
    velocity_fps: f64,
) -> Option<NominalSize> {
    catalog
        .pipes_of(material)
        .into_iter()
        .find(|p| !exceeds(flow_gpm, max_flow_for_velocity(p, velocity_fps), Tolerances::default()))
        .map(|p| p.size)
}

/// Advisories for a capacity check, naming an upsize target when known.
pub fn capacity_advisories(
    check: &CapacityCheck,
    pipe: &PipeSpec,
    upsize: Option<NominalSize>,
) -> Vec<Advisory> {
    let suggestion = match upsize {
        Some(size) => format!("use {size} {} pipe or raise the design ΔT", pipe.material),
        None => "split the zone or raise the design ΔT".to_string(),
    };

    if check.exceeds_absolute {
        vec![
            Advisory::new(
                AdvisoryCode::ExceedsAbsoluteVelocity,
                format!(
                    "load is {:.0}% of the absolute velocity capacity of {} {} pipe",
                    check.utilization_pct, pipe.size, pipe.material
                ),
            )
            .with_suggestion(suggestion),
        ]
    } else if check.exceeds_recommended {
        vec![
            Advisory::new(
                AdvisoryCode::ExceedsRecommendedVelocity,
                format!(
                    "load is above the recommended velocity capacity of {} {} pipe ({:.0} BTU/hr)",
                    pipe.size, pipe.material, check.recommended_capacity_btu_hr
                ),
            )
            .with_suggestion(suggestion),
        ]
    } else {
        Vec::new()
    }
}
