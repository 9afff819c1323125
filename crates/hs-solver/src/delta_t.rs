//! Recommended design temperature drop for a zone's emitter.
//!
//! Closed form (generic curve):
//!
//! ```text
//! ratio = load / (length · output_per_ft(supply − ΔT_base/2))
//! ratio ≤ 1      ΔT = base · ratio^0.35
//! 1 < ratio ≤ 2  ΔT = min(base · (1 + 0.4 · (ratio − 1)), base · (1 + 0.3 / ratio))
//! ratio > 2      ΔT = base · (1 + 0.6 / ratio²)
//! ```
//!
//! clamped to the emitter type's bounds. The three branches meet at
//! ratio 1 and ratio 2.
//!
//! Iterative (manufacturer curve): starting from the base ΔT, each step
//! evaluates flow and average water temperature at the current ΔT, asks the
//! curve for its capacity and moves ΔT by `−damping · ΔT · error/capacity`.

use crate::emitter::ZoneEmitter;
use crate::error::{SolverError, SolverResult};
use hs_catalog::EmitterModel;
use hs_components::EmitterCurve;
use hs_core::hydronic::required_flow;
use hs_core::iteration::{FixedPointConfig, solve_fixed_point};
use serde::Serialize;
use tracing::{debug, warn};

const ADEQUATE_EXPONENT: f64 = 0.35;
const RISE_DAMPING: f64 = 0.4;
const MAX_RISE_FRACTION: f64 = 0.3;
const COLLAPSE_RATIO: f64 = 2.0;
const COLLAPSE_GAIN: f64 = 0.6;

/// Iterative ΔT solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaTConfig {
    /// Stop when |requested − achievable| is below this [BTU/hr]
    pub tolerance_btu_hr: f64,
    pub max_iterations: usize,
    pub damping: f64,
}

impl Default for DeltaTConfig {
    fn default() -> Self {
        Self {
            tolerance_btu_hr: 1.0,
            max_iterations: 50,
            damping: 0.3,
        }
    }
}

impl DeltaTConfig {
    fn fixed_point(&self) -> FixedPointConfig {
        FixedPointConfig {
            tolerance: self.tolerance_btu_hr,
            max_iterations: self.max_iterations,
            damping: self.damping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTMethod {
    ClosedForm,
    Iterative,
}

/// Advisory ΔT for an emitter, with how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendedDeltaT {
    pub delta_t_f: f64,
    pub method: DeltaTMethod,
    /// Requested load over temperature-adjusted nominal capacity
    pub load_ratio: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Closed-form ΔT for a given load ratio, clamped to the model's bounds.
pub fn closed_form_delta_t(model: &EmitterModel, load_ratio: f64) -> f64 {
    let base = model.default_delta_t_f;
    let dt = if !(load_ratio.is_finite() && load_ratio > 0.0) {
        base
    } else if load_ratio <= 1.0 {
        base * load_ratio.powf(ADEQUATE_EXPONENT)
    } else if load_ratio <= COLLAPSE_RATIO {
        let damped = base * (1.0 + RISE_DAMPING * (load_ratio - 1.0));
        let ceiling = base * (1.0 + MAX_RISE_FRACTION / load_ratio);
        damped.min(ceiling)
    } else {
        base * (1.0 + COLLAPSE_GAIN / (load_ratio * load_ratio))
    };
    model.clamp_delta_t(dt)
}

fn check_inputs(load_btu_hr: f64, length_ft: f64, supply_temp_f: f64) -> SolverResult<()> {
    if !(load_btu_hr.is_finite() && load_btu_hr >= 0.0) {
        return Err(SolverError::InvalidInput {
            what: "heat load must be finite and non-negative",
        });
    }
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
    Ok(())
}

/// Load over the generic capacity at the type's base ΔT.
fn generic_load_ratio(
    emitter: &ZoneEmitter<'_>,
    load_btu_hr: f64,
    length_ft: f64,
    supply_temp_f: f64,
) -> f64 {
    let generic = emitter.generic();
    let base = generic.model.default_delta_t_f;
    let awt = supply_temp_f - base / 2.0;
    let capacity = generic.capacity(length_ft, awt, 0.0);
    load_btu_hr / capacity
}

/// Damped fixed-point ΔT against any emitter curve.
///
/// Running out of iterations returns the last clamped estimate with
/// `converged = false`.
pub fn iterative_delta_t(
    curve: &dyn EmitterCurve,
    load_btu_hr: f64,
    length_ft: f64,
    supply_temp_f: f64,
    config: &DeltaTConfig,
) -> SolverResult<RecommendedDeltaT> {
    check_inputs(load_btu_hr, length_ft, supply_temp_f)?;
    let model = *curve.model();

    if load_btu_hr == 0.0 {
        return Ok(RecommendedDeltaT {
            delta_t_f: model.default_delta_t_f,
            method: DeltaTMethod::Iterative,
            load_ratio: 0.0,
            iterations: 0,
            converged: true,
        });
    }

    let mut last_capacity = f64::NAN;
    let solution = solve_fixed_point(
        model.default_delta_t_f,
        &config.fixed_point(),
        |dt| {
            let flow = required_flow(load_btu_hr, dt)?;
            let awt = supply_temp_f - dt / 2.0;
            let achievable = curve.capacity(length_ft, awt, flow);
            last_capacity = achievable;
            let error = load_btu_hr - achievable;
            // Damped by the loop: ΔT ← ΔT · (1 − damping · error/achievable)
            Ok((dt * (1.0 - error / achievable), error))
        },
        |dt| model.clamp_delta_t(dt),
    )?;

    if solution.converged {
        debug!(
            delta_t = solution.value,
            iterations = solution.iterations,
            "ΔT iteration converged"
        );
    } else {
        warn!(
            delta_t = solution.value,
            residual_btu_hr = solution.residual,
            iterations = solution.iterations,
            "ΔT iteration stopped before converging"
        );
    }

    Ok(RecommendedDeltaT {
        delta_t_f: solution.value,
        method: DeltaTMethod::Iterative,
        load_ratio: load_btu_hr / last_capacity,
        iterations: solution.iterations,
        converged: solution.converged,
    })
}

/// Recommended ΔT for a zone's emitter: iterative when a manufacturer
/// table is attached, closed form otherwise.
pub fn recommended_delta_t(
    emitter: &ZoneEmitter<'_>,
    load_btu_hr: f64,
    length_ft: f64,
    supply_temp_f: f64,
    config: &DeltaTConfig,
) -> SolverResult<RecommendedDeltaT> {
    check_inputs(load_btu_hr, length_ft, supply_temp_f)?;
    match emitter {
        ZoneEmitter::Manufacturer(_) => {
            iterative_delta_t(emitter, load_btu_hr, length_ft, supply_temp_f, config)
        }
        ZoneEmitter::Generic(curve) => {
            let ratio = generic_load_ratio(emitter, load_btu_hr, length_ft, supply_temp_f);
            Ok(RecommendedDeltaT {
                delta_t_f: closed_form_delta_t(curve.model, ratio),
                method: DeltaTMethod::ClosedForm,
                load_ratio: ratio,
                iterations: 0,
                converged: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_catalog::{Catalog, EmitterKind, EmitterReference};
    use hs_components::{GenericCurve, ManufacturerCurve};

    fn baseboard() -> EmitterModel {
        EmitterModel {
            kind: EmitterKind::Baseboard,
            default_delta_t_f: 20.0,
            btu_per_ft: 600.0,
            exponent: 1.4,
            min_delta_t_f: 10.0,
            max_delta_t_f: 30.0,
        }
    }

    #[test]
    fn closed_form_branches() {
        let m = baseboard();
        assert!((closed_form_delta_t(&m, 1.0) - 20.0).abs() < 1e-12);
        assert!((closed_form_delta_t(&m, 0.5) - 20.0 * 0.5_f64.powf(0.35)).abs() < 1e-12);
        // Damped rise wins just above 1, the ceiling wins further out
        assert!((closed_form_delta_t(&m, 1.2) - 21.6).abs() < 1e-12);
        assert!((closed_form_delta_t(&m, 1.9) - 20.0 * (1.0 + 0.3 / 1.9)).abs() < 1e-12);
        assert!((closed_form_delta_t(&m, 4.0) - 20.0 * (1.0 + 0.6 / 16.0)).abs() < 1e-12);
    }

    #[test]
    fn closed_form_is_continuous_at_two() {
        let m = baseboard();
        let below = closed_form_delta_t(&m, 2.0);
        let above = closed_form_delta_t(&m, 2.0 + 1e-9);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn closed_form_clamps() {
        let m = baseboard();
        assert_eq!(closed_form_delta_t(&m, 0.01), 10.0);
        assert_eq!(closed_form_delta_t(&m, f64::NAN), 20.0);
    }

    #[test]
    fn closed_form_for_thirty_thousand_on_forty_feet() {
        let m = baseboard();
        let emitter = ZoneEmitter::Generic(GenericCurve::new(&m, EmitterReference::default()));
        let r = recommended_delta_t(&emitter, 30_000.0, 40.0, 180.0, &DeltaTConfig::default())
            .unwrap();
        assert_eq!(r.method, DeltaTMethod::ClosedForm);
        assert!((r.load_ratio - 1.42).abs() < 0.01);
        assert!((r.delta_t_f - 23.36).abs() < 0.05, "ΔT = {}", r.delta_t_f);
    }

    #[test]
    fn iterative_pins_undersized_emitter_at_minimum() {
        let catalog = Catalog::builtin().unwrap();
        let m = catalog.emitter(EmitterKind::Baseboard).unwrap();
        let table = catalog.manufacturer_model("fin-tube-30").unwrap();
        let emitter = ZoneEmitter::Manufacturer(ManufacturerCurve::new(
            table,
            GenericCurve::new(m, catalog.emitter_reference),
        ));

        let r = recommended_delta_t(&emitter, 30_000.0, 40.0, 180.0, &DeltaTConfig::default())
            .unwrap();
        assert_eq!(r.method, DeltaTMethod::Iterative);
        assert_eq!(r.delta_t_f, m.min_delta_t_f);
        assert!(!r.converged);
        assert!(r.iterations < 50);
    }

    #[test]
    fn iterative_stops_at_ceiling_without_error() {
        let catalog = Catalog::builtin().unwrap();
        let m = catalog.emitter(EmitterKind::Baseboard).unwrap();
        let table = catalog.manufacturer_model("fin-tube-30").unwrap();
        let curve = ManufacturerCurve::new(table, GenericCurve::new(m, catalog.emitter_reference));

        let r = iterative_delta_t(&curve, 30_000.0, 55.0, 180.0, &DeltaTConfig::default()).unwrap();
        assert!(!r.converged);
        assert_eq!(r.iterations, 50);
        // Oversized at the base ΔT, so the estimate has moved up from 20
        assert!(r.delta_t_f > 20.0 && r.delta_t_f < 23.0);
    }

    #[test]
    fn iterative_converges_with_room_to_run() {
        let catalog = Catalog::builtin().unwrap();
        let m = catalog.emitter(EmitterKind::Baseboard).unwrap();
        let table = catalog.manufacturer_model("fin-tube-30").unwrap();
        let curve = ManufacturerCurve::new(table, GenericCurve::new(m, catalog.emitter_reference));
        let config = DeltaTConfig {
            max_iterations: 1000,
            ..DeltaTConfig::default()
        };

        let r = iterative_delta_t(&curve, 30_000.0, 55.0, 180.0, &config).unwrap();
        assert!(r.converged);

        let flow = 30_000.0 / (500.0 * r.delta_t_f);
        let capacity = curve.capacity(55.0, 180.0 - r.delta_t_f / 2.0, flow);
        assert!((capacity - 30_000.0).abs() <= 1.0);
    }

    #[test]
    fn zero_load_returns_base() {
        let m = baseboard();
        let curve = GenericCurve::new(&m, EmitterReference::default());
        let r = iterative_delta_t(&curve, 0.0, 10.0, 180.0, &DeltaTConfig::default()).unwrap();
        assert_eq!(r.delta_t_f, 20.0);
        assert!(r.converged);
    }

    #[test]
    fn invalid_inputs() {
        let m = baseboard();
        let emitter = ZoneEmitter::Generic(GenericCurve::new(&m, EmitterReference::default()));
        let cfg = DeltaTConfig::default();
        assert!(recommended_delta_t(&emitter, -1.0, 10.0, 180.0, &cfg).is_err());
        assert!(recommended_delta_t(&emitter, 1000.0, 0.0, 180.0, &cfg).is_err());
        assert!(recommended_delta_t(&emitter, 1000.0, 10.0, f64::NAN, &cfg).is_err());
    }
}
