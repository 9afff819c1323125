//! Per-zone sizing pipeline.
//!
//! load → design ΔT → operating point → head loss → capacity check, with
//! the recommended ΔT computed alongside. Catalog misses are hard errors;
//! anything wrong with the zone's own numbers marks the zone invalid and
//! the rest of the system carries on.

use crate::distribute::ZoneGeometry;
use crate::error::AppResult;
use hs_catalog::{Catalog, NominalSize, PipeMaterial};
use hs_components::{
    Advisory, AdvisoryCode, CapacityCheck, EmitterCurve, GenericCurve, HeadLoss, HeadLossInput,
    ManufacturerCurve, OutputSource, capacity_advisories, check_capacity, head_loss,
    suggest_pipe_size,
};
use hs_fluids::FluidProperties;
use hs_project::{SettingsDef, ZoneDef};
use hs_solver::{
    DeltaTConfig, EmitterRun, OperatingPoint, RecommendedDeltaT, ZoneEmitter, operating_point,
    recommended_delta_t,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Shared, read-only inputs for every zone of a system.
#[derive(Debug, Clone, Copy)]
pub struct ZoneContext<'a> {
    pub catalog: &'a Catalog,
    pub settings: &'a SettingsDef,
    pub fluid: &'a FluidProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Manual,
    Auto,
    Unassigned,
}

/// Everything computed for one zone.
///
/// `valid = false` carries an `error` message and no derived numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneResult {
    pub id: String,
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub material: PipeMaterial,
    pub size: NominalSize,
    pub load_btu_hr: Option<f64>,
    pub load_source: LoadSource,
    pub geometry: ZoneGeometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating: Option<OperatingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_delta_t: Option<RecommendedDeltaT>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<HeadLoss>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CapacityCheck>,
    pub advisories: Vec<Advisory>,
}

impl ZoneResult {
    fn invalid(
        zone: &ZoneDef,
        load: Option<f64>,
        source: LoadSource,
        geometry: ZoneGeometry,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            valid: false,
            error: Some(error.into()),
            material: zone.pipe.material,
            size: zone.pipe.size,
            load_btu_hr: load,
            load_source: source,
            geometry,
            operating: None,
            recommended_delta_t: None,
            head: None,
            capacity: None,
            advisories: Vec::new(),
        }
    }

    /// Requested flow [GPM] of a valid zone.
    pub fn flow_gpm(&self) -> Option<f64> {
        self.operating.as_ref().map(|op| op.flow_gpm)
    }

    /// Head loss [ft] of a valid zone.
    pub fn head_loss_ft(&self) -> Option<f64> {
        self.head.as_ref().map(|h| h.head_loss_ft)
    }
}

/// Run one zone through the sizing pipeline.
///
/// `load` is the zone's assigned load (manual or distributed).
pub fn analyze_zone(
    ctx: &ZoneContext<'_>,
    zone: &ZoneDef,
    load: Option<f64>,
    source: LoadSource,
    geometry: ZoneGeometry,
) -> AppResult<ZoneResult> {
    let catalog = ctx.catalog;
    let settings = ctx.settings;

    // Hard lookups first: a missing key fails regardless of the numbers
    let pipe = catalog.pipe(zone.pipe.material, zone.pipe.size)?;
    let limits = catalog.velocity_limits(zone.pipe.material)?;
    let emitter = match &zone.emitter {
        Some(def) => {
            let model = catalog.emitter(def.kind)?;
            let generic = GenericCurve::new(model, catalog.emitter_reference);
            let curve = match &def.model {
                Some(key) => {
                    let table = catalog.manufacturer_model(key)?;
                    if table.emitter_kind != def.kind {
                        return Ok(ZoneResult::invalid(
                            zone,
                            load,
                            source,
                            geometry,
                            format!(
                                "emitter model '{key}' is a {}, not a {}",
                                table.emitter_kind, def.kind
                            ),
                        ));
                    }
                    ZoneEmitter::Manufacturer(ManufacturerCurve::new(table, generic))
                }
                None => ZoneEmitter::Generic(generic),
            };
            Some((curve, def))
        }
        None => None,
    };

    let invalid = |error: String| -> AppResult<ZoneResult> {
        Ok(ZoneResult::invalid(zone, load, source, geometry, error))
    };

    let Some(load_btu_hr) = load else {
        return invalid("no heat load assigned".to_string());
    };
    if !(load_btu_hr.is_finite() && load_btu_hr >= 0.0) {
        return invalid(format!("heat load must be a non-negative number, got {load_btu_hr}"));
    }
    let straight = zone.straight_length_ft;
    if !(straight.is_finite() && straight > 0.0) {
        return invalid(format!("straight length must be positive, got {straight}"));
    }
    if let Some(dt) = zone.design_delta_t_f {
        if !(dt.is_finite() && dt > 0.0) {
            return invalid(format!("design ΔT must be positive, got {dt}"));
        }
    }
    if let Some((_, def)) = &emitter {
        if !(def.length_ft.is_finite() && def.length_ft > 0.0) {
            return invalid(format!("emitter length must be positive, got {}", def.length_ft));
        }
    }

    let mut advisories = Vec::new();

    let design_delta_t = match (zone.design_delta_t_f, &emitter) {
        (Some(dt), Some((curve, _))) => {
            let model = curve.model();
            if dt < model.min_delta_t_f || dt > model.max_delta_t_f {
                advisories.push(
                    Advisory::new(
                        AdvisoryCode::DesignDeltaTOutOfRange,
                        format!(
                            "design ΔT {dt:.1} °F is outside the {:.0}–{:.0} °F range for {}",
                            model.min_delta_t_f, model.max_delta_t_f, model.kind
                        ),
                    )
                    .with_suggestion(format!("use {:.0} °F", model.clamp_delta_t(dt))),
                );
            }
            dt
        }
        (Some(dt), None) => dt,
        (None, Some((curve, _))) => curve.model().default_delta_t_f,
        (None, None) => settings.default_delta_t_f,
    };

    let run = emitter.as_ref().map(|(curve, def)| EmitterRun {
        curve,
        length_ft: def.length_ft,
    });
    let operating = match operating_point(
        load_btu_hr,
        design_delta_t,
        settings.supply_temperature_f,
        run,
    ) {
        Ok(op) => op,
        Err(e) => return invalid(e.to_string()),
    };

    let mut head = match head_loss(&HeadLossInput {
        flow_gpm: operating.flow_gpm,
        pipe,
        straight_length_ft: straight,
        fitting_length_ft: geometry.fitting_length_ft,
        fluid: ctx.fluid,
        fluid_kind: settings.fluid.kind,
        method: settings.method,
        overrides: settings.overrides,
    }) {
        Ok(h) => h,
        Err(e) => return invalid(e.to_string()),
    };
    advisories.append(&mut head.advisories);

    let capacity = match check_capacity(pipe, limits, load_btu_hr, design_delta_t) {
        Ok(c) => c,
        Err(e) => return invalid(e.to_string()),
    };
    if capacity.exceeds_absolute || capacity.exceeds_recommended {
        let target = if capacity.exceeds_absolute {
            limits.absolute_fps
        } else {
            limits.recommended_fps
        };
        let upsize = suggest_pipe_size(catalog, pipe.material, operating.flow_gpm, target);
        advisories.extend(capacity_advisories(&capacity, pipe, upsize));
    }

    let mut recommended = None;
    if let Some((curve, def)) = &emitter {
        if let Some(check) = &operating.emitter {
            if check.emitter_limited {
                let needed_ft = load_btu_hr / check.output_btu_per_ft;
                advisories.push(
                    Advisory::new(
                        AdvisoryCode::EmitterUndersized,
                        format!(
                            "{:.0} ft of {} delivers {:.0} of {:.0} BTU/hr",
                            def.length_ft, def.kind, check.capacity_btu_hr, load_btu_hr
                        ),
                    )
                    .with_suggestion(format!("lengthen the emitter to {needed_ft:.0} ft")),
                );
            }
            if let (Some(key), OutputSource::Generic) = (&def.model, &check.source) {
                advisories.push(Advisory::new(
                    AdvisoryCode::ManufacturerDataOutOfRange,
                    format!(
                        "'{key}' has no data at {:.0} °F / {:.2} GPM; generic {} output used",
                        check.avg_water_temp_f, operating.flow_gpm, def.kind
                    ),
                ));
            }
        }

        let rec = recommended_delta_t(
            curve,
            load_btu_hr,
            def.length_ft,
            settings.supply_temperature_f,
            &DeltaTConfig::default(),
        );
        match rec {
            Ok(r) => {
                if !r.converged {
                    warn!(zone = %zone.id, delta_t = r.delta_t_f, "recommended ΔT did not converge");
                    advisories.push(Advisory::new(
                        AdvisoryCode::NotConverged,
                        format!(
                            "recommended ΔT stopped at {:.1} °F after {} iterations",
                            r.delta_t_f, r.iterations
                        ),
                    ));
                }
                recommended = Some(r);
            }
            Err(e) => return invalid(e.to_string()),
        }
    }

    for advisory in &advisories {
        if advisory.code == AdvisoryCode::HazenWilliamsNonWater {
            warn!(zone = %zone.id, "{}", advisory.message);
        }
    }

    debug!(
        zone = %zone.id,
        load_btu_hr,
        flow_gpm = operating.flow_gpm,
        velocity_fps = head.velocity_fps,
        head_loss_ft = head.head_loss_ft,
        "zone analyzed"
    );

    Ok(ZoneResult {
        id: zone.id.clone(),
        name: zone.name.clone(),
        valid: true,
        error: None,
        material: pipe.material,
        size: pipe.size,
        load_btu_hr: Some(load_btu_hr),
        load_source: source,
        geometry,
        operating: Some(operating),
        recommended_delta_t: recommended,
        head: Some(head),
        capacity: Some(capacity),
        advisories,
    })
}
