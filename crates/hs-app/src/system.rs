//! Whole-system analysis.

use crate::distribute::{distribute_loads, zone_geometry};
use crate::error::AppResult;
use crate::pump::{PumpSizing, size_pump};
use crate::zone::{LoadSource, ZoneContext, ZoneResult, analyze_zone};
use hs_catalog::Catalog;
use hs_fluids::FluidProperties;
use hs_project::{SettingsDef, SystemDef};
use serde::Serialize;
use tracing::{info, warn};

/// Complete result record for one system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemReport {
    pub id: String,
    pub name: String,
    pub settings: SettingsDef,
    pub fluid: FluidProperties,
    pub system_load_btu_hr: Option<f64>,
    pub manual_load_btu_hr: f64,
    pub distributed_load_btu_hr: f64,
    pub zones: Vec<ZoneResult>,
    pub pump: PumpSizing,
    pub warnings: Vec<String>,
}

impl SystemReport {
    pub fn zone(&self, id: &str) -> Option<&ZoneResult> {
        self.zones.iter().find(|z| z.id == id)
    }
}

/// Analyze every zone of `system` and size its pump.
///
/// Fails only on catalog misses. Zones with unusable input are reported
/// invalid and left out of the pump sizing.
pub fn analyze_system(system: &SystemDef, catalog: &Catalog) -> AppResult<SystemReport> {
    let settings = &system.settings;
    let fluid = settings.fluid.properties(settings.fluid_temperature_f);
    let ctx = ZoneContext {
        catalog,
        settings,
        fluid: &fluid,
    };

    let geometries = system
        .zones
        .iter()
        .map(|z| zone_geometry(z, catalog))
        .collect::<AppResult<Vec<_>>>()?;
    let manual: Vec<Option<f64>> = system.zones.iter().map(|z| z.heat_load_btu_hr).collect();
    let weights: Vec<f64> = geometries.iter().map(|g| g.weight_ft).collect();
    let distribution = distribute_loads(system.heat_load_btu_hr, &manual, &weights);

    let mut warnings = Vec::new();
    if distribution.over_assigned {
        let message = format!(
            "manual zone loads ({:.0} BTU/hr) exceed the system load ({:.0} BTU/hr); nothing left to distribute",
            distribution.manual_total_btu_hr,
            system.heat_load_btu_hr.unwrap_or_default()
        );
        warn!(system = %system.id, "{message}");
        warnings.push(message);
    }
    if system.heat_load_btu_hr.is_none() && distribution.auto.iter().any(|a| *a) {
        warnings.push("no system heat load given; zones without a manual load are unassigned".to_string());
    }

    let mut zones = Vec::with_capacity(system.zones.len());
    for (i, zone) in system.zones.iter().enumerate() {
        let load = distribution.loads[i];
        let source = match (distribution.auto[i], load) {
            (false, _) => LoadSource::Manual,
            (true, Some(_)) => LoadSource::Auto,
            (true, None) => LoadSource::Unassigned,
        };
        zones.push(analyze_zone(&ctx, zone, load, source, geometries[i])?);
    }

    let excluded: f64 = zones
        .iter()
        .filter(|z| !z.valid)
        .filter_map(|z| z.load_btu_hr)
        .filter(|l| l.is_finite() && *l > 0.0)
        .sum();
    if excluded > 0.0 {
        let message =
            format!("{excluded:.0} BTU/hr assigned to invalid zones is excluded from pump sizing");
        warn!(system = %system.id, "{message}");
        warnings.push(message);
    }

    let pump = size_pump(
        &zones,
        settings.flow_safety_factor_pct,
        settings.head_safety_factor_pct,
        fluid.specific_gravity(),
    );

    let invalid = zones.iter().filter(|z| !z.valid).count();
    info!(
        system = %system.id,
        zones = zones.len(),
        invalid,
        total_flow_gpm = pump.total_flow_gpm,
        required_head_ft = pump.required_head_ft,
        critical_zone = pump.critical_zone.as_deref().unwrap_or("-"),
        "system analyzed"
    );

    let distributed = zones
        .iter()
        .filter(|z| z.load_source == LoadSource::Auto)
        .filter_map(|z| z.load_btu_hr)
        .sum();

    Ok(SystemReport {
        id: system.id.clone(),
        name: system.name.clone(),
        settings: *settings,
        fluid,
        system_load_btu_hr: system.heat_load_btu_hr,
        manual_load_btu_hr: distribution.manual_total_btu_hr,
        distributed_load_btu_hr: distributed,
        zones,
        pump,
        warnings,
    })
}
