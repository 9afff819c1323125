//! Project schema definitions.

use hs_catalog::{EmitterKind, FittingKind, NominalSize, PipeMaterial};
use hs_components::{FrictionMethod, FrictionOverrides};
use hs_fluids::FluidSelection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub systems: Vec<SystemDef>,
}

/// One heating system: a set of zones served by one pump.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemDef {
    pub id: String,
    pub name: String,
    /// Total load [BTU/hr] to distribute over zones without a manual load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_load_btu_hr: Option<f64>,
    #[serde(default)]
    pub settings: SettingsDef,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    pub id: String,
    pub name: String,
    /// Manual load [BTU/hr]; `None` takes a share of the system load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_load_btu_hr: Option<f64>,
    /// `None` uses the emitter's default ΔT, then the settings default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_delta_t_f: Option<f64>,
    pub pipe: PipeDef,
    pub straight_length_ft: f64,
    /// Fitting counts by kind
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fittings: BTreeMap<FittingKind, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter: Option<EmitterDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub material: PipeMaterial,
    pub size: NominalSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmitterDef {
    pub kind: EmitterKind,
    pub length_ft: f64,
    /// Manufacturer table key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Advanced settings shared by every zone of a system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsDef {
    pub fluid: FluidSelection,
    /// Temperature for fluid properties [°F]
    pub fluid_temperature_f: f64,
    /// Supply water temperature for emitter checks [°F]
    pub supply_temperature_f: f64,
    pub method: FrictionMethod,
    pub overrides: FrictionOverrides,
    pub head_safety_factor_pct: f64,
    pub flow_safety_factor_pct: f64,
    /// ΔT for zones with neither a design ΔT nor an emitter [°F]
    pub default_delta_t_f: f64,
}

impl Default for SettingsDef {
    fn default() -> Self {
        Self {
            fluid: FluidSelection::default(),
            fluid_temperature_f: 140.0,
            supply_temperature_f: 180.0,
            method: FrictionMethod::DarcyWeisbach,
            overrides: FrictionOverrides::default(),
            head_safety_factor_pct: 10.0,
            flow_safety_factor_pct: 0.0,
            default_delta_t_f: 20.0,
        }
    }
}
