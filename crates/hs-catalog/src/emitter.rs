//! Emitter reference data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emitter (terminal unit) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitterKind {
    /// Fin-tube baseboard
    Baseboard,
    CastIronRadiator,
    PanelRadiator,
    /// Tubing embedded in a floor; length is tubing length
    RadiantFloor,
}

impl fmt::Display for EmitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmitterKind::Baseboard => "baseboard",
            EmitterKind::CastIronRadiator => "cast iron radiator",
            EmitterKind::PanelRadiator => "panel radiator",
            EmitterKind::RadiantFloor => "radiant floor",
        };
        f.write_str(name)
    }
}

/// Conditions at which generic emitter outputs are rated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterReference {
    /// Rating average water temperature [°F]
    pub avg_water_temp_f: f64,
    /// Rating room temperature [°F]
    pub room_temp_f: f64,
}

impl Default for EmitterReference {
    fn default() -> Self {
        Self {
            avg_water_temp_f: 180.0,
            room_temp_f: 65.0,
        }
    }
}

impl EmitterReference {
    /// Water-to-room temperature difference at rating conditions [°F]
    pub fn rating_difference_f(&self) -> f64 {
        self.avg_water_temp_f - self.room_temp_f
    }
}

/// Type-based emitter curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterModel {
    pub kind: EmitterKind,
    /// Design temperature drop used when a zone does not set one [°F]
    pub default_delta_t_f: f64,
    /// Output per foot at the reference conditions [BTU/hr·ft]
    pub btu_per_ft: f64,
    /// Exponent on the water-to-room temperature difference ratio
    pub exponent: f64,
    pub min_delta_t_f: f64,
    pub max_delta_t_f: f64,
}

impl EmitterModel {
    pub fn clamp_delta_t(&self, delta_t_f: f64) -> f64 {
        delta_t_f.clamp(self.min_delta_t_f, self.max_delta_t_f)
    }
}

/// Closed interval used for a manufacturer table's declared validity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One measured manufacturer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub avg_water_temp_f: f64,
    pub flow_gpm: f64,
    /// Output per foot [BTU/hr·ft]
    pub btu_per_ft: f64,
}

/// Empirical (temperature, flow) -> output table for a specific product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerEmitterModel {
    pub key: String,
    pub name: String,
    pub emitter_kind: EmitterKind,
    pub temperature_range_f: ValueRange,
    pub flow_range_gpm: ValueRange,
    pub points: Vec<PerformancePoint>,
}

impl ManufacturerEmitterModel {
    pub fn in_range(&self, avg_water_temp_f: f64, flow_gpm: f64) -> bool {
        self.temperature_range_f.contains(avg_water_temp_f) && self.flow_range_gpm.contains(flow_gpm)
    }

    /// Sorted distinct average water temperatures in the table.
    pub fn temperatures(&self) -> Vec<f64> {
        sorted_unique(self.points.iter().map(|p| p.avg_water_temp_f))
    }

    /// Sorted distinct flow rates in the table.
    pub fn flows(&self) -> Vec<f64> {
        sorted_unique(self.points.iter().map(|p| p.flow_gpm))
    }

    /// Output at an exact table point, if the table holds one.
    pub fn lookup(&self, avg_water_temp_f: f64, flow_gpm: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| same(p.avg_water_temp_f, avg_water_temp_f) && same(p.flow_gpm, flow_gpm))
            .map(|p| p.btu_per_ft)
    }
}

const KEY_EPSILON: f64 = 1e-9;

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() <= KEY_EPSILON
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(f64::total_cmp);
    out.dedup_by(|a, b| same(*a, *b));
    out
}
