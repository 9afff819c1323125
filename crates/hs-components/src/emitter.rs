//! Emitter heat output per unit length.
//!
//! A zone's emitter is described by an [`EmitterCurve`]. The generic curve
//! scales the type's rated output by the water-to-room temperature
//! difference; the manufacturer curve interpolates a measured table and
//! falls back to the generic curve outside the table's declared range.

use crate::common::lerp;
use hs_catalog::{EmitterModel, EmitterReference, ManufacturerEmitterModel};
use serde::Serialize;

/// Lowest temperature-difference ratio fed to the generic curve.
pub const MIN_TEMPERATURE_RATIO: f64 = 0.05;

/// Flow differences count this much more than temperature differences
/// when picking a nearest table point.
pub const FLOW_DISTANCE_WEIGHT: f64 = 10.0;

/// Where an output figure came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputSource {
    Generic,
    Manufacturer { key: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitterOutput {
    /// Output per foot [BTU/hr·ft]
    pub btu_per_ft: f64,
    pub source: OutputSource,
}

/// Output of an emitter as a function of water temperature and flow.
pub trait EmitterCurve {
    /// Type-level data: ΔT bounds, default ΔT, rated output.
    fn model(&self) -> &EmitterModel;

    fn output_per_ft(&self, avg_water_temp_f: f64, flow_gpm: f64) -> EmitterOutput;

    /// Total output [BTU/hr] of `length_ft` of emitter.
    fn capacity(&self, length_ft: f64, avg_water_temp_f: f64, flow_gpm: f64) -> f64 {
        length_ft * self.output_per_ft(avg_water_temp_f, flow_gpm).btu_per_ft
    }
}

/// Type-based curve: `btu_per_ft × ratio^n` with
/// `ratio = (AWT − room) / (AWT_ref − room_ref)`.
#[derive(Debug, Clone, Copy)]
pub struct GenericCurve<'a> {
    pub model: &'a EmitterModel,
    pub reference: EmitterReference,
}

impl<'a> GenericCurve<'a> {
    pub fn new(model: &'a EmitterModel, reference: EmitterReference) -> Self {
        Self { model, reference }
    }

    /// Temperature-difference ratio against the rating point, floored.
    pub fn temperature_ratio(&self, avg_water_temp_f: f64) -> f64 {
        let ratio = (avg_water_temp_f - self.reference.room_temp_f)
            / self.reference.rating_difference_f();
        if ratio.is_nan() {
            return MIN_TEMPERATURE_RATIO;
        }
        ratio.max(MIN_TEMPERATURE_RATIO)
    }
}

impl EmitterCurve for GenericCurve<'_> {
    fn model(&self) -> &EmitterModel {
        self.model
    }

    fn output_per_ft(&self, avg_water_temp_f: f64, _flow_gpm: f64) -> EmitterOutput {
        let ratio = self.temperature_ratio(avg_water_temp_f);
        EmitterOutput {
            btu_per_ft: self.model.btu_per_ft * ratio.powf(self.model.exponent),
            source: OutputSource::Generic,
        }
    }
}

/// Manufacturer table with generic fallback.
#[derive(Debug, Clone, Copy)]
pub struct ManufacturerCurve<'a> {
    pub table: &'a ManufacturerEmitterModel,
    pub fallback: GenericCurve<'a>,
}

impl<'a> ManufacturerCurve<'a> {
    pub fn new(table: &'a ManufacturerEmitterModel, fallback: GenericCurve<'a>) -> Self {
        Self { table, fallback }
    }

    /// Whether a query would be answered from the table.
    pub fn covers(&self, avg_water_temp_f: f64, flow_gpm: f64) -> bool {
        self.table.in_range(avg_water_temp_f, flow_gpm)
    }
}

impl EmitterCurve for ManufacturerCurve<'_> {
    fn model(&self) -> &EmitterModel {
        self.fallback.model
    }

    fn output_per_ft(&self, avg_water_temp_f: f64, flow_gpm: f64) -> EmitterOutput {
        match bilinear_output(self.table, avg_water_temp_f, flow_gpm) {
            Some(btu_per_ft) => EmitterOutput {
                btu_per_ft,
                source: OutputSource::Manufacturer {
                    key: self.table.key.clone(),
                },
            },
            None => self.fallback.output_per_ft(avg_water_temp_f, flow_gpm),
        }
    }
}

/// Output per foot from a manufacturer table.
///
/// `None` when the query lies outside the table's declared ranges. Inside
/// them, the four bracketing corners are interpolated; when the query sits
/// on a table temperature or flow the bracket collapses to that value. If
/// any corner is missing from the table the nearest point is returned.
pub fn bilinear_output(
    table: &ManufacturerEmitterModel,
    avg_water_temp_f: f64,
    flow_gpm: f64,
) -> Option<f64> {
    if !table.in_range(avg_water_temp_f, flow_gpm) {
        return None;
    }

    let temps = table.temperatures();
    let flows = table.flows();
    let corners = bracket(&temps, avg_water_temp_f).zip(bracket(&flows, flow_gpm));
    let Some(((t0, t1), (q0, q1))) = corners else {
        return nearest_output(table, avg_water_temp_f, flow_gpm);
    };

    let (Some(v00), Some(v01), Some(v10), Some(v11)) = (
        table.lookup(t0, q0),
        table.lookup(t0, q1),
        table.lookup(t1, q0),
        table.lookup(t1, q1),
    ) else {
        return nearest_output(table, avg_water_temp_f, flow_gpm);
    };

    let at_q0 = lerp(avg_water_temp_f, t0, t1, v00, v10);
    let at_q1 = lerp(avg_water_temp_f, t0, t1, v01, v11);
    Some(lerp(flow_gpm, q0, q1, at_q0, at_q1))
}

/// Table point closest to the query, with flow distance weighted ×10.
fn nearest_output(
    table: &ManufacturerEmitterModel,
    avg_water_temp_f: f64,
    flow_gpm: f64,
) -> Option<f64> {
    let distance = |t: f64, q: f64| {
        let dt = t - avg_water_temp_f;
        let dq = FLOW_DISTANCE_WEIGHT * (q - flow_gpm);
        (dt * dt + dq * dq).sqrt()
    };
    table
        .points
        .iter()
        .min_by(|a, b| {
            distance(a.avg_water_temp_f, a.flow_gpm)
                .total_cmp(&distance(b.avg_water_temp_f, b.flow_gpm))
        })
        .map(|p| p.btu_per_ft)
}

/// Bracketing pair in a sorted axis; a coincident value brackets itself.
fn bracket(axis: &[f64], x: f64) -> Option<(f64, f64)> {
    if let Some(&hit) = axis.iter().find(|&&a| (a - x).abs() <= 1e-9) {
        return Some((hit, hit));
    }
    let lo = axis.iter().rev().find(|&&a| a < x)?;
    let hi = axis.iter().find(|&&a| a > x)?;
    Some((*lo, *hi))
}
