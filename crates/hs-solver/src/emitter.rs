//! The emitter attached to a zone.

use hs_catalog::EmitterModel;
use hs_components::{EmitterCurve, EmitterOutput, GenericCurve, ManufacturerCurve};

/// Generic or manufacturer-backed emitter curve.
///
/// Which variant a zone carries decides how its recommended ΔT is found.
#[derive(Debug, Clone, Copy)]
pub enum ZoneEmitter<'a> {
    Generic(GenericCurve<'a>),
    Manufacturer(ManufacturerCurve<'a>),
}

impl EmitterCurve for ZoneEmitter<'_> {
    fn model(&self) -> &EmitterModel {
        match self {
            ZoneEmitter::Generic(c) => c.model(),
            ZoneEmitter::Manufacturer(c) => c.model(),
        }
    }

    fn output_per_ft(&self, avg_water_temp_f: f64, flow_gpm: f64) -> EmitterOutput {
        match self {
            ZoneEmitter::Generic(c) => c.output_per_ft(avg_water_temp_f, flow_gpm),
            ZoneEmitter::Manufacturer(c) => c.output_per_ft(avg_water_temp_f, flow_gpm),
        }
    }
}

impl<'a> ZoneEmitter<'a> {
    /// The type-based curve, used for the closed-form estimate.
    pub fn generic(&self) -> GenericCurve<'a> {
        match self {
            ZoneEmitter::Generic(c) => *c,
            ZoneEmitter::Manufacturer(c) => c.fallback,
        }
    }
}
