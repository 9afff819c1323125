//! Evaluated fluid properties.

use hs_core::units::constants::{FT2_PER_M2, LB_FT3_PER_KG_M3, WATER_REF_DENSITY_LB_FT3};
use hs_core::units::{Density, DynVisc};
use serde::Serialize;
use uom::si::dynamic_viscosity::{centipoise, pascal_second};
use uom::si::mass_density::kilogram_per_cubic_meter;

/// Density and viscosity of the loop fluid at one temperature.
///
/// Immutable; build a new one for a new temperature or fluid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluidProperties {
    /// Evaluation temperature [°F] (after clamping)
    pub temperature_f: f64,
    /// Density [lb/ft³]
    pub density_lb_ft3: f64,
    /// Dynamic viscosity [cP]
    pub dynamic_viscosity_cp: f64,
    /// Kinematic viscosity [ft²/s]
    pub kinematic_viscosity_ft2_s: f64,
}

impl FluidProperties {
    pub fn new(temperature_f: f64, density_lb_ft3: f64, dynamic_viscosity_cp: f64) -> Self {
        let rho = Density::new::<kilogram_per_cubic_meter>(density_lb_ft3 / LB_FT3_PER_KG_M3);
        let mu = DynVisc::new::<centipoise>(dynamic_viscosity_cp);
        let nu_m2_s = mu.get::<pascal_second>() / rho.get::<kilogram_per_cubic_meter>();

        Self {
            temperature_f,
            density_lb_ft3,
            dynamic_viscosity_cp,
            kinematic_viscosity_ft2_s: nu_m2_s * FT2_PER_M2,
        }
    }

    pub fn density(&self) -> Density {
        Density::new::<kilogram_per_cubic_meter>(self.density_lb_ft3 / LB_FT3_PER_KG_M3)
    }

    pub fn dynamic_viscosity(&self) -> DynVisc {
        DynVisc::new::<centipoise>(self.dynamic_viscosity_cp)
    }

    /// Density relative to 62.4 lb/ft³ water.
    pub fn specific_gravity(&self) -> f64 {
        self.density_lb_ft3 / WATER_REF_DENSITY_LB_FT3
    }
}
