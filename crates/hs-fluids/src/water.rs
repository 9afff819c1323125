//! Liquid water correlations, evaluated in SI.
//!
//! Density follows the Tanaka et al. (2001) fit and dynamic viscosity the
//! Vogel equation. Both are good to well under 1% between freezing and
//! 250 °F, which covers every hydronic operating point.

use hs_core::units::{Density, DynVisc, deg_f};
use uom::si::dynamic_viscosity::{centipoise, pascal_second};
use uom::si::mass_density::{kilogram_per_cubic_meter, pound_per_cubic_foot};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};

pub const MIN_TEMPERATURE_F: f64 = 33.0;
pub const MAX_TEMPERATURE_F: f64 = 250.0;

/// Used when the caller hands over a non-finite temperature.
pub const DEFAULT_TEMPERATURE_F: f64 = 140.0;

pub fn clamp_temperature_f(temperature_f: f64) -> f64 {
    if temperature_f.is_finite() {
        temperature_f.clamp(MIN_TEMPERATURE_F, MAX_TEMPERATURE_F)
    } else {
        DEFAULT_TEMPERATURE_F
    }
}

pub fn density(temperature_f: f64) -> Density {
    let t_c = deg_f(clamp_temperature_f(temperature_f)).get::<degree_celsius>();
    let rho = 999.974_95
        * (1.0 - (t_c + 288.941_4) / (508_929.2 * (t_c + 68.129_63)) * (t_c - 3.986_3).powi(2));
    Density::new::<kilogram_per_cubic_meter>(rho)
}

pub fn dynamic_viscosity(temperature_f: f64) -> DynVisc {
    let t_k = deg_f(clamp_temperature_f(temperature_f)).get::<kelvin>();
    let mu = 2.414e-5 * 10f64.powf(247.8 / (t_k - 140.0));
    DynVisc::new::<pascal_second>(mu)
}

pub fn density_lb_ft3(temperature_f: f64) -> f64 {
    density(temperature_f).get::<pound_per_cubic_foot>()
}

pub fn dynamic_viscosity_cp(temperature_f: f64) -> f64 {
    dynamic_viscosity(temperature_f).get::<centipoise>()
}
