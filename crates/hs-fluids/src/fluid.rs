//! Fluid selection.

use serde::{Deserialize, Serialize};

use crate::properties::FluidProperties;
use crate::water;

/// Heat-transfer fluid circulating in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidKind {
    #[default]
    Water,
    /// 30% propylene glycol by volume
    #[serde(rename = "propylene_glycol_30")]
    PropyleneGlycol30,
    /// 50% propylene glycol by volume
    #[serde(rename = "propylene_glycol_50")]
    PropyleneGlycol50,
    /// User-supplied density and viscosity
    Custom,
}

impl FluidKind {
    pub fn display_name(self) -> &'static str {
        match self {
            FluidKind::Water => "Water",
            FluidKind::PropyleneGlycol30 => "Propylene glycol 30%",
            FluidKind::PropyleneGlycol50 => "Propylene glycol 50%",
            FluidKind::Custom => "Custom fluid",
        }
    }

    /// Hazen-Williams coefficients are only calibrated for water.
    pub fn is_water(self) -> bool {
        matches!(self, FluidKind::Water)
    }

    /// (density multiplier, viscosity multiplier) over water at the same temperature.
    fn glycol_factors(self) -> Option<(f64, f64)> {
        match self {
            FluidKind::PropyleneGlycol30 => Some((1.03, 2.4)),
            FluidKind::PropyleneGlycol50 => Some((1.045, 5.5)),
            FluidKind::Water | FluidKind::Custom => None,
        }
    }
}

/// A fluid choice plus optional custom overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FluidSelection {
    pub kind: FluidKind,
    /// Custom density [lb/ft³], used only for `FluidKind::Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_density_lb_ft3: Option<f64>,
    /// Custom dynamic viscosity [cP], used only for `FluidKind::Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_viscosity_cp: Option<f64>,
}

impl FluidSelection {
    pub fn new(kind: FluidKind) -> Self {
        Self {
            kind,
            custom_density_lb_ft3: None,
            custom_viscosity_cp: None,
        }
    }

    pub fn custom(density_lb_ft3: f64, viscosity_cp: f64) -> Self {
        Self {
            kind: FluidKind::Custom,
            custom_density_lb_ft3: Some(density_lb_ft3),
            custom_viscosity_cp: Some(viscosity_cp),
        }
    }

    /// Evaluate density and viscosity at `temperature_f`.
    pub fn properties(&self, temperature_f: f64) -> FluidProperties {
        let temperature_f = water::clamp_temperature_f(temperature_f);
        let base_density = water::density_lb_ft3(temperature_f);
        let base_viscosity = water::dynamic_viscosity_cp(temperature_f);

        let (density, viscosity) = match (self.kind, self.kind.glycol_factors()) {
            (FluidKind::Custom, _) => (
                usable(self.custom_density_lb_ft3).unwrap_or(base_density),
                usable(self.custom_viscosity_cp).unwrap_or(base_viscosity),
            ),
            (_, Some((rho_mult, mu_mult))) => (base_density * rho_mult, base_viscosity * mu_mult),
            _ => (base_density, base_viscosity),
        };

        FluidProperties::new(temperature_f, density, viscosity)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glycol_is_denser_and_thicker_than_water() {
        let water = FluidSelection::new(FluidKind::Water).properties(140.0);
        let pg30 = FluidSelection::new(FluidKind::PropyleneGlycol30).properties(140.0);
        let pg50 = FluidSelection::new(FluidKind::PropyleneGlycol50).properties(140.0);

        assert!(pg30.density_lb_ft3 > water.density_lb_ft3);
        assert!(pg50.density_lb_ft3 > pg30.density_lb_ft3);
        assert!(pg30.dynamic_viscosity_cp > water.dynamic_viscosity_cp);
        assert!(pg50.dynamic_viscosity_cp > pg30.dynamic_viscosity_cp);
    }

    #[test]
    fn custom_passes_values_through() {
        let props = FluidSelection::custom(60.0, 1.5).properties(140.0);
        assert_eq!(props.density_lb_ft3, 60.0);
        assert_eq!(props.dynamic_viscosity_cp, 1.5);
    }

    #[test]
    fn custom_falls_back_per_field() {
        let water = FluidSelection::new(FluidKind::Water).properties(120.0);

        let missing = FluidSelection::new(FluidKind::Custom).properties(120.0);
        assert_eq!(missing, water);

        let bad = FluidSelection {
            kind: FluidKind::Custom,
            custom_density_lb_ft3: Some(-3.0),
            custom_viscosity_cp: Some(2.0),
        }
        .properties(120.0);
        assert_eq!(bad.density_lb_ft3, water.density_lb_ft3);
        assert_eq!(bad.dynamic_viscosity_cp, 2.0);

        let nan = FluidSelection::custom(f64::NAN, f64::INFINITY).properties(120.0);
        assert_eq!(nan, water);
    }

    #[test]
    fn custom_values_ignored_for_water() {
        let selection = FluidSelection {
            kind: FluidKind::Water,
            custom_density_lb_ft3: Some(10.0),
            custom_viscosity_cp: Some(10.0),
        };
        let props = selection.properties(140.0);
        assert!(props.density_lb_ft3 > 60.0);
        assert!(props.dynamic_viscosity_cp < 1.0);
    }

    #[test]
    fn only_water_is_water() {
        assert!(FluidKind::Water.is_water());
        assert!(!FluidKind::PropyleneGlycol30.is_water());
        assert!(!FluidKind::PropyleneGlycol50.is_water());
        assert!(!FluidKind::Custom.is_water());
    }
}
