// hs-core/src/units.rs
//
// The engine works in US customary hydronic units (GPM, ft, in, °F, BTU/hr)
// internally as plain f64. These aliases and constructors are the typed edge
// used wherever a value crosses into SI.

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn gpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::gallon_per_minute;
    VolumeRate::new::<gallon_per_minute>(v)
}

#[inline]
pub fn deg_f(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

pub mod constants {
    /// Standard gravity [ft/s²]
    pub const G_FT_S2: f64 = 32.174;

    /// US gallons per cubic foot
    pub const GAL_PER_FT3: f64 = 7.480_519;

    pub const IN_PER_FT: f64 = 12.0;

    pub const SEC_PER_MIN: f64 = 60.0;

    /// Density of water used for specific gravity [lb/ft³]
    pub const WATER_REF_DENSITY_LB_FT3: f64 = 62.4;

    /// GPM · ft of head per water horsepower
    pub const GPM_FT_PER_HP: f64 = 3960.0;

    /// ft²/s per m²/s
    pub const FT2_PER_M2: f64 = 10.763_910_4;

    /// lb/ft³ per kg/m³
    pub const LB_FT3_PER_KG_M3: f64 = 0.062_427_96;
}

/// Convert a volumetric flow in ft³/s to GPM.
#[inline]
pub fn cfs_to_gpm(flow_cfs: f64) -> f64 {
    flow_cfs * constants::GAL_PER_FT3 * constants::SEC_PER_MIN
}
