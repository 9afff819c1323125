//! Pipe geometry and velocity limits.

use hs_core::units::constants::IN_PER_FT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipe material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    /// Copper tube, Type L
    Copper,
    /// PEX, SDR-9
    Pex,
    /// Black steel, Schedule 40
    Steel,
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipeMaterial::Copper => "copper",
            PipeMaterial::Pex => "PEX",
            PipeMaterial::Steel => "steel",
        };
        f.write_str(name)
    }
}

/// Nominal pipe size. Ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NominalSize {
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "3/4")]
    ThreeQuarter,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1-1/4")]
    OneAndQuarter,
    #[serde(rename = "1-1/2")]
    OneAndHalf,
    #[serde(rename = "2")]
    Two,
}

impl NominalSize {
    pub const ALL: [NominalSize; 6] = [
        NominalSize::Half,
        NominalSize::ThreeQuarter,
        NominalSize::One,
        NominalSize::OneAndQuarter,
        NominalSize::OneAndHalf,
        NominalSize::Two,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NominalSize::Half => "1/2",
            NominalSize::ThreeQuarter => "3/4",
            NominalSize::One => "1",
            NominalSize::OneAndQuarter => "1-1/4",
            NominalSize::OneAndHalf => "1-1/2",
            NominalSize::Two => "2",
        }
    }

    /// Parse a size label such as `3/4` or `1-1/4` (a trailing `"` is allowed).
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().trim_end_matches('"');
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for NominalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\"", self.label())
    }
}

/// Geometry and wall roughness of one catalog pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSpec {
    pub material: PipeMaterial,
    pub size: NominalSize,
    /// Inner diameter [in]
    pub inner_diameter_in: f64,
    /// Absolute roughness [ft]
    pub roughness_ft: f64,
    /// Hazen-Williams C coefficient
    pub hazen_williams_c: f64,
}

impl PipeSpec {
    /// Inner diameter [ft]
    pub fn inner_diameter_ft(&self) -> f64 {
        self.inner_diameter_in / IN_PER_FT
    }

    /// Flow cross-section [ft²]
    pub fn flow_area_ft2(&self) -> f64 {
        let d = self.inner_diameter_ft();
        std::f64::consts::PI * d * d / 4.0
    }

    /// Roughness divided by diameter.
    pub fn relative_roughness(&self) -> f64 {
        self.roughness_ft / self.inner_diameter_ft()
    }
}

/// Velocity ceilings for a material [ft/s].
///
/// The recommended value is an advisory design target (noise); the
/// absolute value is a physical limit (erosion).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityLimits {
    pub material: PipeMaterial,
    pub recommended_fps: f64,
    pub absolute_fps: f64,
}
