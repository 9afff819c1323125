//! The reference data set and its lookups.

use crate::emitter::{EmitterKind, EmitterModel, EmitterReference, ManufacturerEmitterModel};
use crate::error::{CatalogError, CatalogResult};
use crate::fitting::{FittingKind, FittingSpec};
use crate::pipe::{NominalSize, PipeMaterial, PipeSpec, VelocityLimits};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_YAML: &str = include_str!("../data/builtin.yaml");

/// Immutable reference tables shared read-only by every zone computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub emitter_reference: EmitterReference,
    pub pipes: Vec<PipeSpec>,
    pub velocity_limits: Vec<VelocityLimits>,
    #[serde(default)]
    pub fittings: Vec<FittingSpec>,
    #[serde(default)]
    pub emitters: Vec<EmitterModel>,
    #[serde(default)]
    pub manufacturer_models: Vec<ManufacturerEmitterModel>,
}

impl Catalog {
    /// The data set shipped with the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_yaml_str(BUILTIN_YAML)
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn pipe(&self, material: PipeMaterial, size: NominalSize) -> CatalogResult<&PipeSpec> {
        self.pipes
            .iter()
            .find(|p| p.material == material && p.size == size)
            .ok_or(CatalogError::NoPipeData { material, size })
    }

    /// Every catalog pipe of one material, smallest first.
    pub fn pipes_of(&self, material: PipeMaterial) -> Vec<&PipeSpec> {
        let mut pipes: Vec<&PipeSpec> = self.pipes.iter().filter(|p| p.material == material).collect();
        pipes.sort_by_key(|p| p.size);
        pipes
    }

    pub fn velocity_limits(&self, material: PipeMaterial) -> CatalogResult<&VelocityLimits> {
        self.velocity_limits
            .iter()
            .find(|v| v.material == material)
            .ok_or(CatalogError::NoVelocityLimits { material })
    }

    /// Equivalent length [ft] of a single fitting.
    pub fn fitting_length(
        &self,
        kind: FittingKind,
        material: PipeMaterial,
        size: NominalSize,
    ) -> CatalogResult<f64> {
        self.fittings
            .iter()
            .find(|f| f.kind == kind && f.material == material)
            .and_then(|f| f.equivalent_length(size))
            .ok_or(CatalogError::NoFittingData {
                kind,
                material,
                size,
            })
    }

    pub fn emitter(&self, kind: EmitterKind) -> CatalogResult<&EmitterModel> {
        self.emitters
            .iter()
            .find(|e| e.kind == kind)
            .ok_or(CatalogError::NoEmitterData { kind })
    }

    pub fn manufacturer_model(&self, key: &str) -> CatalogResult<&ManufacturerEmitterModel> {
        self.manufacturer_models
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| CatalogError::UnknownManufacturerModel {
                key: key.to_string(),
            })
    }

    /// Reject tables the engine cannot compute with.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut pipe_keys = HashSet::new();
        for pipe in &self.pipes {
            if !pipe_keys.insert((pipe.material, pipe.size)) {
                return invalid(format!("duplicate pipe {} {}", pipe.size, pipe.material));
            }
            if !positive(pipe.inner_diameter_in) {
                return invalid(format!(
                    "{} {} inner diameter must be positive",
                    pipe.size, pipe.material
                ));
            }
            if !(pipe.roughness_ft.is_finite() && pipe.roughness_ft >= 0.0) {
                return invalid(format!(
                    "{} {} roughness must be non-negative",
                    pipe.size, pipe.material
                ));
            }
            if !positive(pipe.hazen_williams_c) {
                return invalid(format!(
                    "{} {} Hazen-Williams C must be positive",
                    pipe.size, pipe.material
                ));
            }
        }

        for limits in &self.velocity_limits {
            if !positive(limits.recommended_fps)
                || !positive(limits.absolute_fps)
                || limits.recommended_fps > limits.absolute_fps
            {
                return invalid(format!(
                    "{} velocity limits must satisfy 0 < recommended <= absolute",
                    limits.material
                ));
            }
        }

        for fitting in &self.fittings {
            if fitting
                .equivalent_length_ft
                .values()
                .any(|l| !(l.is_finite() && *l >= 0.0))
            {
                return invalid(format!(
                    "{} on {} has a negative equivalent length",
                    fitting.kind, fitting.material
                ));
            }
        }

        let reference = self.emitter_reference;
        if !positive(reference.rating_difference_f()) {
            return invalid("emitter reference water temperature must exceed room temperature".into());
        }

        for emitter in &self.emitters {
            let ordered = emitter.min_delta_t_f > 0.0
                && emitter.min_delta_t_f <= emitter.default_delta_t_f
                && emitter.default_delta_t_f <= emitter.max_delta_t_f;
            if !ordered || !positive(emitter.btu_per_ft) || !positive(emitter.exponent) {
                return invalid(format!(
                    "{} model needs 0 < min <= default <= max ΔT and positive output/exponent",
                    emitter.kind
                ));
            }
        }

        for model in &self.manufacturer_models {
            let ranges_ok = model.temperature_range_f.min <= model.temperature_range_f.max
                && model.flow_range_gpm.min <= model.flow_range_gpm.max;
            if !ranges_ok {
                return invalid(format!("model '{}' has an empty validity range", model.key));
            }
            if model.points.is_empty() {
                return invalid(format!("model '{}' has no performance points", model.key));
            }
            let points_ok = model.points.iter().all(|p| {
                p.avg_water_temp_f.is_finite() && positive(p.flow_gpm) && positive(p.btu_per_ft)
            });
            if !points_ok {
                return invalid(format!(
                    "model '{}' has a non-positive or non-finite point",
                    model.key
                ));
            }
        }

        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn invalid(what: String) -> CatalogResult<()> {
    Err(CatalogError::Invalid { what })
}
