//! Project validation logic.
//!
//! Only structural problems are rejected here. Zone numbers that are merely
//! unusable (a zero length, a non-positive ΔT) are left for analysis, which
//! reports them per zone instead of failing the whole project.

use crate::schema::{Project, SettingsDef, SystemDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("System '{id}' has no zones")]
    NoZones { id: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut system_ids = HashSet::new();
    for system in &project.systems {
        if !system_ids.insert(&system.id) {
            return Err(ValidationError::DuplicateId {
                id: system.id.clone(),
                context: "systems".to_string(),
            });
        }
        validate_system(system)?;
    }

    Ok(())
}

fn validate_system(system: &SystemDef) -> Result<(), ValidationError> {
    if system.zones.is_empty() {
        return Err(ValidationError::NoZones {
            id: system.id.clone(),
        });
    }

    let mut zone_ids = HashSet::new();
    for zone in &system.zones {
        if !zone_ids.insert(&zone.id) {
            return Err(ValidationError::DuplicateId {
                id: zone.id.clone(),
                context: format!("system '{}' zones", system.name),
            });
        }
    }

    if let Some(load) = system.heat_load_btu_hr {
        validate_non_negative_finite(&format!("{}.heat_load_btu_hr", system.id), load)?;
    }

    validate_settings(&system.id, &system.settings)
}

fn validate_settings(system_id: &str, settings: &SettingsDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("{system_id}.settings.{name}");

    validate_finite(&field("fluid_temperature_f"), settings.fluid_temperature_f)?;
    validate_finite(&field("supply_temperature_f"), settings.supply_temperature_f)?;
    validate_non_negative_finite(&field("head_safety_factor_pct"), settings.head_safety_factor_pct)?;
    validate_non_negative_finite(&field("flow_safety_factor_pct"), settings.flow_safety_factor_pct)?;
    validate_positive_finite(&field("default_delta_t_f"), settings.default_delta_t_f)?;

    if let Some(roughness) = settings.overrides.roughness_ft {
        validate_non_negative_finite(&field("overrides.roughness_ft"), roughness)?;
    }
    if let Some(c) = settings.overrides.hazen_williams_c {
        validate_positive_finite(&field("overrides.hazen_williams_c"), c)?;
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PipeDef, ZoneDef};
    use hs_catalog::{NominalSize, PipeMaterial};

    fn zone(id: &str) -> ZoneDef {
        ZoneDef {
            id: id.to_string(),
            name: id.to_uppercase(),
            heat_load_btu_hr: None,
            design_delta_t_f: None,
            pipe: PipeDef {
                material: PipeMaterial::Pex,
                size: NominalSize::Half,
            },
            straight_length_ft: 50.0,
            fittings: Default::default(),
            emitter: None,
        }
    }

    fn project(zones: Vec<ZoneDef>) -> Project {
        Project {
            version: LATEST_VERSION,
            name: "Test".to_string(),
            systems: vec![SystemDef {
                id: "s1".to_string(),
                name: "System".to_string(),
                heat_load_btu_hr: Some(20_000.0),
                settings: SettingsDef::default(),
                zones,
            }],
        }
    }

    #[test]
    fn valid_project() {
        assert!(validate_project(&project(vec![zone("a"), zone("b")])).is_ok());
    }

    #[test]
    fn duplicate_zone_ids() {
        let err = validate_project(&project(vec![zone("a"), zone("a")])).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn duplicate_system_ids() {
        let mut p = project(vec![zone("a")]);
        p.systems.push(p.systems[0].clone());
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn empty_system() {
        assert!(matches!(
            validate_project(&project(vec![])),
            Err(ValidationError::NoZones { .. })
        ));
    }

    #[test]
    fn bad_settings() {
        let mut p = project(vec![zone("a")]);
        p.systems[0].settings.head_safety_factor_pct = -5.0;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));

        let mut p = project(vec![zone("a")]);
        p.systems[0].settings.overrides.hazen_williams_c = Some(0.0);
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn unusable_zone_numbers_are_left_for_analysis() {
        let mut z = zone("a");
        z.straight_length_ft = 0.0;
        z.design_delta_t_f = Some(0.0);
        assert!(validate_project(&project(vec![z])).is_ok());
    }

    #[test]
    fn unsupported_version() {
        let mut p = project(vec![zone("a")]);
        p.version = 99;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }
}
