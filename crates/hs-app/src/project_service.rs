//! Project loading, saving, introspection and analysis.

use std::path::Path;

use hs_catalog::Catalog;
use hs_project::schema::{Project, SystemDef};

use crate::error::{AppError, AppResult};
use crate::system::{SystemReport, analyze_system};

/// Summary of a system for listing.
#[derive(Debug, Clone)]
pub struct SystemSummary {
    pub id: String,
    pub name: String,
    pub zone_count: usize,
    pub manual_zone_count: usize,
    pub heat_load_btu_hr: Option<f64>,
}

/// Load and validate a project (JSON by extension, YAML otherwise).
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(hs_project::load(path)?)
}

/// Validate and save a project (JSON by extension, YAML otherwise).
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    hs_project::save(path, project)?;
    Ok(())
}

/// The built-in catalog, or one loaded from `path`.
pub fn load_catalog(path: Option<&Path>) -> AppResult<Catalog> {
    let catalog = match path {
        Some(p) => Catalog::load(p)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

/// List all systems in the project with summaries.
pub fn list_systems(project: &Project) -> Vec<SystemSummary> {
    project
        .systems
        .iter()
        .map(|system| SystemSummary {
            id: system.id.clone(),
            name: system.name.clone(),
            zone_count: system.zones.len(),
            manual_zone_count: system
                .zones
                .iter()
                .filter(|z| z.heat_load_btu_hr.is_some())
                .count(),
            heat_load_btu_hr: system.heat_load_btu_hr,
        })
        .collect()
}

/// Get a system by ID.
pub fn get_system<'a>(project: &'a Project, system_id: &str) -> AppResult<&'a SystemDef> {
    project
        .systems
        .iter()
        .find(|s| s.id == system_id)
        .ok_or_else(|| AppError::SystemNotFound(system_id.to_string()))
}

/// Analyze one system, or every system when `system_id` is `None`.
pub fn analyze_project(
    project: &Project,
    catalog: &Catalog,
    system_id: Option<&str>,
) -> AppResult<Vec<SystemReport>> {
    match system_id {
        Some(id) => Ok(vec![analyze_system(get_system(project, id)?, catalog)?]),
        None => project
            .systems
            .iter()
            .map(|s| analyze_system(s, catalog))
            .collect(),
    }
}
