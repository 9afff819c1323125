//! hs-project: project file format and validation.
//!
//! Projects are read and written as YAML or JSON. Every load and save runs
//! [`validate_project`], so a `Project` obtained here is structurally sound;
//! zone-level numbers are checked later, during analysis.

pub mod schema;
pub mod validate;

use std::path::Path;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// JSON for a `.json` extension, YAML for anything else.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Yaml }
    }
}

/// Parse and validate a project from text.
pub fn parse_project(content: &str, format: ProjectFormat) -> ProjectResult<Project> {
    let project: Project = match format {
        ProjectFormat::Yaml => serde_yaml::from_str(content)?,
        ProjectFormat::Json => serde_json::from_str(content)?,
    };
    validate_project(&project)?;
    Ok(project)
}

/// Validate and render a project as text.
pub fn render_project(project: &Project, format: ProjectFormat) -> ProjectResult<String> {
    validate_project(project)?;
    let content = match format {
        ProjectFormat::Yaml => serde_yaml::to_string(project)?,
        ProjectFormat::Json => serde_json::to_string_pretty(project)?,
    };
    Ok(content)
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    parse_project(&content, ProjectFormat::from_path(path))
}

/// Save a project, picking the format from the file extension.
pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    let content = render_project(project, ProjectFormat::from_path(path))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    parse_project(&std::fs::read_to_string(path)?, ProjectFormat::Yaml)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    std::fs::write(path, render_project(project, ProjectFormat::Yaml)?)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    parse_project(&std::fs::read_to_string(path)?, ProjectFormat::Json)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    std::fs::write(path, render_project(project, ProjectFormat::Json)?)?;
    Ok(())
}
