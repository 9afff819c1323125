//! Error types for the hs-app service layer.

use std::path::PathBuf;

/// Hard failures. Ordinary bad zone input never ends up here; it is
/// reported on the zone itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("{0}")]
    NoData(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hs_project::ProjectError> for AppError {
    fn from(err: hs_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<hs_catalog::CatalogError> for AppError {
    fn from(err: hs_catalog::CatalogError) -> Self {
        use hs_catalog::CatalogError;
        match err {
            CatalogError::NoPipeData { .. }
            | CatalogError::NoFittingData { .. }
            | CatalogError::NoVelocityLimits { .. }
            | CatalogError::NoEmitterData { .. }
            | CatalogError::UnknownManufacturerModel { .. } => AppError::NoData(err.to_string()),
            other => AppError::Catalog(other.to_string()),
        }
    }
}

impl From<hs_components::ComponentError> for AppError {
    fn from(err: hs_components::ComponentError) -> Self {
        AppError::Calculation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
