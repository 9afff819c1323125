//! Catalog errors.

use crate::emitter::EmitterKind;
use crate::fitting::FittingKind;
use crate::pipe::{NominalSize, PipeMaterial};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or querying reference data.
///
/// The `No*` variants are the "no data available" hard failures surfaced to
/// callers that reference a key the catalog does not hold.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No data available for {size} {material} pipe")]
    NoPipeData {
        material: PipeMaterial,
        size: NominalSize,
    },

    #[error("No data available for {kind} fittings on {size} {material} pipe")]
    NoFittingData {
        kind: FittingKind,
        material: PipeMaterial,
        size: NominalSize,
    },

    #[error("No velocity limits available for {material} pipe")]
    NoVelocityLimits { material: PipeMaterial },

    #[error("No data available for {kind} emitters")]
    NoEmitterData { kind: EmitterKind },

    #[error("No data available for emitter model '{key}'")]
    UnknownManufacturerModel { key: String },

    #[error("Invalid catalog data: {what}")]
    Invalid { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
