//! hs-catalog: immutable hydronic reference data.
//!
//! Holds the static tables the sizing engine reads but never writes:
//! - pipe geometry, roughness and Hazen-Williams C by material and nominal size
//! - recommended/absolute velocity limits per material
//! - fitting equivalent lengths by fitting kind, material and size
//! - generic emitter models by emitter kind
//! - manufacturer emitter performance tables
//!
//! A [`Catalog`] is loaded once (the built-in data set, or YAML/JSON supplied
//! by the caller), validated, and then shared by reference across every zone.
//!
//! # Example
//!
//! ```
//! use hs_catalog::{Catalog, NominalSize, PipeMaterial};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let pipe = catalog.pipe(PipeMaterial::Copper, NominalSize::ThreeQuarter).unwrap();
//! assert_eq!(pipe.inner_diameter_in, 0.785);
//! ```

pub mod catalog;
pub mod emitter;
pub mod error;
pub mod fitting;
pub mod pipe;

// Re-exports
pub use catalog::Catalog;
pub use emitter::{
    EmitterKind, EmitterModel, EmitterReference, ManufacturerEmitterModel, PerformancePoint,
    ValueRange,
};
pub use error::{CatalogError, CatalogResult};
pub use fitting::{FittingKind, FittingSpec};
pub use pipe::{NominalSize, PipeMaterial, PipeSpec, VelocityLimits};
