//! hs-components: physical models for one hydronic zone.
//!
//! Provides:
//! - Friction loss (Darcy-Weisbach with Colebrook, or Hazen-Williams)
//! - Emitter output curves (generic type-based, manufacturer tables)
//! - Hydraulic capacity checks against velocity limits
//! - Advisories: recoverable conditions reported alongside results
//!
//! Everything here is a pure function of its inputs and the read-only
//! reference data it is handed.
//!
//! # Example
//!
//! ```
//! use hs_catalog::{Catalog, NominalSize, PipeMaterial};
//! use hs_components::{FrictionMethod, HeadLossInput, head_loss};
//! use hs_fluids::{FluidKind, FluidSelection};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let pipe = catalog.pipe(PipeMaterial::Copper, NominalSize::ThreeQuarter).unwrap();
//! let fluid = FluidSelection::new(FluidKind::Water);
//! let props = fluid.properties(140.0);
//!
//! let result = head_loss(&HeadLossInput {
//!     flow_gpm: 10.0,
//!     pipe,
//!     straight_length_ft: 100.0,
//!     fitting_length_ft: 0.0,
//!     fluid: &props,
//!     fluid_kind: fluid.kind,
//!     method: FrictionMethod::DarcyWeisbach,
//!     overrides: Default::default(),
//! })
//! .unwrap();
//! assert!(result.head_loss_ft > 15.0 && result.head_loss_ft < 25.0);
//! ```

pub mod advisory;
pub mod capacity;
pub mod common;
pub mod emitter;
pub mod error;
pub mod friction;

// Re-exports
pub use advisory::{Advisory, AdvisoryCode};
pub use capacity::{
    CapacityCheck, capacity_advisories, check_capacity, max_flow_for_velocity, suggest_pipe_size,
};
pub use emitter::{
    EmitterCurve, EmitterOutput, GenericCurve, ManufacturerCurve, OutputSource, bilinear_output,
};
pub use error::{ComponentError, ComponentResult};
pub use friction::{
    DarcyWeisbach, FrictionCorrelation, FrictionMethod, FrictionOverrides, HazenWilliams,
    HeadLoss, HeadLossInput, TRANSITION_REYNOLDS, head_loss,
};
