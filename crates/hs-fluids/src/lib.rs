//! hs-fluids: heat-transfer fluid properties for hydrosize.
//!
//! Provides:
//! - Fluid selection (water, propylene glycol blends, custom)
//! - Density and viscosity evaluation at a temperature
//!
//! Properties are plain value objects recomputed per call. There is no
//! error path: out-of-range temperatures are clamped to the correlation
//! range and missing or invalid custom values fall back to water.
//!
//! # Example
//!
//! ```
//! use hs_fluids::{FluidKind, FluidSelection};
//!
//! let props = FluidSelection::new(FluidKind::Water).properties(140.0);
//! assert!(props.density_lb_ft3 > 61.0 && props.density_lb_ft3 < 62.0);
//! ```

pub mod fluid;
pub mod properties;
pub mod water;

// Re-exports for ergonomics
pub use fluid::{FluidKind, FluidSelection};
pub use properties::FluidProperties;
