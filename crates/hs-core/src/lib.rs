//! hs-core: shared foundation for hydrosize.
//!
//! Contains:
//! - units (uom SI types + US customary constructors)
//! - numeric (Real + tolerances + float helpers)
//! - iteration (bounded, damped fixed-point loop used by every solver)
//! - hydronic (the 500-factor relation tying load, flow and ΔT)
//! - error (shared error types)

pub mod error;
pub mod hydronic;
pub mod iteration;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HsError, HsResult};
pub use hydronic::{HEAT_FLOW_FACTOR, heat_for_flow, required_flow};
pub use iteration::{FixedPoint, FixedPointConfig, solve_fixed_point};
pub use numeric::*;
pub use units::*;
