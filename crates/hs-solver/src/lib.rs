//! ΔT and flow solver for hydronic zones.
//!
//! Two questions are answered here:
//! - what temperature drop suits a zone's emitter (`delta_t`), either in
//!   closed form from the generic emitter curve or by a damped fixed-point
//!   iteration against a manufacturer table
//! - what flow and ΔT the zone actually runs at (`operating_point`), where
//!   ΔT becomes an output whenever the emitter cannot deliver the load

pub mod delta_t;
pub mod emitter;
pub mod error;
pub mod operating_point;

pub use delta_t::{
    DeltaTConfig, DeltaTMethod, RecommendedDeltaT, closed_form_delta_t, iterative_delta_t,
    recommended_delta_t,
};
pub use emitter::ZoneEmitter;
pub use error::{SolverError, SolverResult};
pub use operating_point::{EmitterCheck, EmitterRun, OperatingPoint, operating_point};
