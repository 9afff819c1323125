//! Shared application service layer for hydrosize.
//!
//! Turns a system definition into a complete report: assigns zone loads,
//! runs every zone through the sizing pipeline and sizes the pump. Each
//! call is a pure function of the input snapshot and the catalog.

pub mod distribute;
pub mod error;
pub mod project_service;
pub mod pump;
pub mod system;
pub mod zone;

// Re-export key types for convenience
pub use distribute::{LoadDistribution, ZoneGeometry, distribute_loads, split_load, zone_geometry};
pub use error::{AppError, AppResult};
pub use project_service::{
    SystemSummary, analyze_project, get_system, list_systems, load_catalog, load_project,
    save_project,
};
pub use pump::{PumpSizing, size_pump};
pub use system::{SystemReport, analyze_system};
pub use zone::{LoadSource, ZoneContext, ZoneResult, analyze_zone};
