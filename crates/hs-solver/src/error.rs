//! Error types for solver operations.

use hs_components::ComponentError;
use hs_core::error::HsError;
use thiserror::Error;

/// Errors that can occur while resolving a zone's ΔT and flow.
///
/// Non-convergence is not an error; see [`crate::RecommendedDeltaT::converged`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] HsError),
}

pub type SolverResult<T> = Result<T, SolverError>;
