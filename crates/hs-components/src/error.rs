//! Error types for component calculations.

use hs_core::error::HsError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<HsError> for ComponentError {
    fn from(e: HsError) -> Self {
        match e {
            HsError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            HsError::InvalidArg { what } => ComponentError::InvalidArg { what },
            HsError::Invariant { what } => ComponentError::NonPhysical { what },
        }
    }
}

impl From<ComponentError> for HsError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HsError::Invariant { what },
            ComponentError::InvalidArg { what } => HsError::InvalidArg { what },
        }
    }
}
