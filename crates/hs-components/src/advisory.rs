//! Recoverable conditions reported next to a result.
//!
//! An advisory never stops a calculation. It tells the caller that the
//! numbers were produced under a condition worth acting on, with a
//! suggested fix where one exists.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCode {
    /// Hazen-Williams used with a fluid other than water
    HazenWilliamsNonWater,
    /// Load above the recommended (soft) velocity capacity
    ExceedsRecommendedVelocity,
    /// Load above the absolute (hard) velocity capacity
    ExceedsAbsoluteVelocity,
    /// Design ΔT set outside the emitter type's bounds
    DesignDeltaTOutOfRange,
    /// Emitter cannot deliver the requested load
    EmitterUndersized,
    /// Manufacturer table requested but the query fell outside it
    ManufacturerDataOutOfRange,
    /// An iterative solver stopped at its iteration ceiling
    NotConverged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub code: AdvisoryCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Advisory {
    pub fn new(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suggestion {
            Some(s) => write!(f, "{} ({})", self.message, s),
            None => f.write_str(&self.message),
        }
    }
}
