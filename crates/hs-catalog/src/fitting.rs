//! Fitting equivalent lengths.

use crate::pipe::{NominalSize, PipeMaterial};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fitting type counted on a zone's piping run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittingKind {
    #[serde(rename = "elbow_90")]
    Elbow90,
    #[serde(rename = "elbow_45")]
    Elbow45,
    TeeRun,
    TeeBranch,
    GateValve,
    BallValve,
    GlobeValve,
    SwingCheck,
}

impl FittingKind {
    pub const ALL: [FittingKind; 8] = [
        FittingKind::Elbow90,
        FittingKind::Elbow45,
        FittingKind::TeeRun,
        FittingKind::TeeBranch,
        FittingKind::GateValve,
        FittingKind::BallValve,
        FittingKind::GlobeValve,
        FittingKind::SwingCheck,
    ];
}

impl fmt::Display for FittingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FittingKind::Elbow90 => "90° elbow",
            FittingKind::Elbow45 => "45° elbow",
            FittingKind::TeeRun => "tee (run)",
            FittingKind::TeeBranch => "tee (branch)",
            FittingKind::GateValve => "gate valve",
            FittingKind::BallValve => "ball valve",
            FittingKind::GlobeValve => "globe valve",
            FittingKind::SwingCheck => "swing check valve",
        };
        f.write_str(name)
    }
}

/// Equivalent straight-pipe length of one fitting kind on one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingSpec {
    pub kind: FittingKind,
    pub material: PipeMaterial,
    /// Equivalent length [ft] per nominal size
    pub equivalent_length_ft: BTreeMap<NominalSize, f64>,
}

impl FittingSpec {
    pub fn equivalent_length(&self, size: NominalSize) -> Option<f64> {
        self.equivalent_length_ft.get(&size).copied()
    }
}
