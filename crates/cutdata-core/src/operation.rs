//! Machining operations: the geometric policy behind the depth-of-cut
//! resolver and the feed/engagement factors applied in the pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::material::MaterialId;

/// Stable identifier for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub String);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OperationId {
    fn from(s: &str) -> Self {
        OperationId(s.to_string())
    }
}

impl From<String> for OperationId {
    fn from(s: String) -> Self {
        OperationId(s)
    }
}

/// Which group of the depth-of-cut decision tree (§4.2) an operation
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationCategory {
    Face,
    Slot,
    Geometry,
    Special,
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationCategory::Face => "FACE",
            OperationCategory::Slot => "SLOT",
            OperationCategory::Geometry => "GEOMETRY",
            OperationCategory::Special => "SPECIAL",
        };
        write!(f, "{s}")
    }
}

/// Which tool dimension the axial depth is expressed relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxialReference {
    /// Relative to cutting diameter.
    Dc,
    /// Relative to usable cutting length.
    Lcf,
    /// Determined at resolution time by the decision-tree arm taken.
    Dynamic,
}

impl fmt::Display for AxialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AxialReference::Dc => "DC",
            AxialReference::Lcf => "LCF",
            AxialReference::Dynamic => "dynamic",
        };
        write!(f, "{s}")
    }
}

/// Auxiliary feed-factor bundle carried by every operation (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedFactors {
    pub entry: f64,
    pub exit: f64,
    pub plunge: f64,
    pub ramp: f64,
    pub transition: f64,
}

/// Which decision-tree arm of §4.2 an operation resolves through. Carries
/// the payload each arm needs instead of dispatching on a raw id string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DepthRule {
    FaceRoughing,
    FaceFinishing,
    SlotFinishing,
    SlotPartial,
    SlotFull,
    SlotTrochoidal,
    BallEnd3d { rotation_boost: f64 },
    RadiusContour,
    VGrooveChamfer,
    Drilling,
    Threading,
}

/// Immutable per-operation geometric policy, §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub name: String,
    pub category: OperationCategory,
    pub axial_reference: AxialReference,
    pub depth_rule: DepthRule,

    /// Radial-engagement factor: `ae = DC * ae_factor * surface_quality.ae`.
    pub ae_factor: f64,
    /// Chip-load correction applied in pipeline Step 4.
    pub fz_factor: f64,
    /// Cutting-speed correction applied in pipeline Step 2.
    pub vc_factor: f64,

    pub feed_factors: FeedFactors,

    /// Per-material cutting-speed multiplier table, threading only.
    pub material_vc_factors: Option<HashMap<MaterialId, f64>>,
    /// Per-material fixed chip load, drilling only.
    pub material_fz: Option<HashMap<MaterialId, f64>>,
}

/// Read-only listing entry for an operation, grouped by category (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSummary {
    pub id: OperationId,
    pub name: String,
    pub category: OperationCategory,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        OperationSummary {
            id: op.id.clone(),
            name: op.name.clone(),
            category: op.category,
        }
    }
}
