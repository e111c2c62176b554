//! Workpiece material constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub String);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(s: &str) -> Self {
        MaterialId(s.to_string())
    }
}

impl From<String> for MaterialId {
    fn from(s: String) -> Self {
        MaterialId(s)
    }
}

/// Broad material family used to dispatch category-specific rules: the
/// ferrous work-hardening check, the wood axial-depth branch, and the
/// dry-machining correction.
///
/// Deliberately narrower than a full material taxonomy — §3's material
/// table only distinguishes these four buckets for dispatch purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    Wood,
    Plastic,
    Metal,
    FerrousMetal,
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialCategory::Wood => "wood",
            MaterialCategory::Plastic => "plastic",
            MaterialCategory::Metal => "metal",
            MaterialCategory::FerrousMetal => "ferrous-metal",
        };
        write!(f, "{s}")
    }
}

impl MaterialCategory {
    /// Ferrous materials carry the work-hardening / minimum-chip rule.
    pub fn is_ferrous(&self) -> bool {
        matches!(self, MaterialCategory::FerrousMetal)
    }
}

/// Immutable per-material physical constants, §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: MaterialCategory,

    /// Base cutting speed, m/min.
    pub vc_base: f64,
    /// Specific cutting force, N/mm^2.
    pub kc: f64,
    /// Dry-machining correction factor, in (0, 1].
    pub dry_factor: f64,
    /// Maximum chip temperature, deg C.
    pub max_temp_c: f64,
    /// Thermal factor used in the chip-temperature model.
    pub thermal_factor: f64,

    /// Minimum chip thickness, mm. Ferrous only; `None` otherwise.
    pub hm_min_mm: Option<f64>,
    /// Minimum axial depth, mm. Ferrous only; `None` otherwise.
    pub ap_min_mm: Option<f64>,
    /// Axial-depth ceiling factor used by the slot branch of the depth
    /// resolver (`base = LCF * ap_max_factor`).
    pub ap_max_factor: f64,

    /// Optional finishing correction factor for cutting speed.
    pub vc_finish_factor: Option<f64>,
    /// Optional finishing correction factor for chip load.
    pub fz_finish_factor: Option<f64>,

    /// Material-keyed chip-load constant `k` in `fz = k * sqrt(DC)`.
    pub fz_k: f64,
    /// Fixed axial depth for face-roughing (decision tree arm 1).
    pub ap_face_rough: f64,

    /// Hardness rank, metadata only, not used in arithmetic.
    pub hardness_rank: u32,
    /// Optional short display abbreviation.
    pub abbreviation: Option<String>,
    /// Hex display colour for selection UIs, e.g. `"#C8C8DC"`. Metadata
    /// only, not used in arithmetic.
    pub display_colour: String,
}

/// Read-only listing entry for a material, per §6's constant-table surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub id: MaterialId,
    pub name: String,
    pub hardness_rank: u32,
    pub category: MaterialCategory,
    pub display_colour: String,
}

impl From<&Material> for MaterialSummary {
    fn from(m: &Material) -> Self {
        MaterialSummary {
            id: m.id.clone(),
            name: m.name.clone(),
            hardness_rank: m.hardness_rank,
            category: m.category,
            display_colour: m.display_colour.clone(),
        }
    }
}
