//! The calculation output: a full audit trail of every intermediate value.

use serde::{Deserialize, Serialize};

use crate::coating::Coating;
use crate::coolant::CoolantMode;
use crate::material::MaterialId;
use crate::operation::{AxialReference, OperationId};
use crate::surface_quality::SurfaceQuality;
use crate::tool::{LdClass, ToolId};

/// Predicted chip-formation behaviour, Step 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipFormationClass {
    Dust,
    Segmented,
    Continuous,
    Discontinuous,
}

/// Auxiliary feed rates derived in §4.5, both as absolute mm/min and as
/// factors relative to `vf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFeeds {
    pub entry_mm_min: f64,
    pub exit_mm_min: f64,
    pub ramp_mm_min: f64,
    pub plunge_mm_min: f64,
    pub transition_mm_min: f64,

    pub entry_factor: f64,
    pub exit_factor: f64,
    pub ramp_factor: f64,
    pub plunge_factor: f64,
    pub transition_factor: f64,

    /// Ramp entry angle, degrees.
    pub ramp_angle_deg: f64,
}

/// A complete, self-auditing calculation result (§3).
///
/// Every intermediate value is retained so a caller can explain how `vf`,
/// `ap`, or the verdict were reached without recomputing the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub tool_id: ToolId,
    pub material_id: MaterialId,
    pub operation_id: OperationId,
    pub coating: Coating,
    pub surface_quality: SurfaceQuality,
    pub coolant: CoolantMode,

    /// Base cutting speed before corrections, m/min.
    pub vc_base: f64,
    /// Coating cutting-speed factor applied.
    pub coating_factor: f64,
    /// Final cutting speed after all Step 2 modifiers, m/min.
    pub vc_final: f64,

    /// Spindle rotation, rev/min.
    pub n_rpm: u32,

    /// Base chip load before corrections, mm.
    pub fz_base: f64,
    /// Dry-machining correction factor actually applied (1.0 if not dry).
    pub dry_factor: f64,
    /// Final chip load after all Step 4 modifiers, mm.
    pub fz_final: f64,

    /// Linear feed rate, mm/min.
    pub vf_mm_min: f64,
    pub auxiliary_feeds: AuxiliaryFeeds,

    /// Radial depth of cut, mm.
    pub ae_mm: f64,
    /// Axial depth of cut, mm.
    pub ap_mm: f64,
    /// Which tool dimension `ap` was resolved relative to.
    pub axial_reference_used: AxialReference,

    pub mrr_cm3_min: f64,
    pub power_kw: f64,
    pub torque_nm: f64,

    pub chip_temperature_c: f64,
    pub chip_formation: ChipFormationClass,

    pub ld_ratio: f64,
    pub ld_class: LdClass,

    /// Stability warnings emitted by Step 12 (long-overhang / aggressive
    /// depth). Distinct from the validator's diagnostics — these are
    /// produced inline by the pipeline, not by `ParameterValidator`.
    pub stability_warnings: Vec<String>,
}
