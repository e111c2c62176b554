//! Per-call calculation options, §6.

use serde::{Deserialize, Serialize};

use crate::coating::Coating;
use crate::coolant::CoolantMode;
use crate::surface_quality::SurfaceQuality;

/// Default spindle power available for the MRR/power validator check, kW.
pub const DEFAULT_SPINDLE_POWER_KW: f64 = 6.0;

/// Per-call options accepted by `calculate(...)`, §6.
///
/// `thread_pitch` is required iff the requested operation is threading;
/// absent otherwise. All other fields default to the conservative/neutral
/// choice the spec names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationOptions {
    pub coating: Coating,
    pub surface_quality: SurfaceQuality,
    pub coolant: CoolantMode,
    /// Thread pitch, mm. Required iff `operation_id` is threading.
    pub thread_pitch_mm: Option<f64>,
    /// Available spindle power, kW.
    pub spindle_power_kw: f64,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        CalculationOptions {
            coating: Coating::None,
            surface_quality: SurfaceQuality::Standard,
            coolant: CoolantMode::Wet,
            thread_pitch_mm: None,
            spindle_power_kw: DEFAULT_SPINDLE_POWER_KW,
        }
    }
}

impl CalculationOptions {
    pub fn with_coating(mut self, coating: Coating) -> Self {
        self.coating = coating;
        self
    }

    pub fn with_surface_quality(mut self, surface_quality: SurfaceQuality) -> Self {
        self.surface_quality = surface_quality;
        self
    }

    pub fn with_coolant(mut self, coolant: CoolantMode) -> Self {
        self.coolant = coolant;
        self
    }

    pub fn with_thread_pitch_mm(mut self, pitch_mm: f64) -> Self {
        self.thread_pitch_mm = Some(pitch_mm);
        self
    }

    pub fn with_spindle_power_kw(mut self, spindle_power_kw: f64) -> Self {
        self.spindle_power_kw = spindle_power_kw;
        self
    }
}
