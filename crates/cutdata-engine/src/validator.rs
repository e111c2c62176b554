//! Parameter validator (C7): five independent checks aggregated into one
//! `ValidationResult`.
//!
//! Grounded almost 1:1 on the source's own five-method validator; each
//! `check_*` function below corresponds to one of V1-V5 in order. None of
//! them short-circuit — every signal is gathered before the result is
//! built.

use cutdata_core::{
    DepthRule, Geometry, Material, MaterialCategory, Operation, OperationCategory, Preset,
    ValidationResult,
};
use tracing::warn;

use crate::tables::Limits;

#[derive(Default)]
struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
    recommendations: Vec<String>,
}

impl Diagnostics {
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
    fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
    fn recommendation(&mut self, msg: impl Into<String>) {
        self.recommendations.push(msg.into());
    }
}

/// V1 — radial engagement.
fn check_radial_engagement(diag: &mut Diagnostics, geometry: &Geometry, preset: &Preset, limits: &Limits) {
    let dc = geometry.dc_mm;

    if let (Some(ae_factor_min), Some(ae_factor_max)) = (limits.ae_factor_min, limits.ae_factor_max) {
        let ae_min = ae_factor_min * dc;
        let ae_max = ae_factor_max * dc;

        if preset.ae_mm < ae_min {
            diag.error(format!(
                "radial engagement {:.3}mm below minimum {:.3}mm (rubbing risk)",
                preset.ae_mm, ae_min
            ));
        } else if preset.ae_mm > ae_max {
            diag.error(format!(
                "radial engagement {:.3}mm exceeds maximum {:.3}mm",
                preset.ae_mm, ae_max
            ));
        } else if preset.ae_mm >= 0.9 * ae_max {
            diag.warning(format!(
                "radial engagement {:.3}mm within 10% of ceiling {:.3}mm (high load)",
                preset.ae_mm, ae_max
            ));
        }
    }

    if let Some(ae_recommended_factor) = limits.ae_recommended {
        let ae_recommended = ae_recommended_factor * dc;
        if preset.ae_mm < 0.7 * ae_recommended {
            diag.warning(format!(
                "radial engagement {:.3}mm below 70% of recommended {:.3}mm (sub-optimal)",
                preset.ae_mm, ae_recommended
            ));
        }
    }
}

/// V2 — axial depth.
fn check_axial_depth(
    diag: &mut Diagnostics,
    geometry: &Geometry,
    material: &Material,
    preset: &Preset,
    limits: &Limits,
) {
    if let Some(ap_fixed) = limits.ap_fixed {
        if (preset.ap_mm - ap_fixed).abs() > 0.05 {
            diag.warning(format!(
                "axial depth {:.3}mm deviates from fixed value {:.3}mm by more than 0.05mm",
                preset.ap_mm, ap_fixed
            ));
        }
        return;
    }

    let ap_min = material.ap_min_mm.unwrap_or(0.0).max(limits.ap_min_fixed.unwrap_or(0.0));
    if ap_min > 0.0 && preset.ap_mm < ap_min {
        diag.error(format!(
            "axial depth {:.3}mm below minimum {:.3}mm (work-hardening risk)",
            preset.ap_mm, ap_min
        ));
    }

    if let Some(ap_factor_max) = limits.ap_factor_max {
        let ap_ceiling = ap_factor_max * geometry.lcf_mm;
        if preset.ap_mm > ap_ceiling {
            diag.error(format!(
                "axial depth {:.3}mm exceeds maximum {:.3}mm",
                preset.ap_mm, ap_ceiling
            ));
        } else if preset.ap_mm >= 0.9 * ap_ceiling {
            diag.warning(format!(
                "axial depth {:.3}mm within 10% of ceiling {:.3}mm",
                preset.ap_mm, ap_ceiling
            ));
        }
    }
}

/// V3 — geometry-specific.
fn check_geometry(diag: &mut Diagnostics, geometry: &Geometry, operation: &Operation, preset: &Preset) {
    match &operation.depth_rule {
        DepthRule::BallEnd3d { .. } => {
            let max_ap = geometry.dc_mm / 2.0;
            if preset.ap_mm > max_ap {
                diag.error(format!(
                    "ball-end depth {:.3}mm exceeds half the cutting diameter {:.3}mm",
                    preset.ap_mm, max_ap
                ));
            }
        }
        DepthRule::RadiusContour => {
            if let Some(r) = geometry.corner_radius_mm {
                let max_ap = 2.0 * r;
                if preset.ap_mm > max_ap {
                    diag.error(format!(
                        "radius-mill depth {:.3}mm exceeds 2x corner radius {:.3}mm",
                        preset.ap_mm, max_ap
                    ));
                }
            }
        }
        DepthRule::VGrooveChamfer => {
            // TODO (open question, see spec Design Notes): no workpiece
            // width is available, so this warns unconditionally rather
            // than validating against real stock geometry.
            let threshold = 0.4 * geometry.dc_mm;
            if preset.ap_mm > threshold {
                diag.warning(format!(
                    "V-tool depth {:.3}mm exceeds {:.3}mm — verify against workpiece geometry",
                    preset.ap_mm, threshold
                ));
            }
        }
        _ => {}
    }

    let ld = preset.ld_ratio;
    if ld > 5.0 {
        diag.warning(format!(
            "L/D {ld:.2} exceeds 5.0 (30% engagement reduction applied)"
        ));
    } else if ld > 4.0 {
        diag.warning(format!("L/D {ld:.2} exceeds 4.0 (deflection risk)"));
    } else if ld > 3.0 {
        diag.warning(format!("L/D {ld:.2} exceeds 3.0 (reduced limits applied)"));
    }
}

/// V4 — MRR and power.
fn check_mrr_and_power(diag: &mut Diagnostics, preset: &Preset, limits: &Limits, spindle_power_kw: f64) {
    if let Some(mrr_max) = limits.mrr_max {
        if preset.mrr_cm3_min > mrr_max {
            diag.error(format!(
                "MRR {:.2}cm3/min exceeds maximum {:.2}cm3/min",
                preset.mrr_cm3_min, mrr_max
            ));
            if preset.ae_mm > 0.0 && preset.ap_mm > 0.0 {
                let vf_safe = (mrr_max * 1000.0) / (preset.ae_mm * preset.ap_mm);
                diag.recommendation(format!(
                    "reduce feed rate to {vf_safe:.1}mm/min to stay within MRR ceiling {mrr_max:.2}cm3/min"
                ));
            }
        } else if preset.mrr_cm3_min > 0.9 * mrr_max {
            diag.warning(format!(
                "MRR {:.2}cm3/min within 10% of ceiling {:.2}cm3/min",
                preset.mrr_cm3_min, mrr_max
            ));
        } else if preset.mrr_cm3_min < 0.3 * mrr_max {
            diag.recommendation(format!(
                "MRR {:.2}cm3/min is below 30% of ceiling {:.2}cm3/min — feed rate could be increased",
                preset.mrr_cm3_min, mrr_max
            ));
        }
    }

    if preset.power_kw > spindle_power_kw {
        diag.error(format!(
            "power {:.2}kW exceeds spindle capacity {:.2}kW",
            preset.power_kw, spindle_power_kw
        ));
    } else if preset.power_kw > 0.8 * spindle_power_kw {
        diag.warning(format!(
            "power {:.2}kW within 20% of spindle capacity {:.2}kW",
            preset.power_kw, spindle_power_kw
        ));
    }
}

/// V5 — operational sanity.
fn check_operational_sanity(
    diag: &mut Diagnostics,
    geometry: &Geometry,
    material: &Material,
    preset: &Preset,
    rpm_min: u32,
    rpm_max: u32,
) {
    if preset.n_rpm < rpm_min {
        diag.warning(format!(
            "spindle speed {}rpm below minimum {}rpm",
            preset.n_rpm, rpm_min
        ));
    }
    if preset.n_rpm > rpm_max {
        diag.error(format!(
            "spindle speed {}rpm exceeds maximum {}rpm",
            preset.n_rpm, rpm_max
        ));
    }

    if preset.vf_mm_min < 10.0 {
        diag.warning(format!(
            "feed rate {:.1}mm/min below 10mm/min",
            preset.vf_mm_min
        ));
    } else if preset.vf_mm_min > 5000.0 {
        diag.warning(format!(
            "feed rate {:.1}mm/min exceeds 5000mm/min",
            preset.vf_mm_min
        ));
    }

    if material.category == MaterialCategory::FerrousMetal {
        if let Some(hm_min) = material.hm_min_mm {
            let radial_ratio = (preset.ae_mm / geometry.dc_mm).max(0.0).sqrt();
            let hm = preset.fz_final * radial_ratio;
            if hm < hm_min && radial_ratio > 0.0 {
                let fz_recommended = hm_min / radial_ratio;
                diag.error(format!(
                    "mean chip thickness {hm:.4}mm below minimum {hm_min:.4}mm (recommend fz = {fz_recommended:.4}mm)"
                ));
            }
        }
    }

    if preset.chip_temperature_c > material.max_temp_c {
        diag.warning(format!(
            "predicted chip temperature {:.1}C exceeds material limit {:.1}C",
            preset.chip_temperature_c, material.max_temp_c
        ));
    }
}

/// Run all five checks and aggregate into one `ValidationResult`.
#[allow(clippy::too_many_arguments)]
pub fn validate(
    geometry: &Geometry,
    material: &Material,
    operation: &Operation,
    preset: &Preset,
    limits: &Limits,
    fallback_diagnostic: Option<String>,
    spindle_power_kw: f64,
    rpm_min: u32,
    rpm_max: u32,
) -> ValidationResult {
    let mut diag = Diagnostics::default();

    if let Some(message) = fallback_diagnostic {
        diag.warning(message);
    }

    check_radial_engagement(&mut diag, geometry, preset, limits);
    check_axial_depth(&mut diag, geometry, material, preset, limits);
    check_geometry(&mut diag, geometry, operation, preset);
    check_mrr_and_power(&mut diag, preset, limits, spindle_power_kw);
    check_operational_sanity(&mut diag, geometry, material, preset, rpm_min, rpm_max);

    if !diag.errors.is_empty() {
        warn!(material = %material.id, operation = %operation.id, errors = diag.errors.len(), "preset failed validation");
    }

    ValidationResult::new(
        diag.errors,
        diag.warnings,
        diag.recommendations,
        preset.mrr_cm3_min,
        preset.power_kw,
        preset.ld_ratio,
        limits.to_snapshot(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutdata_core::{AxialReference, ChipFormationClass, CoolantMode, Coating, LdClass, MaterialId, OperationId, SurfaceQuality, ToolId};

    fn geometry() -> Geometry {
        Geometry {
            dc_mm: 10.0,
            lcf_mm: 25.0,
            oal_mm: 60.0,
            shank_diameter_mm: 10.0,
            nof: 2,
            corner_radius_mm: None,
            included_angle_deg: None,
        }
    }

    fn material() -> Material {
        Material {
            id: MaterialId("aluminium".to_string()),
            name: "Aluminium".to_string(),
            category: MaterialCategory::Metal,
            vc_base: 377.0,
            kc: 700.0,
            dry_factor: 0.9,
            max_temp_c: 180.0,
            thermal_factor: 1.0,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 2.0,
            vc_finish_factor: None,
            fz_finish_factor: None,
            fz_k: 0.08,
            ap_face_rough: 1.0,
            hardness_rank: 1,
            abbreviation: None,
            display_colour: "#FFFFFF".to_string(),
        }
    }

    fn operation() -> Operation {
        Operation {
            id: OperationId("slot-partial".to_string()),
            name: "test".to_string(),
            category: OperationCategory::Slot,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::SlotPartial,
            ae_factor: 0.1,
            fz_factor: 1.0,
            vc_factor: 1.0,
            feed_factors: cutdata_core::FeedFactors {
                entry: 0.8,
                exit: 0.8,
                plunge: 0.4,
                ramp: 0.5,
                transition: 0.9,
            },
            material_vc_factors: None,
            material_fz: None,
        }
    }

    fn preset(ae: f64, ap: f64, n: u32, vf: f64) -> Preset {
        Preset {
            tool_id: ToolId("T1".to_string()),
            material_id: MaterialId("aluminium".to_string()),
            operation_id: OperationId("slot-partial".to_string()),
            coating: Coating::TiN,
            surface_quality: SurfaceQuality::Standard,
            coolant: CoolantMode::Wet,
            vc_base: 377.0,
            coating_factor: 1.4,
            vc_final: 527.8,
            n_rpm: n,
            fz_base: 0.25,
            dry_factor: 1.0,
            fz_final: 0.25,
            vf_mm_min: vf,
            auxiliary_feeds: cutdata_core::AuxiliaryFeeds {
                entry_mm_min: 0.0,
                exit_mm_min: 0.0,
                ramp_mm_min: 0.0,
                plunge_mm_min: 0.0,
                transition_mm_min: 0.0,
                entry_factor: 0.0,
                exit_factor: 0.0,
                ramp_factor: 0.0,
                plunge_factor: 0.0,
                transition_factor: 0.0,
                ramp_angle_deg: 3.0,
            },
            ae_mm: ae,
            ap_mm: ap,
            axial_reference_used: AxialReference::Lcf,
            mrr_cm3_min: ae * ap * vf / 1000.0,
            power_kw: (ae * ap * vf / 1000.0) * 700.0 / 60_000.0,
            torque_nm: 0.0,
            chip_temperature_c: 80.0,
            chip_formation: ChipFormationClass::Continuous,
            ld_ratio: 2.5,
            ld_class: LdClass::Normal,
            stability_warnings: vec![],
        }
    }

    #[test]
    fn below_ae_min_is_error() {
        let geo = geometry();
        let mat = material();
        let op = operation();
        let limits = Limits {
            ae_factor_min: Some(0.05),
            ae_factor_max: Some(0.6),
            ae_recommended: Some(0.3),
            ..Default::default()
        };
        let p = preset(0.3, 1.0, 16_000, 4000.0);
        let result = validate(&geo, &mat, &op, &p, &limits, None, 6.0, 2_000, 24_000);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn rpm_within_range_produces_no_v5_error() {
        let geo = geometry();
        let mat = material();
        let op = operation();
        let limits = Limits::default();
        let p = preset(1.0, 1.0, 16_000, 1000.0);
        let result = validate(&geo, &mat, &op, &p, &limits, None, 6.0, 2_000, 24_000);
        assert!(!result.errors.iter().any(|e| e.contains("spindle speed")));
    }

    #[test]
    fn rpm_above_max_is_error() {
        let geo = geometry();
        let mat = material();
        let op = operation();
        let limits = Limits::default();
        let p = preset(1.0, 1.0, 30_000, 1000.0);
        let result = validate(&geo, &mat, &op, &p, &limits, None, 6.0, 2_000, 24_000);
        assert!(result.errors.iter().any(|e| e.contains("spindle speed")));
    }

    #[test]
    fn fallback_diagnostic_becomes_warning() {
        let geo = geometry();
        let mat = material();
        let op = operation();
        let limits = Limits::default();
        let p = preset(1.0, 1.0, 16_000, 1000.0);
        let result = validate(
            &geo,
            &mat,
            &op,
            &p,
            &limits,
            Some("fallback used".to_string()),
            6.0,
            2_000,
            24_000,
        );
        assert!(result.warnings.iter().any(|w| w.contains("fallback used")));
    }
}
