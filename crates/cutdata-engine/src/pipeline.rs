//! Calculation pipeline (C6): the twelve ordered steps from `calculate()`'s
//! inputs to a `(Preset, ValidationResult)` pair.
//!
//! Grounded on `calculation_engine.py`'s `calculate_preset` end to end,
//! restructured to return `Result<_, EngineError>` for pre-condition
//! failures rather than indexing a dict and raising `KeyError`.

use std::f64::consts::PI;

use tracing::{debug, info, warn};

use cutdata_core::{
    AxialReference, CalculationOptions, ChipFormationClass, Coating, DepthRule, EngineError,
    Material, MaterialCategory, MaterialId, Operation, OperationId, Preset, Result, Tool,
    ValidationResult,
};

use crate::{aux_feed, depth, mrr, tables, validator};

/// Reference spindle range, §4.1 Step 3.
const RPM_MIN: u32 = 2_000;
const RPM_MAX: u32 = 24_000;

/// Default ball-end-3D rotation boost when an operation omits one.
const DEFAULT_ROTATION_BOOST: f64 = 1.15;

fn is_finishing(depth_rule: &DepthRule) -> bool {
    matches!(depth_rule, DepthRule::FaceFinishing | DepthRule::SlotFinishing)
}

/// The single principal operation of the engine, §6:
/// `calculate(tool, material_id, operation_id, options) -> (Preset, ValidationResult)`.
pub fn calculate(
    tool: &Tool,
    material_id: &MaterialId,
    operation_id: &OperationId,
    options: &CalculationOptions,
) -> Result<(Preset, ValidationResult)> {
    // ── Step 1: resolve inputs ──────────────────────────────────────────
    tool.geometry.validate()?;

    let material = tables::MATERIALS.get(material_id).ok_or_else(|| {
        debug!(material = %material_id, "material lookup failed");
        EngineError::MaterialNotFound {
            material_id: material_id.to_string(),
        }
    })?;
    let operation = tables::OPERATIONS.get(operation_id).ok_or_else(|| {
        debug!(operation = %operation_id, "operation lookup failed");
        EngineError::OperationNotFound {
            operation_id: operation_id.to_string(),
        }
    })?;

    if matches!(operation.depth_rule, DepthRule::Threading) {
        let pitch = options.thread_pitch_mm.unwrap_or(0.0);
        if pitch <= 0.0 {
            debug!("threading requested without a positive thread pitch");
            return Err(EngineError::MissingThreadPitch);
        }
    }

    if options.coating == Coating::Diamond && material.category.is_ferrous() {
        debug!(material = %material_id, "diamond coating rejected on ferrous material");
        return Err(EngineError::InvalidCoating {
            reason: "Diamond coating is non-ferrous only".to_string(),
        });
    }

    let geometry = &tool.geometry;
    let ld = geometry.ld_ratio();
    let sq = options.surface_quality.factors();

    // ── Step 2: cutting speed vc ─────────────────────────────────────────
    let coating_factor = options.coating.factor();
    let mut vc = material.vc_base * coating_factor * operation.vc_factor * material.dry_factor;

    if ld > 3.0 {
        let ld_vc_factor = (1.0 - 0.05 * (ld - 3.0)).max(0.7);
        vc *= ld_vc_factor;
        debug!(ld, ld_vc_factor, "L/D correction applied to vc");
    }

    if let Some(table) = &operation.material_vc_factors {
        if let Some(factor) = table.get(material_id) {
            vc *= factor;
            debug!(operation = %operation_id, factor, "threading vc factor applied");
        }
    }

    if is_finishing(&operation.depth_rule) {
        if let Some(factor) = material.vc_finish_factor {
            vc *= factor;
            debug!(factor, "finishing vc_finish_factor applied");
        }
    }

    let vc_final = vc;

    // ── Step 3: spindle rotation n ───────────────────────────────────────
    let mut n = ((vc_final * 1000.0) / (PI * geometry.dc_mm)).round();
    if let DepthRule::BallEnd3d { rotation_boost } = operation.depth_rule {
        let boost = if rotation_boost > 0.0 {
            rotation_boost
        } else {
            DEFAULT_ROTATION_BOOST
        };
        n = (n * boost).round();
        debug!(boost, "ball-end-3D rotation boost applied");
    }
    let n_clamped = n.clamp(RPM_MIN as f64, RPM_MAX as f64);
    let n_rpm = n_clamped as u32;

    // ── Step 4: chip load fz ──────────────────────────────────────────────
    let fz_base = match &operation.depth_rule {
        DepthRule::Drilling => operation
            .material_fz
            .as_ref()
            .and_then(|table| table.get(material_id))
            .copied()
            .unwrap_or(0.1),
        _ => material.fz_k * geometry.dc_mm.sqrt(),
    }
    .clamp(0.01, 0.5);

    let mut fz = fz_base;
    let mut dry_factor_applied = 1.0;
    if !matches!(operation.depth_rule, DepthRule::Threading) {
        fz *= operation.fz_factor;

        if options.coolant.is_dry() {
            dry_factor_applied = material.dry_factor;
            fz *= dry_factor_applied;
            debug!(dry_factor_applied, "dry-machining correction applied to fz");
        }

        let ld_fz_factor = tables::ld_reduction_factor(ld);
        if ld_fz_factor != 1.0 {
            fz *= ld_fz_factor;
            debug!(ld, ld_fz_factor, "L/D correction applied to fz");
        }

        if is_finishing(&operation.depth_rule) {
            if let Some(factor) = material.fz_finish_factor {
                fz *= factor;
                debug!(factor, "finishing fz_finish_factor applied");
            }
        }
    }
    let fz_final = fz;

    // ── Step 5: radial engagement ae ────────────────────────────────────
    let ae_mm = round3(geometry.dc_mm * operation.ae_factor * sq.ae);

    // ── Step 6: axial depth ap ───────────────────────────────────────────
    let (ap_mm, axial_reference_used, depth_warning) =
        depth::resolve(&operation.depth_rule, geometry, material, sq.ap);

    // ── Step 7: feed rate vf ─────────────────────────────────────────────
    let vf_raw = match operation.depth_rule {
        DepthRule::Drilling => n_clamped * fz_final,
        DepthRule::Threading => {
            let pitch = options.thread_pitch_mm.unwrap_or(0.0);
            n_clamped * pitch
        }
        _ => n_clamped * fz_final * geometry.nof as f64,
    };
    let vf_mm_min = vf_raw * sq.feed;

    // ── Step 8: auxiliary feeds ──────────────────────────────────────────
    let is_full_slot = matches!(operation.depth_rule, DepthRule::SlotFull);
    let auxiliary_feeds = aux_feed::derive(
        operation.feed_factors,
        vf_mm_min,
        material_id,
        ld,
        options.coolant,
        geometry.dc_mm,
        is_full_slot,
    );

    // ── Step 9: MRR and power ────────────────────────────────────────────
    let mrr_cm3_min = mrr::calculate_mrr(ae_mm, ap_mm, vf_mm_min);
    let power_kw = mrr::calculate_power(mrr_cm3_min, material.kc);
    let torque_nm = mrr::calculate_torque(power_kw, n_rpm);

    // ── Step 10: chip temperature ────────────────────────────────────────
    let chip_temperature_c = chip_temperature(material, vc_final, fz_final, options.coolant);

    // ── Step 11: chip-formation class ────────────────────────────────────
    let chip_formation = chip_formation_class(material.category, fz_final);

    // ── Step 12: stability warnings ──────────────────────────────────────
    let mut stability_warnings = Vec::new();
    let ld_class = geometry.ld_class();
    if ld > 6.0 {
        stability_warnings.push(format!(
            "very long tool (L/D={ld:.2} > 6.0): reduce ap by 30-50% to control chatter/deflection"
        ));
    } else if ld > 4.0 {
        stability_warnings.push(format!(
            "long tool (L/D={ld:.2} > 4.0): reduce ap by 20% to control vibration risk"
        ));
    }
    if ap_mm > 0.75 * geometry.dc_mm {
        stability_warnings.push(format!(
            "axial depth {ap_mm:.2}mm is aggressive relative to cutting diameter {:.2}mm",
            geometry.dc_mm
        ));
    }
    if let Some(message) = &depth_warning {
        stability_warnings.push(message.clone());
    }
    if matches!(operation.depth_rule, DepthRule::Threading) {
        stability_warnings.push(
            "threading ap is a placeholder (1.0mm); the true pitch-derived multi-pass depth is not computed by this engine".to_string(),
        );
    }

    let preset = Preset {
        tool_id: tool.id.clone(),
        material_id: material_id.clone(),
        operation_id: operation_id.clone(),
        coating: options.coating,
        surface_quality: options.surface_quality,
        coolant: options.coolant,
        vc_base: material.vc_base,
        coating_factor,
        vc_final,
        n_rpm,
        fz_base,
        dry_factor: dry_factor_applied,
        fz_final,
        vf_mm_min,
        auxiliary_feeds,
        ae_mm,
        ap_mm,
        axial_reference_used: resolved_reference(operation.axial_reference, axial_reference_used),
        mrr_cm3_min,
        power_kw,
        torque_nm,
        chip_temperature_c,
        chip_formation,
        ld_ratio: ld,
        ld_class,
        stability_warnings,
    };

    // ── Validator (C7) ───────────────────────────────────────────────────
    let tool_type = tables::tool_type_for(&operation.depth_rule);
    let (raw_limits, fallback_diagnostic) = tables::get_limits(material_id, tool_type, operation);
    let limits = raw_limits.apply_ld_reduction(ld);

    let validation = validator::validate(
        geometry,
        material,
        operation,
        &preset,
        &limits,
        fallback_diagnostic,
        options.spindle_power_kw,
        RPM_MIN,
        RPM_MAX,
    );

    info!(
        material = %material_id,
        operation = %operation_id,
        status = %validation.status,
        "calculation complete"
    );
    if !validation.errors.is_empty() {
        warn!(
            material = %material_id,
            operation = %operation_id,
            errors = ?validation.errors,
            "preset failed validation"
        );
    }

    Ok((preset, validation))
}

/// §4.2's dynamic-reference operations report the reference tag the
/// decision tree actually resolved through; fixed-reference operations
/// keep their table-declared tag.
fn resolved_reference(declared: AxialReference, resolved: AxialReference) -> AxialReference {
    match declared {
        AxialReference::Dynamic => resolved,
        fixed => fixed,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Step 10: predicted chip temperature, deg C, rounded to 0.1.
fn chip_temperature(
    material: &Material,
    vc_final: f64,
    fz_final: f64,
    coolant: cutdata_core::CoolantMode,
) -> f64 {
    let mut t = 0.4 * material.max_temp_c;
    t *= 1.0 + 0.5 * (vc_final / material.vc_base);
    t *= 1.0 + 0.1 * (fz_final / 0.1);
    t *= coolant.temperature_factor();
    (t * 10.0).round() / 10.0
}

/// Step 11: predicted chip-formation class.
fn chip_formation_class(category: MaterialCategory, fz: f64) -> ChipFormationClass {
    match category {
        MaterialCategory::Wood => {
            if fz < 0.05 {
                ChipFormationClass::Dust
            } else {
                ChipFormationClass::Segmented
            }
        }
        MaterialCategory::Plastic => ChipFormationClass::Continuous,
        MaterialCategory::Metal | MaterialCategory::FerrousMetal => {
            if fz < 0.05 {
                ChipFormationClass::Discontinuous
            } else if fz < 0.15 {
                ChipFormationClass::Segmented
            } else {
                ChipFormationClass::Continuous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutdata_core::{Geometry, OperationId, ToolId};

    fn tool(dc: f64, lcf: f64, nof: u8) -> Tool {
        Tool::new(
            "T1",
            "test tool",
            Geometry {
                dc_mm: dc,
                lcf_mm: lcf,
                oal_mm: lcf + 10.0,
                shank_diameter_mm: dc,
                nof,
                corner_radius_mm: None,
                included_angle_deg: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn unknown_material_is_hard_failure() {
        let t = tool(10.0, 25.0, 2);
        let err = calculate(
            &t,
            &MaterialId("unobtainium".into()),
            &OperationId("slot-partial".into()),
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MaterialNotFound { .. }));
    }

    #[test]
    fn unknown_operation_is_hard_failure() {
        let t = tool(10.0, 25.0, 2);
        let err = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("nonexistent-op".into()),
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::OperationNotFound { .. }));
    }

    #[test]
    fn diamond_on_ferrous_is_hard_failure_before_validation() {
        let t = tool(10.0, 25.0, 2);
        let opts = CalculationOptions::default().with_coating(Coating::Diamond);
        let err = calculate(
            &t,
            &MaterialId("steel_mild".into()),
            &OperationId("face-roughing".into()),
            &opts,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidCoating { .. }));
    }

    #[test]
    fn threading_without_pitch_is_hard_failure() {
        let t = tool(10.0, 25.0, 4);
        let err = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("threading".into()),
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingThreadPitch));
    }

    #[test]
    fn threading_with_pitch_uses_exact_feed_formula() {
        let t = tool(6.0, 25.0, 4);
        let opts = CalculationOptions::default().with_thread_pitch_mm(1.0);
        let (preset, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("threading".into()),
            &opts,
        )
        .unwrap();
        let expected_vf = preset.n_rpm as f64 * 1.0 * preset.surface_quality.factors().feed;
        assert!((preset.vf_mm_min - expected_vf).abs() < 1e-6);
    }

    #[test]
    fn rotation_is_clamped_to_spindle_range() {
        // Very large diameter drives n well below rpm_min.
        let t = tool(200.0, 50.0, 4);
        let (preset, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("face-roughing".into()),
            &CalculationOptions::default(),
        )
        .unwrap();
        assert!(preset.n_rpm >= RPM_MIN && preset.n_rpm <= RPM_MAX);
    }

    #[test]
    fn every_preset_field_is_finite() {
        let t = tool(10.0, 25.0, 2);
        let (preset, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &CalculationOptions::default(),
        )
        .unwrap();
        assert!(preset.vc_final.is_finite());
        assert!(preset.fz_final.is_finite());
        assert!(preset.vf_mm_min.is_finite());
        assert!(preset.ae_mm.is_finite());
        assert!(preset.ap_mm.is_finite());
        assert!(preset.mrr_cm3_min.is_finite());
        assert!(preset.power_kw.is_finite());
        assert!(preset.torque_nm.is_finite());
        assert!(preset.chip_temperature_c.is_finite());
    }

    #[test]
    fn ap_within_bounds() {
        let t = tool(10.0, 25.0, 2);
        let (preset, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &CalculationOptions::default(),
        )
        .unwrap();
        assert!(preset.ap_mm >= 0.1 && preset.ap_mm <= 25.0);
    }

    #[test]
    fn reproducibility_two_calls_identical() {
        let t = tool(10.0, 25.0, 2);
        let opts = CalculationOptions::default();
        let (p1, v1) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &opts,
        )
        .unwrap();
        let (p2, v2) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &opts,
        )
        .unwrap();
        assert_eq!(p1, p2);
        assert_eq!(v1, v2);
    }

    #[test]
    fn higher_coating_factor_never_decreases_vc_n_vf() {
        let t = tool(10.0, 25.0, 2);
        let (none, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &CalculationOptions::default().with_coating(Coating::None),
        )
        .unwrap();
        let (tin, _) = calculate(
            &t,
            &MaterialId("aluminium".into()),
            &OperationId("slot-partial".into()),
            &CalculationOptions::default().with_coating(Coating::TiN),
        )
        .unwrap();
        assert!(tin.vc_final >= none.vc_final);
        assert!(tin.n_rpm >= none.n_rpm);
        assert!(tin.vf_mm_min >= none.vf_mm_min);
    }
}
