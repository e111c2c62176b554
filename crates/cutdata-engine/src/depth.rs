//! Depth-of-cut resolver (C5).
//!
//! Expressed as a single `match` on the operation's [`DepthRule`], per the
//! "avoid chained `elif` or class inheritance" design note — each arm
//! returns `(ap, axial_reference_used, warning)`; clamping and
//! surface-quality multiplication happen once at the tail in [`resolve`].

use cutdata_core::{AxialReference, DepthRule, Geometry, Material, MaterialCategory};

fn face_roughing(material: &Material) -> (f64, AxialReference) {
    (material.ap_face_rough, AxialReference::Dc)
}

fn slot(
    variant_factor: f64,
    wood_base: bool,
    geometry: &Geometry,
    material: &Material,
) -> (f64, AxialReference) {
    let (base, reference) = if material.category == MaterialCategory::Wood && wood_base {
        (1.5 * geometry.dc_mm, AxialReference::Dc)
    } else {
        (geometry.lcf_mm * material.ap_max_factor, AxialReference::Lcf)
    };
    let mut ap = base * variant_factor;
    if material.category == MaterialCategory::FerrousMetal {
        if let Some(ap_min) = material.ap_min_mm {
            ap = ap.max(ap_min);
        }
    }
    (ap, reference)
}

/// Resolve the axial depth of cut for one calculation.
///
/// Returns `(ap, axial_reference_used, warning)`. `warning` is populated
/// only by the unknown-operation fallback arm (10).
pub fn resolve(
    depth_rule: &DepthRule,
    geometry: &Geometry,
    material: &Material,
    surface_quality_ap_multiplier: f64,
) -> (f64, AxialReference, Option<String>) {
    let (ap_raw, reference, warning) = match depth_rule {
        DepthRule::FaceRoughing => {
            let (ap, r) = face_roughing(material);
            (ap, r, None)
        }
        DepthRule::FaceFinishing => (0.2, AxialReference::Dc, None),
        DepthRule::SlotFinishing => (0.2, AxialReference::Lcf, None),
        DepthRule::SlotPartial => {
            let (ap, r) = slot(1.0, true, geometry, material);
            (ap, r, None)
        }
        DepthRule::SlotFull => {
            let (ap, r) = slot(0.6, true, geometry, material);
            (ap, r, None)
        }
        DepthRule::SlotTrochoidal => {
            let (ap, r) = slot(1.2, true, geometry, material);
            (ap, r, None)
        }
        DepthRule::BallEnd3d { .. } => {
            let ap = (0.5_f64).min(geometry.dc_mm / 2.0);
            (ap, AxialReference::Dc, None)
        }
        DepthRule::RadiusContour => {
            let ap = match geometry.corner_radius_mm {
                Some(r) => (0.2_f64).min(2.0 * r),
                None => 0.2,
            };
            (ap, AxialReference::Dc, None)
        }
        DepthRule::VGrooveChamfer => {
            let ap = match geometry.included_angle_deg {
                Some(angle_deg) => {
                    let half = angle_deg.to_radians() / 2.0;
                    (0.3_f64).min(geometry.dc_mm / (2.0 * half.tan()))
                }
                None => 0.3,
            };
            (ap, AxialReference::Dc, None)
        }
        DepthRule::Drilling => (geometry.lcf_mm, AxialReference::Lcf, None),
        DepthRule::Threading => {
            // TODO: the source sets this as a placeholder; the true
            // pitch-derived multi-pass depth is not specified. Preserved
            // as a visible limitation rather than silently decided.
            (1.0, AxialReference::Dc, None)
        }
    };

    let ap_with_quality = ap_raw * surface_quality_ap_multiplier;
    let ap_clamped = ap_with_quality.max(0.1).min(geometry.lcf_mm);

    (ap_clamped, reference, warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutdata_core::MaterialId;

    fn geom(dc: f64, lcf: f64) -> Geometry {
        Geometry {
            dc_mm: dc,
            lcf_mm: lcf,
            oal_mm: lcf + 10.0,
            shank_diameter_mm: dc,
            nof: 2,
            corner_radius_mm: None,
            included_angle_deg: None,
        }
    }

    fn metal(category: MaterialCategory) -> Material {
        Material {
            id: MaterialId("test".to_string()),
            name: "test".to_string(),
            category,
            vc_base: 300.0,
            kc: 700.0,
            dry_factor: 0.9,
            max_temp_c: 200.0,
            thermal_factor: 1.0,
            hm_min_mm: Some(0.02),
            ap_min_mm: Some(0.3),
            ap_max_factor: 1.0,
            vc_finish_factor: None,
            fz_finish_factor: None,
            fz_k: 0.08,
            ap_face_rough: 1.0,
            hardness_rank: 1,
            abbreviation: None,
            display_colour: "#FFFFFF".to_string(),
        }
    }

    #[test]
    fn face_roughing_uses_material_fixed_value() {
        let m = metal(MaterialCategory::Metal);
        let (ap, reference, _) = resolve(&DepthRule::FaceRoughing, &geom(30.0, 8.0), &m, 1.0);
        assert_eq!(ap, 1.0);
        assert_eq!(reference, AxialReference::Dc);
    }

    #[test]
    fn ball_end_never_exceeds_half_diameter() {
        let m = metal(MaterialCategory::Metal);
        let rule = DepthRule::BallEnd3d { rotation_boost: 1.15 };
        let (ap, _, _) = resolve(&rule, &geom(8.0, 40.0), &m, 0.6);
        assert!((ap - 0.3).abs() < 1e-9);
    }

    #[test]
    fn slot_wood_branch_uses_dc() {
        let m = metal(MaterialCategory::Wood);
        let (ap, reference, _) = resolve(&DepthRule::SlotTrochoidal, &geom(6.0, 20.0), &m, 1.0);
        assert!((ap - 10.8).abs() < 1e-9);
        assert_eq!(reference, AxialReference::Dc);
    }

    #[test]
    fn ap_clamped_to_lcf() {
        let m = metal(MaterialCategory::Wood);
        let (ap, _, _) = resolve(&DepthRule::SlotPartial, &geom(20.0, 5.0), &m, 1.0);
        assert!(ap <= 5.0);
    }

    #[test]
    fn ap_never_below_minimum() {
        let m = metal(MaterialCategory::Metal);
        let (ap, _, _) = resolve(&DepthRule::FaceFinishing, &geom(10.0, 25.0), &m, 0.01);
        assert!(ap >= 0.1);
    }

    #[test]
    fn ferrous_slot_enforces_material_minimum() {
        let m = metal(MaterialCategory::FerrousMetal);
        let (ap, _, _) = resolve(&DepthRule::SlotPartial, &geom(6.0, 25.0), &m, 1.0);
        assert!(ap >= 0.3);
    }
}
