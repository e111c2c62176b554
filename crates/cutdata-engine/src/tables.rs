//! Static data tables: the material table (C1), the operation table (C2),
//! and the 3-D limit matrix (C3).
//!
//! All three are `lazy_static` maps, built once on first access and never
//! mutated thereafter — the "parsed once at startup into immutable
//! in-memory structures" design note, satisfied without an I/O boundary
//! inside a component that must stay pure.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::warn;

use cutdata_core::{
    AxialReference, DepthRule, FeedFactors, Material, MaterialCategory, MaterialId,
    MaterialSummary, Operation, OperationCategory, OperationId, OperationSummary,
};

/// A cell of the limit matrix, keyed by `(material, tool_type, operation)`.
///
/// Every field is optional: a limit record only carries the subset of
/// constraints relevant to its operation group (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Limits {
    pub ae_factor_min: Option<f64>,
    pub ae_factor_max: Option<f64>,
    pub ae_recommended: Option<f64>,
    pub ap_factor_max: Option<f64>,
    pub ap_fixed: Option<f64>,
    pub ap_min_fixed: Option<f64>,
    pub vf_max_factor: Option<f64>,
    pub mrr_max: Option<f64>,
}

impl Limits {
    /// Names in the adjustable set: scaled by the L/D reduction factor.
    /// `ap_fixed` and `ap_min_fixed` are excluded — fixed values are never
    /// scaled.
    pub fn apply_ld_reduction(&self, ld: f64) -> Limits {
        let factor = ld_reduction_factor(ld);
        Limits {
            ae_factor_min: self.ae_factor_min.map(|v| v * factor),
            ae_factor_max: self.ae_factor_max.map(|v| v * factor),
            ae_recommended: self.ae_recommended.map(|v| v * factor),
            ap_factor_max: self.ap_factor_max.map(|v| v * factor),
            ap_fixed: self.ap_fixed,
            ap_min_fixed: self.ap_min_fixed,
            vf_max_factor: self.vf_max_factor.map(|v| v * factor),
            mrr_max: self.mrr_max.map(|v| v * factor),
        }
    }

    /// Serialize as a flat map for `ValidationResult::applied_limits`.
    pub fn to_snapshot(&self) -> HashMap<String, f64> {
        let mut m = HashMap::new();
        let mut put = |k: &str, v: Option<f64>| {
            if let Some(v) = v {
                m.insert(k.to_string(), v);
            }
        };
        put("ae_factor_min", self.ae_factor_min);
        put("ae_factor_max", self.ae_factor_max);
        put("ae_recommended", self.ae_recommended);
        put("ap_factor_max", self.ap_factor_max);
        put("ap_fixed", self.ap_fixed);
        put("ap_min_fixed", self.ap_min_fixed);
        put("vf_max_factor", self.vf_max_factor);
        put("mrr_max", self.mrr_max);
        m
    }
}

/// L/D reduction step factor, §4.3: `1.0` at `<=3`, `0.9` at `<=4`, `0.8` at
/// `<=5`, `0.7` otherwise.
pub fn ld_reduction_factor(ld: f64) -> f64 {
    if ld <= 3.0 {
        1.0
    } else if ld <= 4.0 {
        0.9
    } else if ld <= 5.0 {
        0.8
    } else {
        0.7
    }
}

/// Coarse tool-type bucket used as the second axis of the limit matrix.
/// The engine only distinguishes end mills from the rest for limit lookup
/// purposes; finer tool taxonomy is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolTypeKey {
    EndMill,
    BallEndMill,
    Drill,
}

fn mat(id: &str) -> MaterialId {
    MaterialId(id.to_string())
}

fn op(id: &str) -> OperationId {
    OperationId(id.to_string())
}

lazy_static! {
    /// C1 — the material table. Eight materials drawn from the worked
    /// scenarios and the face-roughing fixed-depth table; `acrylic` is
    /// deliberately absent (see crate docs / DESIGN.md §4 note 4).
    pub static ref MATERIALS: HashMap<MaterialId, Material> = {
        let mut m = HashMap::new();
        let mut add = |material: Material| {
            m.insert(material.id.clone(), material);
        };

        add(Material {
            id: mat("aluminium"),
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
            vc_finish_factor: Some(1.15),
            fz_finish_factor: Some(0.85),
            fz_k: 0.08,
            ap_face_rough: 1.0,
            hardness_rank: 1,
            abbreviation: Some("ALU".to_string()),
            display_colour: "#C8C8DC".to_string(),
        });

        add(Material {
            id: mat("steel_mild"),
            name: "Mild Steel".to_string(),
            category: MaterialCategory::FerrousMetal,
            vc_base: 110.0,
            kc: 1800.0,
            dry_factor: 0.7,
            max_temp_c: 450.0,
            thermal_factor: 1.3,
            hm_min_mm: Some(0.02),
            ap_min_mm: Some(0.3),
            ap_max_factor: 1.0,
            vc_finish_factor: Some(1.1),
            fz_finish_factor: Some(0.8),
            fz_k: 0.04,
            ap_face_rough: 0.8,
            hardness_rank: 5,
            abbreviation: Some("STL".to_string()),
            display_colour: "#8C96A0".to_string(),
        });

        add(Material {
            id: mat("stainless"),
            name: "Stainless Steel".to_string(),
            category: MaterialCategory::FerrousMetal,
            vc_base: 80.0,
            kc: 2400.0,
            dry_factor: 0.6,
            max_temp_c: 500.0,
            thermal_factor: 1.5,
            hm_min_mm: Some(0.03),
            ap_min_mm: Some(2.0),
            ap_max_factor: 0.8,
            vc_finish_factor: Some(1.05),
            fz_finish_factor: Some(0.75),
            fz_k: 0.03,
            ap_face_rough: 0.8,
            hardness_rank: 7,
            abbreviation: Some("SST".to_string()),
            display_colour: "#B4B8C8".to_string(),
        });

        add(Material {
            id: mat("hardwood"),
            name: "Hardwood".to_string(),
            category: MaterialCategory::Wood,
            vc_base: 600.0,
            kc: 50.0,
            dry_factor: 1.0,
            max_temp_c: 120.0,
            thermal_factor: 0.6,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 3.0,
            vc_finish_factor: Some(1.1),
            fz_finish_factor: Some(0.9),
            fz_k: 0.15,
            ap_face_rough: 1.5,
            hardness_rank: 3,
            abbreviation: Some("HWD".to_string()),
            display_colour: "#8B5A2B".to_string(),
        });

        add(Material {
            id: mat("softwood"),
            name: "Softwood".to_string(),
            category: MaterialCategory::Wood,
            vc_base: 700.0,
            kc: 30.0,
            dry_factor: 1.0,
            max_temp_c: 100.0,
            thermal_factor: 0.5,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 3.5,
            vc_finish_factor: Some(1.15),
            fz_finish_factor: Some(0.9),
            fz_k: 0.18,
            ap_face_rough: 1.5,
            hardness_rank: 1,
            abbreviation: Some("SWD".to_string()),
            display_colour: "#D2B48C".to_string(),
        });

        add(Material {
            id: mat("plastic"),
            name: "Plastic (generic)".to_string(),
            category: MaterialCategory::Plastic,
            vc_base: 300.0,
            kc: 40.0,
            dry_factor: 1.0,
            max_temp_c: 90.0,
            thermal_factor: 0.8,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 2.5,
            vc_finish_factor: Some(1.2),
            fz_finish_factor: Some(0.9),
            fz_k: 0.12,
            ap_face_rough: 1.0,
            hardness_rank: 1,
            abbreviation: Some("PLS".to_string()),
            display_colour: "#64B4E6".to_string(),
        });

        add(Material {
            id: mat("brass"),
            name: "Brass".to_string(),
            category: MaterialCategory::Metal,
            vc_base: 250.0,
            kc: 700.0,
            dry_factor: 0.95,
            max_temp_c: 200.0,
            thermal_factor: 0.9,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 2.0,
            vc_finish_factor: Some(1.1),
            fz_finish_factor: Some(0.9),
            fz_k: 0.09,
            ap_face_rough: 1.0,
            hardness_rank: 4,
            abbreviation: Some("BRS".to_string()),
            display_colour: "#B5A642".to_string(),
        });

        add(Material {
            id: mat("copper"),
            name: "Copper".to_string(),
            category: MaterialCategory::Metal,
            vc_base: 200.0,
            kc: 800.0,
            dry_factor: 0.9,
            max_temp_c: 180.0,
            thermal_factor: 1.0,
            hm_min_mm: None,
            ap_min_mm: None,
            ap_max_factor: 2.0,
            vc_finish_factor: Some(1.1),
            fz_finish_factor: Some(0.9),
            fz_k: 0.07,
            ap_face_rough: 1.0,
            hardness_rank: 3,
            abbreviation: Some("CU".to_string()),
            display_colour: "#B87333".to_string(),
        });

        m
    };

    /// C2 — the operation table, the twelve operations named across the
    /// specification plus the decision tree's explicit "unknown" arm,
    /// which is not a table entry but `depth::resolve`'s fallback.
    pub static ref OPERATIONS: HashMap<OperationId, Operation> = {
        let mut m = HashMap::new();
        let mut add = |o: Operation| {
            m.insert(o.id.clone(), o);
        };

        let feed = |entry: f64, exit: f64, plunge: f64, ramp: f64, transition: f64| FeedFactors {
            entry,
            exit,
            plunge,
            ramp,
            transition,
        };

        add(Operation {
            id: op("face-roughing"),
            name: "Face roughing".to_string(),
            category: OperationCategory::Face,
            axial_reference: AxialReference::Dc,
            depth_rule: DepthRule::FaceRoughing,
            ae_factor: 0.25,
            fz_factor: 1.0,
            vc_factor: 1.0,
            feed_factors: feed(0.8, 0.8, 0.3, 0.4, 0.9),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("face-finishing"),
            name: "Face finishing".to_string(),
            category: OperationCategory::Face,
            axial_reference: AxialReference::Dc,
            depth_rule: DepthRule::FaceFinishing,
            ae_factor: 0.1,
            fz_factor: 0.8,
            vc_factor: 1.1,
            feed_factors: feed(0.7, 0.7, 0.3, 0.4, 0.85),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("slot-partial"),
            name: "Partial-width slotting".to_string(),
            category: OperationCategory::Slot,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::SlotPartial,
            ae_factor: 0.10,
            fz_factor: 1.0,
            vc_factor: 1.0,
            feed_factors: feed(0.8, 0.8, 0.4, 0.5, 0.9),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("slot-full"),
            name: "Full-width slotting".to_string(),
            category: OperationCategory::Slot,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::SlotFull,
            ae_factor: 1.0,
            fz_factor: 0.9,
            vc_factor: 0.95,
            feed_factors: feed(0.7, 0.7, 0.3, 0.4, 0.85),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("slot-trochoidal"),
            name: "Trochoidal slotting".to_string(),
            category: OperationCategory::Slot,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::SlotTrochoidal,
            ae_factor: 0.15,
            fz_factor: 1.1,
            vc_factor: 1.05,
            feed_factors: feed(0.9, 0.9, 0.5, 0.6, 0.95),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("slot-finishing"),
            name: "Slot finishing".to_string(),
            category: OperationCategory::Slot,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::SlotFinishing,
            ae_factor: 0.08,
            fz_factor: 0.75,
            vc_factor: 1.1,
            feed_factors: feed(0.7, 0.7, 0.3, 0.4, 0.85),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("ball-3d"),
            name: "Ball-end 3D surfacing".to_string(),
            category: OperationCategory::Special,
            axial_reference: AxialReference::Dynamic,
            depth_rule: DepthRule::BallEnd3d {
                rotation_boost: 1.15,
            },
            ae_factor: 0.05,
            fz_factor: 0.7,
            vc_factor: 1.0,
            feed_factors: feed(0.8, 0.8, 0.4, 0.5, 0.9),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("radius-contour"),
            name: "Radius contour".to_string(),
            category: OperationCategory::Geometry,
            axial_reference: AxialReference::Dynamic,
            depth_rule: DepthRule::RadiusContour,
            ae_factor: 0.2,
            fz_factor: 0.85,
            vc_factor: 1.0,
            feed_factors: feed(0.8, 0.8, 0.4, 0.5, 0.9),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("vgroove-chamfer"),
            name: "V-groove / chamfer".to_string(),
            category: OperationCategory::Geometry,
            axial_reference: AxialReference::Dynamic,
            depth_rule: DepthRule::VGrooveChamfer,
            ae_factor: 0.3,
            fz_factor: 0.85,
            vc_factor: 1.0,
            feed_factors: feed(0.8, 0.8, 0.4, 0.5, 0.9),
            material_vc_factors: None,
            material_fz: None,
        });

        add(Operation {
            id: op("drilling"),
            name: "Drilling".to_string(),
            category: OperationCategory::Special,
            axial_reference: AxialReference::Lcf,
            depth_rule: DepthRule::Drilling,
            ae_factor: 0.5,
            fz_factor: 1.0,
            vc_factor: 0.8,
            feed_factors: feed(1.0, 1.0, 1.0, 0.0, 0.9),
            material_vc_factors: None,
            material_fz: Some(HashMap::from([
                (mat("aluminium"), 0.15),
                (mat("steel_mild"), 0.10),
                (mat("stainless"), 0.06),
                (mat("hardwood"), 0.25),
                (mat("softwood"), 0.30),
                (mat("plastic"), 0.12),
                (mat("brass"), 0.14),
                (mat("copper"), 0.10),
            ])),
        });

        add(Operation {
            id: op("threading"),
            name: "Threading".to_string(),
            category: OperationCategory::Special,
            axial_reference: AxialReference::Dynamic,
            depth_rule: DepthRule::Threading,
            ae_factor: 0.5,
            fz_factor: 1.0,
            vc_factor: 1.0,
            feed_factors: feed(0.5, 0.5, 0.0, 0.0, 0.7),
            material_vc_factors: Some(HashMap::from([
                (mat("aluminium"), 0.9),
                (mat("steel_mild"), 0.7),
                (mat("stainless"), 0.55),
                (mat("hardwood"), 1.0),
                (mat("softwood"), 1.0),
                (mat("plastic"), 0.8),
                (mat("brass"), 0.85),
                (mat("copper"), 0.75),
            ])),
            material_fz: None,
        });

        m
    };

    /// C3 — the 3-D limit matrix, `(material, tool_type, operation) -> Limits`.
    pub static ref LIMITS: HashMap<(MaterialId, ToolTypeKey, OperationId), Limits> = {
        let mut m = HashMap::new();

        m.insert(
            (mat("aluminium"), ToolTypeKey::EndMill, op("slot-partial")),
            Limits {
                ae_factor_min: Some(0.05),
                ae_factor_max: Some(0.6),
                ae_recommended: Some(0.3),
                ap_factor_max: Some(2.0),
                mrr_max: Some(180.0),
                ..Default::default()
            },
        );

        m.insert(
            (mat("aluminium"), ToolTypeKey::EndMill, op("face-roughing")),
            Limits {
                ae_factor_min: Some(0.05),
                ae_factor_max: Some(0.8),
                ae_recommended: Some(0.4),
                mrr_max: Some(220.0),
                ..Default::default()
            },
        );

        m.insert(
            (mat("steel_mild"), ToolTypeKey::EndMill, op("slot-partial")),
            Limits {
                ae_factor_min: Some(0.05),
                ae_factor_max: Some(0.4),
                ae_recommended: Some(0.2),
                ap_factor_max: Some(1.0),
                ap_min_fixed: Some(0.3),
                mrr_max: Some(60.0),
                ..Default::default()
            },
        );

        m.insert(
            (mat("stainless"), ToolTypeKey::BallEndMill, op("ball-3d")),
            Limits {
                ap_min_fixed: Some(2.0),
                mrr_max: Some(25.0),
                ..Default::default()
            },
        );

        m.insert(
            (mat("softwood"), ToolTypeKey::EndMill, op("slot-trochoidal")),
            Limits {
                ae_factor_min: Some(0.03),
                ae_factor_max: Some(0.3),
                ae_recommended: Some(0.12),
                ap_factor_max: Some(3.5),
                mrr_max: Some(400.0),
                ..Default::default()
            },
        );

        m
    };
}

/// Fallback default for a limit-matrix miss, grouped by operation category
/// (§4.3). The fallback path always appends a warning to the caller.
pub fn default_limits(category: OperationCategory) -> Limits {
    match category {
        OperationCategory::Face => Limits {
            ae_factor_max: Some(0.7),
            mrr_max: Some(200.0),
            ..Default::default()
        },
        OperationCategory::Slot => Limits {
            ae_factor_max: Some(0.3),
            ap_factor_max: Some(0.5),
            mrr_max: Some(200.0),
            ..Default::default()
        },
        OperationCategory::Geometry | OperationCategory::Special => Limits {
            ae_factor_max: Some(0.2),
            mrr_max: Some(50.0),
            ..Default::default()
        },
    }
}

/// Look up a limit cell, falling back to conservative defaults and
/// recording a diagnostic when the exact key is absent.
pub fn get_limits(
    material_id: &MaterialId,
    tool_type: ToolTypeKey,
    operation: &Operation,
) -> (Limits, Option<String>) {
    let key = (material_id.clone(), tool_type, operation.id.clone());
    if let Some(limits) = LIMITS.get(&key) {
        (*limits, None)
    } else {
        warn!(
            material = %material_id,
            operation = %operation.id,
            "limit matrix miss, using conservative defaults"
        );
        let fallback = default_limits(operation.category);
        let message = format!(
            "no specific limits for material '{material_id}' / operation '{op}': using conservative {cat} defaults",
            material_id = material_id,
            op = operation.id,
            cat = operation.category
        );
        (fallback, Some(message))
    }
}

/// C1 listing: materials, by hardness rank.
pub fn list_materials() -> Vec<MaterialSummary> {
    let mut v: Vec<MaterialSummary> = MATERIALS.values().map(MaterialSummary::from).collect();
    v.sort_by_key(|m| m.hardness_rank);
    v
}

/// C2 listing: operations, grouped by category.
pub fn list_operations() -> Vec<OperationSummary> {
    let mut v: Vec<OperationSummary> = OPERATIONS.values().map(OperationSummary::from).collect();
    v.sort_by_key(|o| format!("{}-{}", o.category, o.id));
    v
}

/// Coating listing, §6: surfaced so consumers can render a selection UI
/// without duplicating the factor table.
pub fn list_coatings() -> Vec<cutdata_core::CoatingSummary> {
    use cutdata_core::Coating;
    [
        Coating::None,
        Coating::TiN,
        Coating::TiAlN,
        Coating::AlTiN,
        Coating::Diamond,
        Coating::Carbide,
    ]
    .into_iter()
    .map(|coating| cutdata_core::CoatingSummary {
        coating,
        factor: coating.factor(),
    })
    .collect()
}

/// Surface-quality listing, §6.
pub fn list_surface_qualities() -> Vec<cutdata_core::SurfaceQualitySummary> {
    use cutdata_core::SurfaceQuality;
    [
        SurfaceQuality::Roughing,
        SurfaceQuality::Standard,
        SurfaceQuality::Finishing,
        SurfaceQuality::HighFinish,
    ]
    .into_iter()
    .map(|level| {
        let f = level.factors();
        cutdata_core::SurfaceQualitySummary {
            level,
            ae: f.ae,
            ap: f.ap,
            feed: f.feed,
        }
    })
    .collect()
}

/// Which coarse tool-type bucket (second axis of the limit matrix, §4.3) an
/// operation's decision-tree arm implies. The engine does not carry an
/// explicit tool-type field on `Tool` — classification is driven by the
/// operation actually being performed, mirroring how the limit matrix is
/// keyed in the original configuration.
pub fn tool_type_for(depth_rule: &cutdata_core::DepthRule) -> ToolTypeKey {
    use cutdata_core::DepthRule;
    match depth_rule {
        DepthRule::BallEnd3d { .. } => ToolTypeKey::BallEndMill,
        DepthRule::Drilling => ToolTypeKey::Drill,
        _ => ToolTypeKey::EndMill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ld_reduction_boundaries() {
        assert_eq!(ld_reduction_factor(3.0), 1.0);
        assert_eq!(ld_reduction_factor(3.0 + f64::EPSILON * 10.0), 0.9);
        assert_eq!(ld_reduction_factor(4.0), 0.9);
        assert_eq!(ld_reduction_factor(5.0), 0.8);
        assert_eq!(ld_reduction_factor(5.01), 0.7);
    }

    #[test]
    fn material_table_has_eight_and_no_acrylic() {
        assert_eq!(MATERIALS.len(), 8);
        assert!(!MATERIALS.contains_key(&mat("acrylic")));
    }

    #[test]
    fn material_listing_carries_display_colour() {
        for summary in list_materials() {
            assert!(
                summary.display_colour.starts_with('#'),
                "material {} missing a display colour",
                summary.id
            );
        }
    }

    #[test]
    fn limit_miss_falls_back_with_diagnostic() {
        let op_entry = OPERATIONS.get(&op("face-roughing")).unwrap();
        let (limits, diag) = get_limits(&mat("brass"), ToolTypeKey::EndMill, op_entry);
        assert!(diag.is_some());
        assert_eq!(limits.ae_factor_max, Some(0.7));
    }

    #[test]
    fn limit_hit_has_no_diagnostic() {
        let op_entry = OPERATIONS.get(&op("slot-partial")).unwrap();
        let (_limits, diag) = get_limits(&mat("aluminium"), ToolTypeKey::EndMill, op_entry);
        assert!(diag.is_none());
    }

    #[test]
    fn coating_and_surface_quality_listings_are_complete() {
        assert_eq!(list_coatings().len(), 6);
        assert_eq!(list_surface_qualities().len(), 4);
    }

    #[test]
    fn tool_type_follows_depth_rule() {
        use cutdata_core::DepthRule;
        assert_eq!(
            tool_type_for(&DepthRule::BallEnd3d { rotation_boost: 1.15 }),
            ToolTypeKey::BallEndMill
        );
        assert_eq!(tool_type_for(&DepthRule::Drilling), ToolTypeKey::Drill);
        assert_eq!(tool_type_for(&DepthRule::FaceRoughing), ToolTypeKey::EndMill);
    }
}
