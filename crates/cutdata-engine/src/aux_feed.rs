//! Auxiliary feed model (C8): entry/exit/plunge/ramp/transition feed rates
//! derived from the base feed rate.

use cutdata_core::{AuxiliaryFeeds, CoolantMode, FeedFactors, MaterialId};

fn ld_aux_factor(ld: f64) -> f64 {
    if ld > 3.0 {
        (1.0 - 0.1 * (ld - 3.0)).max(0.7)
    } else {
        1.0
    }
}

fn material_corrections(material_id: &MaterialId) -> (f64, f64, f64) {
    // (plunge, ramp, entry)
    match material_id.0.as_str() {
        "steel_mild" => (0.6, 0.5, 0.7),
        "stainless" => (0.5, 0.4, 0.6),
        _ => (1.0, 1.0, 1.0),
    }
}

fn ramp_angle_deg(material_id: &MaterialId, dc_mm: f64, is_full_slot: bool) -> f64 {
    let base = match material_id.0.as_str() {
        "aluminium" | "brass" | "copper" => 3.0,
        "steel_mild" | "stainless" => 1.5,
        "hardwood" | "softwood" => 5.0,
        "plastic" => 4.0,
        _ => 2.0,
    };
    let mut angle = base;
    if dc_mm > 12.0 {
        angle *= 0.6;
    } else if dc_mm > 8.0 {
        angle *= 0.8;
    }
    if is_full_slot {
        angle *= 0.5;
    }
    angle
}

/// Derive the auxiliary feed set from the operation's feed-factor bundle,
/// the base feed rate `vf`, and the corrections named in §4.5.
pub fn derive(
    base: FeedFactors,
    vf_mm_min: f64,
    material_id: &MaterialId,
    ld_ratio: f64,
    coolant: CoolantMode,
    dc_mm: f64,
    is_full_slot: bool,
) -> AuxiliaryFeeds {
    let (plunge_mat, ramp_mat, entry_mat) = material_corrections(material_id);

    let mut entry = base.entry * entry_mat;
    let exit = base.exit;
    let mut plunge = base.plunge * plunge_mat;
    let mut ramp = base.ramp * ramp_mat;
    let transition = base.transition;

    let ld_factor = ld_aux_factor(ld_ratio);
    plunge *= ld_factor;
    ramp *= ld_factor;

    if coolant.is_dry() {
        plunge *= 0.85;
        ramp *= 0.85;
    }

    // material_corrections already folded entry's material factor above;
    // clamp to keep all factors non-negative regardless of correction chain.
    entry = entry.max(0.0);
    plunge = plunge.max(0.0);
    ramp = ramp.max(0.0);

    let angle = ramp_angle_deg(material_id, dc_mm, is_full_slot);

    AuxiliaryFeeds {
        entry_mm_min: entry * vf_mm_min,
        exit_mm_min: exit * vf_mm_min,
        ramp_mm_min: ramp * vf_mm_min,
        plunge_mm_min: plunge * vf_mm_min,
        transition_mm_min: transition * vf_mm_min,
        entry_factor: entry,
        exit_factor: exit,
        ramp_factor: ramp,
        plunge_factor: plunge,
        transition_factor: transition,
        ramp_angle_deg: angle,
    }
}
