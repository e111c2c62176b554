//! Material-removal rate and spindle-power model (C4).

/// `MRR [cm^3/min] = (ae * ap * vf) / 1000`.
pub fn calculate_mrr(ae_mm: f64, ap_mm: f64, vf_mm_min: f64) -> f64 {
    (ae_mm * ap_mm * vf_mm_min) / 1000.0
}

/// `Power [kW] = (MRR * kc) / 60000`, kc in N/mm^2.
pub fn calculate_power(mrr_cm3_min: f64, kc: f64) -> f64 {
    (mrr_cm3_min * kc) / 60_000.0
}

/// `Torque [N*m] = (9550 * Power) / n`, zero when `n == 0`.
pub fn calculate_torque(power_kw: f64, n_rpm: u32) -> f64 {
    if n_rpm == 0 {
        0.0
    } else {
        (9_550.0 * power_kw) / n_rpm as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mrr_matches_formula() {
        assert!((calculate_mrr(10.0, 1.0, 1000.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn power_matches_formula() {
        let mrr = calculate_mrr(10.0, 1.0, 1000.0);
        let power = calculate_power(mrr, 700.0);
        assert!((power - (10.0 * 700.0 / 60_000.0)).abs() < 1e-9);
    }

    #[test]
    fn torque_zero_at_zero_rpm() {
        assert_eq!(calculate_torque(1.0, 0), 0.0);
    }

    #[test]
    fn torque_matches_formula() {
        let t = calculate_torque(2.0, 10_000);
        assert!((t - (9_550.0 * 2.0 / 10_000.0)).abs() < 1e-9);
    }
}
