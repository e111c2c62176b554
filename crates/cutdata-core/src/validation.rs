//! The validator's tri-state verdict and structured diagnostics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall verdict for a calculated preset.
///
/// Invariant (enforced by [`ValidationResult::new`], never by direct field
/// mutation): `status == RED` iff `errors` is non-empty; `status == YELLOW`
/// iff `errors` is empty and `warnings` is non-empty; `status == GREEN` iff
/// both are empty. `recommendations` never affect status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Green,
    Yellow,
    Red,
    /// No validation has run yet.
    Pending,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Green => "GREEN",
            ValidationStatus::Yellow => "YELLOW",
            ValidationStatus::Red => "RED",
            ValidationStatus::Pending => "PENDING",
        };
        write!(f, "{s}")
    }
}

/// Multi-level validator output: a tri-state status plus structured,
/// human-readable diagnostics carrying numeric context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,

    pub mrr_calculated: f64,
    pub power_calculated: f64,
    pub ld_ratio: f64,

    /// Defensive snapshot of the limits actually applied during this
    /// validation, so the caller cannot observe (or mutate) the shared
    /// limit tables through the result.
    pub applied_limits: HashMap<String, f64>,
}

impl ValidationResult {
    /// Build a result from accumulated diagnostics, deriving `status`
    /// per the invariant in §3 — never set directly by a check.
    pub fn new(
        errors: Vec<String>,
        warnings: Vec<String>,
        recommendations: Vec<String>,
        mrr_calculated: f64,
        power_calculated: f64,
        ld_ratio: f64,
        applied_limits: HashMap<String, f64>,
    ) -> Self {
        let status = if !errors.is_empty() {
            ValidationStatus::Red
        } else if !warnings.is_empty() {
            ValidationStatus::Yellow
        } else {
            ValidationStatus::Green
        };
        ValidationResult {
            status,
            errors,
            warnings,
            recommendations,
            mrr_calculated,
            power_calculated,
            ld_ratio,
            applied_limits,
        }
    }

    /// `true` unless the status is `RED`.
    pub fn is_safe(&self) -> bool {
        !matches!(self.status, ValidationStatus::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_lists() {
        let r = ValidationResult::new(vec![], vec![], vec![], 0.0, 0.0, 1.0, HashMap::new());
        assert_eq!(r.status, ValidationStatus::Green);

        let r = ValidationResult::new(
            vec![],
            vec!["warn".into()],
            vec![],
            0.0,
            0.0,
            1.0,
            HashMap::new(),
        );
        assert_eq!(r.status, ValidationStatus::Yellow);

        let r = ValidationResult::new(
            vec!["err".into()],
            vec!["warn".into()],
            vec![],
            0.0,
            0.0,
            1.0,
            HashMap::new(),
        );
        assert_eq!(r.status, ValidationStatus::Red);
    }

    #[test]
    fn is_safe_tracks_red_only() {
        let r = ValidationResult::new(
            vec![],
            vec!["warn".into()],
            vec![],
            0.0,
            0.0,
            1.0,
            HashMap::new(),
        );
        assert!(r.is_safe());

        let r = ValidationResult::new(
            vec!["err".into()],
            vec![],
            vec![],
            0.0,
            0.0,
            1.0,
            HashMap::new(),
        );
        assert!(!r.is_safe());
    }
}
