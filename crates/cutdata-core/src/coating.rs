//! Tool coatings and their cutting-speed factors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Surface treatment modifying permissible cutting speed, §3.
///
/// `Diamond` is forbidden on ferrous materials — checked in pipeline Step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Coating {
    #[default]
    None,
    TiN,
    TiAlN,
    AlTiN,
    Diamond,
    Carbide,
}

impl Coating {
    /// Multiplicative cutting-speed factor, §3.
    pub fn factor(&self) -> f64 {
        match self {
            Coating::None => 1.0,
            Coating::TiN => 1.40,
            Coating::TiAlN => 1.60,
            Coating::AlTiN => 1.80,
            Coating::Diamond => 2.20,
            Coating::Carbide => 1.50,
        }
    }

    /// Whether this coating may be applied to a ferrous material.
    pub fn allowed_on_ferrous(&self) -> bool {
        !matches!(self, Coating::Diamond)
    }
}

impl fmt::Display for Coating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Coating::None => "none",
            Coating::TiN => "TiN",
            Coating::TiAlN => "TiAlN",
            Coating::AlTiN => "AlTiN",
            Coating::Diamond => "Diamond",
            Coating::Carbide => "Carbide",
        };
        write!(f, "{s}")
    }
}

/// Read-only listing entry for a coating, §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoatingSummary {
    pub coating: Coating,
    pub factor: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_forbidden_on_ferrous() {
        assert!(!Coating::Diamond.allowed_on_ferrous());
        assert!(Coating::TiN.allowed_on_ferrous());
    }

    #[test]
    fn factors_match_spec() {
        assert_eq!(Coating::None.factor(), 1.0);
        assert_eq!(Coating::TiN.factor(), 1.40);
        assert_eq!(Coating::TiAlN.factor(), 1.60);
        assert_eq!(Coating::AlTiN.factor(), 1.80);
        assert_eq!(Coating::Diamond.factor(), 2.20);
        assert_eq!(Coating::Carbide.factor(), 1.50);
    }
}
