//! Coolant strategy: influences chip load and chip temperature.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fluid strategy used during cutting, §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoolantMode {
    #[default]
    Wet,
    Dry,
    Mql,
}

impl CoolantMode {
    /// Multiplicative reduction applied to predicted chip temperature
    /// (Step 10): wet 30%, mql 15%, dry none.
    pub fn temperature_factor(&self) -> f64 {
        match self {
            CoolantMode::Wet => 0.7,
            CoolantMode::Mql => 0.85,
            CoolantMode::Dry => 1.0,
        }
    }

    /// Whether the material's dry-machining chip-load correction applies.
    pub fn is_dry(&self) -> bool {
        matches!(self, CoolantMode::Dry)
    }
}

impl fmt::Display for CoolantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoolantMode::Wet => "wet",
            CoolantMode::Dry => "dry",
            CoolantMode::Mql => "mql",
        };
        write!(f, "{s}")
    }
}
