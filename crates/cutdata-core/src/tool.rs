//! Tool identity and geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Stable identifier for a tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(pub String);

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        ToolId(s.to_string())
    }
}

/// Slenderness classification derived from a tool's `L/D` ratio.
///
/// Thresholds per the data model: `SHORT` (<1.0), `NORMAL` (<4.0), `LONG`
/// (<6.0), `VERY_LONG` (>=6.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LdClass {
    Short,
    Normal,
    Long,
    VeryLong,
}

impl LdClass {
    /// Classify a raw `L/D` ratio.
    pub fn from_ratio(ld: f64) -> Self {
        if ld < 1.0 {
            LdClass::Short
        } else if ld < 4.0 {
            LdClass::Normal
        } else if ld < 6.0 {
            LdClass::Long
        } else {
            LdClass::VeryLong
        }
    }
}

impl fmt::Display for LdClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LdClass::Short => "SHORT",
            LdClass::Normal => "NORMAL",
            LdClass::Long => "LONG",
            LdClass::VeryLong => "VERY_LONG",
        };
        write!(f, "{s}")
    }
}

/// Cutting geometry of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Cutting diameter, mm.
    pub dc_mm: f64,
    /// Usable cutting length of the flutes, mm.
    pub lcf_mm: f64,
    /// Overall tool length, mm.
    pub oal_mm: f64,
    /// Shank diameter, mm.
    pub shank_diameter_mm: f64,
    /// Number of flutes, 1-12.
    pub nof: u8,
    /// Corner radius, mm, for ball/radius-mill geometry checks.
    pub corner_radius_mm: Option<f64>,
    /// Included angle, degrees, for V-groove/chamfer geometry.
    pub included_angle_deg: Option<f64>,
}

impl Geometry {
    /// Validate against the invariants of §3: `DC > 0`, `LCF > 0`,
    /// `1 <= NOF <= 12`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.dc_mm > 0.0) {
            return Err(EngineError::InvalidGeometry {
                field: "DC".to_string(),
                reason: format!("must be > 0, got {}", self.dc_mm),
            });
        }
        if !(self.lcf_mm > 0.0) {
            return Err(EngineError::InvalidGeometry {
                field: "LCF".to_string(),
                reason: format!("must be > 0, got {}", self.lcf_mm),
            });
        }
        if !(1..=12).contains(&self.nof) {
            return Err(EngineError::InvalidGeometry {
                field: "NOF".to_string(),
                reason: format!("must be in 1..=12, got {}", self.nof),
            });
        }
        Ok(())
    }

    /// `L/D` ratio, `LCF / DC`.
    pub fn ld_ratio(&self) -> f64 {
        self.lcf_mm / self.dc_mm
    }

    /// Slenderness classification for this geometry.
    pub fn ld_class(&self) -> LdClass {
        LdClass::from_ratio(self.ld_ratio())
    }
}

/// A tool: stable identity plus a validated geometry block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub geometry: Geometry,
}

impl Tool {
    /// Construct a tool, rejecting geometry that violates §3's invariants.
    pub fn new(
        id: impl Into<ToolId>,
        name: impl Into<String>,
        geometry: Geometry,
    ) -> Result<Self, EngineError> {
        geometry.validate()?;
        Ok(Tool {
            id: id.into(),
            name: name.into(),
            geometry,
        })
    }

    /// `L/D` ratio of the underlying geometry.
    pub fn ld_ratio(&self) -> f64 {
        self.geometry.ld_ratio()
    }

    /// Slenderness classification of the underlying geometry.
    pub fn ld_class(&self) -> LdClass {
        self.geometry.ld_class()
    }
}

impl From<String> for ToolId {
    fn from(s: String) -> Self {
        ToolId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(dc: f64, lcf: f64, nof: u8) -> Geometry {
        Geometry {
            dc_mm: dc,
            lcf_mm: lcf,
            oal_mm: lcf + 10.0,
            shank_diameter_mm: dc,
            nof,
            corner_radius_mm: None,
            included_angle_deg: None,
        }
    }

    #[test]
    fn rejects_zero_diameter() {
        let err = Tool::new("T1", "test", geom(0.0, 25.0, 2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { field, .. } if field == "DC"));
    }

    #[test]
    fn rejects_zero_length() {
        let err = Tool::new("T1", "test", geom(10.0, 0.0, 2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { field, .. } if field == "LCF"));
    }

    #[test]
    fn rejects_flute_count_out_of_range() {
        assert!(Tool::new("T1", "test", geom(10.0, 25.0, 0)).is_err());
        assert!(Tool::new("T1", "test", geom(10.0, 25.0, 13)).is_err());
    }

    #[test]
    fn ld_classification_boundaries() {
        assert_eq!(LdClass::from_ratio(0.5), LdClass::Short);
        assert_eq!(LdClass::from_ratio(0.99), LdClass::Short);
        assert_eq!(LdClass::from_ratio(1.0), LdClass::Normal);
        assert_eq!(LdClass::from_ratio(3.99), LdClass::Normal);
        assert_eq!(LdClass::from_ratio(4.0), LdClass::Long);
        assert_eq!(LdClass::from_ratio(5.99), LdClass::Long);
        assert_eq!(LdClass::from_ratio(6.0), LdClass::VeryLong);
    }

    #[test]
    fn accepts_valid_geometry() {
        let t = Tool::new("T1", "3mm endmill", geom(10.0, 25.0, 2)).unwrap();
        assert_eq!(t.ld_ratio(), 2.5);
        assert_eq!(t.ld_class(), LdClass::Normal);
    }
}
