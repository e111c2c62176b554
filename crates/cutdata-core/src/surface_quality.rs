//! Discretised operator intent: the surface-quality level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operator-selected finish level. Each variant maps to a triple of
/// multipliers `(ae, ap, feed)`, §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceQuality {
    Roughing,
    #[default]
    Standard,
    Finishing,
    HighFinish,
}

/// The `(ae, ap, feed)` multiplier triple for a surface-quality level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceQualityFactors {
    pub ae: f64,
    pub ap: f64,
    pub feed: f64,
}

impl SurfaceQuality {
    /// The multiplier triple for this level, §3.
    pub fn factors(&self) -> SurfaceQualityFactors {
        match self {
            SurfaceQuality::Roughing => SurfaceQualityFactors {
                ae: 1.0,
                ap: 1.0,
                feed: 1.2,
            },
            SurfaceQuality::Standard => SurfaceQualityFactors {
                ae: 1.0,
                ap: 1.0,
                feed: 1.0,
            },
            SurfaceQuality::Finishing => SurfaceQualityFactors {
                ae: 0.7,
                ap: 0.8,
                feed: 0.8,
            },
            SurfaceQuality::HighFinish => SurfaceQualityFactors {
                ae: 0.5,
                ap: 0.6,
                feed: 0.6,
            },
        }
    }
}

impl fmt::Display for SurfaceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurfaceQuality::Roughing => "roughing",
            SurfaceQuality::Standard => "standard",
            SurfaceQuality::Finishing => "finishing",
            SurfaceQuality::HighFinish => "high-finish",
        };
        write!(f, "{s}")
    }
}

/// Read-only listing entry for a surface-quality level, §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceQualitySummary {
    pub level: SurfaceQuality,
    pub ae: f64,
    pub ap: f64,
    pub feed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_match_spec() {
        let r = SurfaceQuality::Roughing.factors();
        assert_eq!((r.ae, r.ap, r.feed), (1.0, 1.0, 1.2));

        let s = SurfaceQuality::Standard.factors();
        assert_eq!((s.ae, s.ap, s.feed), (1.0, 1.0, 1.0));

        let f = SurfaceQuality::Finishing.factors();
        assert_eq!((f.ae, f.ap, f.feed), (0.7, 0.8, 0.8));

        let h = SurfaceQuality::HighFinish.factors();
        assert_eq!((h.ae, h.ap, h.feed), (0.5, 0.6, 0.6));
    }
}
