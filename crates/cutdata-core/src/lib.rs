//! # cutdata-core
//!
//! Domain types for the cutting-parameter engine: tool geometry, material
//! and operation constants, the small enumerated option types (coating,
//! surface quality, coolant mode), the calculation output (`Preset`), and
//! the validator's verdict type (`ValidationResult`).
//!
//! This crate owns no behaviour beyond invariant-checked construction —
//! the calculation pipeline lives in `cutdata-engine`.

pub mod coating;
pub mod coolant;
pub mod error;
pub mod material;
pub mod operation;
pub mod options;
pub mod preset;
pub mod surface_quality;
pub mod tool;
pub mod validation;

pub use coating::{Coating, CoatingSummary};
pub use coolant::CoolantMode;
pub use error::{EngineError, Result};
pub use material::{Material, MaterialCategory, MaterialId, MaterialSummary};
pub use operation::{
    AxialReference, DepthRule, FeedFactors, Operation, OperationCategory, OperationId,
    OperationSummary,
};
pub use options::{CalculationOptions, DEFAULT_SPINDLE_POWER_KW};
pub use preset::{AuxiliaryFeeds, ChipFormationClass, Preset};
pub use surface_quality::{SurfaceQuality, SurfaceQualityFactors, SurfaceQualitySummary};
pub use tool::{Geometry, LdClass, Tool, ToolId};
pub use validation::{ValidationResult, ValidationStatus};
