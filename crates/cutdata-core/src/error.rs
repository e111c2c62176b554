//! Error handling for the cutting-parameter engine.
//!
//! These are the *hard failures* of §7: conditions that prevent a
//! [`Preset`](crate::preset::Preset) from being constructed at all. They are
//! distinct from the *soft diagnostics* carried inside a `ValidationResult`
//! for a preset that was successfully computed.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Hard-failure error type for the cutting-parameter engine.
///
/// Returned from `calculate` whenever the request cannot be turned into a
/// preset at all — a bad identifier, a forbidden coating, a missing thread
/// pitch, or invalid tool geometry. A successful calculation never returns
/// this type; its quality concerns live in `ValidationResult` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Tool geometry failed an invariant (`DC > 0`, `LCF > 0`, `1 ≤ NOF ≤ 12`).
    #[error("invalid geometry: {field} — {reason}")]
    InvalidGeometry {
        /// Name of the offending field (e.g. `"DC"`, `"NOF"`).
        field: String,
        /// Human-readable reason the value is invalid.
        reason: String,
    },

    /// Requested material id does not exist in the material table.
    #[error("material not found: {material_id}")]
    MaterialNotFound {
        /// The identifier that was looked up.
        material_id: String,
    },

    /// Requested operation id does not exist in the operation table.
    #[error("operation not found: {operation_id}")]
    OperationNotFound {
        /// The identifier that was looked up.
        operation_id: String,
    },

    /// Requested tool id does not exist (reserved for catalog-backed callers).
    #[error("tool not found: {tool_id}")]
    ToolNotFound {
        /// The identifier that was looked up.
        tool_id: String,
    },

    /// Coating selection is forbidden for the chosen material (Diamond on ferrous).
    #[error("invalid coating: {reason}")]
    InvalidCoating {
        /// Explanation of why the coating is forbidden.
        reason: String,
    },

    /// Threading operation requested without a thread pitch.
    #[error("thread pitch is required for threading operations")]
    MissingThreadPitch,
}

/// Result type using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
