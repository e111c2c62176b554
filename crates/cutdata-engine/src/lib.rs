//! # cutdata-engine
//!
//! The C1-C8 calculation pipeline for the cutting-parameter engine: static
//! material/operation/limit tables, the MRR & power model, the depth-of-cut
//! resolver, the auxiliary feed model, the multi-level parameter validator,
//! and the twelve-step `calculate()` pipeline that ties them together.
//!
//! This crate depends only on `cutdata-core` for its data model. It is
//! synchronous and allocates no state between calls — see spec §5.

pub mod aux_feed;
pub mod depth;
pub mod mrr;
pub mod pipeline;
pub mod tables;
pub mod validator;

pub use pipeline::calculate;
pub use tables::{list_coatings, list_materials, list_operations, list_surface_qualities};
