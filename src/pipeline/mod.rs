//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait that enables easy
//! and flexible pipeline creation, along with the index loading pipeline.
mod load_index;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use load_index::LoadIndex;
pub use pipeline::Pipeline;
