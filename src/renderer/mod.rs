//! WebGPU rendering module
//!
//! Hearts are raymarched as signed distance fields in the fragment shader.

pub mod foil_pipeline;
pub mod instances;

pub use foil_pipeline::{FoilRenderState, RenderInitError};
pub use instances::{HeartData, MAX_HEARTS, heart_instances};
