//! Rendering module
//!
//! `SceneGraph` is the retained display list the simulation drives;
//! `RenderState` draws it with WebGPU as flat-colored triangles.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, field_to_ndc, field_to_viewport, viewport_to_field};
pub use scene::SceneGraph;
pub use vertex::Vertex;
