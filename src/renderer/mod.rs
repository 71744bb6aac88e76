//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame and uploaded to a
//! single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
pub use viewport::Viewport;
