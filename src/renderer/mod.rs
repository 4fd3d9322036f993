//! WebGPU rendering module
//!
//! `scene` turns a run into colored triangles; `pipeline` draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
