//! WebGPU rendering module
//!
//! CPU-built vertex lists, one pipeline, per-frame upload. The simulation
//! never touches anything in here.

pub mod camera;
pub mod hud;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use camera::FollowCamera;
pub use pipeline::RenderState;
pub use vertex::Vertex;
