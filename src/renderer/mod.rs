//! Rendering module
//!
//! The scene is drawn through the `RenderSurface` trait: a CPU `Framebuffer`
//! (headless runs and pixel-probe collision) or the wgpu `GpuSurface`.

pub mod framebuffer;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use framebuffer::Framebuffer;
pub use pipeline::GpuSurface;
pub use scene::{BACKGROUND, draw_scene};
pub use surface::RenderSurface;
pub use vertex::Vertex;
