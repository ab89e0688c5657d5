//! Rendering boundary
//!
//! The engine never talks to a GPU directly. Scenes describe what to draw
//! (camera, lights, a [`RenderQueue`] collected from the scene graph) and a
//! [`Renderer`] backend consumes it against a [`RenderSurface`].

mod camera;
mod light;
mod material;
mod queue;
mod renderer;
mod surface;

pub use camera::{Camera, OrbitControls};
pub use light::DirectionalLight;
pub use material::{Color, PointsMaterial, StandardMaterial};
pub use queue::{RenderItem, RenderQueue};
pub use renderer::{Frame, FrameStats, HeadlessRenderer, RenderError, Renderer};
pub use surface::{HeadlessSurface, RenderSurface};

use bytemuck::{Pod, Zeroable};

/// A single point-sprite vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    /// Position in the owning node's space
    pub position: [f32; 3],
}

impl PointVertex {
    /// Create a vertex
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

/// View a vertex slice as raw bytes for upload
pub fn vertex_bytes<T: Pod>(vertices: &[T]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
