//! Renderer boundary
//!
//! Backends receive a fully built frame (camera, lights, queue) and draw it.
//! The headless backend records statistics instead of drawing.

use super::{Camera, DirectionalLight, RenderQueue};
use crate::scene::Drawable;
use thiserror::Error;

/// Everything a backend needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Frame index
    pub index: u64,
    /// Active camera
    pub camera: &'a Camera,
    /// Scene lights
    pub lights: &'a [DirectionalLight],
    /// Collected drawables
    pub queue: &'a RenderQueue,
}

/// Counts describing what a backend drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame index
    pub frame: u64,
    /// Opaque meshes drawn
    pub opaque: usize,
    /// Transparent meshes drawn
    pub transparent: usize,
    /// Point clouds drawn
    pub point_clouds: usize,
    /// Total point sprites drawn
    pub point_vertices: usize,
    /// Lights bound
    pub lights: usize,
}

/// A rendering backend
pub trait Renderer {
    /// Draw a frame
    fn render(&mut self, frame: &Frame<'_>) -> Result<FrameStats, RenderError>;
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// No surface to draw into
    #[error("Render surface is not available")]
    SurfaceLost,

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Backend that draws nothing and reports per-frame statistics
#[derive(Debug, Default)]
pub struct HeadlessRenderer;

impl HeadlessRenderer {
    /// Create a new headless renderer
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<FrameStats, RenderError> {
        let aspect = frame.camera.aspect;
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(RenderError::Backend(format!("invalid camera aspect ratio {aspect}")));
        }
        let view_projection = frame.camera.view_projection();
        if !view_projection.iter().all(|v| v.is_finite()) {
            return Err(RenderError::Backend("non-finite view-projection matrix".to_string()));
        }

        let point_vertices = frame
            .queue
            .points()
            .iter()
            .map(|item| match &item.drawable {
                Drawable::Points { vertices, .. } => vertices.len(),
                Drawable::Mesh { .. } => 0,
            })
            .sum();

        let stats = FrameStats {
            frame: frame.index,
            opaque: frame.queue.opaque().len(),
            transparent: frame.queue.transparent().len(),
            point_clouds: frame.queue.points().len(),
            point_vertices,
            lights: frame.lights.len(),
        };
        log::trace!("Headless frame {}: {:?}", frame.index, stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_headless_counts_frame() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 40.0, 1.5, 0.1, 100.0);
        let lights = [DirectionalLight::new(Vec3::new(0.0, 1.0, 0.0), 1.0)];
        let queue = RenderQueue::new();
        let frame = Frame {
            index: 7,
            camera: &camera,
            lights: &lights,
            queue: &queue,
        };

        let stats = HeadlessRenderer::new().render(&frame).expect("render");
        assert_eq!(stats.frame, 7);
        assert_eq!(stats.lights, 1);
        assert_eq!(stats.opaque, 0);
    }

    #[test]
    fn test_zero_aspect_is_rejected() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 40.0, 1.5, 0.1, 100.0);
        camera.aspect = 0.0;
        let queue = RenderQueue::new();
        let frame = Frame {
            index: 0,
            camera: &camera,
            lights: &[],
            queue: &queue,
        };

        assert!(matches!(
            HeadlessRenderer::new().render(&frame),
            Err(RenderError::Backend(_))
        ));
    }
}
