//! Render queue for a single frame
//!
//! Collects drawable nodes with their world matrices and splits them into
//! opaque, transparent and point-sprite lists.

use crate::foundation::math::Mat4;
use crate::scene::{Drawable, NodeId};

/// One drawable node flattened into world space
#[derive(Debug, Clone)]
pub struct RenderItem {
    /// Source node
    pub node: NodeId,

    /// Node-to-world matrix
    pub world: Mat4,

    /// What to draw
    pub drawable: Drawable,
}

impl RenderItem {
    fn is_transparent(&self) -> bool {
        match &self.drawable {
            Drawable::Mesh { material, .. } => material.transparent,
            Drawable::Points { .. } => false,
        }
    }
}

/// Render queue for a frame
#[derive(Debug, Default)]
pub struct RenderQueue {
    opaque: Vec<RenderItem>,
    transparent: Vec<RenderItem>,
    points: Vec<RenderItem>,
}

impl RenderQueue {
    /// Create an empty render queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the list matching its material
    pub fn push(&mut self, item: RenderItem) {
        if matches!(item.drawable, Drawable::Points { .. }) {
            self.points.push(item);
        } else if item.is_transparent() {
            self.transparent.push(item);
        } else {
            self.opaque.push(item);
        }
    }

    /// Opaque meshes in scene order
    pub fn opaque(&self) -> &[RenderItem] {
        &self.opaque
    }

    /// Alpha-blended meshes in scene order
    pub fn transparent(&self) -> &[RenderItem] {
        &self.transparent
    }

    /// Point clouds
    pub fn points(&self) -> &[RenderItem] {
        &self.points
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len() + self.points.len()
    }

    /// Whether the queue holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every item
    pub fn iter(&self) -> impl Iterator<Item = &RenderItem> {
        self.opaque.iter().chain(&self.transparent).chain(&self.points)
    }
}
