//! Scene nodes and drawable descriptions

use crate::assets::MeshData;
use crate::foundation::math::Transform;
use crate::render::{PointVertex, PointsMaterial, StandardMaterial};
use std::sync::Arc;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

/// Mesh geometry description
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box
    Box {
        /// Size along X
        width: f32,
        /// Size along Y
        height: f32,
        /// Size along Z
        depth: f32,
    },
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Horizontal segments
        width_segments: u32,
        /// Vertical segments
        height_segments: u32,
    },
    /// Geometry taken from a loaded model
    Model(Arc<MeshData>),
}

impl Geometry {
    /// Cube with equal sides
    pub fn cube(size: f32) -> Self {
        Self::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    /// Sphere with the given tessellation
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }
}

/// Something the renderer can draw
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Shaded mesh
    Mesh {
        /// Geometry
        geometry: Geometry,
        /// Surface material
        material: StandardMaterial,
    },
    /// Point sprites
    Points {
        /// Shared vertex buffer
        vertices: Arc<[PointVertex]>,
        /// Sprite material
        material: PointsMaterial,
    },
}

/// What a node holds
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Pure transform container
    Group,
    /// A drawable leaf
    Draw(Drawable),
}

/// A node in the scene tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Invisible nodes hide their whole subtree
    pub visible: bool,
    /// Node payload
    pub content: NodeContent,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// Empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_content(name, NodeContent::Group)
    }

    /// Mesh leaf
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: StandardMaterial) -> Self {
        Self::with_content(name, NodeContent::Draw(Drawable::Mesh { geometry, material }))
    }

    /// Point cloud leaf
    pub fn points(name: impl Into<String>, vertices: Arc<[PointVertex]>, material: PointsMaterial) -> Self {
        Self::with_content(name, NodeContent::Draw(Drawable::Points { vertices, material }))
    }

    fn with_content(name: impl Into<String>, content: NodeContent) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            visible: true,
            content,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder pattern: Set transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
