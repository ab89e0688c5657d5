//! Scene management system
//!
//! A retained node tree. Entities keep their own animated state and write it
//! into their nodes once per frame; [`SceneGraph::collect`] then flattens the
//! visible tree into a [`RenderQueue`](crate::render::RenderQueue).
//!
//! ```text
//! Entity state (per-tick transitions)
//!      ↓  sync
//! Scene Graph (transforms, drawables)
//!      ↓  collect
//! Renderer
//! ```

mod graph;
mod node;

pub use graph::{SceneError, SceneGraph};
pub use node::{Drawable, Geometry, Node, NodeContent, NodeId};
