//! Scene graph storage and traversal

use super::node::{Node, NodeContent, NodeId};
use crate::foundation::math::{Mat4, Transform};
use crate::render::{RenderItem, RenderQueue};
use slotmap::SlotMap;
use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live node
    #[error("Unknown scene node")]
    UnknownNode,

    /// The root node cannot be removed
    #[error("The root node cannot be removed")]
    RemoveRoot,
}

/// Retained node tree with a single root group
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("root"));
        Self { nodes, root }
    }

    /// The root group
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert a node as the last child of `parent`
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode);
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RemoveRoot);
        }
        let parent = self.nodes.get(id).ok_or(SceneError::UnknownNode)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Mutably borrow a node's transform
    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        self.nodes
            .get_mut(id)
            .map(|node| &mut node.transform)
            .ok_or(SceneError::UnknownNode)
    }

    /// Replace a node's content
    pub fn set_content(&mut self, id: NodeId, content: NodeContent) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode)?;
        node.content = content;
        Ok(())
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root remains
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Node-to-world matrix
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut matrix = Mat4::identity();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(node_id).ok_or(SceneError::UnknownNode)?;
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }
        Ok(matrix)
    }

    /// Flatten every visible drawable into a render queue (depth first, child order)
    pub fn collect(&self) -> RenderQueue {
        let mut queue = RenderQueue::new();
        let mut stack = vec![(self.root, Mat4::identity())];

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.visible {
                continue;
            }

            let world = parent_world * node.transform.to_matrix();
            if let NodeContent::Draw(drawable) = &node.content {
                queue.push(RenderItem {
                    node: id,
                    world,
                    drawable: drawable.clone(),
                });
            }
            stack.extend(node.children.iter().rev().map(|child| (*child, world)));
        }

        queue
    }
}
