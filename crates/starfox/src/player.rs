//! Player craft
//!
//! A container node follows the pointer. Inside it, a translucent sphere
//! stands in until the craft model finishes loading, then the model's mesh
//! takes its place. If loading fails the sphere stays.

use crate::config::PlayerConfig;
use starfox_engine::assets::SlotStatus;
use starfox_engine::prelude::*;
use starfox_engine::scene::Drawable;
use std::cell::Cell;
use std::rc::Rc;

/// Which body the craft currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftVisual {
    /// Translucent sphere shown while loading or after a failed load
    Placeholder,
    /// The loaded craft mesh
    Model,
}

/// Scene nodes owned by the craft
#[derive(Debug, Clone, Copy)]
struct CraftNodes {
    container: NodeId,
    body: NodeId,
}

/// Pointer-driven player craft
pub struct PlayerCraft {
    config: PlayerConfig,
    slot: AssetSlot<ModelAsset>,
    position: Rc<Cell<Vec3>>,
    visual: CraftVisual,
    nodes: Option<CraftNodes>,
}

impl PlayerCraft {
    /// Craft whose model arrives through `slot`
    pub fn new(config: PlayerConfig, slot: AssetSlot<ModelAsset>) -> Self {
        let [x, y, z] = config.start_position;
        Self {
            config,
            slot,
            position: Rc::new(Cell::new(Vec3::new(x, y, z))),
            visual: CraftVisual::Placeholder,
            nodes: None,
        }
    }

    /// Start loading the configured model in the background
    ///
    /// A loader that cannot be started becomes a failed slot rather than an error.
    pub fn load(config: PlayerConfig, assets: &AssetManager) -> Self {
        let slot = match assets.load_in_background::<ModelAsset>(&config.model_path) {
            Ok(slot) => slot,
            Err(error) => {
                log::error!("Craft model '{}' unavailable: {}", config.model_path, error);
                AssetSlot::failed(config.model_path.clone(), error)
            }
        };
        Self::new(config, slot)
    }

    /// Placeholder body: white translucent sphere
    pub fn placeholder_material() -> StandardMaterial {
        StandardMaterial::default().with_surface(1.0, 0.0).with_opacity(0.6)
    }

    /// Loaded body material
    pub fn model_material() -> StandardMaterial {
        StandardMaterial::default().with_surface(0.3, 0.3)
    }

    /// Add the container and placeholder under `parent`
    pub fn attach(&mut self, graph: &mut SceneGraph, parent: NodeId) -> Result<(), SceneError> {
        let container = graph.add(
            parent,
            Node::group("player").with_transform(Transform::from_position(self.position.get())),
        )?;
        let body = graph.add(
            container,
            Node::mesh("player-placeholder", Geometry::sphere(1.0, 16, 16), Self::placeholder_material()),
        )?;
        self.nodes = Some(CraftNodes { container, body });
        self.visual = CraftVisual::Placeholder;
        Ok(())
    }

    /// Check the model load without blocking
    ///
    /// Returns `true` on the poll where the load finished (either way).
    pub fn poll(&mut self) -> bool {
        self.slot.poll()
    }

    /// Write the current position and body into the scene graph
    pub fn sync(&mut self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        let Some(nodes) = self.nodes else {
            return Ok(());
        };

        graph.transform_mut(nodes.container)?.position = self.position.get();

        if self.visual == CraftVisual::Placeholder && self.slot.status() == SlotStatus::Ready {
            self.swap_in_model(graph, nodes.body)?;
        }
        Ok(())
    }

    fn swap_in_model(&mut self, graph: &mut SceneGraph, body: NodeId) -> Result<(), SceneError> {
        let Some(model) = self.slot.get() else {
            return Ok(());
        };

        match model.geometry(&self.config.node_name) {
            Ok(mesh) => {
                graph.set_content(
                    body,
                    NodeContent::Draw(Drawable::Mesh {
                        geometry: Geometry::Model(mesh),
                        material: Self::model_material(),
                    }),
                )?;
                *graph.transform_mut(body)? = Transform::identity().with_uniform_scale(self.config.scale);
                self.visual = CraftVisual::Model;
                log::info!("Craft model '{}' in place", self.slot.label());
            }
            Err(error) => {
                log::error!(
                    "Craft model '{}' unusable: {} (nodes with geometry: {:?})",
                    self.slot.label(),
                    error,
                    model.node_names()
                );
                // Keep the placeholder; there is nothing to retry
                self.slot = AssetSlot::failed(self.slot.label().to_string(), error);
            }
        }
        Ok(())
    }

    /// Shared position cell written by the pointer mapper
    pub fn position_handle(&self) -> Rc<Cell<Vec3>> {
        Rc::clone(&self.position)
    }

    /// Current container position
    pub fn position(&self) -> Vec3 {
        self.position.get()
    }

    /// Body currently shown
    pub fn visual(&self) -> CraftVisual {
        self.visual
    }

    /// Model load status
    pub fn load_status(&self) -> SlotStatus {
        self.slot.status()
    }

    /// Container node, once attached
    pub fn container(&self) -> Option<NodeId> {
        self.nodes.map(|nodes| nodes.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfox_engine::assets::{MeshData, ModelVertex};
    use std::sync::mpsc;

    fn triangle() -> MeshData {
        let vertex = |x: f32, y: f32| ModelVertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
        };
        MeshData {
            vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)],
            indices: vec![0, 1, 2],
        }
    }

    fn attached(slot: AssetSlot<ModelAsset>) -> (SceneGraph, PlayerCraft) {
        let mut graph = SceneGraph::new();
        let mut craft = PlayerCraft::new(PlayerConfig::default(), slot);
        let root = graph.root();
        craft.attach(&mut graph, root).expect("attach");
        (graph, craft)
    }

    fn body_material(graph: &SceneGraph, craft: &PlayerCraft) -> StandardMaterial {
        let container = craft.container().expect("container");
        let body = graph.get(container).expect("node").children()[0];
        match &graph.get(body).expect("body").content {
            NodeContent::Draw(Drawable::Mesh { material, .. }) => *material,
            other => panic!("unexpected body content {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_until_loaded() {
        let (sender, receiver) = mpsc::channel();
        let (mut graph, mut craft) = attached(AssetSlot::pending("models/arwing.glb", receiver));

        assert!(!craft.poll());
        craft.sync(&mut graph).expect("sync");
        assert_eq!(craft.visual(), CraftVisual::Placeholder);
        let material = body_material(&graph, &craft);
        assert!(material.transparent);
        assert_eq!(material.opacity, 0.6);

        sender
            .send(Ok(ModelAsset::from_nodes([("Default".to_string(), triangle())])))
            .expect("send");
        assert!(craft.poll());
        craft.sync(&mut graph).expect("sync");

        assert_eq!(craft.visual(), CraftVisual::Model);
        assert_eq!(body_material(&graph, &craft), PlayerCraft::model_material());
    }

    #[test]
    fn test_failed_load_keeps_placeholder() {
        let slot = AssetSlot::failed("models/arwing.glb", AssetError::NotFound("models/arwing.glb".to_string()));
        let (mut graph, mut craft) = attached(slot);

        craft.poll();
        craft.sync(&mut graph).expect("sync");
        assert_eq!(craft.visual(), CraftVisual::Placeholder);
        assert_eq!(craft.load_status(), SlotStatus::Failed);
    }

    #[test]
    fn test_missing_node_keeps_placeholder() {
        let model = ModelAsset::from_nodes([("Wing".to_string(), triangle())]);
        let (mut graph, mut craft) = attached(AssetSlot::ready("models/arwing.glb", model));

        craft.sync(&mut graph).expect("sync");
        assert_eq!(craft.visual(), CraftVisual::Placeholder);
        assert_eq!(craft.load_status(), SlotStatus::Failed);
    }

    #[test]
    fn test_sync_follows_position() {
        let model = ModelAsset::from_nodes([("Default".to_string(), triangle())]);
        let (mut graph, mut craft) = attached(AssetSlot::ready("models/arwing.glb", model));
        let container = craft.container().expect("container");
        assert_eq!(graph.get(container).expect("node").transform.position, Vec3::new(1.0, 0.0, 0.0));

        craft.position_handle().set(Vec3::new(-1.5, 0.5, 0.0));
        craft.sync(&mut graph).expect("sync");
        assert_eq!(graph.get(container).expect("node").transform.position, Vec3::new(-1.5, 0.5, 0.0));
    }
}
