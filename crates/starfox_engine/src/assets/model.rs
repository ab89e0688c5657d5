//! glTF model asset
//!
//! Loads .glb/.gltf bytes and keeps the mesh geometry of every named node:
//! - Node name → merged primitives of the node's mesh
//! - Nodes without a name or without a mesh are skipped

use super::{Asset, AssetError};
use bytemuck::{Pod, Zeroable};
use std::collections::HashMap;
use std::sync::Arc;

/// Vertex extracted from a glTF primitive
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelVertex {
    /// Position in node space
    pub position: [f32; 3],
    /// Vertex normal
    pub normal: [f32; 3],
}

/// Indexed triangle geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex data
    pub vertices: Vec<ModelVertex>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A loaded model: geometry keyed by node name
///
/// Nodes whose primitives could not be read are remembered by name without
/// geometry, so a lookup can tell them apart from absent nodes.
#[derive(Debug, Clone, Default)]
pub struct ModelAsset {
    nodes: HashMap<String, Option<Arc<MeshData>>>,
}

impl ModelAsset {
    /// Build a model from already extracted node geometry
    pub fn from_nodes(nodes: impl IntoIterator<Item = (String, MeshData)>) -> Self {
        Self::from_entries(nodes.into_iter().map(|(name, mesh)| (name, Some(mesh))))
    }

    /// Build a model where `None` marks a node with unusable geometry
    fn from_entries(entries: impl IntoIterator<Item = (String, Option<MeshData>)>) -> Self {
        let nodes = entries
            .into_iter()
            .map(|(name, mesh)| {
                match &mesh {
                    Some(data) => log::debug!(
                        "Model node '{}': {} vertices, {} triangles",
                        name,
                        data.vertices.len(),
                        data.triangle_count()
                    ),
                    None => log::debug!("Model node '{}' skipped: unreadable geometry", name),
                }
                (name, mesh.map(Arc::new))
            })
            .collect();
        Self { nodes }
    }

    /// Geometry of the node with the given name
    pub fn geometry(&self, node: &str) -> Result<Arc<MeshData>, AssetError> {
        match self.nodes.get(node) {
            Some(Some(mesh)) => Ok(Arc::clone(mesh)),
            Some(None) => Err(AssetError::MissingGeometry(node.to_string())),
            None => Err(AssetError::MissingNode(node.to_string())),
        }
    }

    /// Names of all nodes carrying usable geometry, sorted
    pub fn node_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .nodes
            .iter()
            .filter(|(_, mesh)| mesh.is_some())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl Asset for ModelAsset {
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;

        let entries = document.nodes().filter_map(|node| {
            let (Some(name), Some(mesh)) = (node.name(), node.mesh()) else {
                return None;
            };
            let mut data = MeshData::default();
            let readable = mesh
                .primitives()
                .all(|primitive| append_primitive(&primitive, &buffers, &mut data).is_some());
            Some((name.to_string(), readable.then_some(data)))
        });

        Ok(Self::from_entries(entries))
    }
}

/// Read one primitive and append it to `data`
fn append_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    data: &mut MeshData,
) -> Option<()> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals = reader.read_normals().map(Iterator::collect);
    let indices = reader.read_indices().map(|indices| indices.into_u32().collect());
    append_vertices(data, positions, normals, indices)
}

/// Append vertices and indices, offsetting indices past existing vertices
///
/// Missing normals default to +Y and missing indices to a plain triangle
/// list. Fails when the normal count differs from the position count or an
/// index points past the primitive's vertices.
fn append_vertices(
    data: &mut MeshData,
    positions: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    indices: Option<Vec<u32>>,
) -> Option<()> {
    let vertex_count = u32::try_from(positions.len()).ok()?;
    let normals = normals.unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);
    if normals.len() != positions.len() {
        return None;
    }
    let indices = indices.unwrap_or_else(|| (0..vertex_count).collect());
    if indices.iter().any(|&i| i >= vertex_count) {
        return None;
    }

    let base = u32::try_from(data.vertices.len()).ok()?;
    base.checked_add(vertex_count)?;
    data.vertices.extend(
        positions
            .into_iter()
            .zip(normals)
            .map(|(position, normal)| ModelVertex { position, normal }),
    );
    data.indices.extend(indices.into_iter().map(|i| base + i));
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node() {
        let model = ModelAsset::from_nodes([("Wing".to_string(), MeshData::default())]);
        assert!(model.geometry("Wing").is_ok());
        assert!(matches!(model.geometry("Default"), Err(AssetError::MissingNode(name)) if name == "Default"));
    }

    #[test]
    fn test_unreadable_node_is_skipped() {
        let mesh = MeshData {
            vertices: vec![
                ModelVertex {
                    position: [0.0; 3],
                    normal: [0.0, 0.0, 1.0],
                };
                3
            ],
            indices: vec![0, 1, 2],
        };
        let model = ModelAsset::from_entries([
            ("Default".to_string(), Some(mesh)),
            ("Antenna".to_string(), None),
        ]);

        assert_eq!(model.geometry("Default").expect("usable").triangle_count(), 1);
        assert!(matches!(model.geometry("Antenna"), Err(AssetError::MissingGeometry(name)) if name == "Antenna"));
        assert!(matches!(model.geometry("Wing"), Err(AssetError::MissingNode(_))));
        assert_eq!(model.node_names(), vec!["Default"]);
    }

    #[test]
    fn test_primitives_offset_indices() {
        let mut data = MeshData::default();
        let triangle = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

        append_vertices(&mut data, triangle.clone(), None, Some(vec![0, 1, 2])).expect("first");
        append_vertices(&mut data, triangle, None, None).expect("second");

        assert_eq!(data.vertices.len(), 6);
        assert_eq!(data.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(data.vertices[4].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_mismatched_normals_rejected() {
        let mut data = MeshData::default();
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = vec![[0.0, 0.0, 1.0]; 2];

        assert!(append_vertices(&mut data, positions.clone(), Some(normals), None).is_none());
        assert!(append_vertices(&mut data, positions, None, Some(vec![0, 1, 3])).is_none());
        assert!(data.vertices.is_empty());
        assert!(data.indices.is_empty());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = ModelAsset::from_bytes(b"definitely not a glb");
        assert!(matches!(result, Err(AssetError::Gltf(_))));
    }
}
