use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::MeshData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// Shading program a material draws with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    /// Per-vertex colour lit by the scene's point and directional lights.
    #[default]
    BaseColour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub label: String,
    pub shader: ShaderKind,
    /// Multiplied into the vertex colour.
    pub tint: Vec3,
}

impl Material {
    pub fn base_colour(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shader: ShaderKind::BaseColour,
            tint: Vec3::ONE,
        }
    }
}

/// Meshes and materials owned by a scene. Handles index into this store and
/// stay valid for its whole lifetime; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    meshes: Vec<MeshData>,
    materials: Vec<Material>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle((self.meshes.len() - 1) as u32)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle((self.materials.len() - 1) as u32)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0 as usize)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshHandle, &MeshData)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (MeshHandle(i as u32), m))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
