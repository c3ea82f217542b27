use glam::Vec3;
use hexworld_grid::LayoutError;

use crate::mesh::MeshError;
use crate::resources::{MaterialHandle, MeshHandle};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("object index {index} out of range (scene has {len} objects)")]
    ObjectOutOfRange { index: usize, len: usize },
    #[error("lighting has already been set up for this scene")]
    LightingAlreadyInitialized,
    #[error("point light capacity of {capacity} exceeded")]
    PointLightCapacity { capacity: usize },
    #[error("directional light direction {0} cannot be normalized")]
    DegenerateLightDirection(Vec3),
    #[error("unknown mesh {0:?}")]
    UnknownMesh(MeshHandle),
    #[error("unknown material {0:?}")]
    UnknownMaterial(MaterialHandle),
    #[error("extent {extent} exceeds the maximum of {max}")]
    ExtentTooLarge { extent: u32, max: u32 },
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
