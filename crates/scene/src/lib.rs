//! Scene assembly: typed mesh data, owned resources, objects, camera and lights.
//!
//! # Invariants
//! - Objects are appended, never removed; an `ObjectId` stays valid.
//! - Lighting is installed exactly once per scene.
//! - Every resource is owned by the scene and released when it drops.

pub mod camera;
mod demo;
mod error;
pub mod geometry;
mod lighting;
mod mesh;
mod populate;
mod resources;
mod scene;

pub use camera::Camera;
pub use demo::{DemoScene, GROUND_OFFSET, HexWorldSettings, MAX_EXTENT, build_demo_scene};
pub use error::SceneError;
pub use lighting::{DirectionalLight, LightData, LightingSetup, MAX_POINT_LIGHTS, PointLight};
pub use mesh::{MeshData, MeshError, VertexAttribute, face_normal};
pub use populate::{HexCell, populate_hex_world, prism_rotation_degrees};
pub use resources::{Material, MaterialHandle, MeshHandle, ResourceStore, ShaderKind};
pub use scene::{Scene, SceneObject};

pub fn crate_info() -> &'static str {
    "hexworld-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
