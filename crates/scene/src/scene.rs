use hexworld_common::{ObjectId, Transform};
use tracing::info;

use crate::camera::Camera;
use crate::error::SceneError;
use crate::lighting::{LightData, LightingSetup};
use crate::resources::{MaterialHandle, MeshHandle, ResourceStore};

/// One drawable instance: shared mesh and material, own transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub transform: Transform,
}

/// Camera, lights, resources and the ordered object list of one session.
///
/// Objects are only ever appended, so an [`ObjectId`] stays valid for the
/// life of the scene. Dropping the scene releases every resource it owns.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    resources: ResourceStore,
    objects: Vec<SceneObject>,
    camera: Camera,
    lights: LightData,
    lighting_initialized: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceStore {
        &mut self.resources
    }

    /// Append an object. Both handles must already belong to this scene.
    pub fn add_object(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transform: Transform,
    ) -> Result<ObjectId, SceneError> {
        if self.resources.mesh(mesh).is_none() {
            return Err(SceneError::UnknownMesh(mesh));
        }
        if self.resources.material(material).is_none() {
            return Err(SceneError::UnknownMaterial(material));
        }
        self.objects.push(SceneObject {
            mesh,
            material,
            transform,
        });
        Ok(ObjectId(self.objects.len() - 1))
    }

    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        let len = self.objects.len();
        self.objects
            .get(id.index())
            .ok_or(SceneError::ObjectOutOfRange {
                index: id.index(),
                len,
            })
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        let len = self.objects.len();
        self.objects
            .get_mut(id.index())
            .ok_or(SceneError::ObjectOutOfRange {
                index: id.index(),
                len,
            })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lights(&self) -> &LightData {
        &self.lights
    }

    pub fn lighting_initialized(&self) -> bool {
        self.lighting_initialized
    }

    /// Install the point and directional lights. Allowed exactly once.
    pub fn setup_lighting(&mut self, setup: &LightingSetup) -> Result<(), SceneError> {
        if self.lighting_initialized {
            return Err(SceneError::LightingAlreadyInitialized);
        }
        let mut lights = self.lights.clone();
        lights.add_point_light(setup.point)?;
        lights.set_directional(setup.directional)?;
        self.lights = lights;
        self.lighting_initialized = true;
        info!(
            point_lights = self.lights.point_lights().len(),
            "lighting initialized"
        );
        Ok(())
    }
}
