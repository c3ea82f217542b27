use hexworld_common::ObjectId;
use hexworld_grid::HexCoord;
use hexworld_kernel::Session;
use hexworld_scene::{Scene, SceneError};
use serde::Serialize;

/// Read-only queries against a running session for debugging and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(session: &Session) -> SceneSummary {
        let scene = session.scene();
        let camera = scene.camera();
        let eye = camera.eye;
        SceneSummary {
            frame: session.frame_count(),
            objects: scene.object_count(),
            meshes: scene.resources().mesh_count(),
            materials: scene.resources().material_count(),
            point_lights: scene.lights().point_lights().len(),
            directional_light: scene.lights().directional().is_some(),
            eye: eye.to_array(),
            look: camera.look.to_array(),
            camera_cell: session.layout().cell_at(glam::Vec2::new(eye.x, eye.z)),
            looking: session.is_looking(),
        }
    }

    pub fn inspect_object(scene: &Scene, id: ObjectId) -> Result<ObjectInfo, SceneError> {
        let object = scene.object(id)?;
        let mesh = scene
            .resources()
            .mesh(object.mesh)
            .ok_or(SceneError::UnknownMesh(object.mesh))?;
        Ok(ObjectInfo {
            id,
            mesh: mesh.label().to_owned(),
            position: object.transform.position.to_array(),
            rotation_degrees: object.transform.rotation_degrees,
        })
    }

    /// The first `limit` objects, in scene order.
    pub fn list_objects(scene: &Scene, limit: usize) -> Vec<ObjectInfo> {
        (0..scene.object_count().min(limit))
            .filter_map(|i| Self::inspect_object(scene, ObjectId(i)).ok())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub objects: usize,
    pub meshes: usize,
    pub materials: usize,
    pub point_lights: usize,
    pub directional_light: bool,
    pub eye: [f32; 3],
    pub look: [f32; 3],
    /// Grid cell under the eye.
    pub camera_cell: HexCoord,
    pub looking: bool,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} objects={} meshes={} materials={} point_lights={} eye=({:.2}, {:.2}, {:.2}) cell={}",
            self.frame,
            self.objects,
            self.meshes,
            self.materials,
            self.point_lights,
            self.eye[0],
            self.eye[1],
            self.eye[2],
            self.camera_cell,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub mesh: String,
    pub position: [f32; 3],
    pub rotation_degrees: f32,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object {} [{}] pos=({:.2}, {:.2}, {:.2}) rot={:.0}°",
            self.id,
            self.mesh,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation_degrees,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexworld_kernel::DemoConfig;

    fn session() -> Session {
        let mut config = DemoConfig::default();
        config.grid.extent = 3;
        Session::new(&config).unwrap()
    }

    #[test]
    fn summary_counts() {
        let s = session();
        let summary = SceneInspector::summary(&s);
        assert_eq!(summary.objects, 10);
        assert_eq!(summary.meshes, 2);
        assert_eq!(summary.materials, 1);
        assert_eq!(summary.point_lights, 1);
        assert!(summary.directional_light);
        assert_eq!(summary.frame, 0);
        assert!(!summary.looking);
    }

    #[test]
    fn camera_cell_tracks_eye() {
        let s = session();
        let summary = SceneInspector::summary(&s);
        let eye = s.scene().camera().eye;
        let expected = s.layout().cell_at(glam::Vec2::new(eye.x, eye.z));
        assert_eq!(summary.camera_cell, expected);
    }

    #[test]
    fn inspect_ground_plane() {
        let s = session();
        let info = SceneInspector::inspect_object(s.scene(), ObjectId(0)).unwrap();
        assert_eq!(info.mesh, "ground-plane");
        assert_eq!(info.position, [-2.0, 0.0, 0.0]);
    }

    #[test]
    fn inspect_missing_object() {
        let s = session();
        assert_eq!(
            SceneInspector::inspect_object(s.scene(), ObjectId(10)).unwrap_err(),
            SceneError::ObjectOutOfRange { index: 10, len: 10 }
        );
    }

    #[test]
    fn list_is_bounded() {
        let s = session();
        assert_eq!(SceneInspector::list_objects(s.scene(), 4).len(), 4);
        assert_eq!(SceneInspector::list_objects(s.scene(), 100).len(), 10);
    }

    #[test]
    fn summary_display() {
        let s = session();
        let text = SceneInspector::summary(&s).to_string();
        assert!(text.contains("objects=10"));
    }
}
