use glam::Mat4;
use hexworld_scene::{Camera, Scene};
use std::fmt::Write;

/// Projection parameters. The eye and orientation come from the scene camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl RenderView {
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, camera: &Camera) -> Mat4 {
        self.projection_matrix() * camera.view_matrix()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of a scene for the CLI, logs and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    max_objects: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_objects: 16 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// List at most `max_objects` objects; the rest are summarized.
    pub fn with_max_objects(max_objects: usize) -> Self {
        Self { max_objects }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let camera = scene.camera();
        let lights = scene.lights();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== Scene ({} objects) ===", scene.object_count());
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) look=({:.2}, {:.2}, {:.2}) fov={:.0}",
            camera.eye.x,
            camera.eye.y,
            camera.eye.z,
            camera.look.x,
            camera.look.y,
            camera.look.z,
            view.fov_degrees
        );
        let _ = writeln!(
            out,
            "Lights: point={} directional={}",
            lights.point_lights().len(),
            if lights.directional().is_some() { "yes" } else { "no" }
        );

        for (i, object) in scene.objects().iter().take(self.max_objects).enumerate() {
            let p = object.transform.position;
            let mesh = scene
                .resources()
                .mesh(object.mesh)
                .map_or("?", |m| m.label());
            let _ = writeln!(
                out,
                "  #{i} {mesh} pos=({:.2}, {:.2}, {:.2}) rot={:.0}",
                p.x, p.y, p.z, object.transform.rotation_degrees
            );
        }
        let hidden = scene.object_count().saturating_sub(self.max_objects);
        if hidden > 0 {
            let _ = writeln!(out, "  ... {hidden} more");
        }

        out
    }
}
