use glam::{Mat3, Mat4, Quat, Vec3};
use hexworld_common::WORLD_UP;
use serde::{Deserialize, Serialize};

/// Pitch is refused once the look direction would come within one degree of
/// straight up or down, where the right vector degenerates.
const MAX_PITCH_DOT: f32 = 0.999_85;

/// Free-look camera stored as an eye point and an (unnormalized) look vector.
///
/// The local frame is `+x` right, `+y` up, `+z` along the look direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub look: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, -10.0),
            look: Vec3::new(0.0, -0.2, 1.0),
        }
    }
}

impl Camera {
    pub fn new(eye: Vec3, look: Vec3) -> Self {
        Self { eye, look }
    }

    pub fn world_up(&self) -> Vec3 {
        WORLD_UP
    }

    /// `look × up`. Not normalized; zero when looking straight up or down.
    pub fn world_right(&self) -> Vec3 {
        self.look.cross(WORLD_UP)
    }

    /// Columns are the unit right, up and look axes.
    pub fn local_to_world(&self) -> Mat3 {
        Mat3::from_cols(
            self.world_right().normalize_or_zero(),
            WORLD_UP,
            self.look.normalize_or_zero(),
        )
    }

    /// Yaw by the horizontal pointer delta, then pitch about the right axis of
    /// the yawed look direction by the vertical delta.
    ///
    /// Angles follow the right-hand rule, so the yaw angle is negated to turn
    /// the view toward the pointer; a positive (downward) `dy` tilts down.
    pub fn rotate_look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        let yaw = Quat::from_axis_angle(WORLD_UP, -dx * sensitivity);
        self.look = yaw * self.look;

        let right = self.world_right().normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        let pitched = Quat::from_axis_angle(right, -dy * sensitivity) * self.look;
        if pitched.normalize_or_zero().dot(WORLD_UP).abs() <= MAX_PITCH_DOT {
            self.look = pitched;
        }
    }

    /// Move the eye by a camera-local direction at `speed` units per second.
    pub fn advance(&mut self, local_direction: Vec3, speed: f32, dt: f32) {
        if local_direction == Vec3::ZERO {
            return;
        }
        let world_direction = self.local_to_world() * local_direction;
        self.eye += world_direction * speed * dt;
    }

    pub fn view_matrix(&self) -> Mat4 {
        let dir = if self.look.length_squared() > 0.0 {
            self.look
        } else {
            Vec3::Z
        };
        Mat4::look_to_rh(self.eye, dir, WORLD_UP)
    }
}
