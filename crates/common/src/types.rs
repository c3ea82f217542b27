use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed world-up axis shared by the camera, lights and object rotations.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Index of an object in a scene's ordered object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Object placement: a position and a rotation about [`WORLD_UP`] in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation_degrees: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_degrees: 0.0,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation_degrees: f32) -> Self {
        Self {
            position,
            rotation_degrees,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(WORLD_UP, self.rotation_degrees.to_radians())
    }

    /// Model matrix (rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }
}
