use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Capacity of the point light array uploaded to the GPU.
pub const MAX_POINT_LIGHTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub colour: Vec3,
    /// Distance at which the light's contribution reaches zero.
    pub radius: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 0.0),
            colour: Vec3::splat(0.5),
            radius: 20.0,
        }
    }
}

/// A light at infinity. `direction` points from the light into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub colour: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1.0, -1.0, 0.1).normalize(),
            colour: Vec3::new(1.0, 0.98, 0.98),
        }
    }
}

/// The lights installed once before the first frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSetup {
    pub point: PointLight,
    pub directional: DirectionalLight,
}

/// Fixed-capacity light storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightData {
    point_lights: Vec<PointLight>,
    directional: Option<DirectionalLight>,
}

impl LightData {
    pub fn add_point_light(&mut self, light: PointLight) -> Result<usize, SceneError> {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            return Err(SceneError::PointLightCapacity {
                capacity: MAX_POINT_LIGHTS,
            });
        }
        self.point_lights.push(light);
        Ok(self.point_lights.len() - 1)
    }

    /// Install the directional light, normalizing its direction.
    pub fn set_directional(&mut self, light: DirectionalLight) -> Result<(), SceneError> {
        let direction = light.direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return Err(SceneError::DegenerateLightDirection(light.direction));
        }
        self.directional = Some(DirectionalLight { direction, ..light });
        Ok(())
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn directional(&self) -> Option<&DirectionalLight> {
        self.directional.as_ref()
    }
}
