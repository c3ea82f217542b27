use glam::Vec3;
use hexworld_common::ObjectId;
use hexworld_grid::LayoutError;
use hexworld_input::{KeyBindings, MouseButton};
use hexworld_scene::{Camera, HexWorldSettings, LightingSetup};
use hexworld_terrain::{TerrainConfig, TerrainError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use hexworld_scene::MAX_EXTENT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where cell heights come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightSource {
    #[default]
    Noise,
    /// Every cell at `terrain.base_height`.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub eye: Vec3,
    pub look: Vec3,
    /// World units per second.
    pub speed: f32,
    /// Radians per pointer unit.
    pub sensitivity: f32,
    /// Scale diagonal movement down to axis speed.
    pub normalize_diagonal: bool,
    pub bindings: KeyBindings,
    pub look_button: MouseButton,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            eye: camera.eye,
            look: camera.look,
            speed: 5.0,
            sensitivity: 0.001,
            normalize_diagonal: false,
            bindings: KeyBindings::default(),
            look_button: MouseButton::Secondary,
        }
    }
}

/// A debug slider bound to one object's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderBinding {
    pub label: String,
    pub object: ObjectId,
    pub min: f32,
    pub max: f32,
}

impl SliderBinding {
    pub fn new(label: impl Into<String>, object: usize, half_range: f32) -> Self {
        Self {
            label: label.into(),
            object: ObjectId(object),
            min: -half_range,
            max: half_range,
        }
    }
}

fn default_sliders() -> Vec<SliderBinding> {
    vec![
        SliderBinding::new("Plane", 0, 10.0),
        SliderBinding::new("Hex 1", 1, 2.0),
        SliderBinding::new("Hex 2", 2, 2.0),
        SliderBinding::new("Hex 3", 3, 5.0),
    ]
}

/// Everything needed to assemble and drive a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: HexWorldSettings,
    pub height_source: HeightSource,
    pub terrain: TerrainConfig,
    pub camera: CameraSettings,
    pub lighting: LightingSetup,
    pub inspector: Vec<SliderBinding>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: HexWorldSettings::default(),
            height_source: HeightSource::default(),
            terrain: TerrainConfig::default(),
            camera: CameraSettings::default(),
            lighting: LightingSetup::default(),
            inspector: default_sliders(),
        }
    }
}

impl DemoConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading config");
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.extent > MAX_EXTENT {
            return Err(ConfigError::Invalid(format!(
                "grid.extent {} exceeds {MAX_EXTENT}",
                self.grid.extent
            )));
        }
        self.grid.layout()?;
        if !(self.grid.prism_depth.is_finite() && self.grid.prism_depth > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid.prism_depth must be positive, got {}",
                self.grid.prism_depth
            )));
        }
        if let Some(r) = self.grid.prism_radius {
            if !(r.is_finite() && r > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "grid.prism_radius must be positive, got {r}"
                )));
            }
        }
        self.terrain.validate()?;

        let cam = &self.camera;
        if !cam.eye.is_finite() || !cam.look.is_finite() || cam.look.length_squared() == 0.0 {
            return Err(ConfigError::Invalid(
                "camera.eye and camera.look must be finite and look non-zero".into(),
            ));
        }
        if !(cam.speed.is_finite() && cam.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.speed must be finite and non-negative, got {}",
                cam.speed
            )));
        }
        if !cam.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("camera.sensitivity must be finite".into()));
        }

        for slider in &self.inspector {
            if !(slider.min.is_finite() && slider.max.is_finite() && slider.min < slider.max) {
                return Err(ConfigError::Invalid(format!(
                    "slider {:?} needs min < max",
                    slider.label
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexworld_grid::HexOrientation;

    #[test]
    fn default_config_is_valid() {
        DemoConfig::default().validate().unwrap();
    }

    #[test]
    fn default_sliders_cover_first_four_objects() {
        let config = DemoConfig::default();
        let labels: Vec<_> = config.inspector.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Plane", "Hex 1", "Hex 2", "Hex 3"]);
        assert_eq!(config.inspector[0].min, -10.0);
        assert_eq!(config.inspector[3].max, 5.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "\
grid:
  extent: 12
  orientation: flat_top
terrain:
  seed: 99
camera:
  normalize_diagonal: true
";
        let config = DemoConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.grid.extent, 12);
        assert_eq!(config.grid.orientation, HexOrientation::FlatTop);
        assert_eq!(config.grid.spacing, 1.0);
        assert_eq!(config.terrain.seed, 99);
        assert!(config.camera.normalize_diagonal);
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.inspector.len(), 4);
    }

    #[test]
    fn yaml_round_trips_through_to_yaml() {
        let config = DemoConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(DemoConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn oversized_extent_is_rejected() {
        let mut config = DemoConfig::default();
        config.grid.extent = MAX_EXTENT + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_look_is_rejected() {
        let mut config = DemoConfig::default();
        config.camera.look = Vec3::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_terrain_surfaces_terrain_error() {
        let yaml = "terrain:\n  octaves: 0\n";
        assert!(matches!(
            DemoConfig::from_yaml_str(yaml),
            Err(ConfigError::Terrain(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DemoConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
