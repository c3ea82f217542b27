use serde::{Deserialize, Serialize};

/// Parameters of the fractal noise height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    /// Height of a cell where the noise evaluates to zero.
    pub base_height: f32,
    pub amplitude: f32,
    /// Noise cycles per world unit.
    pub frequency: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 0.0,
            amplitude: 4.0,
            frequency: 0.05,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("terrain {field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("terrain frequency must be positive, got {0}")]
    NonPositiveFrequency(f64),
    #[error("terrain amplitude must not be negative, got {0}")]
    NegativeAmplitude(f32),
    #[error("terrain octaves must be in 1..={max}, got {got}")]
    Octaves { got: usize, max: usize },
}

pub(crate) const MAX_OCTAVES: usize = 32;

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), TerrainError> {
        let floats = [
            ("base_height", f64::from(self.base_height)),
            ("amplitude", f64::from(self.amplitude)),
            ("frequency", self.frequency),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TerrainError::NotFinite { field, value });
            }
        }
        if self.frequency <= 0.0 {
            return Err(TerrainError::NonPositiveFrequency(self.frequency));
        }
        if self.amplitude < 0.0 {
            return Err(TerrainError::NegativeAmplitude(self.amplitude));
        }
        if !(1..=MAX_OCTAVES).contains(&self.octaves) {
            return Err(TerrainError::Octaves {
                got: self.octaves,
                max: MAX_OCTAVES,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(TerrainConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_frequency() {
        let config = TerrainConfig {
            frequency: 0.0,
            ..TerrainConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(TerrainError::NonPositiveFrequency(0.0))
        );
    }

    #[test]
    fn rejects_nan_amplitude() {
        let config = TerrainConfig {
            amplitude: f32::NAN,
            ..TerrainConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TerrainError::NotFinite {
                field: "amplitude",
                ..
            })
        ));
    }

    #[test]
    fn rejects_octave_overflow() {
        let config = TerrainConfig {
            octaves: 0,
            ..TerrainConfig::default()
        };
        assert!(matches!(config.validate(), Err(TerrainError::Octaves { got: 0, .. })));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: TerrainConfig = serde_yaml::from_str("seed: 7\namplitude: 2.5\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.amplitude, 2.5);
        assert_eq!(config.octaves, TerrainConfig::default().octaves);
    }
}
