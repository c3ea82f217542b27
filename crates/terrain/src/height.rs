use hexworld_grid::{HexCoord, HexLayout};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use tracing::debug;

use crate::config::{TerrainConfig, TerrainError};
use crate::seed::noise_seed;

/// Elevation of a hex cell.
///
/// Implementations must be deterministic and return a finite value for every
/// coordinate.
pub trait HeightField {
    fn height(&self, coord: HexCoord) -> f32;
}

impl<T: HeightField + ?Sized> HeightField for Box<T> {
    fn height(&self, coord: HexCoord) -> f32 {
        (**self).height(coord)
    }
}

impl<T: HeightField + ?Sized> HeightField for &T {
    fn height(&self, coord: HexCoord) -> f32 {
        (**self).height(coord)
    }
}

/// Every cell at the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHeightField(pub f32);

impl HeightField for FlatHeightField {
    fn height(&self, _coord: HexCoord) -> f32 {
        self.0
    }
}

/// Fractal Perlin noise sampled at each cell's center.
///
/// Sampling in layout space rather than axial space keeps the terrain
/// isotropic regardless of hex orientation.
#[derive(Debug, Clone)]
pub struct NoiseHeightField {
    layout: HexLayout,
    fbm: Fbm<Perlin>,
    base_height: f32,
    amplitude: f32,
}

impl NoiseHeightField {
    pub fn new(layout: HexLayout, config: &TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let seed = noise_seed(config.seed);
        debug!(seed = config.seed, noise_seed = seed, "building noise height field");
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(config.octaves)
            .set_frequency(config.frequency)
            .set_lacunarity(config.lacunarity)
            .set_persistence(config.persistence);
        Ok(Self {
            layout,
            fbm,
            base_height: config.base_height,
            amplitude: config.amplitude,
        })
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }
}

impl HeightField for NoiseHeightField {
    fn height(&self, coord: HexCoord) -> f32 {
        let p = self.layout.to_cartesian(coord);
        let sample = self.fbm.get([f64::from(p.x), f64::from(p.y)]) as f32;
        let h = self.base_height + self.amplitude * sample;
        if h.is_finite() { h } else { self.base_height }
    }
}
