//! Terrain: the world height field queried once per hex cell.
//!
//! # Invariants
//! - Heights are a pure function of (config, coordinate); repeated queries agree.
//! - Every integer coordinate yields a finite height.

mod config;
mod height;
mod seed;

pub use config::{TerrainConfig, TerrainError};
pub use height::{FlatHeightField, HeightField, NoiseHeightField};
pub use seed::{noise_seed, splitmix64};

pub fn crate_info() -> &'static str {
    "hexworld-terrain v0.1.0"
}
