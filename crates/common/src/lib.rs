//! Shared types: object identifiers and spatial transforms.
//!
//! # Invariants
//! - Rotations are about the world-up axis only; the demo never tilts objects.

pub mod types;

pub use types::{ObjectId, Transform, WORLD_UP};

pub fn crate_info() -> &'static str {
    "hexworld-common v0.1.0"
}
