//! Developer tooling: scene inspector and the position sliders of the debug UI.
//!
//! # Invariants
//! - Tools never index the object list directly; lookups go through the scene.

pub mod inspector;
pub mod sliders;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
pub use sliders::ObjectSliders;

pub fn crate_info() -> &'static str {
    "hexworld-tools v0.1.0"
}
