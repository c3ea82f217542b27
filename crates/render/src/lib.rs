//! Rendering adapter: renderer-agnostic interface over a scene.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The view matrix comes from the scene camera; projection from the render view.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "hexworld-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
