//! wgpu render backend for the hex world.
//!
//! Each mesh is uploaded as one vertex buffer per attribute (position, colour,
//! normal in slots 0, 1, 2) and drawn instanced, one batch per mesh/material.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - GPU resources are owned by the renderer and dropped with it.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;

pub fn crate_info() -> &'static str {
    "hexworld-render-wgpu v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("wgpu"));
    }
}
