//! Session kernel: one owner for the scene, input state and settings of a run.
//!
//! # Invariants
//! - Each frame runs UI work first, then camera/input integration.
//! - No global state; everything hangs off a `Session`.

pub mod config;
pub mod session;

pub use config::{CameraSettings, ConfigError, DemoConfig, HeightSource, SliderBinding};
pub use session::{Session, SessionError};

pub fn crate_info() -> &'static str {
    "hexworld-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
