//! Input: keyboard and mouse state fed by the windowing layer, read once per frame.
//!
//! # Invariants
//! - Window events only record state; nothing moves until the frame tick reads it.
//! - Pointer deltas received outside look mode never rotate the camera.

pub mod keyboard;
pub mod mouse;
pub mod movement;

pub use keyboard::{Key, KeyboardState};
pub use mouse::{CursorAction, MouseButton, MouseState};
pub use movement::{KeyBindings, local_direction};

pub fn crate_info() -> &'static str {
    "hexworld-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
