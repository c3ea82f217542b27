use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::keyboard::{Key, KeyboardState};

/// Which key drives each camera-local movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Key,
    pub left: Key,
    pub back: Key,
    pub right: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            left: Key::A,
            back: Key::S,
            right: Key::D,
        }
    }
}

/// Camera-local movement direction (`+x` right, `+z` forward) from the
/// held keys.
///
/// Opposing keys cancel. Perpendicular keys add without renormalizing, so a
/// diagonal has length √2.
pub fn local_direction(keyboard: &KeyboardState, bindings: &KeyBindings) -> Vec3 {
    let mut dir = Vec3::ZERO;
    if keyboard.is_pressed(bindings.forward) {
        dir.z += 1.0;
    }
    if keyboard.is_pressed(bindings.back) {
        dir.z -= 1.0;
    }
    if keyboard.is_pressed(bindings.right) {
        dir.x += 1.0;
    }
    if keyboard.is_pressed(bindings.left) {
        dir.x -= 1.0;
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> KeyboardState {
        let mut kb = KeyboardState::new();
        for k in keys {
            kb.press(*k);
        }
        kb
    }

    #[test]
    fn nothing_held_is_zero() {
        assert_eq!(local_direction(&held(&[]), &KeyBindings::default()), Vec3::ZERO);
    }

    #[test]
    fn each_key_maps_to_its_axis() {
        let b = KeyBindings::default();
        assert_eq!(local_direction(&held(&[Key::W]), &b), Vec3::Z);
        assert_eq!(local_direction(&held(&[Key::S]), &b), Vec3::NEG_Z);
        assert_eq!(local_direction(&held(&[Key::D]), &b), Vec3::X);
        assert_eq!(local_direction(&held(&[Key::A]), &b), Vec3::NEG_X);
    }

    #[test]
    fn opposing_keys_cancel() {
        let b = KeyBindings::default();
        assert_eq!(local_direction(&held(&[Key::W, Key::S]), &b), Vec3::ZERO);
        assert_eq!(local_direction(&held(&[Key::A, Key::D]), &b), Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let dir = local_direction(&held(&[Key::W, Key::A]), &KeyBindings::default());
        assert_eq!(dir, Vec3::new(-1.0, 0.0, 1.0));
        assert!((dir.length() - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(
            local_direction(&held(&[Key::Escape]), &KeyBindings::default()),
            Vec3::ZERO
        );
    }
}
