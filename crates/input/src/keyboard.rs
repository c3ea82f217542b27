use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys the demo reacts to. Everything else is dropped at the window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
}

/// The set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut kb = KeyboardState::new();
        kb.press(Key::W);
        kb.press(Key::W);
        assert!(kb.is_pressed(Key::W));
        assert_eq!(kb.pressed().count(), 1);
        kb.release(Key::W);
        assert!(!kb.is_pressed(Key::W));
    }

    #[test]
    fn clear_drops_everything() {
        let mut kb = KeyboardState::new();
        kb.set(Key::A, true);
        kb.set(Key::D, true);
        kb.clear();
        assert_eq!(kb.pressed().count(), 0);
    }
}
