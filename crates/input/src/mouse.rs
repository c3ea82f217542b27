use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// What the window should do with the pointer after a button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    None,
    /// Confine and hide the pointer.
    Lock,
    /// Release and show the pointer.
    Unlock,
}

/// Button state, accumulated pointer motion and look mode.
///
/// Look mode is held while `look_button` is down. Motion that arrives while
/// engaged is accumulated from raw device events and consumed once per frame,
/// even when the button was released before that frame.
#[derive(Debug, Clone)]
pub struct MouseState {
    look_button: MouseButton,
    held: HashSet<MouseButton>,
    delta_x: f32,
    delta_y: f32,
    looking: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(MouseButton::Secondary)
    }
}

impl MouseState {
    pub fn new(look_button: MouseButton) -> Self {
        Self {
            look_button,
            held: HashSet::new(),
            delta_x: 0.0,
            delta_y: 0.0,
            looking: false,
        }
    }

    pub fn look_button(&self) -> MouseButton {
        self.look_button
    }

    pub fn is_looking(&self) -> bool {
        self.looking
    }

    /// The pointer is locked exactly while look mode is engaged.
    pub fn cursor_locked(&self) -> bool {
        self.looking
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    pub fn press(&mut self, button: MouseButton) -> CursorAction {
        self.held.insert(button);
        if button != self.look_button || self.looking {
            return CursorAction::None;
        }
        self.looking = true;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        debug!(?button, "look mode engaged");
        CursorAction::Lock
    }

    pub fn release(&mut self, button: MouseButton) -> CursorAction {
        self.held.remove(&button);
        if button != self.look_button || !self.looking {
            return CursorAction::None;
        }
        self.looking = false;
        debug!(?button, "look mode released");
        CursorAction::Unlock
    }

    /// Drop look mode without a button event, e.g. on focus loss.
    pub fn cancel_look(&mut self) -> CursorAction {
        self.held.clear();
        if !self.looking {
            return CursorAction::None;
        }
        self.looking = false;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        CursorAction::Unlock
    }

    /// Ignored outside look mode.
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if !self.looking {
            return;
        }
        self.delta_x += dx;
        self.delta_y += dy;
    }

    /// Motion recorded while engaged since the last call.
    pub fn take_look_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }
}
