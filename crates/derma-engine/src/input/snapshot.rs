use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::types::{Key, Modifiers, MouseButton};

/// Everything the UI reads about input for one frame.
///
/// Button fields are levels ("is held"), not edges. Consumers derive press
/// and release edges by comparing against the previous frame's snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    /// Cursor position in surface pixels. Holds the last known position
    /// while the pointer is off the surface.
    pub cursor: Vec2,
    /// False once the pointer left the surface; nothing is under it then.
    pub pointer_inside: bool,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    /// Text committed this frame, in arrival order.
    pub text: Vec<String>,
    /// Keys newly pressed this frame (auto-repeats included).
    pub keys_pressed: Vec<Key>,
    pub keys_released: Vec<Key>,
    pub modifiers: Modifiers,
    /// Timestamp for this frame; all UI timing compares against it.
    pub now: Instant,
}

impl InputSnapshot {
    /// Snapshot with the cursor at `cursor`, nothing held, stamped now.
    pub fn at(cursor: Vec2) -> Self {
        Self {
            cursor,
            pointer_inside: true,
            left: false,
            right: false,
            middle: false,
            text: Vec::new(),
            keys_pressed: Vec::new(),
            keys_released: Vec::new(),
            modifiers: Modifiers::NONE,
            now: Instant::now(),
        }
    }

    /// Cursor position, or `None` while the pointer is off the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_inside.then_some(self.cursor)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
            MouseButton::Other(_) => false,
        }
    }

    // ── builder helpers (handy for hosts replaying input and for tests) ───

    pub fn with_left(mut self, down: bool) -> Self { self.left = down; self }
    pub fn with_right(mut self, down: bool) -> Self { self.right = down; self }
    pub fn with_middle(mut self, down: bool) -> Self { self.middle = down; self }
    pub fn with_modifiers(mut self, m: Modifiers) -> Self { self.modifiers = m; self }
    pub fn with_time(mut self, now: Instant) -> Self { self.now = now; self }
    pub fn with_pointer_inside(mut self, inside: bool) -> Self { self.pointer_inside = inside; self }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys_pressed.push(key);
        self
    }

    /// Same snapshot moved forward in time by `dt`.
    pub fn later(mut self, dt: Duration) -> Self {
        self.now += dt;
        self
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::at(Vec2::zero())
    }
}
