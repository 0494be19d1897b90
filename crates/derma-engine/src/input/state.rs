use std::collections::HashSet;
use std::time::Instant;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::snapshot::InputSnapshot;
use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};

/// Current input state for a single surface.
///
/// Holds "is down" information and the pointer position. Transitions are
/// recorded into an `InputFrame`; [`snapshot`](InputState::snapshot) folds both
/// into the [`InputSnapshot`] the UI consumes once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in surface pixels. `None` once the pointer left.
    pub pointer_pos: Option<Vec2>,

    /// Last position seen on the surface; kept after the pointer leaves.
    pub last_pointer_pos: Vec2,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Focus loss would otherwise leave buttons stuck down mid-drag.
                    for b in self.buttons_down.drain() {
                        frame.buttons_released.push(b);
                    }
                    self.keys_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                let pos = Vec2::new(*x, *y);
                self.pointer_pos = Some(pos);
                self.last_pointer_pos = pos;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, modifiers, repeat } => {
                self.modifiers = *modifiers;
                match state {
                    ButtonState::Pressed => {
                        if self.keys_down.insert(*key) || *repeat {
                            frame.keys_pressed.push(*key);
                        }
                    }
                    ButtonState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.push(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.push(*button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.push(*button);
                    }
                }
            },

            InputEvent::Text(text) => frame.text.push(text.clone()),
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Builds the per-frame snapshot from held state plus this frame's deltas.
    ///
    /// A button pressed during the frame reads as down even if it was
    /// released again before the frame ended; its release shows up in the
    /// next snapshot. A pointer that left the surface keeps its last position
    /// with `pointer_inside` cleared.
    pub fn snapshot(&self, frame: &InputFrame, now: Instant) -> InputSnapshot {
        let down = |b: MouseButton| self.button_down(b) || frame.buttons_pressed.contains(&b);
        InputSnapshot {
            cursor: self.pointer_pos.unwrap_or(self.last_pointer_pos),
            pointer_inside: self.pointer_pos.is_some(),
            left: down(MouseButton::Left),
            right: down(MouseButton::Right),
            middle: down(MouseButton::Middle),
            text: frame.text.clone(),
            keys_pressed: frame.keys_pressed.clone(),
            keys_released: frame.keys_released.clone(),
            modifiers: self.modifiers,
            now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Pressed }
    }

    #[test]
    fn snapshot_reflects_held_buttons_and_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 12.0, y: 34.0 });
        state.apply_event(&mut frame, press(MouseButton::Left));

        let snap = state.snapshot(&frame, Instant::now());
        assert_eq!(snap.cursor, Vec2::new(12.0, 34.0));
        assert!(snap.pointer_inside);
        assert!(snap.left);
        assert!(!snap.right);
        assert_eq!(frame.buttons_pressed, vec![MouseButton::Left]);
    }

    #[test]
    fn click_within_one_frame_reads_as_down_then_up() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left));
        state.apply_event(&mut frame, InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Released });
        assert!(state.snapshot(&frame, Instant::now()).left);

        frame.clear();
        assert!(!state.snapshot(&frame, Instant::now()).left);
    }

    #[test]
    fn pointer_leaving_keeps_last_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 20.0, y: 30.0 });
        state.apply_event(&mut frame, InputEvent::PointerLeft);

        let snap = state.snapshot(&frame, Instant::now());
        assert!(!snap.pointer_inside);
        assert_eq!(snap.cursor, Vec2::new(20.0, 30.0));
        assert_eq!(snap.pointer(), None);
        assert!(snap.cursor.x.is_finite());
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Right));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Right));
        assert_eq!(frame.buttons_released, vec![MouseButton::Right]);
    }

    #[test]
    fn key_repeat_is_recorded_again() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let key = |repeat| InputEvent::Key {
            key: Key::Backspace,
            state: ButtonState::Pressed,
            modifiers: Modifiers::NONE,
            repeat,
        };
        state.apply_event(&mut frame, key(false));
        state.apply_event(&mut frame, key(false));
        state.apply_event(&mut frame, key(true));
        assert_eq!(frame.keys_pressed, vec![Key::Backspace, Key::Backspace]);
    }

    #[test]
    fn text_events_keep_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Text("a".into()));
        state.apply_event(&mut frame, InputEvent::Text("b".into()));
        let snap = state.snapshot(&frame, Instant::now());
        assert_eq!(snap.text, vec!["a".to_string(), "b".to_string()]);
    }
}
