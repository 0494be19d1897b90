use super::types::{InputEvent, Key, MouseButton};

/// Per-frame input deltas.
///
/// `InputState` keeps what is held; `InputFrame` collects what happened since
/// the last [`clear`](InputFrame::clear). Key lists keep arrival order so text
/// editing replays keystrokes in the order they were typed.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame, including auto-repeats.
    pub keys_pressed: Vec<Key>,

    /// Keys released this frame.
    pub keys_released: Vec<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: Vec<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: Vec<MouseButton>,

    /// Text committed this frame.
    pub text: Vec<String>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.text.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
