//! Input subsystem.
//!
//! The public API is platform-agnostic. Hosts translate their window-system
//! events into [`InputEvent`]s, feed them through [`InputState`], and hand the
//! resulting [`InputSnapshot`] to the UI once per frame.

mod frame;
mod snapshot;
mod state;
mod types;

pub use frame::InputFrame;
pub use snapshot::InputSnapshot;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
