pub mod button;
pub mod canvas;
pub mod slider;
pub mod text_edit;
pub mod textbox;

pub use button::{Button, PressState};
pub use canvas::Canvas;
pub use slider::{HandleState, Orientation, Slider};
pub use text_edit::{EditOutcome, TextEditState};
pub use textbox::{FocusState, NumericBinding, Textbox};
