//! Recorded draw stream.
//!
//! The UI fills a [`DrawList`] each frame; host renderers walk it in paint
//! order and produce pixels. Ordering is deterministic: z-index first, then
//! insertion order.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
pub use shapes::line::LineCmd;
pub use shapes::rect::RectCmd;
pub use shapes::text::TextCmd;
pub use shapes::texture::{TextureCmd, TextureId};
pub use z_index::ZIndex;
