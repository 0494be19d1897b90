use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::text::TextCmd;
use crate::scene::shapes::texture::TextureCmd;

/// Renderer-agnostic draw command.
///
/// This is the whole vocabulary the UI layer speaks to a host renderer.
/// Adding a shape means a new module under `scene::shapes`, a variant here,
/// and a matching case in every host backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Line(LineCmd),
    Text(TextCmd),
    Texture(TextureCmd),
}
