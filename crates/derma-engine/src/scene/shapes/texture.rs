use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Opaque handle to a texture owned by the host-side resource store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCmd {
    pub texture: TextureId,
    pub rect: Rect,
    /// Multiplied with the sampled texel.
    pub tint: Color,
    /// Linear filtering when true, nearest otherwise.
    pub smooth: bool,
}

impl DrawList {
    /// Records a textured quad.
    #[inline]
    pub fn push_texture(&mut self, z: ZIndex, texture: TextureId, rect: Rect, tint: Color, smooth: bool) {
        self.push(z, DrawCmd::Texture(TextureCmd { texture, rect, tint, smooth }));
    }
}
