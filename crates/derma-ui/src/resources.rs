//! Fonts and textures shared by every panel in a scene.
//!
//! Loads are memoized: fonts by key (the path, or the caller's key for
//! in-memory bytes), textures by key plus [`TextureOptions`]. Loading the
//! same thing twice hands back the same `Copy` handle.

use std::collections::HashMap;
use std::path::Path;

use derma_engine::coords::Vec2;
use derma_engine::scene::TextureId;
use derma_engine::text::{FontId, FontSystem, TextMeasure};

use crate::error::ResourceError;

/// How a texture is decoded and sampled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureOptions {
    /// Linear filtering when `true`, nearest otherwise.
    pub smooth: bool,
    pub flip_vertical: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self { smooth: true, flip_vertical: false }
    }
}

impl TextureOptions {
    pub fn smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }
}

/// Decoded RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub smooth: bool,
}

impl Texture {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Default)]
pub struct ResourceVault {
    fonts: FontSystem,
    font_keys: HashMap<String, FontId>,
    textures: Vec<Texture>,
    texture_keys: HashMap<(String, TextureOptions), TextureId>,
}

impl ResourceVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// The font store, for host renderers that rasterize glyphs.
    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    pub fn load_font(&mut self, path: impl AsRef<Path>) -> Result<FontId, ResourceError> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();
        if let Some(&id) = self.font_keys.get(&key) {
            return Ok(id);
        }
        let bytes = read(path)?;
        self.load_font_bytes(key, &bytes)
    }

    /// Loads a font from memory, memoized under `key`.
    pub fn load_font_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) -> Result<FontId, ResourceError> {
        let key = key.into();
        if let Some(&id) = self.font_keys.get(&key) {
            return Ok(id);
        }
        let id = self
            .fonts
            .load_font(bytes)
            .map_err(|source| ResourceError::FontDecode { key: key.clone(), source })?;
        log::debug!("loaded font `{key}` as {id:?}");
        self.font_keys.insert(key, id);
        Ok(id)
    }

    pub fn font_id(&self, key: &str) -> Option<FontId> {
        self.font_keys.get(key).copied()
    }

    // ── textures ──────────────────────────────────────────────────────────

    pub fn load_texture(&mut self, path: impl AsRef<Path>, opts: TextureOptions) -> Result<TextureId, ResourceError> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();
        if let Some(&id) = self.texture_keys.get(&(key.clone(), opts)) {
            return Ok(id);
        }
        let bytes = read(path)?;
        self.load_texture_bytes(key, &bytes, opts)
    }

    /// Decodes an encoded image (PNG, JPEG, ...) from memory.
    pub fn load_texture_bytes(
        &mut self,
        key: impl Into<String>,
        bytes: &[u8],
        opts: TextureOptions,
    ) -> Result<TextureId, ResourceError> {
        let key = key.into();
        if let Some(&id) = self.texture_keys.get(&(key.clone(), opts)) {
            return Ok(id);
        }
        let mut image = image::load_from_memory(bytes)
            .map_err(|source| ResourceError::TextureDecode { key: key.clone(), source })?;
        if opts.flip_vertical {
            image = image.flipv();
        }
        let rgba = image.to_rgba8();
        let texture = Texture { width: rgba.width(), height: rgba.height(), rgba: rgba.into_raw(), smooth: opts.smooth };

        let id = TextureId::from_index(self.textures.len() as u32);
        log::debug!("loaded texture `{key}` ({}x{}) as {id:?}", texture.width, texture.height);
        self.textures.push(texture);
        self.texture_keys.insert((key, opts), id);
        Ok(id)
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.index() as usize)
    }

    /// Changes the sampling mode of an already-loaded texture.
    pub fn set_smooth(&mut self, id: TextureId, smooth: bool) -> bool {
        match self.textures.get_mut(id.index() as usize) {
            Some(t) => {
                t.smooth = smooth;
                true
            }
            None => false,
        }
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl TextMeasure for ResourceVault {
    fn measure(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.fonts.measure(text, font, size)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ResourceError> {
    std::fs::read(path).map_err(|source| ResourceError::Io { path: path.to_path_buf(), source })
}
