//! Drawing primitives: the retained visual commands a widget or panel owns.
//!
//! Every primitive carries an offset relative to its owner, a z-level, and a
//! fill color. Owners keep them in a [`PrimitiveRegistry`](crate::registry::PrimitiveRegistry)
//! and replay them each frame through the [`Painter`](crate::painter::Painter).

use std::cell::Cell;
use std::fmt;

use derma_engine::coords::Vec2;
use derma_engine::paint::Color;
use derma_engine::scene::{Border, TextureId};
use derma_engine::text::FontId;

/// The four primitive kinds. Ids are unique per kind, not across kinds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Line,
    Rect,
    Text,
    Texture,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveKind::Line => "line",
            PrimitiveKind::Rect => "rect",
            PrimitiveKind::Text => "text",
            PrimitiveKind::Texture => "texture",
        };
        f.write_str(s)
    }
}

// ── Align ─────────────────────────────────────────────────────────────────

/// Horizontal component of [`Align`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical component of [`Align`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Which point of a text run sits on the primitive's offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Align {
    pub h: HAlign,
    pub v: VAlign,
}

impl Align {
    pub const TOP_LEFT: Align = Align { h: HAlign::Left, v: VAlign::Top };
    pub const TOP_CENTER: Align = Align { h: HAlign::Center, v: VAlign::Top };
    pub const TOP_RIGHT: Align = Align { h: HAlign::Right, v: VAlign::Top };
    pub const CENTER_LEFT: Align = Align { h: HAlign::Left, v: VAlign::Center };
    pub const CENTER: Align = Align { h: HAlign::Center, v: VAlign::Center };
    pub const CENTER_RIGHT: Align = Align { h: HAlign::Right, v: VAlign::Center };
    pub const BOTTOM_LEFT: Align = Align { h: HAlign::Left, v: VAlign::Bottom };
    pub const BOTTOM_CENTER: Align = Align { h: HAlign::Center, v: VAlign::Bottom };
    pub const BOTTOM_RIGHT: Align = Align { h: HAlign::Right, v: VAlign::Bottom };

    /// Distance from the run's top-left corner to its anchor point.
    pub fn anchor_shift(self, extent: Vec2) -> Vec2 {
        let x = match self.h {
            HAlign::Left => 0.0,
            HAlign::Center => extent.x * 0.5,
            HAlign::Right => extent.x,
        };
        let y = match self.v {
            VAlign::Top => 0.0,
            VAlign::Center => extent.y * 0.5,
            VAlign::Bottom => extent.y,
        };
        Vec2::new(x, y)
    }
}

// ── Line ──────────────────────────────────────────────────────────────────

/// Polyline through `points` (relative to `offset`). Needs two points to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub points: Vec<Vec2>,
    pub thickness: f32,
    pub color: Color,
    pub offset: Vec2,
    pub z: i32,
}

impl LinePrimitive {
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
            thickness: 1.0,
            color: Color::WHITE,
            offset: Vec2::zero(),
            z: 0,
        }
    }

    pub fn thickness(mut self, v: f32) -> Self { self.thickness = v; self }
    pub fn color(mut self, v: Color) -> Self { self.color = v; self }
    pub fn offset(mut self, x: f32, y: f32) -> Self { self.offset = Vec2::new(x, y); self }
    pub fn z(mut self, v: i32) -> Self { self.z = v; self }
}

// ── Rect ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub size: Vec2,
    pub color: Color,
    pub offset: Vec2,
    pub z: i32,
    /// Outline thickness + color; `None` draws no outline.
    pub outline: Option<Border>,
    /// Corner radius; `None` draws square corners.
    pub rounded: Option<f32>,
}

impl RectPrimitive {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Vec2::new(w, h),
            color: Color::WHITE,
            offset: Vec2::zero(),
            z: 0,
            outline: None,
            rounded: None,
        }
    }

    pub fn color(mut self, v: Color) -> Self { self.color = v; self }
    pub fn offset(mut self, x: f32, y: f32) -> Self { self.offset = Vec2::new(x, y); self }
    pub fn z(mut self, v: i32) -> Self { self.z = v; self }

    pub fn outline(mut self, thickness: f32, color: Color) -> Self {
        self.outline = Some(Border::new(thickness, color));
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.rounded = Some(radius);
        self
    }
}

// ── Text ──────────────────────────────────────────────────────────────────

/// A single-line text run.
///
/// The measured extent is cached after the first render and dropped whenever
/// content, font or size change, so mutate through the setters.
#[derive(Debug, Clone)]
pub struct TextPrimitive {
    font: FontId,
    font_size: f32,
    content: String,
    pub align: Align,
    pub color: Color,
    pub offset: Vec2,
    pub z: i32,
    extent: Cell<Option<Vec2>>,
}

impl TextPrimitive {
    pub fn new(content: impl Into<String>, font: FontId, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            content: content.into(),
            align: Align::TOP_LEFT,
            color: Color::WHITE,
            offset: Vec2::zero(),
            z: 0,
            extent: Cell::new(None),
        }
    }

    pub fn align(mut self, v: Align) -> Self { self.align = v; self }
    pub fn color(mut self, v: Color) -> Self { self.color = v; self }
    pub fn offset(mut self, x: f32, y: f32) -> Self { self.offset = Vec2::new(x, y); self }
    pub fn z(mut self, v: i32) -> Self { self.z = v; self }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.extent.set(None);
        }
    }

    pub fn set_font(&mut self, font: FontId, font_size: f32) {
        if font != self.font || font_size != self.font_size {
            self.font = font;
            self.font_size = font_size;
            self.extent.set(None);
        }
    }

    /// Cached extent, if the run was measured since its last change.
    pub fn cached_extent(&self) -> Option<Vec2> {
        self.extent.get()
    }

    /// Extent of the run, measuring and caching on first use.
    pub fn extent_with(&self, measure: impl FnOnce(&str, FontId, f32) -> Vec2) -> Vec2 {
        if let Some(e) = self.extent.get() {
            return e;
        }
        let e = measure(&self.content, self.font, self.font_size);
        self.extent.set(Some(e));
        e
    }
}

// ── Texture ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TexturePrimitive {
    pub texture: TextureId,
    pub size: Vec2,
    /// Linear filtering when true.
    pub smooth: bool,
    /// Tint multiplied with the texels.
    pub color: Color,
    pub offset: Vec2,
    pub z: i32,
}

impl TexturePrimitive {
    pub fn new(texture: TextureId, w: f32, h: f32) -> Self {
        Self {
            texture,
            size: Vec2::new(w, h),
            smooth: true,
            color: Color::WHITE,
            offset: Vec2::zero(),
            z: 0,
        }
    }

    pub fn smooth(mut self, v: bool) -> Self { self.smooth = v; self }
    pub fn color(mut self, v: Color) -> Self { self.color = v; self }
    pub fn offset(mut self, x: f32, y: f32) -> Self { self.offset = Vec2::new(x, y); self }
    pub fn z(mut self, v: i32) -> Self { self.z = v; self }
}

// ── borrowed view ─────────────────────────────────────────────────────────

/// Borrowed view of any primitive, as produced by flattening a registry.
#[derive(Debug, Copy, Clone)]
pub enum PrimitiveRef<'a> {
    Line(&'a LinePrimitive),
    Rect(&'a RectPrimitive),
    Text(&'a TextPrimitive),
    Texture(&'a TexturePrimitive),
}

impl PrimitiveRef<'_> {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveRef::Line(_) => PrimitiveKind::Line,
            PrimitiveRef::Rect(_) => PrimitiveKind::Rect,
            PrimitiveRef::Text(_) => PrimitiveKind::Text,
            PrimitiveRef::Texture(_) => PrimitiveKind::Texture,
        }
    }

    pub fn z(&self) -> i32 {
        match self {
            PrimitiveRef::Line(p) => p.z,
            PrimitiveRef::Rect(p) => p.z,
            PrimitiveRef::Text(p) => p.z,
            PrimitiveRef::Texture(p) => p.z,
        }
    }
}
