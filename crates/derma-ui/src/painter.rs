use derma_engine::coords::{CornerRadii, Rect, Vec2};
use derma_engine::paint::Color;
use derma_engine::scene::{Border, DrawList, TextureId, ZIndex};
use derma_engine::text::{FontId, TextMeasure};

use crate::primitive::PrimitiveRef;
use crate::registry::PrimitiveRegistry;

/// Drawing surface handed to [`Widget::render`](crate::widget::Widget::render)
/// and to the tree's render pass.
///
/// Every call records one item into the frame's `DrawList` with a strictly
/// increasing z, so paint order is exactly call order. All ordering decisions
/// (widget z, primitive z, child z) are made by the caller before drawing.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    metrics: &'a dyn TextMeasure,
    z: i32,
    /// Draw debug outlines for panels that ask for them.
    pub debug_overlay: bool,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, metrics: &'a dyn TextMeasure) -> Self {
        Self { draw_list, metrics, z: 0, debug_overlay: false }
    }

    pub fn metrics(&self) -> &dyn TextMeasure {
        self.metrics
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.metrics.measure(text, font, size)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// Rectangle with optional corner radius and outline.
    pub fn rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, CornerRadii::all(radius), color, border);
    }

    /// Outline only.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.rect(rect, 0.0, Color::transparent(), Some(Border::new(thickness, color)));
    }

    pub fn line(&mut self, points: Vec<Vec2>, thickness: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_line(z, points, thickness, color);
    }

    /// Text with its top-left corner at `origin`.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    pub fn texture(&mut self, texture: TextureId, rect: Rect, tint: Color, smooth: bool) {
        let z = self.next_z();
        self.draw_list.push_texture(z, texture, rect, tint, smooth);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── primitives ────────────────────────────────────────────────────────

    /// Draws one primitive relative to `origin`.
    ///
    /// `tint` multiplies the color of rects and textures; lines and text
    /// ignore it.
    pub fn draw_primitive(&mut self, origin: Vec2, prim: PrimitiveRef<'_>, tint: Option<Color>) {
        match prim {
            PrimitiveRef::Line(p) => {
                let base = origin + p.offset;
                self.line(p.points.iter().map(|&pt| base + pt).collect(), p.thickness, p.color);
            }
            PrimitiveRef::Rect(p) => {
                let rect = Rect::from_origin_size(origin + p.offset, p.size);
                let color = tint.map_or(p.color, |t| p.color.modulate(t));
                self.rect(rect, p.rounded.unwrap_or(0.0), color, p.outline);
            }
            PrimitiveRef::Text(p) => {
                let metrics = self.metrics;
                let extent = p.extent_with(|s, f, sz| metrics.measure(s, f, sz));
                let top_left = origin + p.offset - p.align.anchor_shift(extent);
                self.text(p.content(), p.font(), p.font_size(), p.color, top_left);
            }
            PrimitiveRef::Texture(p) => {
                let rect = Rect::from_origin_size(origin + p.offset, p.size);
                let color = tint.map_or(p.color, |t| p.color.modulate(t));
                self.texture(p.texture, rect, color, p.smooth);
            }
        }
    }

    /// Draws a whole registry in its flattened order.
    pub fn draw_registry(&mut self, origin: Vec2, registry: &PrimitiveRegistry, tint: Option<Color>) {
        for flat in registry.flatten() {
            self.draw_primitive(origin, flat.prim, tint);
        }
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
