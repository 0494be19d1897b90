use std::any::Any;
use std::fmt;

use derma_engine::coords::{Rect, Vec2};
use derma_engine::input::{InputSnapshot, MouseButton};
use derma_engine::text::TextMeasure;

use crate::error::UiResult;
use crate::event::PointerState;
use crate::painter::Painter;
use crate::primitive::{LinePrimitive, RectPrimitive, TextPrimitive, TexturePrimitive};
use crate::registry::PrimitiveRegistry;

// ── WidgetBase ────────────────────────────────────────────────────────────

/// State every widget carries: geometry, z, visibility and its primitives.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    pub primitives: PrimitiveRegistry,
    /// Offset from the owning panel's global position.
    pub position: Vec2,
    pub size: Vec2,
    pub z: i32,
    pub visible: bool,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self {
            primitives: PrimitiveRegistry::new(),
            position: Vec2::zero(),
            size: Vec2::zero(),
            z: 0,
            visible: true,
        }
    }
}

impl WidgetBase {
    /// Global bounds given the owning panel's global origin.
    pub fn bounds(&self, origin: Vec2) -> Rect {
        Rect::from_origin_size(origin + self.position, self.size)
    }
}

/// Identifies a widget within one panel. Assigned by the panel on insertion.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WidgetId(pub(crate) u32);

// ── UpdateCtx ─────────────────────────────────────────────────────────────

/// Per-frame input handed to [`Widget::update`].
pub struct UpdateCtx<'a> {
    pub input: &'a InputSnapshot,
    /// Pointer as the owning panel saw it last frame.
    pub previous: PointerState,
    pub metrics: &'a dyn TextMeasure,
}

impl UpdateCtx<'_> {
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.input.cursor
    }

    /// Cursor position, `None` while the pointer is off the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.input.pointer()
    }

    /// The pointer is on the surface and inside `rect`.
    pub fn hovers(&self, rect: Rect) -> bool {
        self.pointer().is_some_and(|c| rect.contains(c))
    }

    /// `button` went down this frame.
    pub fn pressed(&self, button: MouseButton) -> bool {
        self.input.button_down(button) && !self.previous.down(button)
    }

    /// `button` came up this frame.
    pub fn released(&self, button: MouseButton) -> bool {
        !self.input.button_down(button) && self.previous.down(button)
    }
}

// ── Widget trait ──────────────────────────────────────────────────────────

/// The contract every widget implements.
///
/// `origin` is always the owning panel's global position; a widget's own
/// global position is `origin + base().position`.
///
/// ```rust,ignore
/// use derma_ui::prelude::*;
///
/// #[derive(Clone, Default)]
/// pub struct Badge { base: WidgetBase }
///
/// impl Widget for Badge {
///     fn base(&self) -> &WidgetBase { &self.base }
///     fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn clone_widget(&self) -> Box<dyn Widget> { Box::new(self.clone()) }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Widget: 'static {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Advances interaction state for one frame. Static widgets keep the default.
    fn update(&mut self, _ctx: &UpdateCtx<'_>, _origin: Vec2) {}

    /// Draws the widget. The default replays its primitives untinted.
    fn render(&self, painter: &mut Painter<'_>, origin: Vec2) {
        let base = self.base();
        painter.draw_registry(origin + base.position, &base.primitives, None);
    }

    /// Independent copy with static configuration kept and interaction
    /// state reset. Callbacks are shared with the original.
    fn clone_widget(&self) -> Box<dyn Widget>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ── builder helpers ───────────────────────────────────────────────────────

/// Fluent setters shared by every widget. The `draw_*` calls register
/// (or overwrite) a named primitive.
pub trait WidgetExt: Widget + Sized {
    fn at(mut self, x: f32, y: f32) -> Self {
        self.base_mut().position = Vec2::new(x, y);
        self
    }

    fn size(mut self, w: f32, h: f32) -> Self {
        self.base_mut().size = Vec2::new(w, h);
        self
    }

    fn z(mut self, z: i32) -> Self {
        self.base_mut().z = z;
        self
    }

    fn visible(mut self, visible: bool) -> Self {
        self.base_mut().visible = visible;
        self
    }

    fn draw_line(mut self, id: impl Into<String>, prim: LinePrimitive) -> Self {
        self.base_mut().primitives.upsert_line(id, prim);
        self
    }

    fn draw_rect(mut self, id: impl Into<String>, prim: RectPrimitive) -> Self {
        self.base_mut().primitives.upsert_rect(id, prim);
        self
    }

    fn draw_text(mut self, id: impl Into<String>, prim: TextPrimitive) -> Self {
        self.base_mut().primitives.upsert_text(id, prim);
        self
    }

    fn draw_texture(mut self, id: impl Into<String>, prim: TexturePrimitive) -> Self {
        self.base_mut().primitives.upsert_texture(id, prim);
        self
    }

    /// Applies `f` to a registered rect; fails if `id` was never registered.
    fn with_rect(mut self, id: &str, f: impl FnOnce(&mut RectPrimitive)) -> UiResult<Self> {
        f(self.base_mut().primitives.rect_mut(id)?);
        Ok(self)
    }
}

impl<W: Widget> WidgetExt for W {}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget, as stored in a panel.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn base(&self) -> &WidgetBase {
        self.0.base()
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut WidgetBase {
        self.0.base_mut()
    }

    #[inline]
    pub fn update(&mut self, ctx: &UpdateCtx<'_>, origin: Vec2) {
        if self.0.base().visible {
            self.0.update(ctx, origin);
        }
    }

    #[inline]
    pub fn render(&self, painter: &mut Painter<'_>, origin: Vec2) {
        if self.0.base().visible {
            self.0.render(painter, origin);
        }
    }

    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        self.0.as_any().downcast_ref()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.0.as_any_mut().downcast_mut()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("base", self.base()).finish_non_exhaustive()
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        Self(self.0.clone_widget())
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
