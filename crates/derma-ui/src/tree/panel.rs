use derma_engine::coords::{Rect, Vec2};

use crate::event::PointerState;
use crate::options::NodeOptions;
use crate::primitive::{LinePrimitive, RectPrimitive, TextPrimitive, TexturePrimitive};
use crate::registry::PrimitiveRegistry;
use crate::widget::{Element, Widget, WidgetId};

use super::NodeId;

#[derive(Debug, Clone)]
pub(crate) struct WidgetSlot {
    pub(crate) id: WidgetId,
    pub(crate) element: Element,
}

/// A container node: positioned relative to its parent, owning widgets,
/// background primitives and interaction options.
///
/// Build one with the fluent setters, then hand it to
/// [`UiTree::insert`](super::UiTree::insert) or
/// [`UiTree::insert_root`](super::UiTree::insert_root).
///
/// ```rust,ignore
/// let id = tree.insert_root(
///     Panel::new("inventory")
///         .at(40.0, 40.0)
///         .size(200.0, 300.0)
///         .draw_rect("bg", RectPrimitive::new(200.0, 300.0).color(dark))
///         .movable()
///         .with(Button::new().at(8.0, 8.0).size(60.0, 20.0)),
/// );
/// ```
#[derive(Debug)]
pub struct Panel {
    pub name: String,
    /// Relative to the parent's global position.
    pub position: Vec2,
    pub size: Vec2,
    /// Base z among siblings.
    pub z: i32,
    pub visible: bool,
    /// Draw the outline and resize grip.
    pub debug: bool,
    pub background: PrimitiveRegistry,

    pub(crate) z_offset: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) widgets: Vec<WidgetSlot>,
    next_widget: u32,
    pub(crate) options: NodeOptions,
    pub(crate) prev_pointer: PointerState,
}

impl Panel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::zero(),
            size: Vec2::zero(),
            z: 0,
            visible: true,
            debug: false,
            background: PrimitiveRegistry::new(),
            z_offset: 0,
            parent: None,
            children: Vec::new(),
            widgets: Vec::new(),
            next_widget: 0,
            options: NodeOptions::default(),
            prev_pointer: PointerState::default(),
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Vec2::new(w, h);
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn selectable(mut self) -> Self {
        self.options.attach_selectable();
        self
    }

    pub fn movable(mut self) -> Self {
        self.options.attach_movable();
        self
    }

    pub fn resizable(mut self, min_size: Vec2) -> Self {
        self.options.attach_resizable(min_size);
        self
    }

    /// Adds a widget; use [`add_widget`](Self::add_widget) to keep its id.
    pub fn with(mut self, widget: impl Into<Element>) -> Self {
        self.add_widget(widget);
        self
    }

    pub fn draw_line(mut self, id: impl Into<String>, prim: LinePrimitive) -> Self {
        self.background.upsert_line(id, prim);
        self
    }

    pub fn draw_rect(mut self, id: impl Into<String>, prim: RectPrimitive) -> Self {
        self.background.upsert_rect(id, prim);
        self
    }

    pub fn draw_text(mut self, id: impl Into<String>, prim: TextPrimitive) -> Self {
        self.background.upsert_text(id, prim);
        self
    }

    pub fn draw_texture(mut self, id: impl Into<String>, prim: TexturePrimitive) -> Self {
        self.background.upsert_texture(id, prim);
        self
    }

    // ── widgets ───────────────────────────────────────────────────────────

    pub fn add_widget(&mut self, widget: impl Into<Element>) -> WidgetId {
        let id = WidgetId(self.next_widget);
        self.next_widget += 1;
        self.widgets.push(WidgetSlot { id, element: widget.into() });
        id
    }

    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Element> {
        let idx = self.widgets.iter().position(|s| s.id == id)?;
        Some(self.widgets.remove(idx).element)
    }

    pub fn element(&self, id: WidgetId) -> Option<&Element> {
        self.widgets.iter().find(|s| s.id == id).map(|s| &s.element)
    }

    pub fn element_mut(&mut self, id: WidgetId) -> Option<&mut Element> {
        self.widgets.iter_mut().find(|s| s.id == id).map(|s| &mut s.element)
    }

    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.element(id)?.downcast_ref()
    }

    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        self.element_mut(id)?.downcast_mut()
    }

    pub fn widget_ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.iter().map(|s| s.id)
    }

    /// Widgets sorted by z; equal z keeps insertion order.
    pub(crate) fn widgets_in_z_order(&self) -> Vec<&WidgetSlot> {
        let mut out: Vec<&WidgetSlot> = self.widgets.iter().collect();
        out.sort_by_key(|s| s.element.base().z);
        out
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Base z plus the runtime offset applied by `bring_to_front`.
    pub fn effective_z(&self) -> i32 {
        self.z.saturating_add(self.z_offset)
    }

    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut NodeOptions {
        &mut self.options
    }

    pub(crate) fn bounds_at(&self, global: Vec2) -> Rect {
        Rect::from_origin_size(global, self.size)
    }
}

/// Detached copy: same configuration, widgets cloned with fresh state, no
/// parent or children, interaction options reset.
impl Clone for Panel {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            position: self.position,
            size: self.size,
            z: self.z,
            visible: self.visible,
            debug: self.debug,
            background: self.background.clone(),
            z_offset: self.z_offset,
            parent: None,
            children: Vec::new(),
            widgets: self.widgets.clone(),
            next_widget: self.next_widget,
            options: self.options.reset(),
            prev_pointer: PointerState::default(),
        }
    }
}
