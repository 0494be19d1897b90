//! The panel tree.
//!
//! Nodes live in a slotmap arena and refer to each other by [`NodeId`]:
//! a parent owns the ordered list of its children's ids, a child keeps its
//! parent's id as a plain back-reference. Global positions are recomputed
//! from the ancestor chain on demand and never cached.
//!
//! Each frame [`UiTree::update`] walks visible nodes parent-first. Per node
//! it diffs the pointer against the node's previous frame, feeds the
//! resulting events to the node's options, updates its widgets at the node's
//! (possibly just-moved) global position, then recurses into children in z
//! order. Structural changes requested from inside that walk go through
//! [`TreeCommands`] and are applied once it completes.

mod commands;
mod panel;

pub use commands::{TreeCommand, TreeCommands};
pub use panel::Panel;

use derma_engine::coords::{Rect, Vec2};
use derma_engine::input::InputSnapshot;
use derma_engine::paint::Color;
use derma_engine::text::TextMeasure;
use slotmap::{SlotMap, new_key_type};

use crate::error::{UiError, UiResult};
use crate::event::{NodeEvent, PointerState, TreeNotification};
use crate::options::{NodeGeometry, OptionKind};
use crate::painter::Painter;
use crate::widget::{Element, UpdateCtx, Widget, WidgetId};

new_key_type! {
    /// Handle to a node in a [`UiTree`]. Stale handles fail lookups.
    pub struct NodeId;
}

const DEBUG_OUTLINE: Color = Color::from_premul(0.0, 0.8, 0.0, 0.8);
const DEBUG_SELECTED: Color = Color::from_premul(0.9, 0.7, 0.0, 1.0);
const DEBUG_GRIP: Color = Color::from_premul(0.8, 0.0, 0.0, 0.8);

#[derive(Debug, Default)]
pub struct UiTree {
    nodes: SlotMap<NodeId, Panel>,
    roots: Vec<NodeId>,
    commands: TreeCommands,
    notifications: Vec<TreeNotification>,
    /// Pointer from the latest update; seeds nodes inserted after it.
    last_pointer: PointerState,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── lookup ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Panel> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Panel> {
        self.nodes.get_mut(id)
    }

    pub fn panel(&self, id: NodeId) -> UiResult<&Panel> {
        self.nodes.get(id).ok_or(UiError::NodeNotFound(id))
    }

    pub fn panel_mut(&mut self, id: NodeId) -> UiResult<&mut Panel> {
        self.nodes.get_mut(id).ok_or(UiError::NodeNotFound(id))
    }

    /// First node named `name`, searching roots then children in order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(panel) = self.nodes.get(id) else { continue };
            if panel.name == name {
                return Some(id);
            }
            stack.extend(panel.children.iter().rev().copied());
        }
        None
    }

    /// Sum of the node's and all its ancestors' local positions.
    pub fn global_position(&self, id: NodeId) -> UiResult<Vec2> {
        let panel = self.panel(id)?;
        match panel.parent {
            Some(parent) => Ok(self.global_position(parent)? + panel.position),
            None => Ok(panel.position),
        }
    }

    /// Rect covering the node, in global coordinates.
    pub fn bounds(&self, id: NodeId) -> UiResult<Rect> {
        Ok(self.panel(id)?.bounds_at(self.global_position(id)?))
    }

    /// True if `node` is `ancestor` or sits anywhere below it.
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.nodes.get(id).and_then(|p| p.parent);
        }
        false
    }

    // ── structure ─────────────────────────────────────────────────────────

    pub fn insert_root(&mut self, mut panel: Panel) -> NodeId {
        panel.parent = None;
        panel.children.clear();
        panel.prev_pointer = self.last_pointer;
        let id = self.nodes.insert(panel);
        self.roots.push(id);
        log::debug!("inserted root {id:?}");
        id
    }

    pub fn insert(&mut self, parent: NodeId, mut panel: Panel) -> UiResult<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(UiError::NodeNotFound(parent));
        }
        panel.parent = Some(parent);
        panel.children.clear();
        panel.prev_pointer = self.last_pointer;
        let id = self.nodes.insert(panel);
        self.panel_mut(parent)?.children.push(id);
        log::debug!("inserted {id:?} under {parent:?}");
        Ok(id)
    }

    /// Moves `child` (with its subtree) under `parent`, detaching it from
    /// wherever it was. Parenting a node under itself or a descendant fails.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.panel(parent)?;
        self.panel(child)?;
        if self.is_descendant(parent, child) {
            return Err(UiError::CycleDetected { child, parent });
        }
        self.unlink(child);
        self.panel_mut(child)?.parent = Some(parent);
        self.panel_mut(parent)?.children.push(child);
        log::debug!("reparented {child:?} under {parent:?}");
        Ok(())
    }

    /// Turns the node into a root, keeping its subtree.
    pub fn detach(&mut self, id: NodeId) -> UiResult<()> {
        let panel = self.panel(id)?;
        if panel.parent.is_none() {
            return Ok(());
        }
        self.unlink(id);
        self.roots.push(id);
        Ok(())
    }

    /// Removes the node and its whole subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> UiResult<usize> {
        self.panel(id)?;
        self.unlink(id);
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(panel) = self.nodes.remove(cur) {
                stack.extend(panel.children);
                removed += 1;
            }
        }
        log::debug!("removed {id:?} ({removed} nodes)");
        Ok(removed)
    }

    /// Copies the node's subtree next to it (same parent, appended last).
    /// Widgets are cloned with fresh interaction state.
    pub fn duplicate(&mut self, id: NodeId) -> UiResult<NodeId> {
        let parent = self.panel(id)?.parent;
        self.clone_subtree(id, parent)
    }

    fn clone_subtree(&mut self, src: NodeId, parent: Option<NodeId>) -> UiResult<NodeId> {
        let panel = self.panel(src)?;
        let copy = panel.clone();
        let children = panel.children.clone();
        let new_id = match parent {
            Some(p) => self.insert(p, copy)?,
            None => self.insert_root(copy),
        };
        for child in children {
            self.clone_subtree(child, Some(new_id))?;
        }
        Ok(new_id)
    }

    /// Removes `id` from its parent's child list (or from the roots).
    fn unlink(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|p| p.parent.take());
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent) => parent.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    // ── node state ────────────────────────────────────────────────────────

    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> UiResult<()> {
        self.panel_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> UiResult<()> {
        self.panel_mut(id)?.visible = visible;
        Ok(())
    }

    /// Raises the node's runtime z above all its siblings.
    pub fn bring_to_front(&mut self, id: NodeId) -> UiResult<()> {
        let parent = self.panel(id)?.parent;
        let siblings = match parent {
            Some(p) => self.panel(p)?.children.as_slice(),
            None => self.roots.as_slice(),
        };
        let top = siblings
            .iter()
            .filter(|&&s| s != id)
            .filter_map(|&s| self.nodes.get(s))
            .map(Panel::effective_z)
            .max();
        let Some(top) = top else { return Ok(()) };
        let panel = self.panel_mut(id)?;
        if panel.effective_z() <= top {
            panel.z_offset = top.saturating_add(1).saturating_sub(panel.z);
        }
        Ok(())
    }

    // ── widgets ───────────────────────────────────────────────────────────

    pub fn add_widget(&mut self, node: NodeId, widget: impl Into<Element>) -> UiResult<WidgetId> {
        Ok(self.panel_mut(node)?.add_widget(widget))
    }

    pub fn remove_widget(&mut self, node: NodeId, widget: WidgetId) -> UiResult<Element> {
        self.panel_mut(node)?.remove_widget(widget).ok_or(UiError::WidgetNotFound { node, widget })
    }

    pub fn widget<W: Widget>(&self, node: NodeId, widget: WidgetId) -> UiResult<&W> {
        let element = self.panel(node)?.element(widget).ok_or(UiError::WidgetNotFound { node, widget })?;
        element.downcast_ref().ok_or(UiError::WidgetTypeMismatch {
            node,
            widget,
            expected: std::any::type_name::<W>(),
        })
    }

    pub fn widget_mut<W: Widget>(&mut self, node: NodeId, widget: WidgetId) -> UiResult<&mut W> {
        let element =
            self.panel_mut(node)?.element_mut(widget).ok_or(UiError::WidgetNotFound { node, widget })?;
        element.downcast_mut().ok_or(UiError::WidgetTypeMismatch {
            node,
            widget,
            expected: std::any::type_name::<W>(),
        })
    }

    /// The widget's global position: node global + widget offset.
    pub fn widget_global_position(&self, node: NodeId, widget: WidgetId) -> UiResult<Vec2> {
        let element = self.panel(node)?.element(widget).ok_or(UiError::WidgetNotFound { node, widget })?;
        Ok(self.global_position(node)? + element.base().position)
    }

    // ── options ───────────────────────────────────────────────────────────

    /// Returns `false` when a Selectable was already attached.
    pub fn attach_selectable(&mut self, id: NodeId) -> UiResult<bool> {
        Ok(self.panel_mut(id)?.options.attach_selectable())
    }

    pub fn attach_movable(&mut self, id: NodeId) -> UiResult<bool> {
        Ok(self.panel_mut(id)?.options.attach_movable())
    }

    pub fn attach_resizable(&mut self, id: NodeId, min_size: Vec2) -> UiResult<bool> {
        Ok(self.panel_mut(id)?.options.attach_resizable(min_size))
    }

    /// Returns whether an option of that kind was attached.
    pub fn detach_option(&mut self, id: NodeId, kind: OptionKind) -> UiResult<bool> {
        Ok(self.panel_mut(id)?.options.detach(kind))
    }

    // ── deferred mutation ─────────────────────────────────────────────────

    /// Handle for queuing structural changes from callbacks.
    pub fn commands(&self) -> TreeCommands {
        self.commands.clone()
    }

    /// Applies queued commands now. Commands naming missing nodes are
    /// dropped with a warning. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        for cmd in self.commands.take() {
            match self.apply(cmd) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("dropped tree command: {e}"),
            }
        }
        applied
    }

    fn apply(&mut self, cmd: TreeCommand) -> UiResult<()> {
        match cmd {
            TreeCommand::Spawn { parent: Some(p), panel } => self.insert(p, panel).map(drop),
            TreeCommand::Spawn { parent: None, panel } => {
                self.insert_root(panel);
                Ok(())
            }
            TreeCommand::Reparent { child, parent } => self.add_child(parent, child),
            TreeCommand::Detach(id) => self.detach(id),
            TreeCommand::Remove(id) => self.remove(id).map(drop),
            TreeCommand::SetVisible(id, v) => self.set_visible(id, v),
            TreeCommand::SetPosition(id, pos) => self.set_position(id, pos),
            TreeCommand::BringToFront(id) => self.bring_to_front(id),
        }
    }

    /// Notifications raised by options since the last drain, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<TreeNotification> {
        std::mem::take(&mut self.notifications)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// One interaction pass over every visible node.
    pub fn update(&mut self, input: &InputSnapshot, metrics: &dyn TextMeasure) {
        self.apply_pending();
        let pointer = PointerState::from_snapshot(input);
        for root in self.sorted_by_z(&self.roots) {
            self.update_node(root, Vec2::zero(), input, pointer, metrics);
        }
        self.last_pointer = pointer;
        self.apply_pending();
    }

    fn update_node(
        &mut self,
        id: NodeId,
        parent_global: Vec2,
        input: &InputSnapshot,
        pointer: PointerState,
        metrics: &dyn TextMeasure,
    ) {
        let Some(panel) = self.nodes.get_mut(id) else {
            log::debug!("skipping stale node {id:?}");
            return;
        };
        let previous = panel.prev_pointer;
        panel.prev_pointer = pointer;
        if !panel.visible {
            return;
        }

        let mut geom = NodeGeometry { position: panel.position, size: panel.size, parent_global };
        for ev in NodeEvent::synthesize(&previous, &pointer) {
            for kind in panel.options.dispatch(&ev, &mut geom) {
                log::trace!("{id:?}: {kind:?}");
                self.notifications.push(TreeNotification { node: id, kind });
            }
        }
        panel.position = geom.position;
        panel.size = geom.size;

        let global = parent_global + panel.position;
        let ctx = UpdateCtx { input, previous, metrics };
        for slot in &mut panel.widgets {
            slot.element.update(&ctx, global);
        }

        let children = panel.children.clone();
        for child in self.sorted_by_z(&children) {
            self.update_node(child, global, input, pointer, metrics);
        }
    }

    /// Draws every visible node; children over parents, siblings by z.
    pub fn render(&self, painter: &mut Painter<'_>) {
        for root in self.sorted_by_z(&self.roots) {
            self.render_node(root, Vec2::zero(), painter);
        }
    }

    fn render_node(&self, id: NodeId, parent_global: Vec2, painter: &mut Painter<'_>) {
        let Some(panel) = self.nodes.get(id) else { return };
        if !panel.visible {
            return;
        }
        let global = parent_global + panel.position;
        let debug = panel.debug || painter.debug_overlay;

        if debug {
            let color = if panel.options.is_selected() { DEBUG_SELECTED } else { DEBUG_OUTLINE };
            painter.stroke_rect(panel.bounds_at(global), 1.0, color);
        }

        painter.draw_registry(global, &panel.background, None);
        for slot in panel.widgets_in_z_order() {
            slot.element.render(painter, global);
        }
        for child in self.sorted_by_z(&panel.children) {
            self.render_node(child, global, painter);
        }

        if debug && panel.options.has(OptionKind::Resizable) {
            let geom = NodeGeometry { position: panel.position, size: panel.size, parent_global };
            painter.fill_rect(geom.resize_handle(), DEBUG_GRIP);
        }
    }

    /// Stable sort by effective z; stale ids are dropped.
    fn sorted_by_z(&self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut out: Vec<(i32, NodeId)> =
            ids.iter().filter_map(|&id| self.nodes.get(id).map(|p| (p.effective_z(), id))).collect();
        out.sort_by_key(|&(z, _)| z);
        out.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use std::time::Instant;

    use derma_engine::input::{ButtonState, InputEvent, InputFrame, InputState, MouseButton};
    use derma_engine::scene::{DrawCmd, DrawList};

    use super::*;
    use crate::event::Notification;
    use crate::primitive::RectPrimitive;
    use crate::testing::MonoMetrics;
    use crate::widget::WidgetExt;
    use crate::widgets::{Button, PressState, Slider};

    fn step(tree: &mut UiTree, input: InputSnapshot) {
        tree.update(&input, &MonoMetrics::default());
    }

    fn at(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot::at(Vec2::new(x, y))
    }

    fn rect_origins(tree: &UiTree) -> Vec<Vec2> {
        let mut list = DrawList::new();
        let metrics = MonoMetrics::default();
        tree.render(&mut Painter::new(&mut list, &metrics));
        list.iter_in_paint_order()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Rect(r) => Some(r.rect.origin),
                _ => None,
            })
            .collect()
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn nested_global_position() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a").at(10.0, 10.0));
        let b = tree.insert(a, Panel::new("b").at(5.0, 5.0)).unwrap();
        let w = tree.add_widget(b, Button::new().at(2.0, 2.0).size(4.0, 4.0)).unwrap();
        assert_eq!(tree.widget_global_position(b, w).unwrap(), Vec2::new(17.0, 17.0));
    }

    #[test]
    fn global_position_tracks_set_position() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert(a, Panel::new("b")).unwrap();
        let c = tree.insert(b, Panel::new("c")).unwrap();
        let moves = [(a, 3.0, 4.0), (c, -1.0, 2.0), (b, 10.0, 0.0), (a, 0.5, 0.5)];
        for (id, x, y) in moves {
            tree.set_position(id, Vec2::new(x, y)).unwrap();
            for node in [b, c] {
                let parent = tree.panel(node).unwrap().parent().unwrap();
                assert_eq!(
                    tree.global_position(node).unwrap(),
                    tree.global_position(parent).unwrap() + tree.panel(node).unwrap().position
                );
            }
        }
        assert_eq!(tree.global_position(c).unwrap(), Vec2::new(9.5, 2.5));
        assert_eq!(tree.bounds(c).unwrap().origin, Vec2::new(9.5, 2.5));
    }

    // ── structure ─────────────────────────────────────────────────────────

    #[test]
    fn reparent_detaches_from_old_parent() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert_root(Panel::new("b"));
        let c = tree.insert(a, Panel::new("c")).unwrap();

        tree.add_child(b, c).unwrap();
        assert!(tree.panel(a).unwrap().children().is_empty());
        assert_eq!(tree.panel(b).unwrap().children(), &[c]);
        assert_eq!(tree.panel(c).unwrap().parent(), Some(b));

        tree.add_child(a, b).unwrap();
        assert_eq!(tree.roots(), &[a]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert(a, Panel::new("b")).unwrap();
        let c = tree.insert(b, Panel::new("c")).unwrap();

        assert!(matches!(tree.add_child(c, a), Err(UiError::CycleDetected { .. })));
        assert!(matches!(tree.add_child(a, a), Err(UiError::CycleDetected { .. })));
        assert_eq!(tree.panel(b).unwrap().parent(), Some(a));
    }

    #[test]
    fn remove_drops_subtree_and_stale_ids_fail() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert(a, Panel::new("b")).unwrap();
        let c = tree.insert(b, Panel::new("c")).unwrap();

        assert_eq!(tree.remove(b).unwrap(), 2);
        assert!(tree.panel(a).unwrap().children().is_empty());
        assert!(matches!(tree.global_position(c), Err(UiError::NodeNotFound(_))));
        assert!(tree.set_position(b, Vec2::zero()).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn detach_makes_a_root_and_find_by_name_searches_all() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert(a, Panel::new("b").at(1.0, 1.0)).unwrap();
        assert_eq!(tree.find_by_name("b"), Some(b));
        tree.detach(b).unwrap();
        assert_eq!(tree.roots(), &[a, b]);
        assert_eq!(tree.global_position(b).unwrap(), Vec2::new(1.0, 1.0));
        assert_eq!(tree.find_by_name("nope"), None);
    }

    // ── widgets ───────────────────────────────────────────────────────────

    #[test]
    fn typed_widget_lookup() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let w = tree.add_widget(a, Slider::new(0.0, 1.0)).unwrap();
        assert!(tree.widget::<Slider>(a, w).is_ok());
        assert!(matches!(tree.widget::<Button>(a, w), Err(UiError::WidgetTypeMismatch { .. })));
        tree.remove_widget(a, w).unwrap();
        assert!(matches!(tree.widget::<Slider>(a, w), Err(UiError::WidgetNotFound { .. })));
    }

    #[test]
    fn button_in_panel_fires_once() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut tree = UiTree::new();
        let root = tree.insert_root(Panel::new("root").size(400.0, 400.0));
        let btn = tree
            .add_widget(root, Button::new().at(100.0, 100.0).size(50.0, 20.0).on_press(move || h.set(h.get() + 1)))
            .unwrap();

        step(&mut tree, at(110.0, 105.0).with_left(true));
        step(&mut tree, at(110.0, 105.0));
        assert_eq!(hits.get(), 1);
        assert_eq!(tree.widget::<Button>(root, btn).unwrap().state(), PressState::Hover);
    }

    // ── options through the tree ──────────────────────────────────────────

    #[test]
    fn movable_panel_drags_its_children() {
        let mut tree = UiTree::new();
        let win = tree.insert_root(Panel::new("win").at(10.0, 10.0).size(50.0, 50.0).movable());
        let child = tree.insert(win, Panel::new("child").at(5.0, 5.0)).unwrap();

        step(&mut tree, at(20.0, 20.0));
        step(&mut tree, at(20.0, 20.0).with_left(true));
        step(&mut tree, at(30.0, 35.0).with_left(true));

        assert_eq!(tree.panel(win).unwrap().position, Vec2::new(20.0, 25.0));
        assert_eq!(tree.global_position(child).unwrap(), Vec2::new(25.0, 30.0));
        let notes = tree.drain_notifications();
        assert_eq!(notes, vec![TreeNotification { node: win, kind: Notification::Moved { position: Vec2::new(20.0, 25.0) } }]);
        assert!(tree.drain_notifications().is_empty());
    }

    #[test]
    fn selectable_is_not_exclusive() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a").size(100.0, 100.0).selectable());
        let b = tree.insert(a, Panel::new("b").size(50.0, 50.0).selectable()).unwrap();

        step(&mut tree, at(10.0, 10.0));
        step(&mut tree, at(10.0, 10.0).with_left(true));
        assert!(tree.panel(a).unwrap().options().is_selected());
        assert!(tree.panel(b).unwrap().options().is_selected());
    }

    #[test]
    fn resizable_grip_uses_secondary_button() {
        let mut tree = UiTree::new();
        let p = tree.insert_root(Panel::new("p").at(10.0, 10.0).size(100.0, 100.0));
        assert!(tree.attach_resizable(p, Vec2::new(16.0, 16.0)).unwrap());
        assert!(!tree.attach_resizable(p, Vec2::new(1.0, 1.0)).unwrap());

        step(&mut tree, at(105.0, 105.0));
        step(&mut tree, at(105.0, 105.0).with_right(true));
        step(&mut tree, at(145.0, 125.0).with_right(true));
        assert_eq!(tree.panel(p).unwrap().size, Vec2::new(140.0, 120.0));

        assert!(tree.detach_option(p, OptionKind::Resizable).unwrap());
        step(&mut tree, at(200.0, 200.0).with_right(true));
        assert_eq!(tree.panel(p).unwrap().size, Vec2::new(140.0, 120.0));
    }

    #[test]
    fn invisible_nodes_skip_update_and_render() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut tree = UiTree::new();
        let p = tree.insert_root(
            Panel::new("p")
                .visible(false)
                .draw_rect("bg", RectPrimitive::new(10.0, 10.0))
                .with(Button::new().size(10.0, 10.0).on_press(move || h.set(h.get() + 1))),
        );
        step(&mut tree, at(5.0, 5.0).with_left(true));
        step(&mut tree, at(5.0, 5.0));
        assert_eq!(hits.get(), 0);
        assert!(rect_origins(&tree).is_empty());

        tree.set_visible(p, true).unwrap();
        assert_eq!(rect_origins(&tree).len(), 1);
    }

    // ── z order ───────────────────────────────────────────────────────────

    #[test]
    fn render_orders_siblings_by_z_and_children_over_parents() {
        let mut tree = UiTree::new();
        let bg = RectPrimitive::new(1.0, 1.0);
        let high = tree.insert_root(Panel::new("high").at(1.0, 0.0).z(5).draw_rect("r", bg.clone()));
        tree.insert_root(Panel::new("low").at(2.0, 0.0).z(1).draw_rect("r", bg.clone()));
        tree.insert(high, Panel::new("kid").at(10.0, 0.0).draw_rect("r", bg.clone())).unwrap();

        let xs: Vec<f32> = rect_origins(&tree).iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 1.0, 11.0]);
    }

    #[test]
    fn bring_to_front_raises_above_siblings() {
        let mut tree = UiTree::new();
        let bg = RectPrimitive::new(1.0, 1.0);
        let a = tree.insert_root(Panel::new("a").at(1.0, 0.0).draw_rect("r", bg.clone()));
        tree.insert_root(Panel::new("b").at(2.0, 0.0).z(3).draw_rect("r", bg.clone()));

        tree.bring_to_front(a).unwrap();
        assert_eq!(tree.panel(a).unwrap().effective_z(), 4);
        let xs: Vec<f32> = rect_origins(&tree).iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 1.0]);
    }

    #[test]
    fn widgets_render_in_z_order() {
        let mut tree = UiTree::new();
        tree.insert_root(
            Panel::new("p")
                .with(Button::new().at(1.0, 0.0).z(2).draw_rect("r", RectPrimitive::new(1.0, 1.0)))
                .with(Button::new().at(2.0, 0.0).z(0).draw_rect("r", RectPrimitive::new(1.0, 1.0))),
        );
        let xs: Vec<f32> = rect_origins(&tree).iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 1.0]);
    }

    #[test]
    fn debug_overlay_marks_resize_grip() {
        let mut tree = UiTree::new();
        tree.insert_root(Panel::new("p").size(40.0, 40.0).resizable(Vec2::splat(16.0)).debug(true));
        let origins = rect_origins(&tree);
        assert_eq!(origins, vec![Vec2::zero(), Vec2::new(30.0, 30.0)]);
    }

    // ── deferred mutation ─────────────────────────────────────────────────

    #[test]
    fn callbacks_mutate_structure_after_traversal() {
        let mut tree = UiTree::new();
        let commands = tree.commands();
        let root = tree.insert_root(Panel::new("root").size(100.0, 100.0));
        let spawned = Rc::new(Cell::new(0));
        let s = spawned.clone();
        tree.add_widget(
            root,
            Button::new().size(20.0, 20.0).on_press(move || {
                s.set(s.get() + 1);
                commands.spawn(Some(root), Panel::new("popup"));
                commands.set_position(root, Vec2::new(50.0, 50.0));
            }),
        )
        .unwrap();

        step(&mut tree, at(5.0, 5.0).with_left(true));
        step(&mut tree, at(5.0, 5.0));
        assert_eq!(spawned.get(), 1);

        let popup = tree.find_by_name("popup").unwrap();
        assert_eq!(tree.panel(popup).unwrap().parent(), Some(root));
        assert_eq!(tree.global_position(popup).unwrap(), Vec2::new(50.0, 50.0));
        assert!(tree.commands().is_empty());
    }

    #[test]
    fn commands_for_missing_nodes_are_dropped() {
        let mut tree = UiTree::new();
        let a = tree.insert_root(Panel::new("a"));
        let b = tree.insert_root(Panel::new("b"));
        tree.remove(b).unwrap();

        let cmds = tree.commands();
        cmds.reparent(b, a);
        cmds.set_visible(a, false);
        cmds.reparent(a, a);
        assert_eq!(cmds.len(), 3);
        assert_eq!(tree.apply_pending(), 1);
        assert!(!tree.panel(a).unwrap().visible);
    }

    // ── duplicate ─────────────────────────────────────────────────────────

    #[test]
    fn duplicate_copies_subtree_independently() {
        let mut tree = UiTree::new();
        let parent = tree.insert_root(Panel::new("parent"));
        let win = tree.insert(parent, Panel::new("win").at(3.0, 0.0).movable()).unwrap();
        let slider = tree.add_widget(win, Slider::new(0.0, 10.0).value(2.0)).unwrap();
        tree.insert(win, Panel::new("child")).unwrap();

        let copy = tree.duplicate(win).unwrap();
        assert_eq!(tree.panel(copy).unwrap().parent(), Some(parent));
        assert_eq!(tree.panel(copy).unwrap().children().len(), 1);
        assert!(tree.panel(copy).unwrap().options().has(OptionKind::Movable));
        assert_eq!(tree.len(), 5);

        tree.widget_mut::<Slider>(copy, slider).unwrap().set_value(9.0);
        assert_eq!(tree.widget::<Slider>(win, slider).unwrap().get_value(), 2.0);
        assert_eq!(tree.widget::<Slider>(copy, slider).unwrap().get_value(), 9.0);
    }

    #[test]
    fn stamped_buttons_share_callback_not_state() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let template = Button::new().size(10.0, 10.0).on_press(move || h.set(h.get() + 1));

        let mut tree = UiTree::new();
        let p = tree.insert_root(Panel::new("p"));
        let first = tree.add_widget(p, template.clone().at(0.0, 0.0)).unwrap();
        let second = tree.add_widget(p, template.at(20.0, 0.0)).unwrap();

        step(&mut tree, at(25.0, 5.0).with_left(true));
        assert_eq!(tree.widget::<Button>(p, first).unwrap().state(), PressState::Normal);
        assert_eq!(tree.widget::<Button>(p, second).unwrap().state(), PressState::Pressed);
        step(&mut tree, at(25.0, 5.0));
        assert_eq!(hits.get(), 1);
    }

    // ── host input ────────────────────────────────────────────────────────

    fn left(state: ButtonState) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state }
    }

    /// Feeds `events` through an `InputState` as one frame and runs an update.
    fn host_frame(tree: &mut UiTree, state: &mut InputState, events: Vec<InputEvent>) {
        let mut frame = InputFrame::default();
        for ev in events {
            state.apply_event(&mut frame, ev);
        }
        step(tree, state.snapshot(&frame, Instant::now()));
    }

    #[test]
    fn click_within_one_host_frame_presses_button_once() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut tree = UiTree::new();
        tree.insert_root(
            Panel::new("p")
                .at(100.0, 100.0)
                .size(50.0, 50.0)
                .with(Button::new().size(20.0, 20.0).on_press(move || h.set(h.get() + 1))),
        );

        let mut state = InputState::default();
        let click = vec![
            InputEvent::PointerMoved { x: 110.0, y: 105.0 },
            left(ButtonState::Pressed),
            left(ButtonState::Released),
        ];
        host_frame(&mut tree, &mut state, click);
        for _ in 0..3 {
            host_frame(&mut tree, &mut state, Vec::new());
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn drag_released_off_surface_keeps_node_in_place() {
        let mut tree = UiTree::new();
        let id = tree.insert_root(Panel::new("win").size(50.0, 50.0).movable().resizable(Vec2::splat(16.0)));
        let mut state = InputState::default();

        host_frame(&mut tree, &mut state, vec![InputEvent::PointerMoved { x: 20.0, y: 20.0 }, left(ButtonState::Pressed)]);
        host_frame(&mut tree, &mut state, vec![InputEvent::PointerLeft]);
        host_frame(&mut tree, &mut state, vec![left(ButtonState::Released)]);
        host_frame(&mut tree, &mut state, vec![InputEvent::PointerMoved { x: 30.0, y: 30.0 }]);

        let panel = tree.panel(id).unwrap();
        assert_eq!(panel.position, Vec2::zero());
        assert_eq!(panel.size, Vec2::new(50.0, 50.0));
        assert!(!panel.options().movable().unwrap().is_moving());
    }

    #[test]
    fn node_inserted_under_held_button_sees_no_press() {
        let mut tree = UiTree::new();
        step(&mut tree, at(20.0, 20.0).with_left(true));

        let late = tree.insert_root(Panel::new("late").size(50.0, 50.0).selectable().movable());
        tree.commands().spawn(None, Panel::new("spawned").size(50.0, 50.0).selectable().movable());
        step(&mut tree, at(20.0, 20.0).with_left(true));
        step(&mut tree, at(30.0, 30.0).with_left(true));

        let spawned = tree.find_by_name("spawned").unwrap();
        for id in [late, spawned] {
            let panel = tree.panel(id).unwrap();
            assert!(!panel.options().is_selected());
            assert_eq!(panel.position, Vec2::zero());
        }

        // A fresh press still registers.
        step(&mut tree, at(30.0, 30.0));
        step(&mut tree, at(30.0, 30.0).with_left(true));
        assert!(tree.panel(late).unwrap().options().is_selected());
    }
}
