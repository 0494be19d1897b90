//! Attachable interaction behaviours: Selectable, Movable, Resizable.
//!
//! The set is closed, so a node holds one optional slot per kind instead of a
//! heterogeneous list. Each frame the tree feeds the node's synthesized
//! [`NodeEvent`]s through [`NodeOptions::dispatch`]; options mutate the
//! node's geometry and report what changed as [`Notification`]s.

use derma_engine::coords::{Rect, Vec2};
use derma_engine::input::MouseButton;

use crate::event::{NodeEvent, Notification};

/// Side length of the resize grip in the node's bottom-right corner.
pub const RESIZE_HANDLE: f32 = 10.0;

/// Default floor for Resizable.
pub const DEFAULT_MIN_SIZE: Vec2 = Vec2::new(16.0, 16.0);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OptionKind {
    Selectable,
    Movable,
    Resizable,
}

/// The slice of node state options may read and write.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeGeometry {
    /// Local position (relative to the parent).
    pub position: Vec2,
    pub size: Vec2,
    /// Parent's global position; global = parent_global + position.
    pub parent_global: Vec2,
}

impl NodeGeometry {
    pub fn global(&self) -> Vec2 {
        self.parent_global + self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.global(), self.size)
    }

    /// Resize grip, anchored at the bottom-right corner.
    pub fn resize_handle(&self) -> Rect {
        let corner = self.global() + self.size;
        Rect::from_origin_size(corner - Vec2::splat(RESIZE_HANDLE), Vec2::splat(RESIZE_HANDLE))
    }
}

// ── Selectable ────────────────────────────────────────────────────────────

/// Mirrors whether the last primary press landed on the node.
///
/// Not exclusive: several nodes can be selected at once (e.g. a child and the
/// parent it sits on).
#[derive(Debug, Clone, Default)]
pub struct Selectable {
    selected: bool,
}

impl Selectable {
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    fn handle(&mut self, ev: &NodeEvent, geom: &NodeGeometry) -> Option<Notification> {
        let NodeEvent::MouseDown { button: MouseButton::Left, cursor } = *ev else {
            return None;
        };
        let selected = geom.bounds().contains(cursor);
        if selected == self.selected {
            return None;
        }
        self.selected = selected;
        Some(Notification::Selected(selected))
    }
}

// ── Movable ───────────────────────────────────────────────────────────────

/// Drag the node with the primary button.
#[derive(Debug, Clone, Default)]
pub struct Movable {
    moving: bool,
    offset: Vec2,
}

impl Movable {
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    fn handle(&mut self, ev: &NodeEvent, geom: &mut NodeGeometry) -> Option<Notification> {
        match *ev {
            NodeEvent::MouseDown { button: MouseButton::Left, cursor } if geom.bounds().contains(cursor) => {
                self.moving = true;
                self.offset = cursor - geom.position;
                None
            }
            NodeEvent::MouseUp { button: MouseButton::Left, .. } => {
                self.moving = false;
                None
            }
            NodeEvent::MouseMove { cursor } if self.moving => {
                let position = cursor - self.offset;
                if position == geom.position {
                    return None;
                }
                geom.position = position;
                Some(Notification::Moved { position })
            }
            _ => None,
        }
    }
}

// ── Resizable ─────────────────────────────────────────────────────────────

/// Resize the node by dragging its bottom-right grip with the secondary button.
#[derive(Debug, Clone)]
pub struct Resizable {
    resizing: bool,
    offset: Vec2,
    min_size: Vec2,
}

impl Resizable {
    pub fn new(min_size: Vec2) -> Self {
        Self { resizing: false, offset: Vec2::zero(), min_size }
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    fn handle(&mut self, ev: &NodeEvent, geom: &mut NodeGeometry) -> Option<Notification> {
        match *ev {
            NodeEvent::MouseDown { button: MouseButton::Right, cursor } if geom.resize_handle().contains(cursor) => {
                self.resizing = true;
                self.offset = cursor - (geom.position + geom.size);
                None
            }
            NodeEvent::MouseUp { button: MouseButton::Right, .. } => {
                self.resizing = false;
                None
            }
            NodeEvent::MouseMove { cursor } if self.resizing => {
                let size = ((cursor - self.offset) - geom.position).max(self.min_size);
                if size == geom.size {
                    return None;
                }
                geom.size = size;
                Some(Notification::Resized { size })
            }
            _ => None,
        }
    }
}

impl Default for Resizable {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE)
    }
}

// ── NodeOptions ───────────────────────────────────────────────────────────

/// One slot per option kind.
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    selectable: Option<Selectable>,
    movable: Option<Movable>,
    resizable: Option<Resizable>,
}

impl NodeOptions {
    /// Attaches a Selectable. Returns `false` (and changes nothing) if one
    /// is already attached.
    pub fn attach_selectable(&mut self) -> bool {
        attach(&mut self.selectable, Selectable::default())
    }

    pub fn attach_movable(&mut self) -> bool {
        attach(&mut self.movable, Movable::default())
    }

    pub fn attach_resizable(&mut self, min_size: Vec2) -> bool {
        attach(&mut self.resizable, Resizable::new(min_size))
    }

    /// Removes the option and whatever state it held. Returns whether one was attached.
    pub fn detach(&mut self, kind: OptionKind) -> bool {
        match kind {
            OptionKind::Selectable => self.selectable.take().is_some(),
            OptionKind::Movable => self.movable.take().is_some(),
            OptionKind::Resizable => self.resizable.take().is_some(),
        }
    }

    pub fn has(&self, kind: OptionKind) -> bool {
        match kind {
            OptionKind::Selectable => self.selectable.is_some(),
            OptionKind::Movable => self.movable.is_some(),
            OptionKind::Resizable => self.resizable.is_some(),
        }
    }

    pub fn selectable(&self) -> Option<&Selectable> {
        self.selectable.as_ref()
    }

    pub fn movable(&self) -> Option<&Movable> {
        self.movable.as_ref()
    }

    pub fn resizable(&self) -> Option<&Resizable> {
        self.resizable.as_ref()
    }

    /// True when a Selectable is attached and currently selected.
    pub fn is_selected(&self) -> bool {
        self.selectable.as_ref().is_some_and(Selectable::is_selected)
    }

    /// Same options with all transient interaction state dropped.
    pub fn reset(&self) -> Self {
        Self {
            selectable: self.selectable.as_ref().map(|_| Selectable::default()),
            movable: self.movable.as_ref().map(|_| Movable::default()),
            resizable: self.resizable.as_ref().map(|r| Resizable::new(r.min_size)),
        }
    }

    /// Feeds one event through every attached option.
    ///
    /// Resizable runs first so a press on the grip is seen before the node
    /// moves; Selectable last so it tests the final bounds.
    pub fn dispatch(&mut self, ev: &NodeEvent, geom: &mut NodeGeometry) -> Vec<Notification> {
        let mut out = Vec::new();
        if let Some(r) = &mut self.resizable {
            out.extend(r.handle(ev, geom));
        }
        if let Some(m) = &mut self.movable {
            out.extend(m.handle(ev, geom));
        }
        if let Some(s) = &mut self.selectable {
            out.extend(s.handle(ev, geom));
        }
        out
    }
}

fn attach<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}
