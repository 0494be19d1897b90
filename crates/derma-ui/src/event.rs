use derma_engine::coords::Vec2;
use derma_engine::input::{InputSnapshot, MouseButton};

use crate::tree::NodeId;

/// Pointer part of an input snapshot, kept per node to detect edges.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub cursor: Vec2,
    /// Pointer is over the surface.
    pub inside: bool,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl PointerState {
    pub fn from_snapshot(input: &InputSnapshot) -> Self {
        Self {
            cursor: input.cursor,
            inside: input.pointer_inside,
            left: input.left,
            right: input.right,
            middle: input.middle,
        }
    }

    pub fn down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
            MouseButton::Other(_) => false,
        }
    }
}

/// Edge-triggered pseudo-events a node derives each frame by diffing the
/// current pointer against the one it saw last frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NodeEvent {
    /// `button` went down this frame.
    MouseDown { button: MouseButton, cursor: Vec2 },
    /// `button` came up this frame.
    MouseUp { button: MouseButton, cursor: Vec2 },
    /// Sent every frame the pointer is over the surface, moved or not.
    MouseMove { cursor: Vec2 },
}

impl NodeEvent {
    pub fn cursor(&self) -> Vec2 {
        match *self {
            NodeEvent::MouseDown { cursor, .. }
            | NodeEvent::MouseUp { cursor, .. }
            | NodeEvent::MouseMove { cursor } => cursor,
        }
    }

    /// Down/up edges for every tracked button, then one move.
    ///
    /// While the pointer is off the surface only releases are reported, so a
    /// drag still ends but nothing is hit or moved.
    pub fn synthesize(prev: &PointerState, cur: &PointerState) -> Vec<NodeEvent> {
        let mut out = Vec::with_capacity(2);
        for button in MouseButton::TRACKED {
            match (prev.down(button), cur.down(button)) {
                (false, true) if cur.inside => out.push(NodeEvent::MouseDown { button, cursor: cur.cursor }),
                (true, false) => out.push(NodeEvent::MouseUp { button, cursor: cur.cursor }),
                _ => {}
            }
        }
        if cur.inside {
            out.push(NodeEvent::MouseMove { cursor: cur.cursor });
        }
        out
    }
}

/// What an interaction option reports after handling an event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Notification {
    /// Selection mirror flipped.
    Selected(bool),
    /// Node's local position changed.
    Moved { position: Vec2 },
    /// Node's size changed.
    Resized { size: Vec2 },
}

/// A notification tagged with the node it came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TreeNotification {
    pub node: NodeId,
    pub kind: Notification,
}
