use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use derma_engine::coords::Vec2;

use super::NodeId;
use super::panel::Panel;

/// A structural change waiting for the tree to finish its traversal.
#[derive(Debug)]
pub enum TreeCommand {
    /// Insert under `parent`, or as a root when `None`.
    Spawn { parent: Option<NodeId>, panel: Panel },
    Reparent { child: NodeId, parent: NodeId },
    Detach(NodeId),
    Remove(NodeId),
    SetVisible(NodeId, bool),
    SetPosition(NodeId, Vec2),
    BringToFront(NodeId),
}

/// Cloneable queue of [`TreeCommand`]s.
///
/// Widget callbacks run while the tree is being traversed and cannot borrow
/// it; they capture one of these instead. Queued commands are applied after
/// the current `update` finishes, or at the start of the next one.
#[derive(Clone, Default)]
pub struct TreeCommands(Rc<RefCell<Vec<TreeCommand>>>);

impl TreeCommands {
    pub fn push(&self, cmd: TreeCommand) {
        self.0.borrow_mut().push(cmd);
    }

    pub fn spawn(&self, parent: Option<NodeId>, panel: Panel) {
        self.push(TreeCommand::Spawn { parent, panel });
    }

    pub fn reparent(&self, child: NodeId, parent: NodeId) {
        self.push(TreeCommand::Reparent { child, parent });
    }

    pub fn detach(&self, node: NodeId) {
        self.push(TreeCommand::Detach(node));
    }

    pub fn remove(&self, node: NodeId) {
        self.push(TreeCommand::Remove(node));
    }

    pub fn set_visible(&self, node: NodeId, visible: bool) {
        self.push(TreeCommand::SetVisible(node, visible));
    }

    pub fn set_position(&self, node: NodeId, position: Vec2) {
        self.push(TreeCommand::SetPosition(node, position));
    }

    pub fn bring_to_front(&self, node: NodeId) {
        self.push(TreeCommand::BringToFront(node));
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn take(&self) -> Vec<TreeCommand> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl fmt::Debug for TreeCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeCommands({} pending)", self.len())
    }
}
