//! fOS DOM - Document Object Model
//!
//! Arena-backed, mutable DOM tree. Removing a node only detaches it, so ids
//! handed out to observers (such as a screen reader cursor) can always be
//! checked with [`Document::is_attached`].

mod node;
mod tree;
mod document;
mod operations;
mod dom_events;

pub use node::{Node, NodeData, ElementData, TextData, Attribute};
pub use tree::{DomTree, Children, Ancestors};
pub use document::Document;
pub use operations::{DomError, DomResult, NodeOperations};
pub use dom_events::{DomEvent, DomEventType};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Missing link sentinel
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena slot
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
