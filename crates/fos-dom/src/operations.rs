//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore, replaceChild.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node {0:?} is not a child")]
    NotAChild(NodeId),
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node, detaching it from any previous parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node. The child keeps its own subtree but is detached.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node (append when `ref_child` is None)
    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId>;

    /// Replace a child with another node, returning the old child
    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<NodeId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomError::HierarchyRequest.to_string(), "Hierarchy request error");
        assert!(DomError::NotAChild(NodeId(3)).to_string().contains("not a child"));
    }
}
