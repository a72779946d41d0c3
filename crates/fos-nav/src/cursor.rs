//! Cursor positions
//!
//! A [`Cursor`] is a point in the document: a node plus an index. For text
//! nodes the index is a byte offset into the text. Atomic leaves (controls,
//! images, frames) are one unit long. For any node, `0` sits before its
//! subtree and [`Cursor::END`] after it.

use std::cmp::Ordering;

use fos_dom::{Document, NodeId};

/// A point in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub node: NodeId,
    pub index: usize,
}

impl Cursor {
    /// Index meaning "after everything in the node"
    pub const END: usize = usize::MAX;

    pub fn new(node: NodeId, index: usize) -> Self {
        Self { node, index }
    }

    /// Point before a node's content
    pub fn before(node: NodeId) -> Self {
        Self::new(node, 0)
    }

    /// Point after a node's content
    pub fn after(node: NodeId) -> Self {
        Self::new(node, Self::END)
    }

    /// Order two points in the document.
    ///
    /// Returns `None` when either node is disconnected from the other.
    pub fn compare(&self, doc: &Document, other: &Cursor) -> Option<Ordering> {
        let tree = doc.tree();
        if self.node == other.node {
            return Some(self.index.cmp(&other.index));
        }
        if tree.is_ancestor(self.node, other.node) {
            return Some(if self.index == Self::END { Ordering::Greater } else { Ordering::Less });
        }
        if tree.is_ancestor(other.node, self.node) {
            return Some(if other.index == Self::END { Ordering::Less } else { Ordering::Greater });
        }
        tree.compare_document_position(self.node, other.node)
    }
}

/// A range between two points, plus the direction of travel.
///
/// `start` never sorts after `end`; `reversed` only records which way the
/// user is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorSelection {
    pub start: Cursor,
    pub end: Cursor,
    pub reversed: bool,
}

impl CursorSelection {
    pub fn new(start: Cursor, end: Cursor, reversed: bool) -> Self {
        Self { start, end, reversed }
    }

    /// Empty selection at a point
    pub fn collapsed(point: Cursor, reversed: bool) -> Self {
        Self::new(point, point, reversed)
    }

    /// Selection spanning a whole node
    pub fn node(node: NodeId, reversed: bool) -> Self {
        Self::new(Cursor::before(node), Cursor::after(node), reversed)
    }

    /// The node the selection starts in
    pub fn absolute_start(&self) -> Cursor {
        self.start
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Same range, new direction
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Point traversal continues from: the end going forward, the start going back
    pub fn focus(&self) -> Cursor {
        if self.reversed { self.start } else { self.end }
    }

    /// True if both selections cover the same range, whatever their direction
    pub fn same_range(&self, other: &CursorSelection) -> bool {
        self.start == other.start && self.end == other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_follows_direction() {
        let doc = Document::default();
        let body = doc.body();
        let sel = CursorSelection::new(Cursor::new(body, 2), Cursor::new(body, 5), false);
        assert_eq!(sel.focus().index, 5);
        assert_eq!(sel.with_reversed(true).focus().index, 2);
        assert!(sel.same_range(&sel.with_reversed(true)));
        assert!(!sel.is_collapsed());
    }

    #[test]
    fn test_compare_points() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element_with_text(body, "p", "one").unwrap();
        let q = doc.append_element_with_text(body, "p", "two").unwrap();
        let one = doc.tree().first_child(p).unwrap();

        assert_eq!(Cursor::new(one, 1).compare(&doc, &Cursor::new(one, 2)), Some(Ordering::Less));
        assert_eq!(Cursor::before(p).compare(&doc, &Cursor::new(one, 0)), Some(Ordering::Less));
        assert_eq!(Cursor::after(p).compare(&doc, &Cursor::new(one, 3)), Some(Ordering::Greater));
        assert_eq!(Cursor::new(one, 3).compare(&doc, &Cursor::before(q)), Some(Ordering::Less));
    }
}
