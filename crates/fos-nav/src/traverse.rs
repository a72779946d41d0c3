//! Content leaf traversal
//!
//! Walks the leaves under the navigation root in document order (or its
//! reverse) from a [`Cursor`]. Hidden subtrees are skipped, and controls,
//! media and frames are never descended into.

use fos_dom::{Document, NodeId};

use crate::classify::{has_content, is_leaf, NodeClass, classify};
use crate::cursor::Cursor;

/// Iterator over content leaves in one direction
pub struct Leaves<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
    reversed: bool,
    /// Also yield blank text and line breaks
    fillers: bool,
}

/// Content leaves from a point.
///
/// A leaf holding the point is yielded first; callers decide which of its
/// units lie past the point. A container point yields the leaves inside it
/// when its index is `0` going forward or `END` going back.
pub fn leaves_from(doc: &Document, point: Cursor, reversed: bool) -> Leaves<'_> {
    let root = doc.nav_root();
    let tree = doc.tree();
    let mut walk = Leaves { doc, root, next: None, reversed, fillers: false };
    if !tree.contains(root, point.node) {
        return walk;
    }
    let point = normalize(doc, root, point);

    if let Some(hidden) = topmost_hidden(doc, root, point.node) {
        walk.next = if reversed { walk.prev_node(hidden) } else { walk.skip_subtree(hidden) };
        return walk;
    }

    walk.next = if is_leaf(doc, point.node) {
        Some(point.node)
    } else if reversed {
        if point.index == Cursor::END { Some(walk.deepest_last(point.node)) } else { walk.prev_node(point.node) }
    } else if point.index == Cursor::END {
        walk.skip_subtree(point.node)
    } else {
        Some(point.node)
    };
    walk
}

/// Like [`leaves_from`], but also yields the blank text nodes and `br`
/// elements that sit between content leaves
pub(crate) fn inline_leaves_from(doc: &Document, point: Cursor, reversed: bool) -> Leaves<'_> {
    Leaves { fillers: true, ..leaves_from(doc, point, reversed) }
}

/// True for leaves that carry layout but nothing to say
pub(crate) fn is_filler(doc: &Document, leaf: NodeId) -> bool {
    doc.is_text(leaf) || doc.tag(leaf) == Some("br")
}

/// First (or last) content leaf under the navigation root
pub fn first_leaf(doc: &Document, reversed: bool) -> Option<NodeId> {
    let root = doc.nav_root();
    let point = if reversed { Cursor::after(root) } else { Cursor::before(root) };
    leaves_from(doc, point, reversed).next()
}

/// Content leaves inside a container, in document order
pub fn leaves_within(doc: &Document, container: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    leaves_from(doc, Cursor::before(container), false).take_while(move |&leaf| doc.tree().contains(container, leaf))
}

/// A point inside a control or media element moves to the element itself
fn normalize(doc: &Document, root: NodeId, point: Cursor) -> Cursor {
    let outer_leaf = doc
        .tree()
        .ancestors(point.node)
        .take_while(|&a| a != root)
        .filter(|&a| matches!(classify(doc, a), NodeClass::Control | NodeClass::Media))
        .last();
    match outer_leaf {
        Some(leaf) => Cursor::before(leaf),
        None => point,
    }
}

fn topmost_hidden(doc: &Document, root: NodeId, node: NodeId) -> Option<NodeId> {
    std::iter::once(node)
        .chain(doc.tree().ancestors(node).take_while(|&a| a != root))
        .filter(|&n| doc.is_element_hidden(n))
        .last()
}

impl Leaves<'_> {
    fn descends(&self, node: NodeId) -> bool {
        !is_leaf(self.doc, node) && !self.doc.is_element_hidden(node)
    }

    /// Next node in pre-order after a node's subtree
    fn skip_subtree(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.doc.tree();
        let mut n = node;
        loop {
            if n == self.root {
                return None;
            }
            if let Some(sib) = tree.next_sibling(n) {
                return Some(sib);
            }
            n = tree.parent(n)?;
        }
    }

    fn next_node(&self, node: NodeId) -> Option<NodeId> {
        if self.descends(node) {
            if let Some(child) = self.doc.tree().first_child(node) {
                return Some(child);
            }
        }
        self.skip_subtree(node)
    }

    fn deepest_last(&self, node: NodeId) -> NodeId {
        let tree = self.doc.tree();
        let mut n = node;
        while self.descends(n) {
            match tree.last_child(n) {
                Some(last) => n = last,
                None => break,
            }
        }
        n
    }

    fn prev_node(&self, node: NodeId) -> Option<NodeId> {
        if node == self.root {
            return None;
        }
        let tree = self.doc.tree();
        if let Some(sib) = tree.prev_sibling(node) {
            return Some(self.deepest_last(sib));
        }
        tree.parent(node).filter(|&p| p != self.root)
    }
}

impl Iterator for Leaves<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.next?;
            self.next = if self.reversed { self.prev_node(node) } else { self.next_node(node) };
            if is_leaf(self.doc, node)
                && (has_content(self.doc, node) || (self.fillers && is_filler(self.doc, node)))
            {
                return Some(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Document, leaves: impl Iterator<Item = NodeId>) -> Vec<String> {
        leaves.map(|l| crate::classify::leaf_text(doc, l)).collect()
    }

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        let p1 = doc.append_element(body, "p").unwrap();
        doc.append_text(p1, "one").unwrap();
        let em = doc.append_element(p1, "em").unwrap();
        doc.append_text(em, "two").unwrap();
        let hidden = doc.append_element_with_text(body, "div", "secret").unwrap();
        doc.set_attribute(hidden, "hidden", "").unwrap();
        let p2 = doc.append_element_with_text(body, "p", "three").unwrap();
        (doc, p1, p2)
    }

    #[test]
    fn test_forward_and_reverse_order() {
        let (doc, _, _) = sample();
        let body = doc.body();
        let forward = texts(&doc, leaves_from(&doc, Cursor::before(body), false));
        assert_eq!(forward, vec!["one", "two", "three"]);
        let backward = texts(&doc, leaves_from(&doc, Cursor::after(body), true));
        assert_eq!(backward, vec!["three", "two", "one"]);
    }

    #[test]
    fn test_container_points() {
        let (doc, p1, p2) = sample();
        assert_eq!(texts(&doc, leaves_from(&doc, Cursor::after(p1), false)), vec!["three"]);
        assert_eq!(texts(&doc, leaves_from(&doc, Cursor::before(p2), true)), vec!["two", "one"]);
        assert_eq!(texts(&doc, leaves_within(&doc, p1)), vec!["one", "two"]);
    }

    #[test]
    fn test_start_inside_hidden_subtree() {
        let (doc, _, _) = sample();
        let hidden = doc.tree().children(doc.body()).nth(1).unwrap();
        let secret = doc.tree().first_child(hidden).unwrap();
        assert_eq!(texts(&doc, leaves_from(&doc, Cursor::before(secret), false)), vec!["three"]);
        assert_eq!(texts(&doc, leaves_from(&doc, Cursor::before(secret), true)), vec!["two", "one"]);
    }

    #[test]
    fn test_controls_are_not_descended() {
        let mut doc = Document::default();
        let body = doc.body();
        let button = doc.append_element(body, "button").unwrap();
        doc.append_element_with_text(button, "span", "Press").unwrap();
        let leaves: Vec<NodeId> = leaves_from(&doc, Cursor::before(body), false).collect();
        assert_eq!(leaves, vec![button]);
        assert_eq!(first_leaf(&doc, true), Some(button));
    }

    #[test]
    fn test_inline_leaves_include_fillers() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        let a = doc.append_text(p, "a").unwrap();
        let blank = doc.append_text(p, " ").unwrap();
        let br = doc.append_element(p, "br").unwrap();
        let b = doc.append_text(p, "b").unwrap();
        let all: Vec<NodeId> = inline_leaves_from(&doc, Cursor::before(p), false).collect();
        assert_eq!(all, vec![a, blank, br, b]);
        let content: Vec<NodeId> = leaves_from(&doc, Cursor::before(p), false).collect();
        assert_eq!(content, vec![a, b]);
    }

    #[test]
    fn test_detached_point_yields_nothing() {
        let (mut doc, p1, _) = sample();
        doc.remove(p1).unwrap();
        assert_eq!(leaves_from(&doc, Cursor::before(p1), false).count(), 0);
    }
}
