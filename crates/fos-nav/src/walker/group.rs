//! Group walker
//!
//! A group is a maximal run of consecutive content leaves that share the
//! same enclosing block, e.g. the text and links of one paragraph.

use fos_dom::{Document, NodeId};

use crate::classify::{group_key, leaf_len};
use crate::cursor::{Cursor, CursorSelection};
use crate::description::{describe_leaves, NavDescription};
use crate::traverse::leaves_from;
use crate::walker::{selected_leaves, Walker, WalkerKind};

#[derive(Debug, Clone)]
pub struct GroupWalker {
    max_chars: usize,
}

impl Default for GroupWalker {
    fn default() -> Self {
        Self { max_chars: 2000 }
    }
}

impl GroupWalker {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    fn span(first: NodeId, last: NodeId, reversed: bool) -> CursorSelection {
        CursorSelection::new(Cursor::before(first), Cursor::after(last), reversed)
    }

    /// True if the point lies at or before the start of `leaf` (after its end when reversed)
    fn leaf_ahead(doc: &Document, leaf: NodeId, point: Cursor, reversed: bool) -> bool {
        if reversed {
            point.index == Cursor::END || point.index >= leaf_len(doc, leaf)
        } else {
            point.index == 0
        }
    }

    /// Whole group containing a leaf
    pub fn group_of(doc: &Document, leaf: NodeId, reversed: bool) -> CursorSelection {
        let key = group_key(doc, leaf);
        let first = leaves_from(doc, Cursor::before(leaf), true)
            .take_while(|&l| group_key(doc, l) == key)
            .last()
            .unwrap_or(leaf);
        let last = leaves_from(doc, Cursor::after(leaf), false)
            .take_while(|&l| group_key(doc, l) == key)
            .last()
            .unwrap_or(leaf);
        Self::span(first, last, reversed)
    }
}

impl Walker for GroupWalker {
    fn kind(&self) -> WalkerKind {
        WalkerKind::Group
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let reversed = sel.reversed;
        let point = sel.focus();
        let mut leaves = leaves_from(doc, point, reversed).peekable();

        // A group the point is already inside is not "next"
        if let Some(&leaf) = leaves.peek() {
            if leaf == point.node && !Self::leaf_ahead(doc, leaf, point, reversed) {
                let key = group_key(doc, leaf);
                while leaves.next_if(|&l| group_key(doc, l) == key).is_some() {}
            }
        }

        let first = leaves.next()?;
        let key = group_key(doc, first);
        let mut last = first;
        while let Some(leaf) = leaves.next_if(|&l| group_key(doc, l) == key) {
            last = leaf;
        }
        Some(if reversed { Self::span(last, first, true) } else { Self::span(first, last, false) })
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let point = sel.start;
        let leaf = leaves_from(doc, point, sel.reversed)
            .next()
            .or_else(|| leaves_from(doc, point, !sel.reversed).next())?;
        Some(Self::group_of(doc, leaf, sel.reversed))
    }

    fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription> {
        let leaves = selected_leaves(doc, cur);
        describe_leaves(doc, prev.start.node, &leaves, String::new(), self.max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, Vec<NodeId>) {
        let mut doc = Document::default();
        let body = doc.body();
        let h1 = doc.append_element_with_text(body, "h1", "Title").unwrap();
        let p = doc.append_element(body, "p").unwrap();
        doc.append_text(p, "Read the ").unwrap();
        let a = doc.append_element_with_text(p, "a", "docs").unwrap();
        doc.set_attribute(a, "href", "/docs").unwrap();
        doc.append_text(p, " today.").unwrap();
        let loose = doc.append_text(body, "Footer").unwrap();
        (doc, vec![h1, p, loose])
    }

    fn spoken(walker: &GroupWalker, doc: &Document, sel: &CursorSelection) -> String {
        let prev = CursorSelection::collapsed(Cursor::before(doc.body()), false);
        walker.describe(doc, &prev, sel).iter().map(|d| d.spoken()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_groups_forward() {
        let (doc, _) = sample();
        let walker = GroupWalker::default();
        let first = walker.sync_to_page_beginning(&doc, false).unwrap();
        assert_eq!(spoken(&walker, &doc, &first), "heading 1 Title");
        let second = walker.next(&doc, &first).unwrap();
        assert_eq!(spoken(&walker, &doc, &second), "Read the docs link today.");
        let third = walker.next(&doc, &second).unwrap();
        assert_eq!(spoken(&walker, &doc, &third), "Footer");
        assert!(walker.next(&doc, &third).is_none());
    }

    #[test]
    fn test_groups_reverse_mirror_forward() {
        let (doc, _) = sample();
        let walker = GroupWalker::default();
        let mut forward = vec![walker.sync_to_page_beginning(&doc, false).unwrap()];
        while let Some(next) = walker.next(&doc, forward.last().unwrap()) {
            forward.push(next);
        }
        let mut backward = vec![walker.sync_to_page_beginning(&doc, true).unwrap()];
        while let Some(next) = walker.next(&doc, backward.last().unwrap()) {
            backward.push(next);
        }
        backward.reverse();
        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(&backward) {
            assert!(f.same_range(b));
        }
    }

    #[test]
    fn test_sync_expands_to_whole_group() {
        let (doc, nodes) = sample();
        let walker = GroupWalker::default();
        let link = doc.tree().children(nodes[1]).nth(1).unwrap();
        let synced = walker.sync(&doc, &CursorSelection::node(link, false)).unwrap();
        let first_text = doc.tree().first_child(nodes[1]).unwrap();
        let last_text = doc.tree().last_child(nodes[1]).unwrap();
        assert_eq!(synced.start, Cursor::before(first_text));
        assert_eq!(synced.end, Cursor::after(last_text));
    }

    #[test]
    fn test_next_from_inside_group_skips_rest_of_it() {
        let (doc, nodes) = sample();
        let walker = GroupWalker::default();
        let first_text = doc.tree().first_child(nodes[1]).unwrap();
        let mid_word = CursorSelection::new(Cursor::new(first_text, 5), Cursor::new(first_text, 8), false);
        let next = walker.next(&doc, &mid_word).unwrap();
        assert_eq!(next.start.node, nodes[2]);
    }
}
