//! Linear text
//!
//! The text of one group run laid end to end, so that words and sentences
//! read straight through inline markup. Built fresh on every visit; the
//! document may have changed since the last one.

use fos_dom::{Document, NodeId};

use crate::classify::{collapse_whitespace, group_key, has_content, is_atomic, leaf_text};
use crate::cursor::{Cursor, CursorSelection};
use crate::traverse::inline_leaves_from;

/// Stand-in for atomic leaves with no label, so they still form a unit
const OBJECT_REPLACEMENT: &str = "\u{FFFC}";

#[derive(Debug, Clone, Copy)]
struct Piece {
    leaf: NodeId,
    start: usize,
    end: usize,
    atomic: bool,
}

/// Text of a run of leaves with a map back to the leaves
#[derive(Debug, Clone)]
pub(crate) struct LinearText {
    text: String,
    pieces: Vec<Piece>,
}

impl LinearText {
    /// The run of leaves sharing a group key with `anchor`.
    ///
    /// Blank text and line breaks inside the run are kept so that the
    /// spacing between inline elements survives.
    pub(crate) fn around(doc: &Document, anchor: NodeId) -> Self {
        let key = group_key(doc, anchor);
        let in_run = |doc: &Document, leaf: NodeId| group_key(doc, leaf) == key;
        let ends_run = |doc: &Document, leaf: NodeId| !in_run(doc, leaf) && has_content(doc, leaf);

        let mut before: Vec<NodeId> = inline_leaves_from(doc, Cursor::before(anchor), true)
            .filter(|&l| l != anchor)
            .take_while(|&l| !ends_run(doc, l))
            .filter(|&l| in_run(doc, l))
            .collect();
        before.reverse();
        let after = inline_leaves_from(doc, Cursor::after(anchor), false)
            .filter(|&l| l != anchor)
            .take_while(|&l| !ends_run(doc, l))
            .filter(|&l| in_run(doc, l));

        let mut linear = Self { text: String::new(), pieces: Vec::new() };
        for leaf in before.into_iter().chain(std::iter::once(anchor)).chain(after) {
            linear.push(doc, leaf);
        }
        linear
    }

    /// A single leaf on its own
    pub(crate) fn single(doc: &Document, leaf: NodeId) -> Self {
        let mut linear = Self { text: String::new(), pieces: Vec::new() };
        linear.push(doc, leaf);
        linear
    }

    fn push(&mut self, doc: &Document, leaf: NodeId) {
        let start = self.text.len();
        if let Some(text) = doc.text(leaf) {
            self.text.push_str(text);
        } else if doc.tag(leaf) == Some("br") {
            self.text.push('\n');
        } else {
            let label = collapse_whitespace(&leaf_text(doc, leaf));
            self.text.push_str(if label.is_empty() { OBJECT_REPLACEMENT } else { &label });
        }
        self.pieces.push(Piece { leaf, start, end: self.text.len(), atomic: is_atomic(doc, leaf) });
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn contains(&self, leaf: NodeId) -> bool {
        self.pieces.iter().any(|p| p.leaf == leaf)
    }

    pub(crate) fn first_leaf(&self) -> Option<NodeId> {
        self.pieces.first().map(|p| p.leaf)
    }

    pub(crate) fn last_leaf(&self) -> Option<NodeId> {
        self.pieces.last().map(|p| p.leaf)
    }

    fn piece(&self, leaf: NodeId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.leaf == leaf)
    }

    /// Offset of a point, if it lies on a leaf of this run
    pub(crate) fn offset_of(&self, point: Cursor) -> Option<usize> {
        let piece = self.piece(point.node)?;
        Some(if piece.atomic {
            if point.index == 0 { piece.start } else { piece.end }
        } else {
            piece.start + point.index.min(piece.end - piece.start)
        })
    }

    /// Offset where a leaf starts (ends when `at_end`)
    pub(crate) fn edge_of(&self, leaf: NodeId, at_end: bool) -> Option<usize> {
        self.piece(leaf).map(|p| if at_end { p.end } else { p.start })
    }

    /// Widen ranges that touch an atomic leaf to cover all of it, merging
    /// any ranges that then overlap
    pub(crate) fn snap(&self, ranges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            let start = match self.pieces.iter().find(|p| p.start <= start && start < p.end) {
                Some(p) if p.atomic => p.start,
                _ => start,
            };
            let end = match self.pieces.iter().find(|p| p.start < end && end <= p.end) {
                Some(p) if p.atomic => p.end,
                _ => end,
            };
            match out.last_mut() {
                Some(last) if start < last.1 => last.1 = last.1.max(end),
                _ => out.push((start, end)),
            }
        }
        out
    }

    fn start_cursor(&self, offset: usize) -> Option<Cursor> {
        let piece = self.pieces.iter().find(|p| p.start <= offset && offset < p.end)?;
        Some(if piece.atomic { Cursor::before(piece.leaf) } else { Cursor::new(piece.leaf, offset - piece.start) })
    }

    fn end_cursor(&self, offset: usize) -> Option<Cursor> {
        let piece = self.pieces.iter().find(|p| p.start < offset && offset <= p.end)?;
        Some(if piece.atomic { Cursor::new(piece.leaf, 1) } else { Cursor::new(piece.leaf, offset - piece.start) })
    }

    /// Selection covering a range of the text
    pub(crate) fn selection(&self, (start, end): (usize, usize), reversed: bool) -> Option<CursorSelection> {
        Some(CursorSelection::new(self.start_cursor(start)?, self.end_cursor(end)?, reversed))
    }

    /// Text under a selection whose ends both lie in this run
    pub(crate) fn slice(&self, sel: &CursorSelection) -> Option<&str> {
        let start = self.offset_of(sel.start)?;
        let end = self.offset_of(sel.end)?;
        self.text.get(start..end)
    }
}
