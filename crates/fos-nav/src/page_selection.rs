//! Page selection
//!
//! A text selection the user grows by navigating: the anchor stays put and
//! each move extends (or shrinks) the selection to the new position.

use std::cmp::Ordering;

use fos_dom::Document;

use crate::classify::leaf_text;
use crate::cursor::{Cursor, CursorSelection};
use crate::traverse::leaves_from;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    anchor: CursorSelection,
    focus: CursorSelection,
    shrinking: bool,
}

impl PageSelection {
    pub fn new(anchor: CursorSelection) -> Self {
        Self { anchor, focus: anchor, shrinking: false }
    }

    /// Side of the anchor a selection lies on
    fn side(doc: &Document, anchor: &CursorSelection, sel: &CursorSelection) -> Ordering {
        match sel.start.compare(doc, &anchor.start) {
            Some(Ordering::Equal) | None => sel.end.compare(doc, &anchor.end).unwrap_or(Ordering::Equal),
            Some(order) => order,
        }
    }

    /// Move the focus to `sel`.
    ///
    /// Returns false when the move crosses over the anchor, which ends the
    /// selection.
    pub fn extend(&mut self, doc: &Document, sel: &CursorSelection) -> bool {
        let old_side = Self::side(doc, &self.anchor, &self.focus);
        let new_side = Self::side(doc, &self.anchor, sel);
        if old_side != Ordering::Equal && new_side != Ordering::Equal && old_side != new_side {
            return false;
        }
        // Closer to the anchor than before means the selection shrank
        self.shrinking = match new_side {
            Ordering::Greater => sel.end.compare(doc, &self.focus.end) == Some(Ordering::Less),
            Ordering::Less => sel.start.compare(doc, &self.focus.start) == Some(Ordering::Greater),
            Ordering::Equal => old_side != Ordering::Equal,
        };
        self.focus = *sel;
        true
    }

    pub fn is_shrinking(&self) -> bool {
        self.shrinking
    }

    /// Spoken cue for the last extension
    pub fn cue(&self) -> &'static str {
        if self.shrinking { "unselected" } else { "selected" }
    }

    /// Selected range in document order
    pub fn range(&self, doc: &Document) -> (Cursor, Cursor) {
        let (a, f) = (&self.anchor, &self.focus);
        let start = if f.start.compare(doc, &a.start) == Some(Ordering::Less) { f.start } else { a.start };
        let end = if f.end.compare(doc, &a.end) == Some(Ordering::Greater) { f.end } else { a.end };
        (start, end)
    }

    /// Text covered by the selection
    pub fn text(&self, doc: &Document) -> String {
        let (start, end) = self.range(doc);
        let mut parts = Vec::new();
        for leaf in leaves_from(doc, start, false) {
            if Cursor::before(leaf).compare(doc, &end) != Some(Ordering::Less) {
                break;
            }
            let text = leaf_text(doc, leaf);
            let from = if leaf == start.node { start.index.min(text.len()) } else { 0 };
            let to = if leaf == end.node { end.index.min(text.len()) } else { text.len() };
            if let Some(slice) = text.get(from..to.max(from)) {
                if !slice.trim().is_empty() {
                    parts.push(slice.trim().to_string());
                }
            }
        }
        parts.join(" ")
    }
}
