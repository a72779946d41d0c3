//! Unit walkers
//!
//! Character, word, line, sentence and object navigation share one walker
//! that differs only in how text is split. Text units read across the
//! inline leaves of a group; object units are single leaves.

use fos_dom::{Document, NodeId};

use crate::classify::{is_atomic, is_content_leaf};
use crate::cursor::{Cursor, CursorSelection};
use crate::description::{ancestry_context, describe_leaf, NavDescription, SpeechHint};
use crate::traverse::leaves_from;
use crate::walker::linear::LinearText;
use crate::walker::units::{CharacterUnits, LineUnits, ObjectUnits, SentenceUnits, UnitSplitter, WordUnits};
use crate::walker::{Walker, WalkerKind};

pub type CharacterWalker = UnitWalker<CharacterUnits>;
pub type WordWalker = UnitWalker<WordUnits>;
pub type VisualWalker = UnitWalker<LineUnits>;
pub type SentenceWalker = UnitWalker<SentenceUnits>;
pub type ObjectWalker = UnitWalker<ObjectUnits>;

/// Walker over the units a splitter finds in the text around a leaf
#[derive(Debug, Clone, Default)]
pub struct UnitWalker<S> {
    splitter: S,
}

impl<S: UnitSplitter> UnitWalker<S> {
    pub fn new(splitter: S) -> Self {
        Self { splitter }
    }

    fn linear(doc: &Document, leaf: NodeId) -> LinearText {
        if S::SPANS_LEAVES { LinearText::around(doc, leaf) } else { LinearText::single(doc, leaf) }
    }

    /// Units of a run. Atomic leaves are always whole.
    fn units(&self, linear: &LinearText) -> Vec<(usize, usize)> {
        linear.snap(self.splitter.split(linear.text()))
    }

    /// First unit of the run past `origin`, or the run's edge unit without one
    fn pick(&self, linear: &LinearText, origin: Option<usize>, reversed: bool) -> Option<CursorSelection> {
        let units = self.units(linear);
        let unit = match (origin, reversed) {
            (Some(o), false) => units.iter().find(|u| u.0 >= o),
            (Some(o), true) => units.iter().rev().find(|u| u.1 <= o),
            (None, false) => units.first(),
            (None, true) => units.last(),
        };
        unit.and_then(|&u| linear.selection(u, reversed))
    }
}

impl VisualWalker {
    pub fn with_width(width: usize) -> Self {
        Self::new(LineUnits { width })
    }
}

impl<S: UnitSplitter> Walker for UnitWalker<S> {
    fn kind(&self) -> WalkerKind {
        S::KIND
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let reversed = sel.reversed;
        let point = sel.focus();
        let first = leaves_from(doc, point, reversed).next()?;
        let mut linear = Self::linear(doc, first);
        // A point off the run's leaves sits at the edge of the first leaf found
        let origin = linear.offset_of(point).or_else(|| linear.edge_of(first, reversed));
        if let Some(found) = self.pick(&linear, origin, reversed) {
            return Some(found);
        }
        loop {
            let edge = if reversed { linear.first_leaf()? } else { linear.last_leaf()? };
            let leaf = leaves_from(doc, point_past(edge, reversed), reversed).find(|&l| !linear.contains(l))?;
            linear = Self::linear(doc, leaf);
            if let Some(found) = self.pick(&linear, None, reversed) {
                return Some(found);
            }
        }
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let point = sel.start;
        if is_content_leaf(doc, point.node) {
            let linear = Self::linear(doc, point.node);
            let containing = linear
                .offset_of(point)
                .and_then(|o| self.units(&linear).into_iter().find(|u| u.0 <= o && o < u.1));
            if let Some(found) = containing.and_then(|u| linear.selection(u, sel.reversed)) {
                return Some(found);
            }
        }
        let collapsed = CursorSelection::collapsed(point, sel.reversed);
        self.next(doc, &collapsed.with_reversed(false))
            .or_else(|| self.next(doc, &collapsed.with_reversed(true)))
            .map(|found| found.with_reversed(sel.reversed))
    }

    fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription> {
        let leaf = cur.start.node;
        let context = ancestry_context(doc, Some(prev.start.node), leaf);
        let whole_leaf = cur.end.node == leaf && is_atomic(doc, leaf);
        let linear = Self::linear(doc, leaf);
        let slice = if whole_leaf { None } else { linear.slice(cur) };
        let mut desc = describe_leaf(doc, leaf, slice, context);
        if S::KIND == WalkerKind::Character {
            desc.hint = SpeechHint::Spell;
        }
        vec![desc]
    }
}

/// Point just outside a leaf in the direction of travel
fn point_past(leaf: NodeId, reversed: bool) -> Cursor {
    if reversed { Cursor::before(leaf) } else { Cursor::after(leaf) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        let p1 = doc.append_element_with_text(body, "p", "Hello big world.").unwrap();
        let p2 = doc.append_element_with_text(body, "p", "Bye now.").unwrap();
        let t1 = doc.tree().first_child(p1).unwrap();
        let t2 = doc.tree().first_child(p2).unwrap();
        (doc, t1, t2)
    }

    fn text_of(doc: &Document, sel: &CursorSelection) -> String {
        LinearText::around(doc, sel.start.node).slice(sel).unwrap().to_string()
    }

    fn walk<W: Walker>(walker: &W, doc: &Document, reversed: bool) -> Vec<String> {
        let mut sel = walker.sync_to_page_beginning(doc, reversed).unwrap();
        let mut found = vec![text_of(doc, &sel)];
        while let Some(next) = walker.next(doc, &sel) {
            found.push(text_of(doc, &next));
            sel = next;
        }
        found
    }

    #[test]
    fn test_words_forward_across_leaves() {
        let (doc, _, t2) = sample();
        let walker = WordWalker::default();
        let mut sel = walker.sync_to_page_beginning(&doc, false).unwrap();
        let mut words = vec![text_of(&doc, &sel)];
        while let Some(next) = walker.next(&doc, &sel) {
            words.push(text_of(&doc, &next));
            sel = next;
        }
        assert_eq!(words, vec!["Hello", "big", "world.", "Bye", "now."]);
        assert_eq!(sel.start.node, t2);
    }

    #[test]
    fn test_words_reverse_is_mirror() {
        let (doc, _, _) = sample();
        let walker = WordWalker::default();
        let mut sel = walker.sync_to_page_beginning(&doc, true).unwrap();
        let mut words = vec![text_of(&doc, &sel)];
        while let Some(next) = walker.next(&doc, &sel) {
            words.push(text_of(&doc, &next));
            sel = next;
        }
        assert_eq!(words, vec!["now.", "Bye", "world.", "big", "Hello"]);
    }

    #[test]
    fn test_words_read_through_inline_markup() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        let un = doc.append_text(p, "un").unwrap();
        doc.append_element_with_text(p, "b", "believ").unwrap();
        let able = doc.append_text(p, "able thing").unwrap();

        let walker = WordWalker::default();
        assert_eq!(walk(&walker, &doc, false), vec!["unbelievable", "thing"]);
        assert_eq!(walk(&walker, &doc, true), vec!["thing", "unbelievable"]);

        let first = walker.sync_to_page_beginning(&doc, false).unwrap();
        assert_eq!(first.start, Cursor::new(un, 0));
        assert_eq!(first.end, Cursor::new(able, 4));
        let prev = CursorSelection::collapsed(Cursor::before(body), false);
        assert_eq!(walker.describe(&doc, &prev, &first)[0].text, "unbelievable");
    }

    #[test]
    fn test_sentence_reads_through_link() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        doc.append_text(p, "Read the ").unwrap();
        let link = doc.append_element_with_text(p, "a", "docs").unwrap();
        doc.set_attribute(link, "href", "/docs").unwrap();
        doc.append_text(p, " today. Then rest.").unwrap();

        let walker = SentenceWalker::default();
        assert_eq!(walk(&walker, &doc, false), vec!["Read the docs today.", "Then rest."]);
        assert_eq!(walk(&walker, &doc, true), vec!["Then rest.", "Read the docs today."]);

        // Inside the sentence, a word walker still stops on the link once
        let words = walk(&WordWalker::default(), &doc, false);
        assert_eq!(words, vec!["Read", "the", "docs", "today.", "Then", "rest."]);
    }

    #[test]
    fn test_sync_inside_spanning_word() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        doc.append_text(p, "in").unwrap();
        let em = doc.append_element_with_text(p, "em", "line").unwrap();
        let line = doc.tree().first_child(em).unwrap();
        doc.append_text(p, " text").unwrap();

        let walker = WordWalker::default();
        let inside = CursorSelection::collapsed(Cursor::new(line, 2), false);
        assert_eq!(text_of(&doc, &walker.sync(&doc, &inside).unwrap()), "inline");
    }

    #[test]
    fn test_sync_finds_containing_unit() {
        let (doc, t1, _) = sample();
        let walker = WordWalker::default();
        let inside = CursorSelection::collapsed(Cursor::new(t1, 7), false);
        let synced = walker.sync(&doc, &inside).unwrap();
        assert_eq!(text_of(&doc, &synced), "big");
    }

    #[test]
    fn test_sync_from_container_lands_on_first_unit() {
        let (doc, t1, _) = sample();
        let walker = SentenceWalker::default();
        let body = CursorSelection::node(doc.body(), false);
        let synced = walker.sync(&doc, &body).unwrap();
        assert_eq!(synced.start.node, t1);
        assert_eq!(text_of(&doc, &synced), "Hello big world.");
    }

    #[test]
    fn test_atomic_leaf_is_one_unit() {
        let mut doc = Document::default();
        let body = doc.body();
        doc.append_element_with_text(body, "p", "Press").unwrap();
        let button = doc.append_element_with_text(body, "button", "OK").unwrap();
        let walker = CharacterWalker::default();
        let first = walker.sync_to_page_beginning(&doc, false).unwrap();
        let mut sel = first;
        for _ in 0..4 {
            sel = walker.next(&doc, &sel).unwrap();
        }
        let landed = walker.next(&doc, &sel).unwrap();
        assert_eq!(landed.start, Cursor::new(button, 0));
        assert_eq!(landed.end, Cursor::new(button, 1));
        assert!(walker.next(&doc, &landed).is_none());

        let desc = walker.describe(&doc, &sel, &landed);
        assert_eq!(desc[0].text, "OK");
        assert_eq!(desc[0].annotation, "button");
    }

    #[test]
    fn test_describe_word_slice() {
        let (doc, t1, _) = sample();
        let walker = WordWalker::default();
        let prev = CursorSelection::collapsed(Cursor::before(doc.body()), false);
        let cur = CursorSelection::new(Cursor::new(t1, 6), Cursor::new(t1, 9), false);
        let desc = walker.describe(&doc, &prev, &cur);
        assert_eq!(desc.len(), 1);
        assert_eq!(desc[0].text, "big");
    }

    #[test]
    fn test_visual_walker_wraps() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element_with_text(body, "p", "one two three").unwrap();
        let text = doc.tree().first_child(p).unwrap();
        let walker = VisualWalker::with_width(8);
        let first = walker.sync_to_page_beginning(&doc, false).unwrap();
        assert_eq!((first.start.index, first.end.index), (0, 7));
        let second = walker.next(&doc, &first).unwrap();
        assert_eq!(second.start, Cursor::new(text, 8));
        assert_eq!(walker.kind(), WalkerKind::Visual);
    }
}
