//! Filtered walker
//!
//! Wraps another walker and only stops on selections a predicate accepts.
//! Used for structural jumps such as "next heading".

use fos_dom::Document;

use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::walker::{Walker, WalkerKind};

/// Selection filter
pub type SelectionFilter<'a> = Box<dyn Fn(&Document, &CursorSelection) -> bool + 'a>;

pub struct FilteredWalker<'a> {
    inner: Box<dyn Walker + 'a>,
    filter: SelectionFilter<'a>,
}

impl<'a> FilteredWalker<'a> {
    pub fn new(inner: Box<dyn Walker + 'a>, filter: impl Fn(&Document, &CursorSelection) -> bool + 'a) -> Self {
        Self { inner, filter: Box::new(filter) }
    }
}

impl Walker for FilteredWalker<'_> {
    fn kind(&self) -> WalkerKind {
        self.inner.kind()
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let mut cur = *sel;
        loop {
            let found = self.inner.next(doc, &cur)?;
            if (self.filter)(doc, &found) {
                return Some(found);
            }
            cur = found;
        }
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let synced = self.inner.sync(doc, sel)?;
        if (self.filter)(doc, &synced) { Some(synced) } else { self.next(doc, &synced) }
    }

    fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription> {
        self.inner.describe(doc, prev, cur)
    }
}
