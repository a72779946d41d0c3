//! Walkers
//!
//! A walker moves a [`CursorSelection`] one unit at a time at its own
//! granularity, and knows how to describe what it lands on.

mod filtered;
mod group;
mod linear;
pub(crate) mod table;
mod text;
mod units;

pub use filtered::FilteredWalker;
pub use group::GroupWalker;
pub use table::{TableGrid, TableWalker};
pub use text::{CharacterWalker, ObjectWalker, SentenceWalker, UnitWalker, VisualWalker, WordWalker};
pub use units::{CharacterUnits, LineUnits, ObjectUnits, SentenceUnits, UnitSplitter, WordUnits};

use fos_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::classify::actionable_target;
use crate::cursor::{Cursor, CursorSelection};
use crate::description::NavDescription;

/// Walker granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkerKind {
    Character,
    Word,
    Visual,
    Sentence,
    Object,
    Group,
    Table,
}

impl WalkerKind {
    /// Spoken name of the granularity
    pub fn name(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Word => "word",
            Self::Visual => "line",
            Self::Sentence => "sentence",
            Self::Object => "object",
            Self::Group => "group",
            Self::Table => "table",
        }
    }
}

/// Moves selections through a document at one granularity
pub trait Walker {
    fn kind(&self) -> WalkerKind;

    /// Next unit strictly past the selection in its direction, or `None` at the edge
    fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection>;

    /// Unit containing the start of the selection
    fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection>;

    fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription>;

    fn granularity_msg(&self) -> &'static str {
        self.kind().name()
    }

    fn can_act(&self, doc: &Document, sel: &CursorSelection) -> bool {
        actionable_target(doc, sel.start.node).is_some()
    }

    /// Trigger the default action of the control under the selection
    fn act(&self, doc: &mut Document, sel: &CursorSelection) -> bool {
        match actionable_target(doc, sel.start.node) {
            Some(target) => doc.click(target),
            None => false,
        }
    }

    /// First unit of the page (last when reversed)
    fn sync_to_page_beginning(&self, doc: &Document, reversed: bool) -> Option<CursorSelection> {
        let root = doc.nav_root();
        let point = if reversed { Cursor::after(root) } else { Cursor::before(root) };
        self.next(doc, &CursorSelection::collapsed(point, reversed))
    }
}

/// Content leaves that overlap a selection, in document order
pub(crate) fn selected_leaves(doc: &Document, sel: &CursorSelection) -> Vec<NodeId> {
    crate::traverse::leaves_from(doc, sel.start, false)
        .take_while(|&leaf| Cursor::before(leaf).compare(doc, &sel.end) == Some(std::cmp::Ordering::Less))
        .collect()
}
