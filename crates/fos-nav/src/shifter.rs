//! Granularity shifter
//!
//! Owns one walker per granularity and a pointer to the active one. The
//! table walker takes over the group slot while table mode is on.

use fos_dom::{Document, NodeId};

use crate::classify::descendants;
use crate::config::NavConfig;
use crate::cursor::CursorSelection;
use crate::description::NavDescription;
use crate::role::Role;
use crate::walker::table::enclosing_table;
use crate::walker::{
    CharacterWalker, GroupWalker, ObjectWalker, SentenceWalker, TableGrid, TableWalker, VisualWalker, Walker,
    WalkerKind, WordWalker,
};

/// Granularities from finest to coarsest
pub const GRANULARITY_CHAIN: [WalkerKind; 6] = [
    WalkerKind::Character,
    WalkerKind::Word,
    WalkerKind::Visual,
    WalkerKind::Sentence,
    WalkerKind::Object,
    WalkerKind::Group,
];

const GROUP_INDEX: usize = GRANULARITY_CHAIN.len() - 1;

/// Decides whether a table is used for layout rather than data
pub trait LayoutTablePolicy {
    fn is_layout_table(&self, doc: &Document, table: NodeId) -> bool;
}

/// Markup-based layout table detection
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLayoutTables;

impl LayoutTablePolicy for HeuristicLayoutTables {
    fn is_layout_table(&self, doc: &Document, table: NodeId) -> bool {
        match Role::of(doc, table) {
            Some(Role::Presentation) => return true,
            Some(Role::Grid | Role::TreeGrid) => return false,
            _ if doc.role(table).as_deref() == Some("table") => return false,
            _ => {}
        }
        if doc.attr(table, "summary").is_some() {
            return false;
        }
        let mut nested = false;
        for node in descendants(doc, table) {
            match doc.tag(node) {
                Some("caption" | "thead" | "th" | "colgroup") => return false,
                Some("table") => nested = true,
                _ if doc.attr(node, "headers").is_some() => return false,
                _ => {}
            }
        }
        if nested {
            return true;
        }
        let grid = TableGrid::build(doc, table);
        grid.rows() <= 1 || grid.cols() <= 1
    }
}

/// Active walker selection
pub struct GranularityShifter {
    levels: Vec<Box<dyn Walker>>,
    table: TableWalker,
    current: usize,
    /// Level to return to when subnavigation ends
    subnav_origin: Option<usize>,
    table_mode: bool,
    /// Level and subnavigation state before entering table mode
    before_table: Option<(usize, Option<usize>)>,
    layout_policy: Box<dyn LayoutTablePolicy>,
}

impl GranularityShifter {
    pub fn new(config: &NavConfig) -> Self {
        Self::with_layout_policy(config, Box::new(HeuristicLayoutTables))
    }

    pub fn with_layout_policy(config: &NavConfig, layout_policy: Box<dyn LayoutTablePolicy>) -> Self {
        let levels: Vec<Box<dyn Walker>> = vec![
            Box::new(CharacterWalker::default()),
            Box::new(WordWalker::default()),
            Box::new(VisualWalker::with_width(config.line_width)),
            Box::new(SentenceWalker::default()),
            Box::new(ObjectWalker::default()),
            Box::new(GroupWalker::new(config.max_group_chars)),
        ];
        Self {
            levels,
            table: TableWalker::new(config.max_group_chars),
            current: GROUP_INDEX,
            subnav_origin: None,
            table_mode: false,
            before_table: None,
            layout_policy,
        }
    }

    /// Walker currently in use
    pub fn current_walker(&self) -> &dyn Walker {
        if self.table_mode && self.current == GROUP_INDEX {
            &self.table
        } else {
            self.levels[self.current].as_ref()
        }
    }

    pub fn table_walker(&self) -> &TableWalker {
        &self.table
    }

    /// Index into the granularity chain
    pub fn granularity(&self) -> usize {
        self.current
    }

    pub fn kind(&self) -> WalkerKind {
        self.current_walker().kind()
    }

    pub fn granularity_msg(&self) -> &'static str {
        self.current_walker().granularity_msg()
    }

    pub fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        self.current_walker().next(doc, sel)
    }

    pub fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        self.current_walker().sync(doc, sel)
    }

    pub fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription> {
        self.current_walker().describe(doc, prev, cur)
    }

    pub fn can_act(&self, doc: &Document, sel: &CursorSelection) -> bool {
        self.current_walker().can_act(doc, sel)
    }

    pub fn act(&self, doc: &mut Document, sel: &CursorSelection) -> bool {
        self.current_walker().act(doc, sel)
    }

    pub fn sync_to_page_beginning(&self, doc: &Document, reversed: bool) -> Option<CursorSelection> {
        self.current_walker().sync_to_page_beginning(doc, reversed)
    }

    pub fn make_more_granular(&mut self) {
        self.ensure_not_subnavigating();
        self.before_table = None;
        self.current = self.current.saturating_sub(1);
        tracing::debug!("granularity now {}", self.granularity_msg());
    }

    pub fn make_less_granular(&mut self) {
        self.ensure_not_subnavigating();
        self.before_table = None;
        self.current = (self.current + 1).min(GROUP_INDEX);
        tracing::debug!("granularity now {}", self.granularity_msg());
    }

    /// Jump to a granularity. Table maps to the group slot.
    pub fn set_granularity(&mut self, kind: WalkerKind) {
        let index = GRANULARITY_CHAIN.iter().position(|&k| k == kind).unwrap_or(GROUP_INDEX);
        self.set_granularity_index(index);
    }

    /// Jump to a chain index, clamping out-of-range values
    pub fn set_granularity_index(&mut self, index: usize) {
        if index > GROUP_INDEX {
            tracing::warn!("granularity index {} out of range, clamping", index);
        }
        self.subnav_origin = None;
        self.before_table = None;
        self.current = index.min(GROUP_INDEX);
    }

    /// Step one level finer, remembering where to come back to
    pub fn ensure_subnavigating(&mut self) {
        if self.subnav_origin.is_none() {
            self.subnav_origin = Some(self.current);
            self.current = self.current.saturating_sub(1);
        }
    }

    pub fn ensure_not_subnavigating(&mut self) {
        if let Some(origin) = self.subnav_origin.take() {
            self.current = origin;
        }
    }

    pub fn is_subnavigating(&self) -> bool {
        self.subnav_origin.is_some()
    }

    pub fn ensure_table_mode(&mut self) {
        self.table_mode = true;
    }

    /// Leave table mode, restoring the level that was active before entry.
    ///
    /// Subnavigation started inside the table carries over: the restored
    /// level becomes its origin and the walker stays one step finer.
    pub fn ensure_not_table_mode(&mut self) {
        if !self.table_mode {
            return;
        }
        self.table_mode = false;
        if let Some((level, origin)) = self.before_table.take() {
            if self.subnav_origin.is_some() {
                let explicit = origin.unwrap_or(level);
                self.subnav_origin = Some(explicit);
                self.current = explicit.saturating_sub(1);
            } else {
                self.current = level;
                self.subnav_origin = origin;
            }
        }
        tracing::debug!("left table mode, granularity {}", self.granularity_msg());
    }

    pub fn is_table_mode(&self) -> bool {
        self.table_mode
    }

    /// True when the active walker sits in the group slot
    pub fn at_group_level(&self) -> bool {
        self.current == GROUP_INDEX && self.subnav_origin.is_none()
    }

    pub fn is_layout_table(&self, doc: &Document, table: NodeId) -> bool {
        self.layout_policy.is_layout_table(doc, table)
    }

    /// Switch to the table walker if the selection is inside a table.
    ///
    /// Layout tables are only entered when `force` is set. Returns the cell
    /// selection on success.
    pub fn try_enter_table(&mut self, doc: &Document, sel: &CursorSelection, force: bool) -> Option<CursorSelection> {
        if self.table_mode {
            return None;
        }
        let table = enclosing_table(doc, sel.start.node)?;
        if !force && self.is_layout_table(doc, table) {
            return None;
        }
        let cell = self.table.sync(doc, sel)?;
        self.before_table = Some((self.current, self.subnav_origin.take()));
        self.current = GROUP_INDEX;
        self.ensure_table_mode();
        tracing::debug!("entered table mode");
        Some(cell)
    }

    /// Back to the initial state: group level, no table or subnavigation
    pub fn reset(&mut self) {
        self.current = GROUP_INDEX;
        self.subnav_origin = None;
        self.table_mode = false;
        self.before_table = None;
    }
}
