//! Navigation manager
//!
//! Front door of the engine. Owns the current and previous selections and
//! applies the boundary rules around every move, in order: frame hand-off,
//! table entry and exit, then wrapping at the page edge.

use std::collections::VecDeque;
use std::time::Instant;

use fos_dom::{Document, NodeId};

use crate::classify::is_iframe;
use crate::config::{NavConfig, ReadMode};
use crate::cursor::{Cursor, CursorSelection};
use crate::description::{Earcon, NavDescription};
use crate::error::NavError;
use crate::frame::{FrameCommand, FrameMessage, IframeRegistry, Outgoing};
use crate::history::{NavigationHistory, NodePredicate};
use crate::page_selection::PageSelection;
use crate::predicates::Structure;
use crate::shifter::{GranularityShifter, LayoutTablePolicy};
use crate::speech::{QueueMode, Speaker};
use crate::traverse::first_leaf;
use crate::walker::table::enclosing_table;
use crate::walker::{FilteredWalker, ObjectWalker, TableWalker, Walker, WalkerKind};

pub struct NavigationManager {
    config: NavConfig,
    shifter: GranularityShifter,
    history: NavigationHistory,
    current: CursorSelection,
    previous: CursorSelection,
    page_selection: Option<PageSelection>,
    reached_page_end: bool,
    /// One-shot cue: a row/column move hit the grid edge
    table_bumped_edge: bool,
    /// The last row/column move missed
    table_edge_missed: bool,
    /// Selection before an explicit table entry
    table_entry: Option<CursorSelection>,
    /// Table the user explicitly left; not re-entered automatically
    table_opt_out: Option<NodeId>,
    iframes: IframeRegistry,
    /// Our id in the parent document, when we are a frame
    parent_frame_id: Option<u32>,
    /// A child frame owns navigation
    dormant: bool,
    keep_reading: bool,
    last_poll: Option<Instant>,
    outbox: VecDeque<Outgoing>,
}

impl NavigationManager {
    pub fn new(doc: &Document, config: NavConfig) -> Self {
        let shifter = GranularityShifter::new(&config);
        Self::with_shifter(doc, config, shifter)
    }

    pub fn with_layout_policy(doc: &Document, config: NavConfig, policy: Box<dyn LayoutTablePolicy>) -> Self {
        let shifter = GranularityShifter::with_layout_policy(&config, policy);
        Self::with_shifter(doc, config, shifter)
    }

    fn with_shifter(doc: &Document, config: NavConfig, shifter: GranularityShifter) -> Self {
        let current = Self::page_start(doc, false);
        Self {
            history: NavigationHistory::new(config.history_capacity),
            config,
            shifter,
            current,
            previous: Self::page_origin(doc),
            page_selection: None,
            reached_page_end: false,
            table_bumped_edge: false,
            table_edge_missed: false,
            table_entry: None,
            table_opt_out: None,
            iframes: IframeRegistry::new(),
            parent_frame_id: None,
            dormant: false,
            keep_reading: false,
            last_poll: None,
            outbox: VecDeque::new(),
        }
    }

    /// Collapsed selection just before the first content (after the last when reversed)
    fn page_start(doc: &Document, reversed: bool) -> CursorSelection {
        let anchor = first_leaf(doc, reversed).unwrap_or_else(|| doc.nav_root());
        let point = if reversed { Cursor::after(anchor) } else { Cursor::before(anchor) };
        CursorSelection::collapsed(point, reversed)
    }

    /// Position outside all content, so every structure counts as entered
    fn page_origin(doc: &Document) -> CursorSelection {
        CursorSelection::collapsed(Cursor::before(doc.nav_root()), false)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn shifter(&self) -> &GranularityShifter {
        &self.shifter
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn current(&self) -> &CursorSelection {
        &self.current
    }

    pub fn previous(&self) -> &CursorSelection {
        &self.previous
    }

    pub fn get_current_node(&self) -> NodeId {
        self.current.absolute_start().node
    }

    pub fn is_reversed(&self) -> bool {
        self.current.reversed
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.current.reversed = reversed;
    }

    pub fn reached_page_end(&self) -> bool {
        self.reached_page_end
    }

    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    pub fn is_reading(&self) -> bool {
        self.keep_reading
    }

    pub fn is_table_mode(&self) -> bool {
        self.shifter.is_table_mode()
    }

    pub fn is_subnavigating(&self) -> bool {
        self.shifter.is_subnavigating()
    }

    // ------------------------------------------------------------------
    // Granularity
    // ------------------------------------------------------------------

    pub fn granularity(&self) -> WalkerKind {
        self.shifter.kind()
    }

    /// Index into the granularity chain
    pub fn get_granularity(&self) -> usize {
        self.shifter.granularity()
    }

    pub fn granularity_msg(&self) -> &'static str {
        self.shifter.granularity_msg()
    }

    pub fn make_more_granular(&mut self, doc: &Document) {
        self.shifter.make_more_granular();
        self.sync(doc);
    }

    pub fn make_less_granular(&mut self, doc: &Document) {
        self.shifter.make_less_granular();
        self.sync(doc);
    }

    pub fn set_granularity(&mut self, doc: &Document, kind: WalkerKind) {
        self.shifter.set_granularity(kind);
        self.sync(doc);
    }

    /// Jump to a level of the granularity chain by index
    pub fn set_granularity_index(&mut self, doc: &Document, index: usize) {
        self.shifter.set_granularity_index(index);
        self.sync(doc);
    }

    pub fn ensure_subnavigating(&mut self, doc: &Document) {
        self.shifter.ensure_subnavigating();
        self.sync(doc);
    }

    pub fn ensure_not_subnavigating(&mut self, doc: &Document) {
        self.shifter.ensure_not_subnavigating();
        self.sync(doc);
    }

    /// Fit the current selection to the active walker.
    ///
    /// A collapsed selection stays put so the next move still lands on the
    /// first unit.
    fn sync(&mut self, doc: &Document) {
        if self.current.is_collapsed() {
            return;
        }
        if let Some(sel) = self.shifter.sync(doc, &self.current) {
            self.current = sel;
        }
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Move one unit at the current granularity.
    ///
    /// Returns false when the move wrapped around the page.
    pub fn navigate(&mut self, doc: &Document) -> bool {
        self.shifter.ensure_not_subnavigating();
        if !self.resolve(doc, None) {
            return true;
        }
        self.next_(doc, true)
    }

    /// Move one unit at the next finer granularity
    pub fn subnavigate(&mut self, doc: &Document) -> bool {
        self.shifter.ensure_subnavigating();
        if !self.resolve(doc, None) {
            return true;
        }
        self.next_(doc, true)
    }

    /// Move once, then keep reading from there
    pub fn skip(&mut self, doc: &Document, speaker: &mut dyn Speaker) -> bool {
        if !self.navigate(doc) {
            return false;
        }
        self.start_reading(doc, speaker, QueueMode::Flush);
        true
    }

    /// One move with boundary handling
    fn next_(&mut self, doc: &Document, allow_iframes: bool) -> bool {
        self.reached_page_end = false;
        let candidate = self.shifter.next(doc, &self.current);
        let frames = allow_iframes && !self.config.ignore_iframes;
        // A table-walker miss only leaves the table; frames see what lies past it
        let leaving_table = candidate.is_none() && self.shifter.is_table_mode();
        if frames && !leaving_table && self.try_iframe(doc, candidate.as_ref()) {
            return true;
        }
        let candidate = self.try_table_boundary(doc, candidate);
        if frames && leaving_table && self.try_iframe(doc, candidate.as_ref()) {
            return true;
        }

        match candidate {
            Some(sel) => {
                self.update_sel(doc, sel);
                if let Some(selection) = self.page_selection.as_mut() {
                    if !selection.extend(doc, &sel) {
                        tracing::debug!("page selection crossed its anchor, dropping it");
                        self.page_selection = None;
                    }
                }
                true
            }
            None => {
                self.wrap(doc);
                false
            }
        }
    }

    fn wrap(&mut self, doc: &Document) {
        let reversed = self.is_reversed();
        self.shifter.ensure_not_table_mode();
        self.previous = self.current;
        self.current = Self::page_start(doc, reversed);
        self.reached_page_end = true;
        tracing::debug!("wrapped to the {} of the page", if reversed { "bottom" } else { "top" });
    }

    fn update_sel(&mut self, doc: &Document, sel: CursorSelection) {
        // A collapsed position is a page start, so context is announced in full
        let previous = std::mem::replace(&mut self.current, sel);
        self.previous = if previous.is_collapsed() { Self::page_origin(doc) } else { previous };
        self.history.update(sel.absolute_start().node);
        self.table_entry = None;
        self.table_edge_missed = false;
        self.dormant = false;
    }

    /// Table rules for a candidate move.
    ///
    /// Falling off the table walker leaves table mode and continues past the
    /// table. Leaving the table with a finer walker also ends table mode.
    /// Group navigation landing in a data table enters it.
    fn try_table_boundary(&mut self, doc: &Document, candidate: Option<CursorSelection>) -> Option<CursorSelection> {
        let mut candidate = candidate;
        if self.shifter.is_table_mode() {
            match candidate {
                None => {
                    let reversed = self.is_reversed();
                    let table = enclosing_table(doc, self.current.start.node);
                    self.shifter.ensure_not_table_mode();
                    let from = match table {
                        Some(t) if reversed => CursorSelection::collapsed(Cursor::before(t), true),
                        Some(t) => CursorSelection::collapsed(Cursor::after(t), false),
                        None => self.current,
                    };
                    candidate = self.shifter.next(doc, &from);
                }
                Some(sel) if !self.shifter.table_walker().is_in_table(doc, &sel) => {
                    self.shifter.ensure_not_table_mode();
                }
                Some(_) => {}
            }
        }

        let sel = candidate?;
        let table = enclosing_table(doc, sel.start.node);
        if table != self.table_opt_out {
            self.table_opt_out = None;
        }
        let auto_enter = table.is_some()
            && self.table_opt_out.is_none()
            && self.config.auto_table_mode
            && !self.shifter.is_table_mode()
            && self.shifter.at_group_level();
        if auto_enter {
            if let Some(cell) = self.shifter.try_enter_table(doc, &sel, false) {
                return Some(cell);
            }
        }
        Some(sel)
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Hand navigation to a child frame, or back to the parent.
    ///
    /// `None` means the walker ran off the end of this document.
    fn try_iframe(&mut self, doc: &Document, candidate: Option<&CursorSelection>) -> bool {
        let reversed = self.is_reversed();
        let granularity = self.shifter.kind();
        match candidate {
            None => {
                let Some(id) = self.parent_frame_id else {
                    return false;
                };
                match FrameMessage::exit(id, reversed, granularity).to_json() {
                    Ok(payload) => self.outbox.push_back(Outgoing::ToParent(payload)),
                    Err(err) => {
                        tracing::warn!("failed to encode exitIframe: {}", err);
                        return false;
                    }
                }
                tracing::debug!("leaving frame {}", id);
                self.dormant = true;
                true
            }
            Some(sel) => {
                let iframe = sel.start.node;
                if !is_iframe(doc, iframe) {
                    return false;
                }
                let id = self.iframes.id_for(iframe);
                let payload = match FrameMessage::enter(id, reversed, granularity).to_json() {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!("failed to encode enterIframe: {}", err);
                        return false;
                    }
                };
                self.update_sel(doc, *sel);
                self.outbox.push_back(Outgoing::ToChild { iframe, payload });
                self.dormant = true;
                tracing::debug!("entering frame {}", id);
                true
            }
        }
    }

    /// Apply a message from another frame.
    ///
    /// Returns whether this document took over navigation.
    pub fn handle_message(&mut self, doc: &Document, payload: &str) -> Result<bool, NavError> {
        let msg = FrameMessage::from_json(payload)?;
        match msg.command {
            FrameCommand::EnterIframe => {
                self.parent_frame_id = msg.id;
                self.apply_frame_state(&msg);
                self.current = Self::page_start(doc, msg.reversed);
                self.previous = Self::page_origin(doc);
                Ok(self.next_(doc, true))
            }
            FrameCommand::ExitIframe => {
                let id = msg.id.ok_or(NavError::MissingIframeId)?;
                let Some(iframe) = self.iframes.node_for(id).filter(|&n| doc.is_attached(n)) else {
                    tracing::warn!("exitIframe for unknown frame {}", id);
                    return Ok(false);
                };
                self.apply_frame_state(&msg);
                self.current = CursorSelection::node(iframe, msg.reversed);
                Ok(self.next_(doc, true))
            }
        }
    }

    fn apply_frame_state(&mut self, msg: &FrameMessage) {
        self.dormant = false;
        self.reached_page_end = false;
        self.shifter.ensure_not_table_mode();
        self.shifter.set_granularity(msg.granularity);
        self.current.reversed = msg.reversed;
    }

    /// Drain messages for other frames
    pub fn take_outgoing(&mut self) -> Vec<Outgoing> {
        self.outbox.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------

    /// Enter table mode on any table, layout or not
    pub fn try_enter_table(&mut self, doc: &Document) -> bool {
        let before = self.current;
        match self.shifter.try_enter_table(doc, &before, true) {
            Some(cell) => {
                self.update_sel(doc, cell);
                self.table_entry = Some(before);
                self.table_opt_out = None;
                true
            }
            None => false,
        }
    }

    /// Leave table mode, back to where the table was entered if nothing moved since
    pub fn try_exit_table(&mut self, doc: &Document) -> bool {
        if !self.shifter.is_table_mode() {
            return false;
        }
        self.table_opt_out = enclosing_table(doc, self.current.start.node);
        self.shifter.ensure_not_table_mode();
        match self.table_entry.take() {
            Some(before) => {
                self.previous = self.current;
                self.current = before;
            }
            None => {
                if let Some(sel) = self.shifter.sync(doc, &self.current) {
                    self.update_sel(doc, sel);
                }
            }
        }
        true
    }

    fn table_move(
        &mut self,
        doc: &Document,
        op: impl Fn(&TableWalker, &Document, &CursorSelection) -> Option<CursorSelection>,
    ) -> bool {
        if !self.shifter.is_table_mode() {
            return false;
        }
        match op(self.shifter.table_walker(), doc, &self.current) {
            Some(sel) => {
                self.update_sel(doc, sel);
                true
            }
            None => false,
        }
    }

    /// Row or column step. The first miss at an edge only cues; the second fails.
    fn table_step(
        &mut self,
        doc: &Document,
        op: impl Fn(&TableWalker, &Document, &CursorSelection) -> Option<CursorSelection>,
    ) -> bool {
        if !self.shifter.is_table_mode() {
            return false;
        }
        match op(self.shifter.table_walker(), doc, &self.current) {
            Some(sel) => {
                self.update_sel(doc, sel);
                true
            }
            None if self.table_edge_missed => false,
            None => {
                self.table_edge_missed = true;
                self.table_bumped_edge = true;
                true
            }
        }
    }

    pub fn go_to_first_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_first_cell)
    }

    pub fn go_to_last_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_last_cell)
    }

    pub fn go_to_row_first_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_row_first_cell)
    }

    pub fn go_to_row_last_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_row_last_cell)
    }

    pub fn go_to_col_first_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_col_first_cell)
    }

    pub fn go_to_col_last_cell(&mut self, doc: &Document) -> bool {
        self.table_move(doc, TableWalker::go_to_col_last_cell)
    }

    pub fn go_to_cell(&mut self, doc: &Document, row: usize, col: usize) -> bool {
        self.table_move(doc, |walker, doc, sel| walker.go_to_cell(doc, sel, row, col))
    }

    pub fn next_row(&mut self, doc: &Document) -> bool {
        self.table_step(doc, TableWalker::next_row)
    }

    pub fn next_col(&mut self, doc: &Document) -> bool {
        self.table_step(doc, TableWalker::next_col)
    }

    pub fn table_location(&self, doc: &Document) -> Option<(usize, usize)> {
        self.shifter.table_walker().location(doc, &self.current)
    }

    pub fn table_dimensions(&self, doc: &Document) -> Option<(usize, usize)> {
        self.shifter.table_walker().dimensions(doc, &self.current)
    }

    pub fn row_header_text(&self, doc: &Document) -> Option<String> {
        self.shifter.table_walker().row_header_text(doc, &self.current)
    }

    pub fn col_header_text(&self, doc: &Document) -> Option<String> {
        self.shifter.table_walker().col_header_text(doc, &self.current)
    }

    pub fn guess_row_header_text(&self, doc: &Document) -> Option<String> {
        self.shifter.table_walker().guess_row_header_text(doc, &self.current)
    }

    pub fn guess_col_header_text(&self, doc: &Document) -> Option<String> {
        self.shifter.table_walker().guess_col_header_text(doc, &self.current)
    }

    // ------------------------------------------------------------------
    // Speech
    // ------------------------------------------------------------------

    /// Describe the current selection, with any pending boundary cues first
    pub fn get_description(&mut self, doc: &Document) -> Vec<NavDescription> {
        let mut out = Vec::new();
        if self.reached_page_end {
            let cue = if self.is_reversed() { Earcon::WrapToBottom } else { Earcon::WrapToTop };
            out.push(NavDescription::cue(cue));
        }
        if std::mem::take(&mut self.table_bumped_edge) {
            out.push(NavDescription::cue(Earcon::TableBoundary));
        }
        if self.current.is_collapsed() {
            return out;
        }
        let mut descriptions = self.shifter.describe(doc, &self.previous, &self.current);
        if let (Some(selection), Some(last)) = (&self.page_selection, descriptions.last_mut()) {
            last.annotation = [last.annotation.as_str(), selection.cue()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            last.earcon.get_or_insert(Earcon::Selection);
        }
        out.extend(descriptions);
        out
    }

    /// Speak the current position and keep advancing as speech finishes
    pub fn start_reading(&mut self, doc: &Document, speaker: &mut dyn Speaker, mode: QueueMode) {
        self.keep_reading = true;
        self.last_poll = None;
        tracing::info!("continuous reading started");
        let descriptions = self.get_description(doc);
        if descriptions.iter().all(NavDescription::is_empty) {
            self.advance_reading(doc, speaker);
            return;
        }
        speaker.speak(&descriptions, mode);
    }

    pub fn stop_reading(&mut self) {
        if self.keep_reading {
            tracing::info!("continuous reading stopped");
        }
        self.keep_reading = false;
    }

    /// Speech-complete callback for [`ReadMode::Callback`]
    pub fn on_speech_complete(&mut self, doc: &Document, speaker: &mut dyn Speaker) -> bool {
        if !self.keep_reading || self.config.read_mode != ReadMode::Callback {
            return false;
        }
        self.advance_reading(doc, speaker)
    }

    /// Periodic check for [`ReadMode::Polling`].
    ///
    /// The first call arms the timer; later calls advance once the interval
    /// has passed and the speaker is idle.
    pub fn poll_reading(&mut self, doc: &Document, speaker: &mut dyn Speaker, now: Instant) -> bool {
        if !self.keep_reading || self.config.read_mode != ReadMode::Polling {
            return false;
        }
        match self.last_poll {
            Some(last) if now.saturating_duration_since(last) < self.config.poll_interval() => return false,
            None => {
                self.last_poll = Some(now);
                return false;
            }
            Some(_) => self.last_poll = Some(now),
        }
        if speaker.is_speaking() {
            return false;
        }
        self.advance_reading(doc, speaker)
    }

    fn advance_reading(&mut self, doc: &Document, speaker: &mut dyn Speaker) -> bool {
        let moved = !self.resolve(doc, None) || self.next_(doc, false);
        if !moved {
            self.keep_reading = false;
            tracing::info!("continuous reading reached the end of the page");
            return false;
        }
        let descriptions = self.get_description(doc);
        speaker.speak(&descriptions, QueueMode::Queue);
        true
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    /// Make sure the cursor points at live content.
    ///
    /// Returns true if the position was already valid (or nothing better is
    /// known). Returns false after recovering from history, in which case
    /// the recovered position is the step's result.
    pub fn resolve(&mut self, doc: &Document, predicate: Option<NodePredicate<'_>>) -> bool {
        let root = doc.nav_root();
        let node = self.current.absolute_start().node;
        let accept = |d: &Document, n: NodeId| d.tree().contains(root, n) && predicate.is_none_or(|p| p(d, n));
        if !self.history.become_invalid(doc, node) && accept(doc, node) {
            return true;
        }
        let reverted = self.history.revert(doc, Some(&accept));
        let Some(target) = reverted.current else {
            tracing::debug!("no history to recover {:?} from", node);
            return true;
        };
        let reversed = self.is_reversed();
        let target_sel = CursorSelection::node(target, reversed);
        if self.shifter.is_table_mode() && enclosing_table(doc, target).is_none() {
            self.shifter.ensure_not_table_mode();
        }
        self.current = self.shifter.sync(doc, &target_sel).unwrap_or(target_sel);
        self.previous = match reverted.previous {
            Some(prev) => CursorSelection::node(prev, reversed),
            None => Self::page_origin(doc),
        };
        tracing::info!("cursor recovered to {:?} from history", target);
        false
    }

    // ------------------------------------------------------------------
    // Jumps and resets
    // ------------------------------------------------------------------

    /// Jump to the next element matching `predicate` (previous when reversed)
    pub fn find_next(&mut self, doc: &Document, predicate: &dyn Fn(&Document, NodeId) -> bool) -> bool {
        let root = doc.nav_root();
        let matching = |node: NodeId| {
            std::iter::once(node)
                .chain(doc.tree().ancestors(node))
                .take_while(|&n| n != root)
                .find(|&n| predicate(doc, n))
        };
        let origin = matching(self.current.start.node);
        let walker = FilteredWalker::new(Box::new(ObjectWalker::default()), |_, sel| {
            matching(sel.start.node).is_some_and(|m| Some(m) != origin)
        });
        let Some(found) = walker.next(doc, &self.current) else {
            tracing::debug!("no further match");
            return false;
        };
        let target = matching(found.start.node).unwrap_or(found.start.node);
        let target_sel = CursorSelection::node(target, self.is_reversed());
        if self.shifter.is_table_mode() && enclosing_table(doc, target).is_none() {
            self.shifter.ensure_not_table_mode();
        }
        let sel = self.shifter.sync(doc, &target_sel).unwrap_or(found);
        self.update_sel(doc, sel);
        true
    }

    /// Jump to the next structure of a kind
    pub fn find_next_structure(&mut self, doc: &Document, structure: Structure) -> bool {
        self.find_next(doc, &|d: &Document, n: NodeId| structure.matches(d, n))
    }

    /// Put the cursor on the unit containing a node
    pub fn sync_to_node(&mut self, doc: &Document, node: NodeId) -> bool {
        if self.shifter.is_table_mode() && enclosing_table(doc, node).is_none() {
            self.shifter.ensure_not_table_mode();
        }
        match self.shifter.sync(doc, &CursorSelection::node(node, self.is_reversed())) {
            Some(sel) => {
                self.update_sel(doc, sel);
                true
            }
            None => false,
        }
    }

    /// Back to the start of the page (end when reversed)
    pub fn sync_to_beginning(&mut self, doc: &Document) {
        let reversed = self.is_reversed();
        self.shifter.ensure_not_table_mode();
        self.previous = Self::page_origin(doc);
        self.current = Self::page_start(doc, reversed);
        self.reached_page_end = false;
    }

    /// Forget everything about the current page
    pub fn reset(&mut self, doc: &Document) {
        self.shifter.reset();
        self.history.clear();
        self.iframes.clear();
        self.outbox.clear();
        self.current = Self::page_start(doc, false);
        self.previous = Self::page_origin(doc);
        self.page_selection = None;
        self.reached_page_end = false;
        self.table_bumped_edge = false;
        self.table_edge_missed = false;
        self.table_entry = None;
        self.table_opt_out = None;
        self.dormant = false;
        self.keep_reading = false;
        self.last_poll = None;
        tracing::debug!("navigation reset");
    }

    // ------------------------------------------------------------------
    // Actions and selection
    // ------------------------------------------------------------------

    pub fn can_act(&self, doc: &Document) -> bool {
        self.shifter.can_act(doc, &self.current)
    }

    /// Activate the control under the cursor
    pub fn act(&self, doc: &mut Document) -> bool {
        self.shifter.act(doc, &self.current)
    }

    /// Start a page selection at the cursor, or drop the active one.
    ///
    /// Returns whether a selection is active afterwards.
    pub fn toggle_page_selection(&mut self) -> bool {
        if self.page_selection.take().is_some() {
            tracing::debug!("page selection cleared");
            return false;
        }
        self.page_selection = Some(PageSelection::new(self.current));
        true
    }

    pub fn page_selection(&self) -> Option<&PageSelection> {
        self.page_selection.as_ref()
    }

    pub fn page_selection_text(&self, doc: &Document) -> Option<String> {
        self.page_selection.as_ref().map(|selection| selection.text(doc))
    }
}
