//! Table walker
//!
//! Cells are laid out on a logical grid honoring `colspan` and `rowspan`.
//! A spanning cell occupies every slot it covers but is visited once, at
//! its top-left slot.

use fos_dom::{Document, NodeId};

use crate::classify::{classify, collapse_whitespace, leaf_text, NodeClass};
use crate::cursor::{Cursor, CursorSelection};
use crate::description::{ancestry_context, describe_leaves, NavDescription};
use crate::role::Role;
use crate::traverse::{leaves_from, leaves_within};
use crate::walker::{Walker, WalkerKind};

/// Spans larger than this are treated as typos
const MAX_SPAN: usize = 1000;

/// Logical grid of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    table: NodeId,
    slots: Vec<Vec<Option<NodeId>>>,
    cols: usize,
}

impl TableGrid {
    /// Lay out the rows of `table`, ignoring rows of nested tables
    pub fn build(doc: &Document, table: NodeId) -> Self {
        let mut rows = Vec::new();
        collect_rows(doc, table, &mut rows);

        let row_count = rows.len();
        let mut slots: Vec<Vec<Option<NodeId>>> = vec![Vec::new(); row_count];
        for (r, &row) in rows.iter().enumerate() {
            let mut c = 0;
            for cell in doc.tree().children(row).filter(|&n| is_cell(doc, n)) {
                while slots[r].get(c).is_some_and(Option::is_some) {
                    c += 1;
                }
                let colspan = span(doc, cell, "colspan").unwrap_or(1).max(1);
                let rowspan = match span(doc, cell, "rowspan") {
                    Some(0) => row_count - r,
                    Some(n) => n.min(row_count - r),
                    None => 1,
                };
                for slot_row in &mut slots[r..r + rowspan] {
                    if slot_row.len() < c + colspan {
                        slot_row.resize(c + colspan, None);
                    }
                    for slot in &mut slot_row[c..c + colspan] {
                        *slot = Some(cell);
                    }
                }
                c += colspan;
            }
        }

        let cols = slots.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut slots {
            row.resize(cols, None);
        }
        Self { table, slots, cols }
    }

    pub fn table(&self) -> NodeId {
        self.table
    }

    pub fn rows(&self) -> usize {
        self.slots.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.slots.get(row)?.get(col).copied().flatten()
    }

    /// Top-left slot of a cell
    pub fn position_of(&self, cell: NodeId) -> Option<(usize, usize)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.iter().position(|&s| s == Some(cell)).map(|c| (r, c)))
    }

    /// Cells at their top-left slots, in row-major order
    pub fn origins(&self) -> Vec<(usize, usize, NodeId)> {
        let mut out = Vec::new();
        for (r, row) in self.slots.iter().enumerate() {
            for (c, slot) in row.iter().enumerate() {
                let Some(cell) = *slot else { continue };
                let above = r > 0 && self.cell_at(r - 1, c) == Some(cell);
                let left = c > 0 && self.cell_at(r, c - 1) == Some(cell);
                if !above && !left {
                    out.push((r, c, cell));
                }
            }
        }
        out
    }

    fn row_is_all_headers(&self, doc: &Document, row: usize) -> bool {
        self.slots
            .get(row)
            .is_some_and(|cells| cells.iter().flatten().all(|&cell| is_header_cell(doc, cell)))
    }
}

fn collect_rows(doc: &Document, node: NodeId, rows: &mut Vec<NodeId>) {
    for child in doc.tree().children(node) {
        if Role::of(doc, child) == Some(Role::Row) {
            rows.push(child);
        } else if classify(doc, child) != NodeClass::Table && !is_cell(doc, child) {
            collect_rows(doc, child, rows);
        }
    }
}

fn span(doc: &Document, cell: NodeId, name: &str) -> Option<usize> {
    doc.attr(cell, name)?.trim().parse::<usize>().ok().map(|n| n.min(MAX_SPAN))
}

pub(crate) fn is_cell(doc: &Document, node: NodeId) -> bool {
    Role::of(doc, node).is_some_and(|r| r.is_cell())
}

fn is_header_cell(doc: &Document, node: NodeId) -> bool {
    Role::of(doc, node).is_some_and(|r| r.is_header_cell())
}

/// Nearest table around a node, below the navigation root
pub fn enclosing_table(doc: &Document, node: NodeId) -> Option<NodeId> {
    let root = doc.nav_root();
    std::iter::once(node)
        .chain(doc.tree().ancestors(node))
        .take_while(|&n| n != root)
        .find(|&n| classify(doc, n) == NodeClass::Table)
}

/// Cell of the nearest table that holds a node
pub fn enclosing_cell(doc: &Document, node: NodeId) -> Option<NodeId> {
    let root = doc.nav_root();
    for n in std::iter::once(node).chain(doc.tree().ancestors(node)).take_while(|&n| n != root) {
        if is_cell(doc, n) {
            return Some(n);
        }
        if classify(doc, n) == NodeClass::Table {
            return None;
        }
    }
    None
}

/// Which axis a header cell labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Col,
}

fn header_axis(doc: &Document, grid: &TableGrid, cell: NodeId) -> Option<Axis> {
    match doc.role(cell).as_deref() {
        Some("columnheader") => return Some(Axis::Col),
        Some("rowheader") => return Some(Axis::Row),
        _ => {}
    }
    if doc.tag(cell) != Some("th") {
        return None;
    }
    match doc.attr(cell, "scope").map(str::to_ascii_lowercase).as_deref() {
        Some("col") | Some("colgroup") => Some(Axis::Col),
        Some("row") | Some("rowgroup") => Some(Axis::Row),
        _ => {
            let in_thead = doc.tree().ancestors(cell).any(|a| doc.tag(a) == Some("thead"));
            let (row, _) = grid.position_of(cell)?;
            if in_thead || grid.row_is_all_headers(doc, row) { Some(Axis::Col) } else { Some(Axis::Row) }
        }
    }
}

/// Text of every content leaf in a cell
pub fn cell_text(doc: &Document, cell: NodeId) -> String {
    let parts: Vec<String> = leaves_within(doc, cell).map(|leaf| leaf_text(doc, leaf)).collect();
    collapse_whitespace(&parts.join(" "))
}

fn cell_has_content(doc: &Document, cell: NodeId) -> bool {
    leaves_within(doc, cell).next().is_some()
}

/// Where a selection sits in its table
#[derive(Debug, Clone)]
struct Location {
    grid: TableGrid,
    cell: Option<NodeId>,
    row: usize,
    col: usize,
}

/// Walker over table cells, plus the grid moves the table commands use
#[derive(Debug, Clone)]
pub struct TableWalker {
    max_chars: usize,
}

impl Default for TableWalker {
    fn default() -> Self {
        Self { max_chars: 2000 }
    }
}

impl TableWalker {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    fn cell_selection(cell: NodeId, reversed: bool) -> CursorSelection {
        CursorSelection::node(cell, reversed)
    }

    fn locate(&self, doc: &Document, sel: &CursorSelection) -> Option<Location> {
        let node = sel.start.node;
        let table = enclosing_table(doc, node)?;
        let grid = TableGrid::build(doc, table);
        let cell = enclosing_cell(doc, node);
        let (row, col) = cell.and_then(|c| grid.position_of(c)).unwrap_or((0, 0));
        Some(Location { grid, cell, row, col })
    }

    /// Grid position of the current cell
    pub fn location(&self, doc: &Document, sel: &CursorSelection) -> Option<(usize, usize)> {
        let loc = self.locate(doc, sel)?;
        loc.cell?;
        Some((loc.row, loc.col))
    }

    /// Rows and columns of the current table
    pub fn dimensions(&self, doc: &Document, sel: &CursorSelection) -> Option<(usize, usize)> {
        let loc = self.locate(doc, sel)?;
        Some((loc.grid.rows(), loc.grid.cols()))
    }

    pub fn is_in_table(&self, doc: &Document, sel: &CursorSelection) -> bool {
        enclosing_table(doc, sel.start.node).is_some()
    }

    /// True inside an interactive grid rather than a plain table
    pub fn is_in_grid(&self, doc: &Document, sel: &CursorSelection) -> bool {
        enclosing_table(doc, sel.start.node)
            .and_then(|t| Role::of(doc, t))
            .is_some_and(|r| matches!(r, Role::Grid | Role::TreeGrid))
    }

    pub fn go_to_first_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let (_, _, cell) = loc.grid.origins().into_iter().next()?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    pub fn go_to_last_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let (_, _, cell) = loc.grid.origins().into_iter().last()?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    pub fn go_to_row_first_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        loc.cell?;
        let cell = (0..loc.grid.cols()).find_map(|c| loc.grid.cell_at(loc.row, c))?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    pub fn go_to_row_last_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        loc.cell?;
        let cell = (0..loc.grid.cols()).rev().find_map(|c| loc.grid.cell_at(loc.row, c))?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    pub fn go_to_col_first_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        loc.cell?;
        let cell = (0..loc.grid.rows()).find_map(|r| loc.grid.cell_at(r, loc.col))?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    pub fn go_to_col_last_cell(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        loc.cell?;
        let cell = (0..loc.grid.rows()).rev().find_map(|r| loc.grid.cell_at(r, loc.col))?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    /// Jump to the cell covering a grid slot
    pub fn go_to_cell(&self, doc: &Document, sel: &CursorSelection, row: usize, col: usize) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let cell = loc.grid.cell_at(row, col)?;
        Some(Self::cell_selection(cell, sel.reversed))
    }

    /// Cell in the same column, one row down (up when reversed)
    pub fn next_row(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let current = loc.cell?;
        let pick = |r: usize| loc.grid.cell_at(r, loc.col).filter(|&c| c != current);
        let cell = if sel.reversed {
            (0..loc.row).rev().find_map(pick)?
        } else {
            (loc.row + 1..loc.grid.rows()).find_map(pick)?
        };
        Some(Self::cell_selection(cell, sel.reversed))
    }

    /// Cell in the same row, one column right (left when reversed)
    pub fn next_col(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let current = loc.cell?;
        let pick = |c: usize| loc.grid.cell_at(loc.row, c).filter(|&cell| cell != current);
        let cell = if sel.reversed {
            (0..loc.col).rev().find_map(pick)?
        } else {
            (loc.col + 1..loc.grid.cols()).find_map(pick)?
        };
        Some(Self::cell_selection(cell, sel.reversed))
    }

    fn explicit_headers(&self, doc: &Document, loc: &Location, axis: Axis) -> Option<String> {
        let cell = loc.cell?;
        if let Some(ids) = doc.attr(cell, "headers") {
            let texts: Vec<String> = ids
                .split_whitespace()
                .filter_map(|id| doc.get_element_by_id(id))
                .filter(|&h| {
                    let same_row = loc.grid.position_of(h).is_some_and(|(r, _)| r == loc.row);
                    (axis == Axis::Row) == same_row
                })
                .map(|h| cell_text(doc, h))
                .filter(|t| !t.is_empty())
                .collect();
            if !texts.is_empty() {
                return Some(texts.join(" "));
            }
        }
        let candidates: Vec<NodeId> = match axis {
            Axis::Col => (0..loc.row).rev().filter_map(|r| loc.grid.cell_at(r, loc.col)).collect(),
            Axis::Row => (0..loc.col).rev().filter_map(|c| loc.grid.cell_at(loc.row, c)).collect(),
        };
        candidates
            .into_iter()
            .filter(|&h| h != cell)
            .find(|&h| header_axis(doc, &loc.grid, h) == Some(axis))
            .map(|h| cell_text(doc, h))
            .filter(|t| !t.is_empty())
    }

    /// Marked-up header of the current row
    pub fn row_header_text(&self, doc: &Document, sel: &CursorSelection) -> Option<String> {
        let loc = self.locate(doc, sel)?;
        self.explicit_headers(doc, &loc, Axis::Row)
    }

    /// Marked-up header of the current column
    pub fn col_header_text(&self, doc: &Document, sel: &CursorSelection) -> Option<String> {
        let loc = self.locate(doc, sel)?;
        self.explicit_headers(doc, &loc, Axis::Col)
    }

    /// Row header, falling back to the first cell of the row
    pub fn guess_row_header_text(&self, doc: &Document, sel: &CursorSelection) -> Option<String> {
        let loc = self.locate(doc, sel)?;
        let cell = loc.cell?;
        self.explicit_headers(doc, &loc, Axis::Row).or_else(|| {
            let first = loc.grid.cell_at(loc.row, 0).filter(|&c| c != cell)?;
            Some(cell_text(doc, first)).filter(|t| !t.is_empty())
        })
    }

    /// Column header, falling back to the first cell of the column
    pub fn guess_col_header_text(&self, doc: &Document, sel: &CursorSelection) -> Option<String> {
        let loc = self.locate(doc, sel)?;
        let cell = loc.cell?;
        self.explicit_headers(doc, &loc, Axis::Col).or_else(|| {
            let first = loc.grid.cell_at(0, loc.col).filter(|&c| c != cell)?;
            Some(cell_text(doc, first)).filter(|t| !t.is_empty())
        })
    }
}

impl Walker for TableWalker {
    fn kind(&self) -> WalkerKind {
        WalkerKind::Table
    }

    fn next(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let loc = self.locate(doc, sel)?;
        let origins = loc.grid.origins();
        let at = loc.cell.and_then(|c| origins.iter().position(|o| o.2 == c));
        let found = if sel.reversed {
            let before = at.unwrap_or(origins.len());
            origins[..before].iter().rev().find(|o| cell_has_content(doc, o.2))
        } else {
            let after = at.map_or(0, |i| i + 1);
            origins[after..].iter().find(|o| cell_has_content(doc, o.2))
        };
        found.map(|o| Self::cell_selection(o.2, sel.reversed))
    }

    fn sync(&self, doc: &Document, sel: &CursorSelection) -> Option<CursorSelection> {
        let node = sel.start.node;
        enclosing_table(doc, node)?;
        if let Some(cell) = enclosing_cell(doc, node) {
            return Some(Self::cell_selection(cell, sel.reversed));
        }
        // Somewhere in the table but outside any cell, e.g. the caption
        let loc = self.locate(doc, sel)?;
        let origins = loc.grid.origins();
        let mut with_content = origins.iter().filter(|o| cell_has_content(doc, o.2));
        let picked = if sel.reversed { with_content.next_back() } else { with_content.next() };
        picked
            .or(origins.first())
            .map(|o| Self::cell_selection(o.2, sel.reversed))
    }

    fn describe(&self, doc: &Document, prev: &CursorSelection, cur: &CursorSelection) -> Vec<NavDescription> {
        let cell = cur.start.node;
        let mut context = vec![ancestry_context(doc, Some(prev.start.node), cell)];

        let here = self.location(doc, cur);
        let same_table = enclosing_table(doc, prev.start.node) == enclosing_table(doc, cell);
        let there = if same_table { self.location(doc, prev) } else { None };
        if let Some((row, col)) = here {
            if there.is_none_or(|(r, _)| r != row) {
                context.extend(self.row_header_text(doc, cur));
            }
            if there.is_none_or(|(_, c)| c != col) {
                context.extend(self.col_header_text(doc, cur));
            }
        }
        let context = context.into_iter().filter(|c| !c.is_empty()).collect::<Vec<_>>().join(", ");

        let leaves: Vec<NodeId> = leaves_within(doc, cell).collect();
        if leaves.is_empty() {
            return vec![NavDescription::new(context, "blank", "")];
        }
        describe_leaves(doc, cell, &leaves, context, self.max_chars)
    }

    fn sync_to_page_beginning(&self, doc: &Document, reversed: bool) -> Option<CursorSelection> {
        let root = doc.nav_root();
        let point = if reversed { Cursor::after(root) } else { Cursor::before(root) };
        let leaf = leaves_from(doc, point, reversed).find(|&l| enclosing_cell(doc, l).is_some())?;
        self.sync(doc, &CursorSelection::collapsed(Cursor::before(leaf), reversed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a table from rows of (tag, text) cells
    fn table(doc: &mut Document, rows: &[&[(&str, &str)]]) -> (NodeId, Vec<Vec<NodeId>>) {
        let body = doc.body();
        let table = doc.append_element(body, "table").unwrap();
        let tbody = doc.append_element(table, "tbody").unwrap();
        let mut cells = Vec::new();
        for row in rows {
            let tr = doc.append_element(tbody, "tr").unwrap();
            let mut ids = Vec::new();
            for &(tag, text) in row.iter() {
                let cell = doc.append_element(tr, tag).unwrap();
                if !text.is_empty() {
                    doc.append_text(cell, text).unwrap();
                }
                ids.push(cell);
            }
            cells.push(ids);
        }
        (table, cells)
    }

    #[test]
    fn test_grid_with_spans() {
        let mut doc = Document::default();
        let (t, cells) = table(&mut doc, &[&[("td", "a"), ("td", "b")], &[("td", "c")]]);
        doc.set_attribute(cells[0][0], "rowspan", "2").unwrap();
        let grid = TableGrid::build(&doc, t);
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.cell_at(1, 0), Some(cells[0][0]));
        assert_eq!(grid.cell_at(1, 1), Some(cells[1][0]));
        assert_eq!(grid.position_of(cells[1][0]), Some((1, 1)));
        assert_eq!(grid.origins().len(), 3);
    }

    #[test]
    fn test_colspan_and_ragged_rows() {
        let mut doc = Document::default();
        let (t, cells) = table(&mut doc, &[&[("td", "wide")], &[("td", "x"), ("td", "y"), ("td", "z")]]);
        doc.set_attribute(cells[0][0], "colspan", "2").unwrap();
        let grid = TableGrid::build(&doc, t);
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.cell_at(0, 1), Some(cells[0][0]));
        assert_eq!(grid.cell_at(0, 2), None);
    }

    #[test]
    fn test_nested_table_rows_excluded() {
        let mut doc = Document::default();
        let (outer, cells) = table(&mut doc, &[&[("td", "")]]);
        let inner = doc.append_element(cells[0][0], "table").unwrap();
        let tr = doc.append_element(inner, "tr").unwrap();
        let inner_cell = doc.append_element_with_text(tr, "td", "deep").unwrap();
        assert_eq!(TableGrid::build(&doc, outer).rows(), 1);
        let text = doc.tree().first_child(inner_cell).unwrap();
        assert_eq!(enclosing_table(&doc, text), Some(inner));
        assert_eq!(enclosing_cell(&doc, text), Some(inner_cell));
    }

    #[test]
    fn test_next_skips_empty_cells() {
        let mut doc = Document::default();
        let (_, cells) = table(&mut doc, &[&[("td", "a"), ("td", "")], &[("td", "c"), ("td", "d")]]);
        let walker = TableWalker::default();
        let first = walker.sync_to_page_beginning(&doc, false).unwrap();
        assert_eq!(first.start.node, cells[0][0]);
        let next = walker.next(&doc, &first).unwrap();
        assert_eq!(next.start.node, cells[1][0]);
        let back = walker.next(&doc, &next.with_reversed(true)).unwrap();
        assert_eq!(back.start.node, cells[0][0]);
    }

    #[test]
    fn test_row_and_column_moves() {
        let mut doc = Document::default();
        let (_, cells) = table(&mut doc, &[&[("td", "a"), ("td", "b")], &[("td", "c"), ("td", "d")]]);
        let walker = TableWalker::default();
        let a = CursorSelection::node(cells[0][0], false);
        assert_eq!(walker.next_col(&doc, &a).unwrap().start.node, cells[0][1]);
        assert_eq!(walker.next_row(&doc, &a).unwrap().start.node, cells[1][0]);
        let b = CursorSelection::node(cells[0][1], false);
        assert!(walker.next_col(&doc, &b).is_none());
        let d = CursorSelection::node(cells[1][1], true);
        assert_eq!(walker.next_row(&doc, &d).unwrap().start.node, cells[0][1]);
        assert_eq!(walker.go_to_first_cell(&doc, &d).unwrap().start.node, cells[0][0]);
        assert_eq!(walker.go_to_row_first_cell(&doc, &d).unwrap().start.node, cells[1][0]);
        assert_eq!(walker.go_to_col_first_cell(&doc, &d).unwrap().start.node, cells[0][1]);
        assert_eq!(walker.go_to_cell(&doc, &a, 1, 1).unwrap().start.node, cells[1][1]);
        assert_eq!(walker.location(&doc, &d), Some((1, 1)));
        assert_eq!(walker.dimensions(&doc, &d), Some((2, 2)));
    }

    #[test]
    fn test_headers() {
        let mut doc = Document::default();
        let (_, cells) = table(
            &mut doc,
            &[
                &[("th", ""), ("th", "Price"), ("th", "Stock")],
                &[("th", "Apples"), ("td", "1.00"), ("td", "12")],
                &[("td", "Pears"), ("td", "2.00"), ("td", "3")],
            ],
        );
        let walker = TableWalker::default();
        let apples_price = CursorSelection::node(cells[1][1], false);
        assert_eq!(walker.col_header_text(&doc, &apples_price).as_deref(), Some("Price"));
        assert_eq!(walker.row_header_text(&doc, &apples_price).as_deref(), Some("Apples"));

        let pears_stock = CursorSelection::node(cells[2][2], false);
        assert_eq!(walker.row_header_text(&doc, &pears_stock), None);
        assert_eq!(walker.guess_row_header_text(&doc, &pears_stock).as_deref(), Some("Pears"));
        assert_eq!(walker.guess_col_header_text(&doc, &pears_stock).as_deref(), Some("Stock"));
    }

    #[test]
    fn test_headers_attribute_wins() {
        let mut doc = Document::default();
        let (_, cells) = table(&mut doc, &[&[("td", "Label"), ("td", "value")]]);
        doc.set_attribute(cells[0][0], "id", "lbl").unwrap();
        doc.set_attribute(cells[0][1], "headers", "lbl").unwrap();
        let walker = TableWalker::default();
        let value = CursorSelection::node(cells[0][1], false);
        assert_eq!(walker.row_header_text(&doc, &value).as_deref(), Some("Label"));
        assert_eq!(walker.col_header_text(&doc, &value), None);
    }

    #[test]
    fn test_describe_announces_headers_on_change() {
        let mut doc = Document::default();
        let (_, cells) = table(
            &mut doc,
            &[&[("th", "Name"), ("th", "Age")], &[("td", "Ann"), ("td", "31")], &[("td", "Bo"), ("td", "")]],
        );
        let walker = TableWalker::default();
        let ann = CursorSelection::node(cells[1][0], false);
        let age = CursorSelection::node(cells[1][1], false);
        let desc = walker.describe(&doc, &ann, &age);
        assert_eq!(desc[0].context, "Age");
        assert_eq!(desc[0].text, "31");

        let blank = CursorSelection::node(cells[2][1], false);
        let desc = walker.describe(&doc, &age, &blank);
        assert_eq!(desc[0].text, "blank");
    }

    #[test]
    fn test_grid_role() {
        let mut doc = Document::default();
        let (t, cells) = table(&mut doc, &[&[("td", "a")]]);
        let walker = TableWalker::default();
        let sel = CursorSelection::node(cells[0][0], false);
        assert!(walker.is_in_table(&doc, &sel));
        assert!(!walker.is_in_grid(&doc, &sel));
        doc.set_attribute(t, "role", "grid").unwrap();
        assert!(walker.is_in_grid(&doc, &sel));
    }
}
