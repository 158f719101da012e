//! Visitor pattern for walking finished table grids.
//!
//! Serializers implement [`GridVisitor`] and hand it to [`walk_grid`] or
//! [`walk_document`], which visit tables, rows, cells and paragraphs in
//! document order, descending into nested tables.
//!
//! # Example
//!
//! ```
//! use wordgrid::model::Cell;
//! use wordgrid::render::visitor::{GridVisitor, VisitorAction};
//!
//! struct SkipMergedAway;
//!
//! impl GridVisitor for SkipMergedAway {
//!     fn visit_cell(&mut self, cell: &Cell, _row: usize) -> VisitorAction {
//!         if cell.is_merged_away() {
//!             VisitorAction::Skip
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

use crate::model::{Block, Cell, CellContent, Document, Paragraph, Row, TableGrid};

/// Action returned by visitor methods to control the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Descend into the element.
    #[default]
    Continue,

    /// Do not descend into the element's children.
    Skip,

    /// End the walk.
    Stop,
}

impl VisitorAction {
    /// Check if this action indicates the children should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action ends the walk.
    pub fn should_stop(&self) -> bool {
        matches!(self, VisitorAction::Stop)
    }
}

/// Trait for visiting grid elements.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait GridVisitor {
    /// Called before a table's rows. `depth` is 0 for top-level tables.
    fn visit_table(&mut self, table: &TableGrid, depth: usize) -> VisitorAction {
        let _ = (table, depth);
        VisitorAction::Continue
    }

    /// Called before a row's cells.
    fn visit_row(&mut self, row: &Row, index: usize) -> VisitorAction {
        let _ = (row, index);
        VisitorAction::Continue
    }

    /// Called before a cell's content.
    fn visit_cell(&mut self, cell: &Cell, row: usize) -> VisitorAction {
        let _ = (cell, row);
        VisitorAction::Continue
    }

    /// Called for each paragraph, inside cells and in the document body.
    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> VisitorAction {
        let _ = paragraph;
        VisitorAction::Continue
    }

    /// Called after a row's cells.
    fn leave_row(&mut self, row: &Row, index: usize) {
        let _ = (row, index);
    }

    /// Called after a table's rows.
    fn leave_table(&mut self, table: &TableGrid, depth: usize) {
        let _ = (table, depth);
    }
}

/// Walk a table grid and its nested tables.
///
/// Returns [`VisitorAction::Stop`] if the visitor ended the walk.
pub fn walk_grid<V: GridVisitor + ?Sized>(table: &TableGrid, visitor: &mut V) -> VisitorAction {
    walk_table(table, 0, visitor)
}

/// Walk every paragraph and table in a document body.
pub fn walk_document<V: GridVisitor + ?Sized>(doc: &Document, visitor: &mut V) -> VisitorAction {
    for block in doc.body() {
        let action = match block {
            Block::Paragraph(p) => visitor.visit_paragraph(p),
            Block::Table(t) => walk_table(t, 0, visitor),
            Block::TextBreak { .. } | Block::PageBreak => VisitorAction::Continue,
        };
        if action.should_stop() {
            return VisitorAction::Stop;
        }
    }
    VisitorAction::Continue
}

fn walk_table<V: GridVisitor + ?Sized>(
    table: &TableGrid,
    depth: usize,
    visitor: &mut V,
) -> VisitorAction {
    match visitor.visit_table(table, depth) {
        VisitorAction::Stop => return VisitorAction::Stop,
        VisitorAction::Skip => return VisitorAction::Continue,
        VisitorAction::Continue => {}
    }

    for (index, row) in table.rows().iter().enumerate() {
        match visitor.visit_row(row, index) {
            VisitorAction::Stop => return VisitorAction::Stop,
            VisitorAction::Skip => continue,
            VisitorAction::Continue => {}
        }

        for cell in row.cells() {
            match visitor.visit_cell(cell, index) {
                VisitorAction::Stop => return VisitorAction::Stop,
                VisitorAction::Skip => continue,
                VisitorAction::Continue => {}
            }

            for content in cell.content() {
                let action = match content {
                    CellContent::Paragraph(p) => visitor.visit_paragraph(p),
                    CellContent::Table(t) => walk_table(t, depth + 1, visitor),
                };
                if action.should_stop() {
                    return VisitorAction::Stop;
                }
            }
        }

        visitor.leave_row(row, index);
    }

    visitor.leave_table(table, depth);
    VisitorAction::Continue
}

/// Visitor that counts grid elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Tables visited, nested ones included
    pub tables: usize,
    /// Rows visited
    pub rows: usize,
    /// Cells visited
    pub cells: usize,
    /// Cells spanning several columns or taking part in a vertical merge
    pub merged_cells: usize,
    /// Paragraphs visited
    pub paragraphs: usize,
    /// Deepest nesting level seen (0 for top-level only)
    pub max_depth: usize,
}

impl GridStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a whole document.
    pub fn of_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        walk_document(doc, &mut stats);
        stats
    }
}

impl GridVisitor for GridStats {
    fn visit_table(&mut self, _table: &TableGrid, depth: usize) -> VisitorAction {
        self.tables += 1;
        self.max_depth = self.max_depth.max(depth);
        VisitorAction::Continue
    }

    fn visit_row(&mut self, _row: &Row, _index: usize) -> VisitorAction {
        self.rows += 1;
        VisitorAction::Continue
    }

    fn visit_cell(&mut self, cell: &Cell, _row: usize) -> VisitorAction {
        self.cells += 1;
        if cell.grid_span() > 1 || cell.vertical_merge().is_merged() {
            self.merged_cells += 1;
        }
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, _paragraph: &Paragraph) -> VisitorAction {
        self.paragraphs += 1;
        VisitorAction::Continue
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn GridVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: GridVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut f: impl FnMut(&mut dyn GridVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = f(visitor.as_mut());
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl GridVisitor for CompositeVisitor {
    fn visit_table(&mut self, table: &TableGrid, depth: usize) -> VisitorAction {
        self.first_action(|v| v.visit_table(table, depth))
    }

    fn visit_row(&mut self, row: &Row, index: usize) -> VisitorAction {
        self.first_action(|v| v.visit_row(row, index))
    }

    fn visit_cell(&mut self, cell: &Cell, row: usize) -> VisitorAction {
        self.first_action(|v| v.visit_cell(cell, row))
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(paragraph))
    }

    fn leave_row(&mut self, row: &Row, index: usize) {
        for visitor in &mut self.visitors {
            visitor.leave_row(row, index);
        }
    }

    fn leave_table(&mut self, table: &TableGrid, depth: usize) {
        for visitor in &mut self.visitors {
            visitor.leave_table(table, depth);
        }
    }
}
