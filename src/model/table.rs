//! Table grid types.

use super::Paragraph;
use crate::error::{Error, Result};
use crate::settings::ValidationMode;
use crate::style::{SharedStyle, VerticalMerge};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A table: ordered rows of ordered cells with merge state per cell.
///
/// Grids are produced by [`TableGridBuilder::finish`](crate::TableGridBuilder::finish)
/// and are read-only afterwards. Grids obtained any other way (for example
/// deserialized) can be checked with [`TableGrid::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Table style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<SharedStyle>,

    /// Rows in the table
    rows: Vec<Row>,
}

impl TableGrid {
    pub(crate) fn from_parts(style: Option<SharedStyle>, rows: Vec<Row>) -> Self {
        Self { style, rows }
    }

    /// Get the table style.
    pub fn style(&self) -> Option<&SharedStyle> {
        self.style.as_ref()
    }

    /// Get the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by index (0-based).
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of logical columns: the widest row's summed span.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::span).max().unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the cell starting at the given logical column.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.iter().find(|c| c.column == column)
    }

    /// Get the cell whose span covers the given logical column.
    pub fn covering_cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.iter().find(|c| c.covers(column))
    }

    /// Find the cell that opened the merged region containing a cell.
    ///
    /// Returns the row of the origin together with the cell. Cells outside
    /// any vertical merge are their own origin.
    pub fn merge_origin(&self, row: usize, column: usize) -> Option<(usize, &Cell)> {
        let mut current = row;
        loop {
            let cell = self.cell_at(current, column)?;
            if cell.vertical_merge != VerticalMerge::Continue {
                return Some((current, cell));
            }
            current = current.checked_sub(1)?;
        }
    }

    /// Get the number of rows covered by the cell at a position.
    ///
    /// A restart cell covers itself plus the continuation cells directly
    /// below it; continuation cells report 0, and missing cells report 0.
    pub fn row_span(&self, row: usize, column: usize) -> usize {
        match self.cell_at(row, column).map(|c| c.vertical_merge) {
            None | Some(VerticalMerge::Continue) => 0,
            Some(VerticalMerge::None) => 1,
            Some(VerticalMerge::Restart) => {
                1 + (row + 1..self.rows.len())
                    .take_while(|&r| {
                        self.cell_at(r, column)
                            .map_or(false, |c| c.vertical_merge == VerticalMerge::Continue)
                    })
                    .count()
            }
        }
    }

    /// Check if the table has merged cells.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.grid_span > 1 || c.vertical_merge.is_merged())
    }

    /// Iterate over the grids nested directly inside this one.
    pub fn nested_tables(&self) -> impl Iterator<Item = &TableGrid> {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .flat_map(|c| c.nested_tables())
    }

    /// Get plain text representation of the table.
    ///
    /// Continuation cells render empty since their region belongs to the
    /// cell above.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|c| {
                        if c.is_merged_away() {
                            String::new()
                        } else {
                            c.plain_text()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check the structural invariants of the grid and its nested grids.
    ///
    /// - every continuation cell sits under a restart or continuation cell
    ///   that starts at the same column in the previous row
    /// - a continuation cell spans as many columns as the cell it continues
    /// - every row spans [`column_count`](Self::column_count) columns; in
    ///   lenient mode short rows are only logged
    pub fn validate(&self, mode: ValidationMode) -> Result<()> {
        let mut origins: HashMap<(usize, usize), (u32, VerticalMerge)> = HashMap::new();

        for (r, row) in self.rows.iter().enumerate() {
            let mut column = 0usize;
            for cell in &row.cells {
                if cell.vertical_merge == VerticalMerge::Continue {
                    let above = r
                        .checked_sub(1)
                        .and_then(|previous| origins.get(&(previous, column)));
                    match above {
                        Some(&(span, merge)) if merge.is_merged() => {
                            if span != cell.grid_span {
                                return Err(Error::VerticalMergeSpanMismatch {
                                    row: r,
                                    column,
                                    expected: span,
                                    found: cell.grid_span,
                                });
                            }
                        }
                        _ => return Err(Error::UnmatchedVerticalMergeContinuation { row: r, column }),
                    }
                }
                origins.insert((r, column), (cell.grid_span, cell.vertical_merge));
                column += cell.grid_span as usize;
            }
        }

        let expected = self.column_count();
        for (r, row) in self.rows.iter().enumerate() {
            let found = row.span();
            if found == expected {
                continue;
            }
            match mode {
                ValidationMode::Strict => {
                    return Err(Error::InconsistentRowSpan {
                        row: r,
                        expected,
                        found,
                    })
                }
                ValidationMode::Lenient => log::warn!(
                    "Row {} spans {} of {} columns; leaving it unpadded",
                    r,
                    found,
                    expected
                ),
            }
        }

        for nested in self.nested_tables() {
            nested.validate(mode)?;
        }

        Ok(())
    }
}

/// Row-level flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowProperties {
    /// Repeat the row at the top of each page
    #[serde(default)]
    pub is_header: bool,

    /// Keep the row on one page
    #[serde(default)]
    pub cant_split: bool,

    /// Treat the height as exact rather than minimum
    #[serde(default)]
    pub exact_height: bool,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Row height in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,

    #[serde(default)]
    properties: RowProperties,

    /// Cells in the row
    cells: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(height: Option<u32>, properties: RowProperties) -> Self {
        Self {
            height,
            properties,
            cells: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, cell: Cell) -> &mut Cell {
        self.cells.push(cell);
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }

    /// Get the row height in twips.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Get the row flags.
    pub fn properties(&self) -> RowProperties {
        self.properties
    }

    /// Check if this is a header row.
    pub fn is_header(&self) -> bool {
        self.properties.is_header
    }

    /// Get the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the summed span of the row's cells.
    pub fn span(&self) -> usize {
        self.cells.iter().map(|c| c.grid_span as usize).sum()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Content held by a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellContent {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A nested table
    Table(TableGrid),
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell width in twips; dropped on continuation cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,

    /// Cell style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<SharedStyle>,

    /// Number of logical columns the cell occupies
    grid_span: u32,

    /// Vertical merge state
    #[serde(default)]
    vertical_merge: VerticalMerge,

    /// Starting logical column (0-based)
    column: usize,

    /// Paragraphs and nested tables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<CellContent>,
}

impl Cell {
    pub(crate) fn new(
        column: usize,
        width: Option<u32>,
        style: Option<SharedStyle>,
        grid_span: u32,
        vertical_merge: VerticalMerge,
    ) -> Self {
        Self {
            width,
            style,
            grid_span: grid_span.max(1),
            vertical_merge,
            column,
            content: Vec::new(),
        }
    }

    pub(crate) fn push_content(&mut self, content: CellContent) {
        self.content.push(content);
    }

    /// Get the cell width in twips.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Get the cell style.
    pub fn style(&self) -> Option<&SharedStyle> {
        self.style.as_ref()
    }

    /// Get the number of logical columns the cell occupies.
    pub fn grid_span(&self) -> u32 {
        self.grid_span
    }

    /// Get the vertical merge state.
    pub fn vertical_merge(&self) -> VerticalMerge {
        self.vertical_merge
    }

    /// Get the starting logical column (0-based).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Check if a logical column falls within this cell's span.
    pub fn covers(&self, column: usize) -> bool {
        column >= self.column && column < self.column + self.grid_span as usize
    }

    /// Check if the cell continues a merged region from above.
    pub fn is_merged_away(&self) -> bool {
        self.vertical_merge == VerticalMerge::Continue
    }

    /// Get the cell content.
    pub fn content(&self) -> &[CellContent] {
        &self.content
    }

    /// Iterate over tables nested in this cell.
    pub fn nested_tables(&self) -> impl Iterator<Item = &TableGrid> {
        self.content.iter().filter_map(|c| match c {
            CellContent::Table(table) => Some(table),
            CellContent::Paragraph(_) => None,
        })
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                CellContent::Paragraph(p) => p.plain_text(),
                CellContent::Table(t) => t.plain_text().replace(['\t', '\n'], " "),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}
