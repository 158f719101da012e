//! Incremental table grid construction.
//!
//! Callers append rows and cells in order; merge directives travel in the
//! cell style (`gridSpan`, `vMerge`). The builder tracks a column cursor per
//! row, so callers never pass explicit coordinates.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wordgrid::style::StyleRegistry;
//! use wordgrid::TableGridBuilder;
//!
//! # fn main() -> wordgrid::Result<()> {
//! let mut registry = StyleRegistry::new();
//! let mut table = TableGridBuilder::new(&mut registry);
//!
//! let mut row = table.add_row(None);
//! row.add_cell(Some(500)).add_text("A");
//! row.add_styled_cell(Some(1000), json!({"gridSpan": 2})).add_text("B");
//! row.add_styled_cell(Some(500), json!({"vMerge": "restart"})).add_text("C");
//!
//! let mut row = table.add_row(None);
//! row.add_styled_cell(Some(1500), json!({"gridSpan": 3})).add_text("D");
//! row.add_styled_cell(None, json!({"vMerge": "continue"}));
//!
//! let grid = table.finish()?;
//! assert_eq!(grid.column_count(), 4);
//! assert_eq!(grid.row_span(0, 3), 2);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::model::{Cell, CellContent, Paragraph, Row, RowProperties, TableGrid, TextRun};
use crate::settings::ValidationMode;
use crate::style::{
    SharedStyle, StyleDefinition, StyleKind, StyleRef, StyleRegistry, StyleResolver, VerticalMerge,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct MergeSlot {
    span: u32,
    merge: VerticalMerge,
}

/// Builder for a [`TableGrid`].
///
/// Structural problems (a continuation without an open merge above it, a
/// continuation whose span differs from its group, rows of unequal span) are
/// noticed as cells are added but reported by [`finish`](Self::finish), so
/// callers may build speculatively and check once.
pub struct TableGridBuilder<'r> {
    registry: &'r mut StyleRegistry,
    mode: ValidationMode,
    style: Option<SharedStyle>,
    rows: Vec<Row>,
    cursor: usize,
    origins: HashMap<(usize, usize), MergeSlot>,
}

impl<'r> TableGridBuilder<'r> {
    /// Create a builder resolving styles against `registry`.
    pub fn new(registry: &'r mut StyleRegistry) -> Self {
        Self {
            registry,
            mode: ValidationMode::default(),
            style: None,
            rows: Vec::new(),
            cursor: 0,
            origins: HashMap::new(),
        }
    }

    /// Set the validation mode used by [`finish`](Self::finish).
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the table style.
    pub fn with_style(mut self, style: impl Into<StyleRef>) -> Self {
        let resolved = StyleResolver::new(&mut *self.registry).resolve_ref(StyleKind::Table, style.into());
        self.style = Some(resolved);
        self
    }

    /// Start a builder for a table nested inside a cell of this one.
    ///
    /// The nested builder shares the registry and validation mode but
    /// infers its own column count.
    pub fn nested(&mut self) -> TableGridBuilder<'_> {
        TableGridBuilder::new(&mut *self.registry).with_mode(self.mode)
    }

    /// Append a row.
    pub fn add_row(&mut self, height: Option<u32>) -> RowBuilder<'_, 'r> {
        self.add_row_with(height, RowProperties::default())
    }

    /// Append a row with row-level flags.
    pub fn add_row_with(&mut self, height: Option<u32>, properties: RowProperties) -> RowBuilder<'_, 'r> {
        self.rows.push(Row::new(height, properties));
        self.cursor = 0;
        let row = self.rows.len() - 1;
        RowBuilder { builder: self, row }
    }

    /// Get the number of rows added so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the column count inferred so far.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::span).max().unwrap_or(0)
    }

    /// Finish the grid and check its structure.
    pub fn finish(self) -> Result<TableGrid> {
        let mode = self.mode;
        let grid = TableGrid::from_parts(self.style, self.rows);
        grid.validate(mode)?;
        log::debug!(
            "Finished table grid: {} rows x {} columns",
            grid.row_count(),
            grid.column_count()
        );
        Ok(grid)
    }

    fn push_cell(&mut self, row: usize, width: Option<u32>, style: Option<SharedStyle>) -> CellBuilder<'_> {
        let column = self.cursor;
        let properties = style.as_deref().and_then(StyleDefinition::as_cell);
        let declared = properties.and_then(|p| p.grid_span);
        let merge = properties.and_then(|p| p.v_merge).unwrap_or_default();

        let span = if merge == VerticalMerge::Continue {
            let above = row
                .checked_sub(1)
                .and_then(|previous| self.origins.get(&(previous, column)))
                .copied()
                .filter(|slot| slot.merge.is_merged());
            match (above, declared) {
                (Some(slot), None) => slot.span,
                (Some(slot), Some(span)) => {
                    if span != slot.span {
                        log::debug!(
                            "Continuation at row {}, column {} spans {} but its group spans {}",
                            row,
                            column,
                            span,
                            slot.span
                        );
                    }
                    span
                }
                (None, span) => {
                    log::debug!("No open vertical merge above row {}, column {}", row, column);
                    span.unwrap_or(1)
                }
            }
        } else {
            declared.unwrap_or(1)
        };

        let width = if merge == VerticalMerge::Continue { None } else { width };

        self.origins.insert((row, column), MergeSlot { span, merge });
        self.cursor += span as usize;

        let cell = self.rows[row].push(Cell::new(column, width, style, span, merge));
        CellBuilder {
            cell,
            registry: &mut *self.registry,
        }
    }
}

/// Handle for adding cells to the row most recently appended.
pub struct RowBuilder<'b, 'r> {
    builder: &'b mut TableGridBuilder<'r>,
    row: usize,
}

impl<'b, 'r> RowBuilder<'b, 'r> {
    /// Get the row index (0-based).
    pub fn index(&self) -> usize {
        self.row
    }

    /// Get the column where the next cell will start.
    pub fn cursor(&self) -> usize {
        self.builder.cursor
    }

    /// Append an unstyled cell.
    pub fn add_cell(&mut self, width: Option<u32>) -> CellBuilder<'_> {
        self.builder.push_cell(self.row, width, None)
    }

    /// Append a cell with a style name, inline attributes, or a resolved style.
    pub fn add_styled_cell(&mut self, width: Option<u32>, style: impl Into<StyleRef>) -> CellBuilder<'_> {
        let resolved =
            StyleResolver::new(&mut *self.builder.registry).resolve_ref(StyleKind::Cell, style.into());
        self.builder.push_cell(self.row, width, Some(resolved))
    }
}

/// Handle for adding content to a freshly appended cell.
pub struct CellBuilder<'a> {
    cell: &'a mut Cell,
    registry: &'a mut StyleRegistry,
}

impl<'a> CellBuilder<'a> {
    /// Get the cell's starting column.
    pub fn column(&self) -> usize {
        self.cell.column()
    }

    /// Get the cell's span.
    pub fn grid_span(&self) -> u32 {
        self.cell.grid_span()
    }

    /// Get the cell's vertical merge state.
    pub fn vertical_merge(&self) -> VerticalMerge {
        self.cell.vertical_merge()
    }

    /// Add a paragraph of plain text.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_paragraph(Paragraph::with_text(text))
    }

    /// Add a paragraph of text in a font style.
    pub fn add_styled_text(&mut self, text: impl Into<String>, font: impl Into<StyleRef>) -> &mut Self {
        let font = StyleResolver::new(&mut *self.registry).resolve_ref(StyleKind::Font, font.into());
        let mut paragraph = Paragraph::new();
        paragraph.add_run(TextRun::styled(text, font));
        self.add_paragraph(paragraph)
    }

    /// Add a prepared paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.cell.push_content(CellContent::Paragraph(paragraph));
        self
    }

    /// Add a nested table.
    pub fn add_table(&mut self, table: TableGrid) -> &mut Self {
        self.cell.push_content(CellContent::Table(table));
        self
    }
}
