//! JSON manifests describing a document's styles and body.
//!
//! A manifest is replayed through the same registry and
//! [`TableGridBuilder`] calls a program would make, so a grid read from a
//! manifest obeys exactly the same merge rules as one built in code.
//!
//! ```
//! use wordgrid::manifest::Manifest;
//!
//! let manifest = Manifest::from_json(r#"{
//!     "styles": [
//!         { "kind": "table", "name": "Colspan Rowspan",
//!           "attributes": { "borderSize": 6, "borderColor": "999999" } }
//!     ],
//!     "body": [
//!         { "type": "table", "style": "Colspan Rowspan", "rows": [
//!             { "cells": [ { "width": 1000, "style": { "vMerge": "restart" }, "text": "A" },
//!                          { "width": 1000, "text": "1" } ] },
//!             { "cells": [ { "style": { "vMerge": "continue" } },
//!                          { "width": 1000, "text": "2" } ] }
//!         ] }
//!     ]
//! }"#).unwrap();
//!
//! let doc = manifest.build().unwrap();
//! let table = doc.tables().next().unwrap();
//! assert_eq!(table.row_span(0, 0), 2);
//! ```

use crate::builder::TableGridBuilder;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, RowProperties, TableGrid};
use crate::settings::Settings;
use crate::style::{AttributeMap, StyleRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document description: metadata, settings, styles and body blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Build settings; defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    /// Styles to register, in order
    #[serde(default)]
    pub styles: Vec<StyleEntry>,

    /// Body blocks, in order
    #[serde(default)]
    pub body: Vec<BlockEntry>,
}

/// Which registry operation a style entry goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleEntryKind {
    Paragraph,
    Font,
    Link,
    Title,
    Table,
    Numbering,
    Cell,
    /// The default paragraph style
    Default,
}

/// A style to register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    pub kind: StyleEntryKind,

    /// Style name; derived from `depth` for titles and fixed for the default style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Heading depth for title styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    #[serde(default)]
    pub attributes: AttributeMap,

    /// First-row overrides for table styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_row: Option<AttributeMap>,

    /// Paragraph attributes bundled with font and title styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<AttributeMap>,
}

/// A body block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockEntry {
    /// A paragraph of text
    Text {
        text: String,
        /// Font style name or inline attributes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font: Option<Value>,
        /// Paragraph style name or inline attributes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paragraph: Option<Value>,
    },
    /// Empty lines
    TextBreak {
        #[serde(default = "default_break_count")]
        count: u32,
    },
    /// A page break
    PageBreak,
    /// A table
    Table(TableEntry),
}

fn default_break_count() -> u32 {
    1
}

/// A table and its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Table style name or inline attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,

    #[serde(default)]
    pub rows: Vec<RowEntry>,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowEntry {
    /// Row height in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default)]
    pub header: bool,

    #[serde(default)]
    pub cant_split: bool,

    #[serde(default)]
    pub exact_height: bool,

    #[serde(default)]
    pub cells: Vec<CellEntry>,
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Cell width in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Cell style name or inline attributes (`gridSpan`, `vMerge`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Font style for `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Value>,

    /// Tables nested in the cell, placed after the text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the manifest's settings, or the defaults when it has none.
    pub fn effective_settings(&self) -> Settings {
        self.settings.clone().unwrap_or_default()
    }

    /// Build a document using the manifest's own settings.
    pub fn build(&self) -> Result<Document> {
        self.build_with(self.effective_settings())
    }

    /// Build a document with explicit settings.
    pub fn build_with(&self, settings: Settings) -> Result<Document> {
        let mut doc = Document::with_settings(settings);
        let stamped = doc.metadata.created;
        doc.metadata = self.metadata.clone();
        doc.metadata.created = doc.metadata.created.or(stamped);
        doc.metadata.modified = doc.metadata.modified.or(stamped);

        for (i, entry) in self.styles.iter().enumerate() {
            register_style(&mut doc, entry).map_err(|e| match e {
                Error::Manifest(msg) => Error::Manifest(format!("style {}: {}", i, msg)),
                other => other,
            })?;
        }

        for (i, block) in self.body.iter().enumerate() {
            match block {
                BlockEntry::Text {
                    text,
                    font,
                    paragraph,
                } => doc.add_text(
                    text.as_str(),
                    font.clone().map(StyleRef::from),
                    paragraph.clone().map(StyleRef::from),
                ),
                BlockEntry::TextBreak { count } => doc.add_text_break(*count),
                BlockEntry::PageBreak => doc.add_page_break(),
                BlockEntry::Table(entry) => {
                    let mut builder = doc.table();
                    if let Some(style) = &entry.style {
                        builder = builder.with_style(style.clone());
                    }
                    let grid = replay_table(builder, entry).map_err(|e| {
                        log::debug!("Table in body block {} failed: {}", i, e);
                        e
                    })?;
                    doc.add_table(grid);
                }
            }
        }

        log::debug!(
            "Built document from manifest: {} styles, {} blocks",
            doc.styles().count(),
            doc.body().len()
        );
        Ok(doc)
    }
}

fn register_style(doc: &mut Document, entry: &StyleEntry) -> Result<()> {
    let name = || {
        entry
            .name
            .as_deref()
            .ok_or_else(|| Error::Manifest(format!("{:?} style needs a name", entry.kind)))
    };
    let attributes = entry.attributes.clone();
    let styles = doc.styles_mut();

    match entry.kind {
        StyleEntryKind::Paragraph => {
            styles.add_paragraph_style(name()?, attributes);
        }
        StyleEntryKind::Font => {
            styles.add_font_style(name()?, attributes, entry.paragraph.clone());
        }
        StyleEntryKind::Link => {
            styles.add_link_style(name()?, attributes);
        }
        StyleEntryKind::Title => {
            styles.add_title_style(entry.depth, attributes, entry.paragraph.clone());
        }
        StyleEntryKind::Table => {
            styles.add_table_style(name()?, &entry.attributes, entry.first_row.as_ref());
        }
        StyleEntryKind::Numbering => {
            styles.add_numbering_style(name()?, attributes);
        }
        StyleEntryKind::Cell => {
            styles.register(crate::style::StyleKind::Cell, name()?, Some(attributes.into()));
        }
        StyleEntryKind::Default => {
            styles.set_default_paragraph_style(attributes);
        }
    }
    Ok(())
}

/// Replay a table entry through a builder.
///
/// Nested tables of a row are built before the row itself is appended,
/// since a nested builder borrows its parent.
fn replay_table(mut builder: TableGridBuilder<'_>, entry: &TableEntry) -> Result<TableGrid> {
    for row in &entry.rows {
        let mut nested = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            let mut grids = Vec::with_capacity(cell.tables.len());
            for table in &cell.tables {
                let mut inner = builder.nested();
                if let Some(style) = &table.style {
                    inner = inner.with_style(style.clone());
                }
                grids.push(replay_table(inner, table)?);
            }
            nested.push(grids);
        }

        let properties = RowProperties {
            is_header: row.header,
            cant_split: row.cant_split,
            exact_height: row.exact_height,
        };
        let mut row_builder = builder.add_row_with(row.height, properties);
        for (cell, grids) in row.cells.iter().zip(nested) {
            let mut cell_builder = match &cell.style {
                Some(style) => row_builder.add_styled_cell(cell.width, style.clone()),
                None => row_builder.add_cell(cell.width),
            };
            if let Some(text) = &cell.text {
                match &cell.font {
                    Some(font) => cell_builder.add_styled_text(text.as_str(), font.clone()),
                    None => cell_builder.add_text(text.as_str()),
                };
            }
            for grid in grids {
                cell_builder.add_table(grid);
            }
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::style::VerticalMerge;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::from_json("{}").unwrap();
        assert!(manifest.styles.is_empty());
        assert!(manifest.build().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Manifest::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_style_entries() {
        let manifest: Manifest = serde_json::from_value(json!({
            "styles": [
                { "kind": "default", "attributes": { "spaceAfter": 0 } },
                { "kind": "title", "depth": 1, "attributes": { "size": 16, "bold": true } },
                { "kind": "table", "name": "Fancy Table",
                  "attributes": { "borderSize": 6 },
                  "firstRow": { "bgColor": "66BBFF" } }
            ]
        }))
        .unwrap();

        let doc = manifest.build().unwrap();
        let names: Vec<_> = doc.styles().iter().filter_map(|s| s.name()).collect();
        assert_eq!(names, vec!["Normal", "Heading_1", "Fancy Table"]);

        let table = doc.styles().get("Fancy Table").unwrap();
        let first_row = table.as_table().and_then(|t| t.first_row.as_ref()).unwrap();
        assert_eq!(first_row.bg_color.as_deref(), Some("66BBFF"));
    }

    #[test]
    fn test_missing_style_name() {
        let manifest: Manifest = serde_json::from_value(json!({
            "styles": [ { "kind": "font", "attributes": { "bold": true } } ]
        }))
        .unwrap();

        assert!(matches!(manifest.build(), Err(Error::Manifest(_))));
    }

    #[test]
    fn test_body_blocks() {
        let manifest: Manifest = serde_json::from_value(json!({
            "body": [
                { "type": "text", "text": "Basic table", "font": { "size": 16, "bold": true } },
                { "type": "text_break" },
                { "type": "page_break" }
            ]
        }))
        .unwrap();

        let doc = manifest.build().unwrap();
        assert!(matches!(doc.body()[1], Block::TextBreak { count: 1 }));
        assert!(matches!(doc.body()[2], Block::PageBreak));
    }

    #[test]
    fn test_nested_table_replay() {
        let manifest: Manifest = serde_json::from_value(json!({
            "body": [ { "type": "table",
                "style": { "width": 2500, "unit": "pct", "alignment": "center" },
                "rows": [ { "cells": [ {
                    "text": "This cell contains nested table.",
                    "tables": [ { "style": { "alignment": "center" },
                                  "rows": [ { "cells": [ { "text": "Inside nested table" } ] } ] } ]
                } ] } ] } ]
        }))
        .unwrap();

        let doc = manifest.build().unwrap();
        let table = doc.tables().next().unwrap();
        assert_eq!(table.nested_tables().count(), 1);
        // inline table styles stay out of the registry
        assert!(doc.styles().is_empty());
    }

    #[test]
    fn test_unmatched_continue_fails() {
        let manifest: Manifest = serde_json::from_value(json!({
            "body": [ { "type": "table", "rows": [
                { "cells": [ { "text": "A" } ] },
                { "cells": [ { "style": { "vMerge": "continue" } } ] }
            ] } ]
        }))
        .unwrap();

        assert!(matches!(
            manifest.build(),
            Err(Error::UnmatchedVerticalMergeContinuation { row: 1, column: 0 })
        ));
    }

    #[test]
    fn test_row_flags() {
        let manifest: Manifest = serde_json::from_value(json!({
            "body": [ { "type": "table", "rows": [
                { "height": 900, "header": true, "cells": [ { "style": { "vMerge": "restart" } } ] },
                { "cells": [ { "style": { "vMerge": "continue" } } ] }
            ] } ]
        }))
        .unwrap();

        let doc = manifest.build().unwrap();
        let table = doc.tables().next().unwrap();
        assert!(table.row(0).unwrap().is_header());
        assert_eq!(
            table.cell_at(1, 0).map(|c| c.vertical_merge()),
            Some(VerticalMerge::Continue)
        );
    }
}
