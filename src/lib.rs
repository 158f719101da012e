//! # wordgrid
//!
//! Style registry and merged-cell table grids for word-processing documents.
//!
//! This library models the in-memory structure a document generator hands
//! to its serializers: a registry of named, indexed styles and tables whose
//! cells span columns (`gridSpan`) and merge vertically (`vMerge`).
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use wordgrid::{render, Document};
//!
//! fn main() -> wordgrid::Result<()> {
//!     let mut doc = Document::new();
//!     doc.add_table_style(
//!         "Colspan Rowspan",
//!         &wordgrid::style::attribute_map(json!({"borderSize": 6, "borderColor": "999999"})),
//!         None,
//!     );
//!
//!     let mut table = doc.styled_table("Colspan Rowspan");
//!     let mut row = table.add_row(None);
//!     row.add_styled_cell(Some(1000), json!({"vMerge": "restart"})).add_text("A");
//!     row.add_styled_cell(Some(2000), json!({"gridSpan": 2})).add_text("B");
//!     let mut row = table.add_row(None);
//!     row.add_styled_cell(None, json!({"vMerge": "continue"}));
//!     row.add_cell(Some(1000)).add_text("C");
//!     row.add_cell(Some(1000)).add_text("D");
//!     let grid = table.finish()?;
//!     doc.add_table(grid);
//!
//!     let text = render::to_text(&doc)?;
//!     assert_eq!(text, "A\tB\n\tC\tD");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style registry**: unique names, stable 1-based indices, first
//!   registration wins
//! - **Table grids**: column spans, vertical merges, nested tables,
//!   structural validation
//! - **Manifests**: JSON descriptions replayed through the builder
//! - **Writers**: pluggable serializers keyed by name and extension

pub mod builder;
pub mod error;
pub mod manifest;
pub mod model;
pub mod render;
pub mod settings;
pub mod style;
pub mod writer;

// Re-export commonly used types
pub use builder::{CellBuilder, RowBuilder, TableGridBuilder};
pub use error::{Error, Result, StyleNotice};
pub use manifest::Manifest;
pub use model::{
    Block, Cell, CellContent, Document, Metadata, Paragraph, Row, RowProperties, TableGrid,
    TextRun,
};
pub use render::JsonFormat;
pub use settings::{PdfRenderer, PdfRendererConfig, Settings, ValidationMode};
pub use style::{
    SharedStyle, StyleDefinition, StyleKind, StyleRef, StyleRegistry, StyleResolver,
    VerticalMerge,
};
pub use writer::{DocumentWriter, WriterRegistry};

use std::io::Read;
use std::path::Path;

/// Build a document from a JSON manifest string.
///
/// # Example
///
/// ```
/// let doc = wordgrid::from_manifest_str(r#"{"body": [{"type": "text", "text": "Fancy table"}]}"#)?;
/// assert_eq!(doc.plain_text(), "Fancy table");
/// # Ok::<(), wordgrid::Error>(())
/// ```
pub fn from_manifest_str(json: &str) -> Result<Document> {
    Manifest::from_json(json)?.build()
}

/// Build a document from a JSON manifest read from a reader.
pub fn from_manifest_reader<R: Read>(reader: R) -> Result<Document> {
    let manifest: Manifest = serde_json::from_reader(reader)?;
    manifest.build()
}

/// Read a JSON manifest file without building it.
///
/// Useful when the manifest's own settings need adjusting before
/// [`Manifest::build_with`].
pub fn read_manifest_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Build a document from a JSON manifest file.
///
/// # Example
///
/// ```no_run
/// use wordgrid::from_manifest_file;
///
/// let doc = from_manifest_file("tables.json").unwrap();
/// println!("Tables: {}", doc.tables().count());
/// ```
pub fn from_manifest_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    read_manifest_file(path)?.build()
}

/// Build a document from a manifest file with explicit settings.
///
/// The given settings replace any `settings` block in the manifest.
pub fn from_manifest_file_with_settings<P: AsRef<Path>>(
    path: P,
    settings: Settings,
) -> Result<Document> {
    read_manifest_file(path)?.build_with(settings)
}

/// Render a manifest file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = from_manifest_file(path)?;
    render::to_json(&doc, format)
}

/// Render a manifest file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = from_manifest_file(path)?;
    render::to_text(&doc)
}
