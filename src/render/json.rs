//! JSON rendering for documents, grids and style catalogues.

use crate::error::{Error, Result};
use crate::model::{Document, TableGrid};
use crate::style::StyleRegistry;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert a single table grid to JSON.
pub fn grid_to_json(table: &TableGrid, format: JsonFormat) -> Result<String> {
    serialize(table, format)
}

/// Convert the style catalogue to JSON, ordered by index.
pub fn styles_to_json(registry: &StyleRegistry, format: JsonFormat) -> Result<String> {
    serialize(registry, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
