//! Plain text rendering.
//!
//! Paragraphs become lines, table rows become tab-separated lines, and
//! cells merged away by a vertical merge render empty.

use crate::error::Result;
use crate::model::{Document, TableGrid};

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text().trim().to_string())
}

/// Convert a single table grid to plain text.
pub fn grid_to_text(table: &TableGrid) -> Result<String> {
    Ok(table.plain_text())
}
