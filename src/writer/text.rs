//! Plain text document writer.

use crate::error::Result;
use crate::model::Document;
use crate::render::to_text;

use super::DocumentWriter;

/// Writes the document's plain text.
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    _private: (),
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for TextWriter {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn write(&self, doc: &Document) -> Result<Vec<u8>> {
        Ok(to_text(doc)?.into_bytes())
    }
}
