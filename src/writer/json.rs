//! JSON document writer.

use crate::error::Result;
use crate::model::Document;
use crate::render::{to_json, JsonFormat};

use super::DocumentWriter;

/// Writes the document model as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    format: JsonFormat,
}

impl JsonWriter {
    /// Create a pretty-printing JSON writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl DocumentWriter for JsonWriter {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn write(&self, doc: &Document) -> Result<Vec<u8>> {
        Ok(to_json(doc, self.format)?.into_bytes())
    }
}
