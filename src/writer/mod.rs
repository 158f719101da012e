//! Pluggable document writers.
//!
//! Concrete file formats live outside this crate. A [`DocumentWriter`]
//! turns a finished [`Document`] into bytes, and a [`WriterRegistry`]
//! dispatches to writers by name or file extension.
//!
//! # Example
//!
//! ```
//! use wordgrid::writer::WriterRegistry;
//! use wordgrid::Document;
//!
//! fn main() -> wordgrid::Result<()> {
//!     let registry = WriterRegistry::with_defaults();
//!     let mut doc = Document::new();
//!     doc.add_text("Basic table", None, None);
//!
//!     let bytes = registry.write("text", &doc)?;
//!     assert_eq!(bytes, b"Basic table");
//!     Ok(())
//! }
//! ```

mod json;
mod text;

pub use json::JsonWriter;
pub use text::TextWriter;

use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for document writers.
///
/// Implement this trait to add support for a new output format.
pub trait DocumentWriter: Send + Sync {
    /// Get the name of this writer.
    fn name(&self) -> &str;

    /// Get the file extensions this writer produces.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn extensions(&self) -> &[&str];

    /// Get the MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Serialize a document.
    fn write(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Check if this writer produces the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document writers.
///
/// Names and extensions are matched case-insensitively.
pub struct WriterRegistry {
    by_extension: HashMap<String, Arc<dyn DocumentWriter>>,
    by_name: HashMap<String, Arc<dyn DocumentWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in writers (JSON, text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonWriter::new()));
        registry.register(Arc::new(TextWriter::new()));
        registry
    }

    /// Register a writer under its name and all its extensions.
    ///
    /// A later writer replaces an earlier one with the same name or extension.
    pub fn register(&mut self, writer: Arc<dyn DocumentWriter>) {
        for ext in writer.extensions() {
            self.by_extension.insert(ext.to_lowercase(), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Check if a writer name is registered.
    pub fn supports(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Get all registered writer names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Serialize a document with the named writer.
    pub fn write(&self, name: &str, doc: &Document) -> Result<Vec<u8>> {
        let writer = self
            .get_by_name(name)
            .ok_or_else(|| Error::UnknownWriter(name.to_string()))?;
        writer.write(doc)
    }

    /// Find the writer for an output path by its extension.
    pub fn writer_for_path(&self, path: &Path) -> Result<Arc<dyn DocumentWriter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnknownWriter(path.display().to_string()))?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnknownWriter(ext.to_string()))
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperWriter;

    impl DocumentWriter for UpperWriter {
        fn name(&self) -> &str {
            "Upper"
        }

        fn extensions(&self) -> &[&str] {
            &["up"]
        }

        fn mime_type(&self) -> &'static str {
            "text/plain"
        }

        fn write(&self, doc: &Document) -> Result<Vec<u8>> {
            Ok(doc.plain_text().to_uppercase().into_bytes())
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = WriterRegistry::with_defaults();
        assert!(registry.supports("json"));
        assert!(registry.supports("TEXT"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.names(), vec!["json", "text"]);
    }

    #[test]
    fn test_registry_get_by_extension() {
        let registry = WriterRegistry::with_defaults();
        let writer = registry.get_by_extension("TXT");
        assert_eq!(writer.map(|w| w.name().to_string()), Some("text".to_string()));
    }

    #[test]
    fn test_unknown_writer() {
        let registry = WriterRegistry::with_defaults();
        let doc = Document::new();
        assert!(matches!(
            registry.write("odt", &doc),
            Err(Error::UnknownWriter(name)) if name == "odt"
        ));
        assert!(registry.writer_for_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_custom_writer() {
        let mut registry = WriterRegistry::new();
        registry.register(Arc::new(UpperWriter));

        let mut doc = Document::new();
        doc.add_text("cell", None, None);
        assert_eq!(registry.write("upper", &doc).unwrap(), b"CELL");

        let writer = registry.writer_for_path(Path::new("report.UP")).unwrap();
        assert!(writer.supports_extension("up"));
    }
}
