//! Document-level types.

use super::{Paragraph, TableGrid, TextRun};
use crate::builder::TableGridBuilder;
use crate::settings::Settings;
use crate::style::{
    AttributeMap, SharedStyle, StyleKind, StyleRef, StyleRegistry, StyleResolver, StyleSource,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document build context.
///
/// Each document owns its style registry, so independent builds never
/// share style names or indices.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Document metadata (title, creator, etc.)
    pub metadata: Metadata,

    /// Build settings
    pub settings: Settings,

    /// Registered styles, in index order
    styles: StyleRegistry,

    /// Content blocks
    body: Vec<Block>,
}

impl Document {
    /// Create a new empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a new empty document with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            metadata: Metadata::new(),
            settings,
            styles: StyleRegistry::new(),
            body: Vec::new(),
        }
    }

    /// Get the style registry.
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Get the style registry for direct registration.
    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Add a paragraph style.
    pub fn add_paragraph_style(&mut self, name: &str, source: impl Into<StyleSource>) -> SharedStyle {
        self.styles.add_paragraph_style(name, source)
    }

    /// Add a font style.
    pub fn add_font_style(
        &mut self,
        name: &str,
        font: impl Into<StyleSource>,
        paragraph: Option<AttributeMap>,
    ) -> SharedStyle {
        self.styles.add_font_style(name, font, paragraph)
    }

    /// Add a table style with optional first-row overrides.
    pub fn add_table_style(
        &mut self,
        name: &str,
        table: &AttributeMap,
        first_row: Option<&AttributeMap>,
    ) -> SharedStyle {
        self.styles.add_table_style(name, table, first_row)
    }

    /// Set the default paragraph style.
    pub fn set_default_paragraph_style(&mut self, source: impl Into<StyleSource>) -> SharedStyle {
        self.styles.set_default_paragraph_style(source)
    }

    /// Start building a table using this document's styles and settings.
    ///
    /// The finished grid is attached with [`add_table`](Self::add_table).
    pub fn table(&mut self) -> TableGridBuilder<'_> {
        TableGridBuilder::new(&mut self.styles).with_mode(self.settings.validation)
    }

    /// Start building a table with a table style.
    pub fn styled_table(&mut self, style: impl Into<StyleRef>) -> TableGridBuilder<'_> {
        self.table().with_style(style)
    }

    /// Attach a finished table.
    pub fn add_table(&mut self, table: TableGrid) {
        self.body.push(Block::Table(table));
    }

    /// Add a paragraph of text with optional font and paragraph styles.
    pub fn add_text(
        &mut self,
        text: impl Into<String>,
        font: Option<StyleRef>,
        paragraph: Option<StyleRef>,
    ) {
        let mut resolver = StyleResolver::new(&mut self.styles);
        let run = match font {
            Some(font) => TextRun::styled(text, resolver.resolve_ref(StyleKind::Font, font)),
            None => TextRun::new(text),
        };
        let mut p = Paragraph::new();
        p.add_run(run);
        if let Some(paragraph) = paragraph {
            p.style = Some(resolver.resolve_ref(StyleKind::Paragraph, paragraph));
        }
        self.body.push(Block::Paragraph(p));
    }

    /// Add one or more empty lines.
    pub fn add_text_break(&mut self, count: u32) {
        self.body.push(Block::TextBreak {
            count: count.max(1),
        });
    }

    /// Add a page break.
    pub fn add_page_break(&mut self) {
        self.body.push(Block::PageBreak);
    }

    /// Get the content blocks.
    pub fn body(&self) -> &[Block] {
        &self.body
    }

    /// Iterate over the top-level tables.
    pub fn tables(&self) -> impl Iterator<Item = &TableGrid> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A content block in the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(TableGrid),
    /// Empty lines
    TextBreak {
        /// Number of lines, at least 1
        count: u32,
    },
    /// A page break
    PageBreak,
}

impl Block {
    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => t.plain_text(),
            Block::TextBreak { count } => "\n".repeat(count.saturating_sub(1) as usize),
            Block::PageBreak => "\u{c}".to_string(),
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document creator
    pub creator: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created: Some(now),
            modified: Some(now),
            ..Default::default()
        }
    }

    /// Set the title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
