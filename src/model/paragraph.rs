//! Paragraph and text-level types.

use crate::style::SharedStyle;
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Paragraph style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<SharedStyle>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Set the paragraph style and return self.
    pub fn styled(mut self, style: SharedStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().trim().is_empty()
    }
}

/// A run of text sharing one font style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Font style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<SharedStyle>,
}

impl TextRun {
    /// Create a new text run without a font style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }

    /// Create a text run with a font style.
    pub fn styled(text: impl Into<String>, font: SharedStyle) -> Self {
        Self {
            text: text.into(),
            font: Some(font),
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
