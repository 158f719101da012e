//! Document build settings.
//!
//! Validation mode drives the table builder. The default font, paragraph
//! spacing and PDF renderer fields are not applied while building; they
//! travel with the [`Document`](crate::Document) so serializers can fall
//! back to them for text that carries no style of its own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default font family for new documents.
pub const DEFAULT_FONT_NAME: &str = "Arial";

/// Default font size in points for new documents.
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Settings for a document build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How strictly table grids are checked when finished
    pub validation: ValidationMode,

    /// Default font family
    pub default_font_name: String,

    /// Default font size in points
    pub default_font_size: f32,

    /// Default space after paragraphs in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_paragraph_spacing: Option<u32>,

    /// External PDF renderer, if one is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_renderer: Option<PdfRendererConfig>,

    /// Options passed through to the PDF renderer
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pdf_renderer_options: BTreeMap<String, String>,
}

impl Settings {
    /// Create new settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set validation mode.
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Enable lenient mode (short rows are logged, not rejected).
    pub fn lenient(mut self) -> Self {
        self.validation = ValidationMode::Lenient;
        self
    }

    /// Set the default font.
    pub fn with_default_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.default_font_name = name.into();
        self.default_font_size = size;
        self
    }

    /// Set the default space after paragraphs in twips.
    pub fn with_paragraph_spacing(mut self, spacing: u32) -> Self {
        self.default_paragraph_spacing = Some(spacing);
        self
    }

    /// Configure the external PDF renderer.
    pub fn with_pdf_renderer(mut self, renderer: PdfRenderer, library_path: impl Into<PathBuf>) -> Self {
        self.pdf_renderer = Some(PdfRendererConfig {
            renderer,
            library_path: library_path.into(),
        });
        self
    }

    /// Set a PDF renderer option.
    pub fn with_pdf_renderer_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pdf_renderer_options.insert(key.into(), value.into());
        self
    }

    /// Describe the default font, e.g. `Arial 10pt`.
    pub fn default_font_label(&self) -> String {
        format!("{} {}pt", self.default_font_name, self.default_font_size)
    }

    /// Get the font the PDF renderer should use.
    ///
    /// The renderer's `font` option wins over the default font.
    pub fn pdf_font(&self) -> &str {
        self.pdf_renderer_options
            .get("font")
            .map(String::as_str)
            .unwrap_or(&self.default_font_name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            default_font_name: DEFAULT_FONT_NAME.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
            default_paragraph_spacing: None,
            pdf_renderer: None,
            pdf_renderer_options: BTreeMap::new(),
        }
    }
}

/// Validation mode applied when a table grid is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject rows whose span differs from the column count
    #[default]
    Strict,
    /// Log such rows and keep them as built
    Lenient,
}

/// Known external PDF renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfRenderer {
    /// Dompdf
    DomPdf,
    /// TCPDF
    Tcpdf,
    /// mPDF
    Mpdf,
}

impl PdfRenderer {
    /// Get the renderer name.
    pub fn name(self) -> &'static str {
        match self {
            PdfRenderer::DomPdf => "DomPDF",
            PdfRenderer::Tcpdf => "TCPDF",
            PdfRenderer::Mpdf => "MPDF",
        }
    }
}

/// Location of an external PDF renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRendererConfig {
    /// Which renderer
    pub renderer: PdfRenderer,

    /// Path to the renderer library
    pub library_path: PathBuf,
}
