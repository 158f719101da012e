//! Style registry: the indexed, de-duplicated store of named styles.

use super::definition::{SharedStyle, StyleDefinition, StyleKind, StyleProperties, StyleSource};
use super::properties::{
    ApplyAttributes, AttributeMap, FontProperties, FontType, ParagraphProperties, TableProperties,
};
use crate::error::StyleNotice;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Name registered by [`StyleRegistry::set_default_paragraph_style`].
pub const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";

/// Keyed store of style definitions.
///
/// Names are unique across every style kind. Each definition receives a
/// 1-based index in registration order, and the first registration of a
/// name is authoritative: later registrations return the existing style.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: Vec<SharedStyle>,
    by_name: HashMap<String, usize>,
    notices: Vec<StyleNotice>,
}

impl StyleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style of `kind` under `name`.
    ///
    /// If the name is already taken, the existing definition is returned
    /// unchanged, whatever its kind and whatever `source` holds.
    pub fn register(
        &mut self,
        kind: StyleKind,
        name: &str,
        source: Option<StyleSource>,
    ) -> SharedStyle {
        self.register_onto(name, StyleDefinition::new(kind), source)
    }

    /// Register `base`, after applying `source`, under `name`.
    fn register_onto(
        &mut self,
        name: &str,
        base: StyleDefinition,
        source: Option<StyleSource>,
    ) -> SharedStyle {
        if let Some(existing) = self.get(name) {
            log::debug!("Style '{}' already registered, keeping first definition", name);
            self.notices.push(StyleNotice::DuplicateStyleNameIgnored {
                name: name.to_string(),
            });
            return existing;
        }

        let expected = base.kind();
        let (mut style, mismatch) = StyleSource::build_onto(source, base);
        if let Some(found) = mismatch {
            log::warn!(
                "Style '{}' expected a {} instance but got {}; registering empty style",
                name,
                expected,
                found
            );
            self.notices.push(StyleNotice::StyleKindMismatch {
                name: name.to_string(),
                expected,
                found,
            });
        }

        style.set_name(name);
        style.set_index(self.count() as u32 + 1);

        let style = Arc::new(style);
        self.by_name.insert(name.to_string(), self.styles.len());
        self.styles.push(Arc::clone(&style));
        style
    }

    /// Get a style by exact name.
    pub fn get(&self, name: &str) -> Option<SharedStyle> {
        self.by_name
            .get(name)
            .and_then(|&slot| self.styles.get(slot))
            .cloned()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of registered styles.
    pub fn count(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over the registered styles in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedStyle> {
        self.styles.iter()
    }

    /// Iterate over the registered styles of one kind, in index order.
    pub fn iter_kind(&self, kind: StyleKind) -> impl Iterator<Item = &SharedStyle> {
        self.styles.iter().filter(move |s| s.kind() == kind)
    }

    /// Non-fatal notices recorded since the last reset.
    pub fn notices(&self) -> &[StyleNotice] {
        &self.notices
    }

    /// Remove every registered style and notice.
    pub fn reset_all(&mut self) {
        self.styles.clear();
        self.by_name.clear();
        self.notices.clear();
    }

    /// Add a paragraph style.
    pub fn add_paragraph_style(&mut self, name: &str, source: impl Into<StyleSource>) -> SharedStyle {
        self.register(StyleKind::Paragraph, name, Some(source.into()))
    }

    /// Add a text font style, optionally bundled with paragraph attributes.
    pub fn add_font_style(
        &mut self,
        name: &str,
        font: impl Into<StyleSource>,
        paragraph: Option<AttributeMap>,
    ) -> SharedStyle {
        let base = font_base(FontType::Text, paragraph);
        self.register_onto(name, base, Some(font.into()))
    }

    /// Add a hyperlink font style.
    pub fn add_link_style(&mut self, name: &str, source: impl Into<StyleSource>) -> SharedStyle {
        let base = font_base(FontType::Link, None);
        self.register_onto(name, base, Some(source.into()))
    }

    /// Add a title or heading font style.
    ///
    /// Depth `None` or `0` registers `Title`; any other depth registers
    /// `Heading_{depth}`.
    pub fn add_title_style(
        &mut self,
        depth: Option<u32>,
        font: impl Into<StyleSource>,
        paragraph: Option<AttributeMap>,
    ) -> SharedStyle {
        let name = title_style_name(depth);
        let base = font_base(FontType::Title, paragraph);
        self.register_onto(&name, base, Some(font.into()))
    }

    /// Add a table style with optional first-row overrides.
    pub fn add_table_style(
        &mut self,
        name: &str,
        table: &AttributeMap,
        first_row: Option<&AttributeMap>,
    ) -> SharedStyle {
        let mut properties = TableProperties::default();
        properties.apply_attributes(table);
        if let Some(first_row) = first_row {
            let mut overrides = TableProperties::default();
            overrides.apply_attributes(first_row);
            properties.first_row = Some(Box::new(overrides));
        }
        let base = StyleDefinition::with_properties(StyleProperties::Table(properties));
        self.register_onto(name, base, None)
    }

    /// Add a numbering style.
    pub fn add_numbering_style(&mut self, name: &str, source: impl Into<StyleSource>) -> SharedStyle {
        self.register(StyleKind::Numbering, name, Some(source.into()))
    }

    /// Set the default paragraph style (registered as `Normal`).
    pub fn set_default_paragraph_style(&mut self, source: impl Into<StyleSource>) -> SharedStyle {
        self.add_paragraph_style(DEFAULT_PARAGRAPH_STYLE, source)
    }
}

impl Serialize for StyleRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.styles.len()))?;
        for style in &self.styles {
            seq.serialize_element(style.as_ref())?;
        }
        seq.end()
    }
}

fn font_base(font_type: FontType, paragraph: Option<AttributeMap>) -> StyleDefinition {
    let mut properties = FontProperties::of_type(font_type);
    if let Some(paragraph) = paragraph {
        let mut bundled = ParagraphProperties::default();
        bundled.apply_attributes(&paragraph);
        properties.paragraph = Some(bundled);
    }
    StyleDefinition::with_properties(StyleProperties::Font(properties))
}

/// Get the style name used for a title depth.
pub fn title_style_name(depth: Option<u32>) -> String {
    match depth {
        None | Some(0) => "Title".to_string(),
        Some(depth) => format!("Heading_{}", depth),
    }
}

static DEFAULT_REGISTRY: OnceLock<Mutex<StyleRegistry>> = OnceLock::new();

/// Run `f` against the process-wide default registry.
///
/// Intended for single-build command-line use. Document builds own their
/// registry and never touch this one.
pub fn with_default_registry<R>(f: impl FnOnce(&mut StyleRegistry) -> R) -> R {
    let registry = DEFAULT_REGISTRY.get_or_init(|| Mutex::new(StyleRegistry::new()));
    let mut guard = registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}
