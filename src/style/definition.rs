//! Style definitions: a named, typed bundle of formatting attributes.

use super::properties::{
    ApplyAttributes, AttributeMap, CellProperties, FontProperties, NumberingProperties,
    ParagraphProperties, TableProperties,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A registered or inline style shared between the registry and the
/// document elements that use it.
pub type SharedStyle = Arc<StyleDefinition>;

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Paragraph formatting
    Paragraph,
    /// Character formatting (text, link and title fonts)
    Font,
    /// Table-wide formatting
    Table,
    /// List numbering
    Numbering,
    /// Table cell formatting, including merge directives
    Cell,
}

impl StyleKind {
    /// Get the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Font => "font",
            StyleKind::Table => "table",
            StyleKind::Numbering => "numbering",
            StyleKind::Cell => "cell",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed attributes of a style, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "lowercase")]
pub enum StyleProperties {
    /// Paragraph attributes
    Paragraph(ParagraphProperties),
    /// Font attributes
    Font(FontProperties),
    /// Table attributes
    Table(TableProperties),
    /// Numbering attributes
    Numbering(NumberingProperties),
    /// Cell attributes
    Cell(CellProperties),
}

impl StyleProperties {
    /// Create an empty attribute set of the given kind.
    pub fn empty(kind: StyleKind) -> Self {
        match kind {
            StyleKind::Paragraph => StyleProperties::Paragraph(Default::default()),
            StyleKind::Font => StyleProperties::Font(Default::default()),
            StyleKind::Table => StyleProperties::Table(Default::default()),
            StyleKind::Numbering => StyleProperties::Numbering(Default::default()),
            StyleKind::Cell => StyleProperties::Cell(Default::default()),
        }
    }

    /// Get the kind of this attribute set.
    pub fn kind(&self) -> StyleKind {
        match self {
            StyleProperties::Paragraph(_) => StyleKind::Paragraph,
            StyleProperties::Font(_) => StyleKind::Font,
            StyleProperties::Table(_) => StyleKind::Table,
            StyleProperties::Numbering(_) => StyleKind::Numbering,
            StyleProperties::Cell(_) => StyleKind::Cell,
        }
    }

    fn to_value(&self) -> Option<Value> {
        let value = match self {
            StyleProperties::Paragraph(p) => serde_json::to_value(p),
            StyleProperties::Font(p) => serde_json::to_value(p),
            StyleProperties::Table(p) => serde_json::to_value(p),
            StyleProperties::Numbering(p) => serde_json::to_value(p),
            StyleProperties::Cell(p) => serde_json::to_value(p),
        };
        value.ok()
    }
}

impl ApplyAttributes for StyleProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match self {
            StyleProperties::Paragraph(p) => p.apply_attribute(key, value),
            StyleProperties::Font(p) => p.apply_attribute(key, value),
            StyleProperties::Table(p) => p.apply_attribute(key, value),
            StyleProperties::Numbering(p) => p.apply_attribute(key, value),
            StyleProperties::Cell(p) => p.apply_attribute(key, value),
        }
    }
}

/// A named, typed bundle of formatting attributes.
///
/// A definition is freely mutable until it is registered. Registration
/// wraps it in an [`Arc`], after which it is only ever shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Style name; `None` for anonymous inline styles
    name: Option<String>,

    /// 1-based registration order; `None` until registered
    index: Option<u32>,

    /// Typed attributes
    properties: StyleProperties,
}

impl StyleDefinition {
    /// Create an empty, unnamed definition of the given kind.
    pub fn new(kind: StyleKind) -> Self {
        Self::with_properties(StyleProperties::empty(kind))
    }

    /// Create an unnamed definition from typed attributes.
    pub fn with_properties(properties: StyleProperties) -> Self {
        Self {
            name: None,
            index: None,
            properties,
        }
    }

    /// Create an unnamed definition and apply a raw attribute mapping.
    pub fn from_attributes(kind: StyleKind, attributes: &AttributeMap) -> Self {
        let mut style = Self::new(kind);
        style.apply_attributes(attributes);
        style
    }

    /// Get the style name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the style name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get the registration index (1-based).
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Set the registration index.
    pub fn set_index(&mut self, index: u32) {
        self.index = Some(index);
    }

    /// Check if the definition went through a registry.
    pub fn is_registered(&self) -> bool {
        self.index.is_some()
    }

    /// Get the style kind.
    pub fn kind(&self) -> StyleKind {
        self.properties.kind()
    }

    /// Get the typed attributes.
    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }

    /// Get mutable typed attributes.
    pub fn properties_mut(&mut self) -> &mut StyleProperties {
        &mut self.properties
    }

    /// Apply a raw attribute mapping; unknown keys are ignored.
    pub fn apply_attributes(&mut self, attributes: &AttributeMap) -> usize {
        self.properties.apply_attributes(attributes)
    }

    /// Get every set attribute keyed by its camelCase name.
    pub fn attributes(&self) -> AttributeMap {
        match self.properties.to_value() {
            Some(Value::Object(map)) => map,
            _ => AttributeMap::new(),
        }
    }

    /// Get a single attribute by its camelCase name.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes().remove(key)
    }

    /// Get paragraph attributes if this is a paragraph style.
    pub fn as_paragraph(&self) -> Option<&ParagraphProperties> {
        match &self.properties {
            StyleProperties::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get font attributes if this is a font style.
    pub fn as_font(&self) -> Option<&FontProperties> {
        match &self.properties {
            StyleProperties::Font(p) => Some(p),
            _ => None,
        }
    }

    /// Get table attributes if this is a table style.
    pub fn as_table(&self) -> Option<&TableProperties> {
        match &self.properties {
            StyleProperties::Table(p) => Some(p),
            _ => None,
        }
    }

    /// Get numbering attributes if this is a numbering style.
    pub fn as_numbering(&self) -> Option<&NumberingProperties> {
        match &self.properties {
            StyleProperties::Numbering(p) => Some(p),
            _ => None,
        }
    }

    /// Get cell attributes if this is a cell style.
    pub fn as_cell(&self) -> Option<&CellProperties> {
        match &self.properties {
            StyleProperties::Cell(p) => Some(p),
            _ => None,
        }
    }
}

/// Attributes supplied when registering or resolving a style.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSource {
    /// A raw mapping, applied field by field
    Attributes(AttributeMap),
    /// A prepared definition whose identity replaces the fresh one
    Instance(StyleDefinition),
}

impl StyleSource {
    /// Build a definition of `kind` on top of `base`.
    ///
    /// Returns the built definition and, when an instance of another kind
    /// was supplied, that instance's kind. The base is then kept unchanged.
    pub(crate) fn build_onto(
        source: Option<StyleSource>,
        mut base: StyleDefinition,
    ) -> (StyleDefinition, Option<StyleKind>) {
        match source {
            None => (base, None),
            Some(StyleSource::Attributes(attributes)) => {
                base.apply_attributes(&attributes);
                (base, None)
            }
            Some(StyleSource::Instance(instance)) if instance.kind() == base.kind() => {
                (instance, None)
            }
            Some(StyleSource::Instance(instance)) => (base, Some(instance.kind())),
        }
    }
}

impl From<AttributeMap> for StyleSource {
    fn from(attributes: AttributeMap) -> Self {
        StyleSource::Attributes(attributes)
    }
}

impl From<StyleDefinition> for StyleSource {
    fn from(style: StyleDefinition) -> Self {
        StyleSource::Instance(style)
    }
}

impl From<Value> for StyleSource {
    fn from(value: Value) -> Self {
        StyleSource::Attributes(attribute_map(value))
    }
}

/// Turn a JSON value into an attribute mapping.
///
/// Anything but an object yields an empty mapping.
pub fn attribute_map(value: Value) -> AttributeMap {
    match value {
        Value::Object(map) => map,
        Value::Null => AttributeMap::new(),
        other => {
            log::debug!("Expected an attribute object, got {}", other);
            AttributeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_definition_is_unregistered() {
        let style = StyleDefinition::new(StyleKind::Table);
        assert_eq!(style.kind(), StyleKind::Table);
        assert!(style.name().is_none());
        assert!(!style.is_registered());
        assert!(style.attributes().is_empty());
    }

    #[test]
    fn test_attributes_use_caller_names() {
        let style = StyleDefinition::from_attributes(
            StyleKind::Table,
            &attribute_map(json!({"borderSize": 6, "borderColor": "999999"})),
        );

        assert_eq!(style.attribute("borderSize"), Some(json!(6)));
        assert_eq!(style.attribute("borderColor"), Some(json!("999999")));
        assert_eq!(style.attribute("cellMargin"), None);
    }

    #[test]
    fn test_build_onto_same_kind_instance() {
        let mut instance = StyleDefinition::new(StyleKind::Paragraph);
        instance.set_name("Prepared");
        let base = StyleDefinition::new(StyleKind::Paragraph);

        let (built, mismatch) = StyleSource::build_onto(Some(instance.clone().into()), base);
        assert_eq!(built, instance);
        assert!(mismatch.is_none());
    }

    #[test]
    fn test_build_onto_other_kind_instance() {
        let instance = StyleDefinition::from_attributes(
            StyleKind::Font,
            &attribute_map(json!({"bold": true})),
        );
        let base = StyleDefinition::new(StyleKind::Paragraph);

        let (built, mismatch) = StyleSource::build_onto(Some(instance.into()), base);
        assert_eq!(built.kind(), StyleKind::Paragraph);
        assert!(built.attributes().is_empty());
        assert_eq!(mismatch, Some(StyleKind::Font));
    }

    #[test]
    fn test_serialized_shape() {
        let mut style = StyleDefinition::from_attributes(
            StyleKind::Cell,
            &attribute_map(json!({"vMerge": "restart"})),
        );
        style.set_name("Merged");
        style.set_index(3);

        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(value["name"], "Merged");
        assert_eq!(value["index"], 3);
        assert_eq!(value["properties"]["kind"], "cell");
        assert_eq!(value["properties"]["attributes"]["vMerge"], "restart");
    }
}
