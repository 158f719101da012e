//! Style resolution: turning caller style references into definitions.

use super::definition::{attribute_map, SharedStyle, StyleDefinition, StyleKind, StyleSource};
use super::properties::AttributeMap;
use super::registry::StyleRegistry;
use serde_json::Value;
use std::sync::Arc;

/// A caller's reference to a style, as passed to document builders.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRef {
    /// A registered style name; unseen names are registered empty
    Named(String),
    /// One-off attributes that stay out of the registry
    Inline(AttributeMap),
    /// An already resolved definition
    Shared(SharedStyle),
}

impl From<&str> for StyleRef {
    fn from(name: &str) -> Self {
        StyleRef::Named(name.to_string())
    }
}

impl From<String> for StyleRef {
    fn from(name: String) -> Self {
        StyleRef::Named(name)
    }
}

impl From<AttributeMap> for StyleRef {
    fn from(attributes: AttributeMap) -> Self {
        StyleRef::Inline(attributes)
    }
}

impl From<SharedStyle> for StyleRef {
    fn from(style: SharedStyle) -> Self {
        StyleRef::Shared(style)
    }
}

impl From<Value> for StyleRef {
    /// Strings name a style; anything else is read as inline attributes.
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => StyleRef::Named(name),
            other => StyleRef::Inline(attribute_map(other)),
        }
    }
}

/// Resolves style references against a registry.
///
/// Named references go through [`StyleRegistry::register`], so the first
/// definition of a name stays authoritative. Anonymous references produce
/// definitions that are never added to the registry.
pub struct StyleResolver<'r> {
    registry: &'r mut StyleRegistry,
}

impl<'r> StyleResolver<'r> {
    /// Create a resolver over a registry.
    pub fn new(registry: &'r mut StyleRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a style of `kind`.
    ///
    /// Without a name, builds an anonymous definition purely from `source`.
    pub fn resolve(
        &mut self,
        kind: StyleKind,
        name: Option<&str>,
        source: Option<StyleSource>,
    ) -> SharedStyle {
        match name {
            Some(name) => self.registry.register(kind, name, source),
            None => {
                let (style, mismatch) = StyleSource::build_onto(source, StyleDefinition::new(kind));
                if let Some(found) = mismatch {
                    log::warn!(
                        "Inline {} style built from a {} instance; using empty style",
                        kind,
                        found
                    );
                }
                Arc::new(style)
            }
        }
    }

    /// Resolve a caller reference as a style of `kind`.
    pub fn resolve_ref(&mut self, kind: StyleKind, style: StyleRef) -> SharedStyle {
        match style {
            StyleRef::Named(name) => self.resolve(kind, Some(&name), None),
            StyleRef::Inline(attributes) => {
                self.resolve(kind, None, Some(StyleSource::Attributes(attributes)))
            }
            StyleRef::Shared(style) => style,
        }
    }

    /// Get the underlying registry.
    pub fn registry(&self) -> &StyleRegistry {
        &*self.registry
    }
}
