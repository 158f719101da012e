//! Style definitions, registry and resolution.
//!
//! Styles are named bundles of formatting attributes. A [`StyleRegistry`]
//! stores them under unique names with stable 1-based indices, and a
//! [`StyleResolver`] turns the references callers hand to document builders
//! (names, inline attribute maps, prepared definitions) into shared
//! [`StyleDefinition`]s.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wordgrid::style::{attribute_map, StyleRegistry};
//!
//! let mut registry = StyleRegistry::new();
//! registry.add_table_style("Fancy Table", &attribute_map(json!({"borderSize": 6})), None);
//! registry.add_table_style("Fancy Table", &attribute_map(json!({"borderSize": 1})), None);
//!
//! let style = registry.get("Fancy Table").unwrap();
//! assert_eq!(style.attribute("borderSize"), Some(json!(6)));
//! ```

mod definition;
mod properties;
mod registry;
mod resolver;

pub use definition::{
    attribute_map, SharedStyle, StyleDefinition, StyleKind, StyleProperties, StyleSource,
};
pub use properties::{
    Alignment, ApplyAttributes, AttributeMap, CellProperties, FontProperties, FontType,
    NumberingLevel, NumberingProperties, NumberingType, ParagraphProperties, PositionAnchor,
    TableLayout, TablePosition, TableProperties, TextDirection, VerticalAlign, VerticalMerge,
    WidthUnit,
};
pub use registry::{
    title_style_name, with_default_registry, StyleRegistry, DEFAULT_PARAGRAPH_STYLE,
};
pub use resolver::{StyleRef, StyleResolver};
