//! Typed attribute sets for each style kind.
//!
//! Raw attribute mappings arrive as JSON objects keyed by the attribute
//! names callers use (`borderSize`, `vMerge`, `spaceAfter`, ...). Each
//! property type recognises its own keys case-insensitively and ignores the
//! rest, so richer attribute sets can be passed through without error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw attribute mapping, as supplied by callers.
pub type AttributeMap = serde_json::Map<String, Value>;

/// Capability shared by every style kind: field-by-field attribute
/// application from a raw mapping.
pub trait ApplyAttributes {
    /// Apply a single attribute.
    ///
    /// Returns `false` when the key is not recognised or the value has an
    /// unexpected shape; the property set is left unchanged in that case.
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool;

    /// Apply every attribute of a mapping, returning how many were applied.
    fn apply_attributes(&mut self, attributes: &AttributeMap) -> usize {
        let mut applied = 0;
        for (key, value) in attributes {
            if self.apply_attribute(key, value) {
                applied += 1;
            } else {
                log::debug!("Ignoring style attribute '{}' = {}", key, value);
            }
        }
        applied
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => u32::try_from(n).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f32(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_u64().map(|n| n != 0),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_keyword(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.trim().to_ascii_lowercase())
}

fn assign<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    match parsed {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

/// Horizontal alignment for paragraphs and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Leading edge (left in left-to-right text)
    Start,
    /// Centered
    Center,
    /// Trailing edge (right in left-to-right text)
    End,
    /// Justified
    Both,
    /// Distributed across the line
    Distribute,
}

impl Alignment {
    fn parse(value: &Value) -> Option<Self> {
        match as_keyword(value)?.as_str() {
            "start" | "left" => Some(Alignment::Start),
            "center" => Some(Alignment::Center),
            "end" | "right" => Some(Alignment::End),
            "both" | "justify" => Some(Alignment::Both),
            "distribute" => Some(Alignment::Distribute),
            _ => None,
        }
    }
}

/// Vertical alignment of content inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Top
    Top,
    /// Middle
    Center,
    /// Bottom
    Bottom,
    /// Stretched
    Both,
}

/// Text flow direction inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    /// Left to right, top to bottom
    #[serde(rename = "lrTb")]
    LrTb,
    /// Bottom to top, left to right
    #[serde(rename = "btLr")]
    BtLr,
    /// Top to bottom, right to left
    #[serde(rename = "tbRl")]
    TbRl,
}

/// Vertical merge state of a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMerge {
    /// Not part of a vertical merge
    #[default]
    None,
    /// Opens a merged region spanning downwards
    Restart,
    /// Continues the merged region of the cell above
    Continue,
}

impl VerticalMerge {
    fn parse(value: &Value) -> Option<Self> {
        match as_keyword(value)?.as_str() {
            "restart" => Some(VerticalMerge::Restart),
            "continue" | "" => Some(VerticalMerge::Continue),
            _ => None,
        }
    }

    /// Check if the cell takes part in a vertical merge.
    pub fn is_merged(self) -> bool {
        self != VerticalMerge::None
    }
}

/// Unit of a table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthUnit {
    /// Automatic width
    Auto,
    /// Fiftieths of a percent
    Pct,
    /// Twentieths of a point (twips)
    Dxa,
}

/// Table layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    /// Column widths follow content
    Autofit,
    /// Column widths are fixed
    Fixed,
}

/// Role of a font style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    /// Body text
    #[default]
    Text,
    /// Hyperlink text
    Link,
    /// Title and heading text
    Title,
}

/// Paragraph formatting attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProperties {
    /// Horizontal alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Space before the paragraph in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_before: Option<u32>,

    /// Space after the paragraph in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after: Option<u32>,

    /// Line spacing in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<u32>,

    /// Line height multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,

    /// Left indentation in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,

    /// Hanging indentation in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hanging: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_next: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_lines: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_break_before: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widow_control: Option<bool>,

    /// Name of the parent style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,

    /// Name of the style for the following paragraph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl ApplyAttributes for ParagraphProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "alignment" | "align" => assign(&mut self.alignment, Alignment::parse(value)),
            "spacebefore" => assign(&mut self.space_before, as_u32(value)),
            "spaceafter" => assign(&mut self.space_after, as_u32(value)),
            "spacing" => assign(&mut self.spacing, as_u32(value)),
            "lineheight" => assign(&mut self.line_height, as_f32(value)),
            "indent" | "indentation" => assign(&mut self.indent, as_u32(value)),
            "hanging" => assign(&mut self.hanging, as_u32(value)),
            "keepnext" => assign(&mut self.keep_next, as_bool(value)),
            "keeplines" => assign(&mut self.keep_lines, as_bool(value)),
            "pagebreakbefore" => assign(&mut self.page_break_before, as_bool(value)),
            "widowcontrol" => assign(&mut self.widow_control, as_bool(value)),
            "basedon" => assign(&mut self.based_on, as_string(value)),
            "next" => assign(&mut self.next, as_string(value)),
            _ => false,
        }
    }
}

/// Character formatting attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontProperties {
    /// Role of the font style
    pub font_type: FontType,

    /// Font family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underline style (`single`, `double`, `none`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_script: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_script: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_caps: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,

    /// Text color (hex, without `#`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Highlight color name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,

    /// Shading color (hex, without `#`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    /// Paragraph formatting bundled with the font
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<ParagraphProperties>,
}

impl FontProperties {
    /// Create font properties of the given type.
    pub fn of_type(font_type: FontType) -> Self {
        Self {
            font_type,
            ..Default::default()
        }
    }
}

impl ApplyAttributes for FontProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "name" => assign(&mut self.name, as_string(value)),
            "size" => assign(&mut self.size, as_f32(value)),
            "bold" => assign(&mut self.bold, as_bool(value)),
            "italic" => assign(&mut self.italic, as_bool(value)),
            "underline" => assign(&mut self.underline, as_string(value)),
            "strikethrough" => assign(&mut self.strikethrough, as_bool(value)),
            "superscript" => assign(&mut self.super_script, as_bool(value)),
            "subscript" => assign(&mut self.sub_script, as_bool(value)),
            "allcaps" => assign(&mut self.all_caps, as_bool(value)),
            "smallcaps" => assign(&mut self.small_caps, as_bool(value)),
            "color" => assign(&mut self.color, as_string(value)),
            "fgcolor" => assign(&mut self.fg_color, as_string(value)),
            "bgcolor" => assign(&mut self.bg_color, as_string(value)),
            "paragraph" => match value.as_object() {
                Some(map) => {
                    self.paragraph
                        .get_or_insert_with(ParagraphProperties::default)
                        .apply_attributes(map);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Table-wide formatting attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProperties {
    /// Border size on every side, in eighths of a point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_size: Option<u32>,

    /// Border color on every side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_inside_h_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_inside_h_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_inside_v_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_inside_v_color: Option<String>,

    /// Default cell margin in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_margin: Option<u32>,

    /// Spacing between cells in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_spacing: Option<u32>,

    /// Table alignment on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Shading color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    /// Preferred width, interpreted through `unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<WidthUnit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<TableLayout>,

    /// Floating position; the table flows inline when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TablePosition>,

    /// Overrides applied to the first row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_row: Option<Box<TableProperties>>,
}

impl ApplyAttributes for TableProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "bordersize" => assign(&mut self.border_size, as_u32(value)),
            "bordercolor" => assign(&mut self.border_color, as_string(value)),
            "bordertopsize" => assign(&mut self.border_top_size, as_u32(value)),
            "bordertopcolor" => assign(&mut self.border_top_color, as_string(value)),
            "borderbottomsize" => assign(&mut self.border_bottom_size, as_u32(value)),
            "borderbottomcolor" => assign(&mut self.border_bottom_color, as_string(value)),
            "borderleftsize" => assign(&mut self.border_left_size, as_u32(value)),
            "borderleftcolor" => assign(&mut self.border_left_color, as_string(value)),
            "borderrightsize" => assign(&mut self.border_right_size, as_u32(value)),
            "borderrightcolor" => assign(&mut self.border_right_color, as_string(value)),
            "borderinsidehsize" => assign(&mut self.border_inside_h_size, as_u32(value)),
            "borderinsidehcolor" => assign(&mut self.border_inside_h_color, as_string(value)),
            "borderinsidevsize" => assign(&mut self.border_inside_v_size, as_u32(value)),
            "borderinsidevcolor" => assign(&mut self.border_inside_v_color, as_string(value)),
            "cellmargin" => assign(&mut self.cell_margin, as_u32(value)),
            "cellspacing" => assign(&mut self.cell_spacing, as_u32(value)),
            "alignment" | "align" => assign(&mut self.alignment, Alignment::parse(value)),
            "bgcolor" => assign(&mut self.bg_color, as_string(value)),
            "width" => assign(&mut self.width, as_u32(value)),
            "unit" => {
                let unit = match as_keyword(value).as_deref() {
                    Some("auto") => Some(WidthUnit::Auto),
                    Some("pct") => Some(WidthUnit::Pct),
                    Some("dxa") | Some("twip") => Some(WidthUnit::Dxa),
                    _ => None,
                };
                assign(&mut self.unit, unit)
            }
            "layout" => {
                let layout = match as_keyword(value).as_deref() {
                    Some("autofit") => Some(TableLayout::Autofit),
                    Some("fixed") => Some(TableLayout::Fixed),
                    _ => None,
                };
                assign(&mut self.layout, layout)
            }
            "position" => match value.as_object() {
                Some(map) => {
                    self.position
                        .get_or_insert_with(Default::default)
                        .apply_attributes(map);
                    true
                }
                None => false,
            },
            "firstrow" => match value.as_object() {
                Some(map) => {
                    self.first_row
                        .get_or_insert_with(Default::default)
                        .apply_attributes(map);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// What a floating table's offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionAnchor {
    /// The surrounding text
    Text,
    /// The page margin
    Margin,
    /// The page edge
    Page,
}

impl PositionAnchor {
    fn parse(value: &Value) -> Option<Self> {
        match as_keyword(value)?.as_str() {
            "text" => Some(PositionAnchor::Text),
            "margin" => Some(PositionAnchor::Margin),
            "page" => Some(PositionAnchor::Page),
            _ => None,
        }
    }
}

/// Floating table position. Distances are in twips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_from_text: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_from_text: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_from_text: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_from_text: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vert_anchor: Option<PositionAnchor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horz_anchor: Option<PositionAnchor>,

    /// Relative horizontal placement (`left`, `center`, `inside`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tblp_x_spec: Option<String>,

    /// Absolute horizontal offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tblp_x: Option<i32>,

    /// Relative vertical placement (`top`, `center`, `inline`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tblp_y_spec: Option<String>,

    /// Absolute vertical offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tblp_y: Option<i32>,
}

impl ApplyAttributes for TablePosition {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "leftfromtext" => assign(&mut self.left_from_text, as_u32(value)),
            "rightfromtext" => assign(&mut self.right_from_text, as_u32(value)),
            "topfromtext" => assign(&mut self.top_from_text, as_u32(value)),
            "bottomfromtext" => assign(&mut self.bottom_from_text, as_u32(value)),
            "vertanchor" => assign(&mut self.vert_anchor, PositionAnchor::parse(value)),
            "horzanchor" => assign(&mut self.horz_anchor, PositionAnchor::parse(value)),
            "tblpxspec" => assign(&mut self.tblp_x_spec, as_keyword(value)),
            "tblpx" => assign(&mut self.tblp_x, as_i32(value)),
            "tblpyspec" => assign(&mut self.tblp_y_spec, as_keyword(value)),
            "tblpy" => assign(&mut self.tblp_y, as_i32(value)),
            _ => false,
        }
    }
}

/// Numbering definition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberingType {
    /// One level only
    SingleLevel,
    /// Several levels, each restarting independently
    Multilevel,
    /// Several levels sharing one template
    HybridMultilevel,
}

/// One level of a numbering definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingLevel {
    /// Level number (0-based)
    pub level: u32,

    /// First number of the level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Number format (`decimal`, `bullet`, `lowerLetter`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Level text template (`%1.`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hanging: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_pos: Option<u32>,

    /// Font used for the number or bullet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl ApplyAttributes for NumberingLevel {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "level" => match as_u32(value) {
                Some(level) => {
                    self.level = level;
                    true
                }
                None => false,
            },
            "start" => assign(&mut self.start, as_u32(value)),
            "format" => assign(&mut self.format, as_string(value)),
            "text" => assign(&mut self.text, as_string(value)),
            "alignment" | "align" => assign(&mut self.alignment, Alignment::parse(value)),
            "left" => assign(&mut self.left, as_u32(value)),
            "hanging" => assign(&mut self.hanging, as_u32(value)),
            "tabpos" => assign(&mut self.tab_pos, as_u32(value)),
            "font" => assign(&mut self.font, as_string(value)),
            _ => false,
        }
    }
}

/// List numbering attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingProperties {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub num_type: Option<NumberingType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<NumberingLevel>,
}

impl NumberingProperties {
    /// Get a level definition by level number.
    pub fn level(&self, level: u32) -> Option<&NumberingLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

impl ApplyAttributes for NumberingProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "type" => {
                let num_type = match as_keyword(value).as_deref() {
                    Some("singlelevel") => Some(NumberingType::SingleLevel),
                    Some("multilevel") => Some(NumberingType::Multilevel),
                    Some("hybridmultilevel") => Some(NumberingType::HybridMultilevel),
                    _ => None,
                };
                assign(&mut self.num_type, num_type)
            }
            "levels" => match value.as_array() {
                Some(items) => {
                    self.levels = items
                        .iter()
                        .enumerate()
                        .filter_map(|(position, item)| {
                            let map = item.as_object()?;
                            let mut level = NumberingLevel {
                                level: position as u32,
                                ..Default::default()
                            };
                            level.apply_attributes(map);
                            Some(level)
                        })
                        .collect();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Table cell attributes, including merge directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valign: Option<VerticalAlign>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_direction: Option<TextDirection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    /// Number of logical columns the cell occupies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_span: Option<u32>,

    /// Vertical merge directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_merge: Option<VerticalMerge>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl ApplyAttributes for CellProperties {
    fn apply_attribute(&mut self, key: &str, value: &Value) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "valign" => {
                let valign = match as_keyword(value).as_deref() {
                    Some("top") => Some(VerticalAlign::Top),
                    Some("center") => Some(VerticalAlign::Center),
                    Some("bottom") => Some(VerticalAlign::Bottom),
                    Some("both") => Some(VerticalAlign::Both),
                    _ => None,
                };
                assign(&mut self.valign, valign)
            }
            "textdirection" => {
                let direction = match as_keyword(value).as_deref() {
                    Some("lrtb") => Some(TextDirection::LrTb),
                    Some("btlr") => Some(TextDirection::BtLr),
                    Some("tbrl") => Some(TextDirection::TbRl),
                    _ => None,
                };
                assign(&mut self.text_direction, direction)
            }
            "bgcolor" => assign(&mut self.bg_color, as_string(value)),
            "gridspan" => assign(&mut self.grid_span, as_u32(value).filter(|span| *span >= 1)),
            "vmerge" => assign(&mut self.v_merge, VerticalMerge::parse(value)),
            "bordersize" => assign(&mut self.border_size, as_u32(value)),
            "bordercolor" => assign(&mut self.border_color, as_string(value)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> AttributeMap {
        match value {
            Value::Object(map) => map,
            _ => AttributeMap::new(),
        }
    }

    #[test]
    fn test_table_attributes() {
        let mut table = TableProperties::default();
        let applied = table.apply_attributes(&map(json!({
            "borderSize": 6,
            "borderColor": "006699",
            "cellMargin": 80,
            "alignment": "center",
            "cellSpacing": 50,
        })));

        assert_eq!(applied, 5);
        assert_eq!(table.border_size, Some(6));
        assert_eq!(table.border_color.as_deref(), Some("006699"));
        assert_eq!(table.alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut paragraph = ParagraphProperties::default();
        let applied = paragraph.apply_attributes(&map(json!({
            "spaceAfter": 120,
            "futureAttribute": true,
        })));

        assert_eq!(applied, 1);
        assert_eq!(paragraph.space_after, Some(120));
    }

    #[test]
    fn test_wrong_value_shape_ignored() {
        let mut font = FontProperties::default();
        assert!(!font.apply_attribute("bold", &json!("very")));
        assert_eq!(font.bold, None);
        assert!(font.apply_attribute("Bold", &json!(true)));
        assert_eq!(font.bold, Some(true));
    }

    #[test]
    fn test_cell_merge_directives() {
        let mut cell = CellProperties::default();
        cell.apply_attributes(&map(json!({"gridSpan": 2, "vMerge": "restart"})));
        assert_eq!(cell.grid_span, Some(2));
        assert_eq!(cell.v_merge, Some(VerticalMerge::Restart));

        let mut cell = CellProperties::default();
        cell.apply_attributes(&map(json!({"vMerge": "continue", "gridSpan": 0})));
        assert_eq!(cell.v_merge, Some(VerticalMerge::Continue));
        assert_eq!(cell.grid_span, None);
    }

    #[test]
    fn test_numbering_levels() {
        let mut numbering = NumberingProperties::default();
        numbering.apply_attributes(&map(json!({
            "type": "multilevel",
            "levels": [
                {"format": "decimal", "text": "%1.", "left": 360, "hanging": 360},
                {"format": "upperLetter", "text": "%2.", "left": 720},
            ]
        })));

        assert_eq!(numbering.num_type, Some(NumberingType::Multilevel));
        assert_eq!(numbering.levels.len(), 2);
        assert_eq!(numbering.level(1).and_then(|l| l.left), Some(720));
    }

    #[test]
    fn test_whole_numbers_only() {
        let mut cell = CellProperties::default();
        assert!(!cell.apply_attribute("gridSpan", &json!(1e30)));
        assert!(!cell.apply_attribute("gridSpan", &json!(2.6)));
        assert!(!cell.apply_attribute("gridSpan", &json!(-2)));
        assert_eq!(cell.grid_span, None);

        assert!(cell.apply_attribute("gridSpan", &json!(3.0)));
        assert_eq!(cell.grid_span, Some(3));
    }

    #[test]
    fn test_floating_position() {
        let mut table = TableProperties::default();
        let applied = table.apply_attributes(&map(json!({
            "borderSize": 6,
            "position": {"vertAnchor": "text", "bottomFromText": 567, "tblpX": -120},
        })));

        assert_eq!(applied, 2);
        let position = table.position.expect("position set");
        assert_eq!(position.vert_anchor, Some(PositionAnchor::Text));
        assert_eq!(position.bottom_from_text, Some(567));
        assert_eq!(position.tblp_x, Some(-120));
        assert_eq!(position.horz_anchor, None);
    }

    #[test]
    fn test_first_row_overrides() {
        let mut table = TableProperties::default();
        table.apply_attribute("firstRow", &json!({"bgColor": "66BBFF"}));
        let first_row = table.first_row.expect("first row set");
        assert_eq!(first_row.bg_color.as_deref(), Some("66BBFF"));
    }
}
