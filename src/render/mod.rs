//! Rendering module for converting documents to output formats.

mod json;
mod text;
pub mod visitor;

pub use json::{grid_to_json, styles_to_json, to_json, JsonFormat};
pub use text::{grid_to_text, to_text};
pub use visitor::{
    walk_document, walk_grid, CompositeVisitor, GridStats, GridVisitor, VisitorAction,
};
