//! Document model types.
//!
//! A [`Document`] owns its style registry and a body of blocks. Tables are
//! [`TableGrid`]s: rows of cells carrying column spans and vertical merge
//! state, finished through [`TableGridBuilder`](crate::TableGridBuilder).

mod document;
mod paragraph;
mod table;

pub use document::{Block, Document, Metadata};
pub use paragraph::{Paragraph, TextRun};
pub use table::{Cell, CellContent, Row, RowProperties, TableGrid};
