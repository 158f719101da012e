//! Error types for wordgrid library.

use crate::style::StyleKind;
use std::io;
use thiserror::Error;

/// Result type alias for wordgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A `continue` cell has no open vertical merge above it.
    #[error("Vertical merge continuation at row {row}, column {column} has no restart above it")]
    UnmatchedVerticalMergeContinuation {
        /// Row of the offending cell (0-based)
        row: usize,
        /// Starting column of the offending cell (0-based)
        column: usize,
    },

    /// A `continue` cell declares a different span than the cell it continues.
    #[error(
        "Vertical merge continuation at row {row}, column {column} spans {found} columns, expected {expected}"
    )]
    VerticalMergeSpanMismatch {
        /// Row of the offending cell (0-based)
        row: usize,
        /// Starting column of the offending cell (0-based)
        column: usize,
        /// Span of the merge group above
        expected: u32,
        /// Span declared on the continuation cell
        found: u32,
    },

    /// A row's summed span differs from the grid's column count.
    #[error("Row {row} spans {found} columns, expected {expected}")]
    InconsistentRowSpan {
        /// Row index (0-based)
        row: usize,
        /// Inferred column count of the grid
        expected: usize,
        /// Summed span of the row
        found: usize,
    },

    /// No writer is registered under the requested name.
    #[error("No writer registered for: {0}")]
    UnknownWriter(String),

    /// A manifest could not be replayed into a document.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error describes a structural problem in a table grid.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::UnmatchedVerticalMergeContinuation { .. }
                | Error::VerticalMergeSpanMismatch { .. }
                | Error::InconsistentRowSpan { .. }
        )
    }
}

/// Non-fatal conditions recorded by the style registry.
///
/// These never abort an operation; the registry completes with a
/// well-defined fallback and keeps the notice for inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleNotice {
    /// A style was registered under a name that already exists; the first
    /// registration was kept.
    #[error("Style '{name}' is already registered; duplicate ignored")]
    DuplicateStyleNameIgnored {
        /// The duplicated name
        name: String,
    },

    /// A style instance of another kind was supplied; an empty style was
    /// registered instead.
    #[error("Style '{name}' expected a {expected} instance but got {found}; registered empty")]
    StyleKindMismatch {
        /// The style name being registered
        name: String,
        /// Kind requested by the caller
        expected: StyleKind,
        /// Kind of the supplied instance
        found: StyleKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnmatchedVerticalMergeContinuation { row: 2, column: 3 };
        assert_eq!(
            err.to_string(),
            "Vertical merge continuation at row 2, column 3 has no restart above it"
        );

        let err = Error::InconsistentRowSpan {
            row: 1,
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "Row 1 spans 3 columns, expected 4");
    }

    #[test]
    fn test_structural_errors() {
        assert!(Error::VerticalMergeSpanMismatch {
            row: 1,
            column: 0,
            expected: 2,
            found: 1
        }
        .is_structural());
        assert!(!Error::UnknownWriter("odt".into()).is_structural());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_notice_display() {
        let notice = StyleNotice::StyleKindMismatch {
            name: "Body".into(),
            expected: StyleKind::Paragraph,
            found: StyleKind::Font,
        };
        assert_eq!(
            notice.to_string(),
            "Style 'Body' expected a paragraph instance but got font; registered empty"
        );
    }
}
