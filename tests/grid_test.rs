//! Integration tests for table grid building and validation.

use serde_json::json;
use wordgrid::style::{attribute_map, StyleRegistry};
use wordgrid::{
    Document, Error, Manifest, RowProperties, TableGrid, TableGridBuilder, ValidationMode,
    VerticalMerge,
};

/// Sample table 3: colspan and rowspan.
///
/// ```text
/// |  A  |     B     |  C  |
/// |-----|-----------|     |
/// |        D        |     |
/// ------|-----------|     |
/// |  E  |  F  |  G  |     |
/// ```
fn colspan_rowspan(registry: &mut StyleRegistry) -> wordgrid::Result<TableGrid> {
    let mut table = TableGridBuilder::new(registry).with_style("Colspan Rowspan");

    let mut row = table.add_row(None);
    row.add_cell(Some(500)).add_text("A");
    row.add_styled_cell(Some(1000), json!({"gridSpan": 2})).add_text("B");
    row.add_styled_cell(Some(500), json!({"vMerge": "restart"})).add_text("C");

    let mut row = table.add_row(None);
    row.add_styled_cell(Some(1500), json!({"gridSpan": 3})).add_text("D");
    row.add_styled_cell(None, json!({"vMerge": "continue"}));

    let mut row = table.add_row(None);
    row.add_cell(Some(500)).add_text("E");
    row.add_cell(Some(500)).add_text("F");
    row.add_cell(Some(500)).add_text("G");
    row.add_styled_cell(None, json!({"vMerge": "continue"}));

    table.finish()
}

/// Sample table 4: a spanned column merged downwards.
///
/// ```text
/// |     |   B    |  1 |
/// |  A  |        |----|
/// |     |        |  2 |
/// |     |---|----|----|
/// |     | C |  D |  3 |
/// ```
fn spanned_merge(registry: &mut StyleRegistry) -> wordgrid::Result<TableGrid> {
    let mut table = TableGridBuilder::new(registry).with_style("Colspan Rowspan");

    let mut row = table.add_row(None);
    row.add_styled_cell(Some(1000), json!({"vMerge": "restart"})).add_text("A");
    row.add_styled_cell(Some(1000), json!({"gridSpan": 2, "vMerge": "restart"}))
        .add_text("B");
    row.add_cell(Some(1000)).add_text("1");

    let mut row = table.add_row(None);
    row.add_styled_cell(Some(1000), json!({"vMerge": "continue"}));
    row.add_styled_cell(Some(1000), json!({"vMerge": "continue", "gridSpan": 2}));
    row.add_cell(Some(1000)).add_text("2");

    let mut row = table.add_row(None);
    row.add_styled_cell(Some(1000), json!({"vMerge": "continue"}));
    row.add_cell(Some(1000)).add_text("C");
    row.add_cell(Some(1000)).add_text("D");
    row.add_cell(Some(1000)).add_text("3");

    table.finish()
}

#[test]
fn test_basic_table_spans() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    for r in 1..=10 {
        let mut row = table.add_row(None);
        for c in 1..=5 {
            row.add_cell(Some(1750))
                .add_text(format!("Row {}, Cell {}", r, c));
        }
    }
    let grid = table.finish().unwrap();

    assert_eq!(grid.row_count(), 10);
    assert_eq!(grid.column_count(), 5);
    assert!(grid.rows().iter().all(|row| row.span() == 5));
    assert!(!grid.has_merged_cells());
    assert_eq!(
        grid.cell_at(9, 4).map(|c| c.plain_text()),
        Some("Row 10, Cell 5".to_string())
    );
}

#[test]
fn test_colspan_rowspan_sample() {
    let mut registry = StyleRegistry::new();
    registry.add_table_style(
        "Colspan Rowspan",
        &attribute_map(json!({"borderSize": 6, "borderColor": "999999"})),
        None,
    );
    let grid = colspan_rowspan(&mut registry).unwrap();

    assert_eq!(grid.column_count(), 4);
    assert!(grid.rows().iter().all(|row| row.span() == 4));
    assert_eq!(grid.row_span(0, 3), 3);
    assert_eq!(grid.row_span(0, 1), 1);
    assert_eq!(grid.covering_cell(1, 2).map(|c| c.plain_text()), Some("D".to_string()));

    let (origin_row, origin) = grid.merge_origin(2, 3).unwrap();
    assert_eq!(origin_row, 0);
    assert_eq!(origin.plain_text(), "C");
    assert_eq!(grid.style().and_then(|s| s.index()), Some(1));
}

#[test]
fn test_spanned_merge_sample() {
    let mut registry = StyleRegistry::new();
    let grid = spanned_merge(&mut registry).unwrap();

    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.row_span(0, 0), 3);
    assert_eq!(grid.row_span(0, 1), 2);
    assert_eq!(grid.cell_at(1, 1).map(|c| c.grid_span()), Some(2));
    assert_eq!(grid.cell_at(1, 1).and_then(|c| c.width()), None);
    assert_eq!(grid.plain_text(), "A\tB\t1\n\t\t2\n\tC\tD\t3");
}

#[test]
fn test_matching_restarts_finalize() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);

    let mut row = table.add_row(None);
    row.add_styled_cell(None, json!({"vMerge": "restart"})).add_text("A");
    row.add_styled_cell(None, json!({"gridSpan": 2, "vMerge": "restart"}))
        .add_text("B");
    let mut row = table.add_row(None);
    row.add_styled_cell(None, json!({"vMerge": "continue"}));
    row.add_styled_cell(None, json!({"gridSpan": 2, "vMerge": "continue"}));

    let grid = table.finish().unwrap();
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.row_span(1, 0), 0);
    assert_eq!(
        grid.cell_at(1, 1).map(|c| c.vertical_merge()),
        Some(VerticalMerge::Continue)
    );
}

#[test]
fn test_continue_without_restart() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    let mut row = table.add_row(None);
    row.add_cell(None).add_text("A");
    row.add_cell(None).add_text("B");
    let mut row = table.add_row(None);
    row.add_cell(None);
    row.add_styled_cell(None, json!({"vMerge": "continue"}));

    let err = table.finish().unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(
        err,
        Error::UnmatchedVerticalMergeContinuation { row: 1, column: 1 }
    ));
}

#[test]
fn test_continue_at_shifted_column() {
    // the restart sits at column 1, the continuation at column 0
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    let mut row = table.add_row(None);
    row.add_cell(None);
    row.add_styled_cell(None, json!({"vMerge": "restart"}));
    let mut row = table.add_row(None);
    row.add_styled_cell(None, json!({"vMerge": "continue"}));
    row.add_cell(None);

    assert!(matches!(
        table.finish(),
        Err(Error::UnmatchedVerticalMergeContinuation { row: 1, column: 0 })
    ));
}

#[test]
fn test_span_mismatch() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    table
        .add_row(None)
        .add_styled_cell(None, json!({"gridSpan": 2, "vMerge": "restart"}));
    let mut row = table.add_row(None);
    row.add_styled_cell(None, json!({"gridSpan": 1, "vMerge": "continue"}));
    row.add_cell(None);

    let err = table.finish().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Vertical merge continuation at row 1, column 0 spans 1 columns, expected 2"
    );
}

#[test]
fn test_first_violation_in_row_major_order() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    let mut row = table.add_row(None);
    row.add_cell(None);
    row.add_cell(None);
    let mut row = table.add_row(None);
    row.add_cell(None);
    row.add_styled_cell(None, json!({"vMerge": "continue"}));
    let mut row = table.add_row(None);
    row.add_styled_cell(None, json!({"vMerge": "continue"}));
    row.add_cell(None);

    assert!(matches!(
        table.finish(),
        Err(Error::UnmatchedVerticalMergeContinuation { row: 1, column: 1 })
    ));
}

#[test]
fn test_short_row_strict_and_lenient() {
    let build = |mode| {
        let mut registry = StyleRegistry::new();
        let mut table = TableGridBuilder::new(&mut registry).with_mode(mode);
        let mut row = table.add_row(None);
        row.add_cell(None);
        row.add_styled_cell(None, json!({"gridSpan": 2}));
        table.add_row(None).add_cell(None);
        table.finish()
    };

    assert!(matches!(
        build(ValidationMode::Strict),
        Err(Error::InconsistentRowSpan {
            row: 1,
            expected: 3,
            found: 1
        })
    ));

    let grid = build(ValidationMode::Lenient).unwrap();
    assert_eq!(grid.column_count(), 3);
    assert_eq!(grid.row(1).map(|r| r.cells().len()), Some(1));
}

#[test]
fn test_row_properties() {
    let mut registry = StyleRegistry::new();
    let mut table = TableGridBuilder::new(&mut registry);
    let header = RowProperties {
        is_header: true,
        cant_split: true,
        exact_height: false,
    };
    table.add_row_with(Some(900), header).add_cell(Some(2000)).add_text("Row 1");
    table.add_row(None).add_cell(Some(2000)).add_text("Cell 1");
    let grid = table.finish().unwrap();

    assert!(grid.row(0).unwrap().is_header());
    assert!(grid.row(0).unwrap().properties().cant_split);
    assert_eq!(grid.row(0).unwrap().height(), Some(900));
    assert!(!grid.row(1).unwrap().is_header());
}

#[test]
fn test_nested_table_in_centered_table() {
    let mut doc = Document::new();
    let mut outer = doc.styled_table(json!({"width": 2500, "unit": "pct", "alignment": "center"}));

    let inner = {
        let mut inner = outer.nested().with_style(json!({"alignment": "center"}));
        inner.add_row(None).add_cell(None).add_text("Inside nested table");
        inner.finish().unwrap()
    };
    outer
        .add_row(None)
        .add_cell(None)
        .add_text("This cell contains nested table.")
        .add_table(inner);
    let grid = outer.finish().unwrap();
    doc.add_table(grid);

    let grid = doc.tables().next().unwrap();
    let table_style = grid.style().and_then(|s| s.as_table().cloned()).unwrap();
    assert_eq!(table_style.width, Some(2500));
    assert!(grid.style().unwrap().name().is_none());
    assert_eq!(grid.nested_tables().count(), 1);
    assert!(doc.styles().is_empty());
}

#[test]
fn test_grid_json_round_trip_validates() {
    let mut registry = StyleRegistry::new();
    let grid = spanned_merge(&mut registry).unwrap();

    let json = serde_json::to_string(&grid).unwrap();
    let restored: TableGrid = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, grid);
    assert!(restored.validate(ValidationMode::Strict).is_ok());
}

#[test]
fn test_manifest_matches_direct_build() {
    let manifest = Manifest::from_json(
        r#"{
        "styles": [ { "kind": "table", "name": "Colspan Rowspan",
                      "attributes": { "borderSize": 6, "borderColor": "999999" } } ],
        "body": [ { "type": "table", "style": "Colspan Rowspan", "rows": [
            { "cells": [ { "width": 500, "text": "A" },
                         { "width": 1000, "style": { "gridSpan": 2 }, "text": "B" },
                         { "width": 500, "style": { "vMerge": "restart" }, "text": "C" } ] },
            { "cells": [ { "width": 1500, "style": { "gridSpan": 3 }, "text": "D" },
                         { "style": { "vMerge": "continue" } } ] },
            { "cells": [ { "width": 500, "text": "E" }, { "width": 500, "text": "F" },
                         { "width": 500, "text": "G" }, { "style": { "vMerge": "continue" } } ] }
        ] } ]
    }"#,
    )
    .unwrap();
    let doc = manifest.build().unwrap();

    let mut registry = StyleRegistry::new();
    registry.add_table_style(
        "Colspan Rowspan",
        &attribute_map(json!({"borderSize": 6, "borderColor": "999999"})),
        None,
    );
    let direct = colspan_rowspan(&mut registry).unwrap();

    assert_eq!(doc.tables().next(), Some(&direct));
}
