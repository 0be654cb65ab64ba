//! Tests for the inline and pipe-table helpers.

use repdoc_babel::common::inline::{parse_inline, plain_text, strip_markup};
use repdoc_babel::common::table::{cell_text, parse_table};
use repdoc_babel::ir::nodes::{InlineContent, TableCellAlignment};

#[test]
fn test_inline_markup_is_stripped_to_visible_text() {
    assert_eq!(
        strip_markup("Метод **run()** вызывает *цикл* в `Server` ([код](https://example.com))"),
        "Метод run() вызывает цикл в Server (код)"
    );
}

#[test]
fn test_emphasis_is_removed_inside_code_spans() {
    let spans = parse_inline("`a*b*c` and *d*");
    assert_eq!(
        spans,
        vec![
            InlineContent::Code("abc".to_string()),
            InlineContent::text(" and "),
            InlineContent::Italic(vec![InlineContent::text("d")]),
        ]
    );
    assert_eq!(strip_markup("маршрут `/api/**`"), "маршрут /api/");
}

#[test]
fn test_unmatched_markers_stay_literal() {
    let spans = parse_inline("2 * 3 = 6");
    assert_eq!(plain_text(&spans), "2 * 3 = 6");
}

#[test]
fn test_table_with_alignment_and_short_rows() {
    let lines = vec![
        "| Поле | Тип | Описание |",
        "|:-----|:---:|---------:|",
        "| id | `int` | **ключ** |",
        "| name | String |",
        "",
        "after",
    ];
    let (table, next) = parse_table(&lines, 0);

    assert_eq!(next, 4);
    assert_eq!(table.columns(), 3);
    assert_eq!(table.rows.len(), 2);
    let aligns: Vec<_> = table.header.cells.iter().map(|c| c.align).collect();
    assert_eq!(
        aligns,
        vec![
            TableCellAlignment::Left,
            TableCellAlignment::Center,
            TableCellAlignment::Right
        ]
    );
    assert_eq!(cell_text(&table.rows[0].cells[2]), "ключ");
    assert_eq!(table.rows[1].cells.len(), 3);
    assert_eq!(cell_text(&table.rows[1].cells[2]), "");
}
