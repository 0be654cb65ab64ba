//! Pipe tables: detection and parsing.
//!
//! A table starts at a row whose next line carries the `---` separator. Body
//! rows continue while lines start with `|`; the first other line (a blank one
//! included) ends the table. The header decides the column count.

use crate::common::inline::{parse_inline, plain_text};
use crate::ir::nodes::{Table, TableCell, TableCellAlignment, TableRow};

/// Whether `line` can open a table: a pipe row that is not itself a separator.
pub fn is_table_row_candidate(line: &str) -> bool {
    line.trim().starts_with('|') && !line.contains("---")
}

/// Whether the table opened at `start` has its separator on the next line.
pub fn starts_table(lines: &[&str], start: usize) -> bool {
    lines
        .get(start)
        .is_some_and(|line| is_table_row_candidate(line))
        && lines.get(start + 1).is_some_and(|next| next.contains("---"))
}

/// Split a table row into trimmed cell texts.
pub fn parse_table_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    line.split('|').map(|s| s.trim().to_string()).collect()
}

fn parse_alignments(separator: &str) -> Vec<TableCellAlignment> {
    parse_table_row(separator)
        .iter()
        .map(|part| {
            let trimmed = part.trim();
            if trimmed.starts_with(':') && trimmed.ends_with(':') && trimmed.len() > 1 {
                TableCellAlignment::Center
            } else if trimmed.ends_with(':') {
                TableCellAlignment::Right
            } else if trimmed.starts_with(':') {
                TableCellAlignment::Left
            } else {
                TableCellAlignment::None
            }
        })
        .collect()
}

/// Parse the table whose header is at `start`.
///
/// Returns the table and the index of the first line after it. Callers check
/// [`starts_table`] first; the separator line is consumed unconditionally.
pub fn parse_table(lines: &[&str], start: usize) -> (Table, usize) {
    let header_cells = lines
        .get(start)
        .map(|line| parse_table_row(line))
        .unwrap_or_default();
    let alignments = lines
        .get(start + 1)
        .map(|line| parse_alignments(line))
        .unwrap_or_default();
    let align_at = |i: usize| {
        alignments
            .get(i)
            .copied()
            .unwrap_or(TableCellAlignment::None)
    };

    let columns = header_cells.len();
    let header = TableRow {
        cells: header_cells
            .iter()
            .enumerate()
            .map(|(i, text)| TableCell {
                content: parse_inline(text),
                align: align_at(i),
            })
            .collect(),
    };

    let mut end = start + 2;
    let mut rows = Vec::new();
    while let Some(line) = lines.get(end) {
        if !line.trim().starts_with('|') {
            break;
        }
        let texts = parse_table_row(line);
        let mut cells: Vec<TableCell> = texts
            .iter()
            .take(columns)
            .enumerate()
            .map(|(i, text)| TableCell {
                content: parse_inline(text),
                align: align_at(i),
            })
            .collect();
        while cells.len() < columns {
            let mut cell = TableCell::empty();
            cell.align = align_at(cells.len());
            cells.push(cell);
        }
        rows.push(TableRow { cells });
        end += 1;
    }

    (Table { header, rows }, end)
}

/// Plain text of a cell, markup removed.
pub fn cell_text(cell: &TableCell) -> String {
    plain_text(&cell.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_cells_are_trimmed() {
        assert_eq!(
            parse_table_row("| Метод | URL |  Описание |"),
            vec!["Метод", "URL", "Описание"]
        );
        assert_eq!(parse_table_row("a | b"), vec!["a", "b"]);
    }

    #[test]
    fn separator_is_required() {
        let lines = ["| A | B |", "| 1 | 2 |"];
        assert!(!starts_table(&lines, 0));

        let lines = ["| A | B |", "|---|---|", "| 1 | 2 |"];
        assert!(starts_table(&lines, 0));
        assert!(!starts_table(&lines, 1));
    }

    #[test]
    fn body_stops_at_first_non_pipe_line() {
        let lines = ["| A | B |", "|---|---|", "| 1 | 2 |", "", "| 3 | 4 |"];
        let (table, next) = parse_table(&lines, 0);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(next, 3);
    }

    #[test]
    fn extra_cells_dropped_and_missing_cells_padded() {
        let lines = ["| A | B |", "|---|---|", "| 1 | 2 | 3 |", "| only |"];
        let (table, _) = parse_table(&lines, 0);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[1].cells.len(), 2);
        assert_eq!(cell_text(&table.rows[1].cells[0]), "only");
        assert_eq!(cell_text(&table.rows[1].cells[1]), "");
    }

    #[test]
    fn alignment_markers_are_read() {
        let lines = ["| L | C | R | N |", "| :--- | :-: | --: | --- |", "| a | b | c | d |"];
        let (table, _) = parse_table(&lines, 0);
        let aligns: Vec<_> = table.rows[0].cells.iter().map(|c| c.align).collect();
        assert_eq!(
            aligns,
            vec![
                TableCellAlignment::Left,
                TableCellAlignment::Center,
                TableCellAlignment::Right,
                TableCellAlignment::None,
            ]
        );
    }
}
