//! Import tests for the report dialect (report markdown → IR)

use crate::support::{fixture, report_rules};
use insta::assert_snapshot;
use repdoc_babel::common::inline::plain_text;
use repdoc_babel::format::Format;
use repdoc_babel::formats::markdown::{MarkdownFormat, ScanRules};
use repdoc_babel::formats::treeviz::to_treeviz_str;
use repdoc_babel::ir::nodes::{DocNode, Document, InlineContent, TableCellAlignment};
use repdoc_babel::ir::stats::DocumentStats;
use repdoc_babel::parse_report;

fn parse_fixture() -> Document {
    MarkdownFormat::with_rules(report_rules())
        .parse(&fixture("report.md"))
        .expect("report fixture parses")
}

fn headings(doc: &Document) -> Vec<(usize, String)> {
    doc.headings()
        .map(|h| (h.level, plain_text(&h.content)))
        .collect()
}

#[test]
fn test_report_headings_follow_rules() {
    let doc = parse_fixture();
    assert_eq!(
        headings(&doc),
        vec![
            (1, "Введение".to_string()),
            (1, "1. Описание программы".to_string()),
            (2, "1.1. Назначение".to_string()),
            (3, "1.1.1. Запуск".to_string()),
            (
                1,
                "2. Структура классов и их назначение в рамках проекта".to_string()
            ),
            (2, "2.1. Серверная часть".to_string()),
            (1, "Заключение".to_string()),
            (1, "Список использованных источников".to_string()),
        ]
    );
}

#[test]
fn test_report_block_counts() {
    let doc = parse_fixture();
    let stats = DocumentStats::collect(&doc);

    assert_eq!(doc.children.len(), 18);
    assert_eq!(stats.headings, 8);
    assert_eq!(stats.paragraphs, 3);
    assert_eq!(stats.list_items, 7);
    assert_eq!(stats.tables, 1);
    assert_eq!(stats.code_blocks, 1);
    assert_eq!(stats.placeholders, 2);
    assert_eq!(stats.breaks, 0);
    assert_eq!(stats.paragraph_blocks(), 21);
}

#[test]
fn test_skipped_lines_leave_no_trace() {
    let doc = parse_fixture();
    let text = serde_json::to_string(&doc).unwrap();
    assert!(!text.contains("ПОЯСНИТЕЛЬНАЯ"));
    assert!(!text.contains("ОГЛАВЛЕНИЕ"));
    assert!(!doc.children.iter().any(|n| matches!(n, DocNode::Break)));
}

#[test]
fn test_mixed_bullet_markers_share_a_list() {
    let doc = parse_fixture();
    let list = doc
        .children
        .iter()
        .find_map(|n| match n {
            DocNode::List(list) if !list.ordered => Some(list),
            _ => None,
        })
        .unwrap();
    let items: Vec<String> = list.items.iter().map(|i| plain_text(&i.content)).collect();
    assert_eq!(
        items,
        vec![
            "ведение каталога книг",
            "регистрация читателей",
            "выдача и возврат книг"
        ]
    );
}

#[test]
fn test_table_and_code_block() {
    let doc = parse_fixture();

    let table = doc
        .children
        .iter()
        .find_map(|n| match n {
            DocNode::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.columns(), 3);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(
        table.rows[1].cells[1].content,
        vec![
            InlineContent::text("Доступ к "),
            InlineContent::Bold(vec![InlineContent::text("данным")]),
        ]
    );
    assert_eq!(table.rows[0].cells[2].align, TableCellAlignment::Right);

    let code = doc
        .children
        .iter()
        .find_map(|n| match n {
            DocNode::Verbatim(v) => Some(v),
            _ => None,
        })
        .unwrap();
    assert_eq!(code.language.as_deref(), Some("java"));
    assert_eq!(code.content.lines().count(), 5);
    assert!(code.content.starts_with("public class Server {\n    public static"));
}

#[test]
fn test_placeholders_keep_visible_text() {
    let doc = parse_fixture();
    let placeholders: Vec<&str> = doc
        .children
        .iter()
        .filter_map(|n| match n {
            DocNode::Placeholder(p) => Some(p.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        placeholders,
        vec![
            "📸 Рисунок 1 – Главное окно программы",
            "[Здесь необходимо вставить диаграмму классов]"
        ]
    );
}

#[test]
fn test_default_rules_tree() {
    let source = "## Overview\n\nText with **bold**.\n\n1. first\n2. second\n---\n```\nx = 1\n```\n";
    let doc = parse_report(source, &ScanRules::default()).unwrap();
    assert_snapshot!(to_treeviz_str(&doc), @r"
    ⧉ Document (5 blocks)
    ├─ § [2] Overview
    ├─ ¶ Text with bold.
    ├─ ☰ 2 numbered items
    │ ├─ • first
    │ └─ • second
    ├─ ⎯ break
    └─ 𝒱 code (1 lines)
    ");
}
