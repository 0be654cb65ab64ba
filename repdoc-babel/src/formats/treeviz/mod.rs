//! Treeviz formatter for IR documents
//!
//! Treeviz is a visual representation of the IR, handy to see what the scanner made of a
//! report before rendering it. It backs the `ir-treeviz` inspect transform and is not a
//! conversion target.
//!
//! The format is:
//! <prefix><connector> <icon> <label> (labels truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document (4 blocks)
//! ├─ § [1] Введение
//! ├─ ¶ Система предназначена для у…
//! ├─ ☰ 2 items
//! │ ├─ • первый пункт
//! │ └─ • второй пункт
//! └─ 𝒱 java (3 lines)
//!
//! With the `inlines` parameter set to `true`, the inline spans of headings, paragraphs and
//! list items are shown as children (◦ text, 𝐁 bold, 𝐼 italic, ƒ code, ⊕ link).

use super::icons::get_icon;
use crate::common::inline::plain_text;
use crate::common::table::cell_text;
use crate::error::FormatError;
use crate::format::bool_option;
use crate::ir::nodes::{DocNode, Document, InlineContent, TableRow};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(LABEL_WIDTH - 1).collect();
        short.push('…');
        short
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!("{}{}", prefix, if is_last { "  " } else { "│ " })
}

fn push_line(output: &mut String, prefix: &str, is_last: bool, node_type: &str, label: &str) {
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector(is_last),
        get_icon(node_type),
        truncate(label)
    ));
}

fn format_inlines(output: &mut String, spans: &[InlineContent], prefix: &str) {
    let count = spans.len();
    for (i, span) in spans.iter().enumerate() {
        let is_last = i == count - 1;
        match span {
            InlineContent::Text(text) => push_line(output, prefix, is_last, "Text", text),
            InlineContent::Code(code) => push_line(output, prefix, is_last, "Code", code),
            InlineContent::Link { text, url } => {
                push_line(output, prefix, is_last, "Link", &format!("{text} <{url}>"))
            }
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                let node_type = if matches!(span, InlineContent::Bold(_)) {
                    "Bold"
                } else {
                    "Italic"
                };
                push_line(output, prefix, is_last, node_type, &plain_text(children));
                format_inlines(output, children, &child_prefix(prefix, is_last));
            }
        }
    }
}

fn row_label(row: &TableRow) -> String {
    row.cells.iter().map(cell_text).collect::<Vec<_>>().join(" | ")
}

fn format_node(
    output: &mut String,
    node: &DocNode,
    prefix: &str,
    is_last: bool,
    show_inlines: bool,
) {
    let inner = child_prefix(prefix, is_last);
    let node_type = node.node_type();

    match node {
        DocNode::Heading(heading) => {
            let label = format!("[{}] {}", heading.level, plain_text(&heading.content));
            push_line(output, prefix, is_last, node_type, &label);
            if show_inlines {
                format_inlines(output, &heading.content, &inner);
            }
        }
        DocNode::Paragraph(paragraph) => {
            push_line(
                output,
                prefix,
                is_last,
                node_type,
                &plain_text(&paragraph.content),
            );
            if show_inlines {
                format_inlines(output, &paragraph.content, &inner);
            }
        }
        DocNode::List(list) => {
            let label = if list.ordered {
                format!("{} numbered items", list.items.len())
            } else {
                format!("{} items", list.items.len())
            };
            push_line(output, prefix, is_last, node_type, &label);
            let count = list.items.len();
            for (i, item) in list.items.iter().enumerate() {
                let item_last = i == count - 1;
                push_line(
                    output,
                    &inner,
                    item_last,
                    "ListItem",
                    &plain_text(&item.content),
                );
                if show_inlines {
                    format_inlines(output, &item.content, &child_prefix(&inner, item_last));
                }
            }
        }
        DocNode::Table(table) => {
            let label = format!("{} columns, {} rows", table.columns(), table.rows.len());
            push_line(output, prefix, is_last, node_type, &label);
            push_line(
                output,
                &inner,
                table.rows.is_empty(),
                "TableHeader",
                &row_label(&table.header),
            );
            let count = table.rows.len();
            for (i, row) in table.rows.iter().enumerate() {
                push_line(output, &inner, i == count - 1, "TableRow", &row_label(row));
            }
        }
        DocNode::Verbatim(verbatim) => {
            let lines = verbatim.content.lines().count();
            let label = format!(
                "{} ({} lines)",
                verbatim.language.as_deref().unwrap_or("code"),
                lines
            );
            push_line(output, prefix, is_last, node_type, &label);
        }
        DocNode::Placeholder(placeholder) => {
            push_line(output, prefix, is_last, node_type, &placeholder.text);
        }
        DocNode::Break => push_line(output, prefix, is_last, node_type, "break"),
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    render(doc, false)
}

/// Convert a document to a treeviz string with optional parameters
///
/// # Parameters
///
/// - `"inlines"`: when `"true"`, inline spans are listed under their block.
pub fn to_treeviz_str_with_params(
    doc: &Document,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    if let Some(unknown) = params.keys().find(|key| key.as_str() != "inlines") {
        return Err(FormatError::NotSupported(format!(
            "Format 'treeviz' does not support parameter '{unknown}'"
        )));
    }
    let show_inlines = bool_option(params, "inlines", false)?;
    Ok(render(doc, show_inlines))
}

fn render(doc: &Document, show_inlines: bool) -> String {
    let mut output = format!(
        "{} Document ({} blocks)\n",
        get_icon("Document"),
        doc.children.len()
    );
    let count = doc.children.len();
    for (i, node) in doc.children.iter().enumerate() {
        format_node(&mut output, node, "", i == count - 1, show_inlines);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::scanner::scan;
    use crate::formats::markdown::ScanRules;

    #[test]
    fn test_truncate_counts_chars() {
        let long = "Информационно-справочная система парикмахерской";
        let short = truncate(long);
        assert_eq!(short.chars().count(), LABEL_WIDTH);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_tree_shape() {
        let doc = scan(
            "# Title\n\n- a\n- b\n\n| A | B |\n|---|---|\n| 1 | 2 |\n",
            &ScanRules::default(),
        );
        let output = to_treeviz_str(&doc);
        assert_eq!(
            output,
            "⧉ Document (3 blocks)\n\
             ├─ § [1] Title\n\
             ├─ ☰ 2 items\n\
             │ ├─ • a\n\
             │ └─ • b\n\
             └─ ▦ 2 columns, 1 rows\n\
             \x20 ├─ ⊤ A | B\n\
             \x20 └─ ≡ 1 | 2\n"
        );
    }

    #[test]
    fn test_inlines_parameter() {
        let doc = scan("Some **bold** text\n", &ScanRules::default());
        let mut params = HashMap::new();
        params.insert("inlines".to_string(), "true".to_string());
        let output = to_treeviz_str_with_params(&doc, &params).unwrap();
        assert!(output.contains("└─ ¶ Some bold text\n"));
        assert!(output.contains("  ├─ 𝐁 bold\n  │ └─ ◦ bold\n"));
    }

    #[test]
    fn test_unknown_parameter() {
        let doc = Document::default();
        let mut params = HashMap::new();
        params.insert("ast-full".to_string(), "true".to_string());
        assert!(to_treeviz_str_with_params(&doc, &params).is_err());
    }
}
