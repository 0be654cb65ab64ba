//! Body of `word/document.xml`.
//!
//! [`BodyWriter`] appends WordprocessingML for one block at a time and keeps count of what
//! it wrote; the template pages and the IR blocks go through the same writer.

use super::options::{cm_to_twips, inches_to_twips, pt_to_half_points, pt_to_twips, DocxOptions};
use super::xml::{
    escape_text, write_run, Justification, ParagraphProps, RunProps, R_NS, W_NS, XML_DECLARATION,
};
use crate::common::inline::plain_text;
use crate::ir::nodes::{
    DocNode, Document, Heading, InlineContent, List, Table, TableCell, TableCellAlignment,
    TableRow, Verbatim,
};
use serde::Serialize;
use tracing::debug;

pub const BULLET_NUM_ID: u32 = 1;
pub const HEADING_STYLE_LEVELS: usize = 9;

/// What ended up in the document body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Body paragraphs, template and page-break paragraphs included. Table cells excluded.
    pub paragraphs: usize,
    pub tables: usize,
    pub headings: usize,
    pub list_items: usize,
    pub code_blocks: usize,
    pub placeholders: usize,
}

pub struct BodyWriter<'a> {
    options: &'a DocxOptions,
    xml: String,
    stats: RenderStats,
    ordered_lists: u32,
}

impl<'a> BodyWriter<'a> {
    pub fn new(options: &'a DocxOptions) -> Self {
        Self {
            options,
            xml: String::new(),
            stats: RenderStats::default(),
            ordered_lists: 0,
        }
    }

    pub fn options(&self) -> &DocxOptions {
        self.options
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Number of ordered lists, each of which has its own numbering instance.
    pub fn ordered_lists(&self) -> u32 {
        self.ordered_lists
    }

    /// Run properties of ordinary body text at the given size.
    pub fn body_run(&self, size_pt: f32) -> RunProps {
        RunProps::sized(&self.options.fonts.body, pt_to_half_points(size_pt))
    }

    /// A paragraph made of `(text, run properties)` pieces.
    pub fn paragraph(&mut self, props: &ParagraphProps, runs: &[(&str, RunProps)]) {
        self.xml.push_str("<w:p>");
        props.write(&mut self.xml);
        for (text, run) in runs {
            write_run(&mut self.xml, text, run);
        }
        self.xml.push_str("</w:p>");
        self.stats.paragraphs += 1;
    }

    pub fn empty_paragraph(&mut self) {
        self.xml.push_str("<w:p/>");
        self.stats.paragraphs += 1;
    }

    pub fn empty_paragraphs(&mut self, count: usize) {
        for _ in 0..count {
            self.empty_paragraph();
        }
    }

    pub fn page_break(&mut self) {
        self.xml
            .push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
        self.stats.paragraphs += 1;
    }

    /// Raw paragraph XML that the caller has already counted for.
    pub fn raw_paragraph(&mut self, xml: &str) {
        self.xml.push_str(xml);
        self.stats.paragraphs += 1;
    }

    pub fn block(&mut self, node: &DocNode) {
        match node {
            DocNode::Heading(heading) => self.heading(heading),
            DocNode::Paragraph(paragraph) => {
                let props = ParagraphProps::default();
                self.inline_paragraph(&props, &paragraph.content);
            }
            DocNode::List(list) => self.list(list),
            DocNode::Table(table) => self.table(table),
            DocNode::Verbatim(verbatim) => self.code_block(verbatim),
            DocNode::Placeholder(placeholder) => {
                let style = &self.options.placeholder;
                let run = self
                    .body_run(self.options.fonts.body_size_pt)
                    .italic(style.italic)
                    .color(&style.color);
                self.paragraph(
                    &ParagraphProps::default(),
                    &[(placeholder.text.as_str(), run)],
                );
                self.stats.placeholders += 1;
            }
            DocNode::Break => self.empty_paragraph(),
        }
    }

    fn heading(&mut self, heading: &Heading) {
        let level = heading.level.clamp(1, HEADING_STYLE_LEVELS);
        let props = ParagraphProps::styled(&format!("Heading{level}"));
        self.xml.push_str("<w:p>");
        props.write(&mut self.xml);
        // Heading runs carry no direct formatting; the style decides.
        if self.options.inline_formatting {
            write_inlines(&mut self.xml, &heading.content, &RunProps::default(), self.options);
        } else {
            write_run(&mut self.xml, &plain_text(&heading.content), &RunProps::default());
        }
        self.xml.push_str("</w:p>");
        self.stats.paragraphs += 1;
        self.stats.headings += 1;
    }

    fn inline_paragraph(&mut self, props: &ParagraphProps, content: &[InlineContent]) {
        let base = self.body_run(self.options.fonts.body_size_pt);
        self.xml.push_str("<w:p>");
        props.write(&mut self.xml);
        if self.options.inline_formatting {
            write_inlines(&mut self.xml, content, &base, self.options);
        } else {
            write_run(&mut self.xml, &plain_text(content), &base);
        }
        self.xml.push_str("</w:p>");
        self.stats.paragraphs += 1;
    }

    fn list(&mut self, list: &List) {
        let (style, num_id) = if list.ordered {
            self.ordered_lists += 1;
            ("ListNumber", BULLET_NUM_ID + self.ordered_lists)
        } else {
            ("ListBullet", BULLET_NUM_ID)
        };
        let props = ParagraphProps {
            numbering: Some((0, num_id)),
            ..ParagraphProps::styled(style)
        };
        for item in &list.items {
            self.inline_paragraph(&props, &item.content);
            self.stats.list_items += 1;
        }
    }

    fn code_block(&mut self, verbatim: &Verbatim) {
        let code = &self.options.code;
        let props = ParagraphProps {
            spacing: Some((
                pt_to_twips(code.space_before_pt),
                pt_to_twips(code.space_after_pt),
            )),
            indent: Some((
                inches_to_twips(code.indent_left_in),
                inches_to_twips(code.indent_right_in),
            )),
            ..ParagraphProps::styled("NoSpacing")
        };
        let run = RunProps::sized(
            &self.options.fonts.code,
            pt_to_half_points(self.options.fonts.code_size_pt),
        );
        self.paragraph(&props, &[(verbatim.content.as_str(), run)]);
        self.stats.code_blocks += 1;
    }

    fn table(&mut self, table: &Table) {
        let columns = table.columns().max(1);
        let width = self.options.page.text_width() / columns as u32;
        let style = &self.options.table;

        self.xml.push_str("<w:tbl><w:tblPr>");
        self.xml.push_str(&format!(
            r#"<w:tblStyle w:val="{}"/>"#,
            escape_text(&style.style_id())
        ));
        self.xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
        self.xml.push_str(
            r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#,
        );
        self.xml.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.xml
                .push_str(&format!(r#"<w:gridCol w:w="{width}"/>"#));
        }
        self.xml.push_str("</w:tblGrid>");

        let header_run = self
            .body_run(style.header_size_pt)
            .bold(style.header_bold);
        let body_run = self.body_run(style.body_size_pt);
        self.table_row(&table.header, columns, width, &header_run, true);
        for row in &table.rows {
            self.table_row(row, columns, width, &body_run, false);
        }

        self.xml.push_str("</w:tbl>");
        self.stats.tables += 1;
        debug!(columns, rows = table.rows.len(), "table written");
    }

    fn table_row(
        &mut self,
        row: &TableRow,
        columns: usize,
        width: u32,
        run: &RunProps,
        header: bool,
    ) {
        self.xml.push_str("<w:tr>");
        if header {
            self.xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        let empty = TableCell::empty();
        for i in 0..columns {
            let cell = row.cells.get(i).unwrap_or(&empty);
            self.xml.push_str(&format!(
                r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/></w:tcPr><w:p>"#
            ));
            if let Some(jc) = justification(cell.align) {
                ParagraphProps::aligned(jc).write(&mut self.xml);
            }
            if !cell.content.is_empty() {
                if self.options.inline_formatting {
                    write_inlines(&mut self.xml, &cell.content, run, self.options);
                } else {
                    write_run(&mut self.xml, &plain_text(&cell.content), run);
                }
            }
            self.xml.push_str("</w:p></w:tc>");
        }
        self.xml.push_str("</w:tr>");
    }

    /// Wrap the body into a complete `word/document.xml`.
    pub fn finish(self) -> (String, RenderStats, u32) {
        let (width, height) = self.options.page.size.dimensions();
        let margins = &self.options.page.margins;
        let xml = format!(
            concat!(
                "{decl}\n",
                r#"<w:document xmlns:w="{w}" xmlns:r="{r}"><w:body>"#,
                "{body}",
                r#"<w:sectPr><w:pgSz w:w="{width}" w:h="{height}"/>"#,
                r#"<w:pgMar w:top="{top}" w:right="{right}" w:bottom="{bottom}" w:left="{left}" w:header="708" w:footer="708" w:gutter="0"/>"#,
                r#"<w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>"#,
                "</w:body></w:document>"
            ),
            decl = XML_DECLARATION,
            w = W_NS,
            r = R_NS,
            body = self.xml,
            width = width,
            height = height,
            top = cm_to_twips(margins.top_cm),
            right = cm_to_twips(margins.right_cm),
            bottom = cm_to_twips(margins.bottom_cm),
            left = cm_to_twips(margins.left_cm),
        );
        (xml, self.stats, self.ordered_lists)
    }
}

fn justification(align: TableCellAlignment) -> Option<Justification> {
    match align {
        TableCellAlignment::Left => Some(Justification::Left),
        TableCellAlignment::Center => Some(Justification::Center),
        TableCellAlignment::Right => Some(Justification::Right),
        TableCellAlignment::None => None,
    }
}

/// Write spans as formatted runs on top of `base`.
fn write_inlines(
    out: &mut String,
    spans: &[InlineContent],
    base: &RunProps,
    options: &DocxOptions,
) {
    for span in spans {
        match span {
            InlineContent::Text(text) => write_run(out, text, base),
            InlineContent::Bold(children) => {
                write_inlines(out, children, &base.clone().bold(true), options)
            }
            InlineContent::Italic(children) => {
                write_inlines(out, children, &base.clone().italic(true), options)
            }
            InlineContent::Code(code) => {
                let props = RunProps {
                    font: Some(options.fonts.code.clone()),
                    ..base.clone()
                };
                write_run(out, code, &props);
            }
            InlineContent::Link { text, .. } => write_run(out, text, base),
        }
    }
}

/// Write every block of the document.
pub fn write_blocks(writer: &mut BodyWriter<'_>, doc: &Document) {
    for node in &doc.children {
        debug!(block = node.node_type(), "writing block");
        writer.block(node);
    }
}
