//! Fixed report pages written ahead of the content: title page and table of contents.

use super::document::BodyWriter;
use super::options::{cm_to_twips, TitlePage, Toc, TocMode};
use super::xml::{escape_text, Justification, ParagraphProps};
use tracing::debug;

/// Centered blocks separated by empty paragraphs, then a page break.
pub fn write_title_page(writer: &mut BodyWriter<'_>, title_page: &TitlePage) {
    let centered = ParagraphProps::aligned(Justification::Center);
    for block in &title_page.blocks {
        writer.empty_paragraphs(block.blank_before);
        let run = writer.body_run(block.size_pt).bold(block.bold);
        writer.paragraph(&centered, &[(block.text.as_str(), run)]);
    }
    writer.page_break();
    debug!(blocks = title_page.blocks.len(), "title page written");
}

/// Page label, title, then either the static entries or a TOC field, then a page break.
pub fn write_toc(writer: &mut BodyWriter<'_>, toc: &Toc) {
    let body_size = writer.options().fonts.body_size_pt;

    if let Some(label) = &toc.page_label {
        let run = writer.body_run(body_size);
        writer.paragraph(
            &ParagraphProps::aligned(Justification::Right),
            &[(label.as_str(), run)],
        );
        writer.empty_paragraph();
    }

    let title_run = writer.body_run(toc.title_size_pt).bold(true);
    writer.paragraph(
        &ParagraphProps::default(),
        &[(toc.title.as_str(), title_run)],
    );
    writer.empty_paragraph();

    match toc.mode {
        TocMode::Static => {
            let props = ParagraphProps {
                right_tab: Some(cm_to_twips(toc.tab_stop_cm)),
                ..ParagraphProps::default()
            };
            for entry in &toc.entries {
                let run = writer.body_run(body_size);
                let page = format!("\t{}", entry.page);
                writer.paragraph(
                    &props,
                    &[(entry.title.as_str(), run.clone()), (page.as_str(), run)],
                );
            }
            debug!(entries = toc.entries.len(), "static table of contents written");
        }
        TocMode::Field => {
            writer.raw_paragraph(&toc_field(toc));
            debug!(levels = toc.field_levels, "table of contents field written");
        }
    }

    writer.page_break();
}

fn toc_field(toc: &Toc) -> String {
    let levels = toc.field_levels.clamp(1, 9);
    format!(
        concat!(
            "<w:p>",
            r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r>"#,
            r#"<w:r><w:instrText xml:space="preserve"> TOC \o "1-{levels}" \h \z \u </w:instrText></w:r>"#,
            r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#,
            r#"<w:r><w:t xml:space="preserve">{hint}</w:t></w:r>"#,
            r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#,
            "</w:p>"
        ),
        levels = levels,
        hint = escape_text(&toc.field_hint),
    )
}
