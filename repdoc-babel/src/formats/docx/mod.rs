//! Word (`.docx`) export
//!
//! Writes the IR into a WordprocessingML package laid out as an academic report:
//!
//! 1. title page (optional): centered blocks with empty paragraphs between them, page break;
//! 2. table of contents (optional): page label, title, entries or a TOC field, page break;
//! 3. the document blocks.
//!
//! # Element Mapping Table
//!
//! | IR node     | WordprocessingML                                                   |
//! |-------------|--------------------------------------------------------------------|
//! | Heading     | paragraph with `Heading N` style                                   |
//! | Paragraph   | paragraph, body font and size                                      |
//! | List        | one `List Bullet` / `List Number` paragraph per item               |
//! | Table       | `w:tbl` with the configured table style, header row bold           |
//! | Verbatim    | one `No Spacing` paragraph, code font, indented, lines as `w:br`   |
//! | Placeholder | italic gray paragraph                                              |
//! | Break       | empty paragraph                                                    |
//!
//! Inline markup is stripped unless `inline_formatting` is on, in which case bold, italic and
//! code spans become formatted runs. Links always keep only their text.
//!
//! # Options
//!
//! [`DocxFormat::serialize_with_options`] understands three boolean keys on top of the
//! configured [`DocxOptions`]: `toc`, `title-page` and `inline-formatting`.

pub mod document;
pub mod options;
pub mod package;
pub mod styles;
pub mod template;
pub mod xml;

pub use document::RenderStats;
pub use options::{
    CodeBlockStyle, DocxOptions, Fonts, Margins, Metadata, PageSetup, PageSize, PlaceholderStyle,
    TableStyle, TitleBlock, TitlePage, Toc, TocEntry, TocMode,
};

use crate::error::FormatError;
use crate::format::{bool_option, Format, SerializedDocument};
use crate::ir::nodes::Document;
use document::{write_blocks, BodyWriter};
use package::{write_package, PackageParts};
use std::collections::HashMap;
use tracing::{debug, info};

const OPTION_KEYS: &[&str] = &["toc", "title-page", "inline-formatting"];

/// A rendered package and what went into it.
#[derive(Debug, Clone)]
pub struct RenderedDocx {
    pub bytes: Vec<u8>,
    pub stats: RenderStats,
}

/// Render a document into `.docx` bytes.
pub fn render_docx(doc: &Document, options: &DocxOptions) -> Result<RenderedDocx, FormatError> {
    let mut writer = BodyWriter::new(options);

    if let Some(title_page) = &options.title_page {
        template::write_title_page(&mut writer, title_page);
    }
    if let Some(toc) = &options.toc {
        template::write_toc(&mut writer, toc);
    }
    write_blocks(&mut writer, doc);

    let (document, stats, ordered_lists) = writer.finish();
    let parts = PackageParts {
        document,
        styles: styles::styles_xml(options),
        numbering: styles::numbering_xml(ordered_lists),
        update_fields: options
            .toc
            .as_ref()
            .is_some_and(|toc| toc.mode == TocMode::Field),
        metadata: options.metadata.clone(),
    };
    let bytes = write_package(&parts)?;

    info!(
        paragraphs = stats.paragraphs,
        tables = stats.tables,
        bytes = bytes.len(),
        "docx rendered"
    );
    Ok(RenderedDocx { bytes, stats })
}

/// Format implementation for Word export
#[derive(Debug, Clone, Default)]
pub struct DocxFormat {
    options: DocxOptions,
}

impl DocxFormat {
    pub fn new(options: DocxOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DocxOptions {
        &self.options
    }

    /// The configured options with the per-call string options applied.
    pub fn resolve_options(
        &self,
        extra: &HashMap<String, String>,
    ) -> Result<DocxOptions, FormatError> {
        if let Some(unknown) = extra.keys().find(|k| !OPTION_KEYS.contains(&k.as_str())) {
            return Err(FormatError::NotSupported(format!(
                "Format 'docx' does not support parameter '{unknown}' (supported: {})",
                OPTION_KEYS.join(", ")
            )));
        }

        let mut options = self.options.clone();
        if !bool_option(extra, "toc", true)? {
            debug!("table of contents disabled");
            options.toc = None;
        }
        if !bool_option(extra, "title-page", true)? {
            debug!("title page disabled");
            options.title_page = None;
        }
        options.inline_formatting =
            bool_option(extra, "inline-formatting", options.inline_formatting)?;
        Ok(options)
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document laid out with the report template (export only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::SerializationError(
            "DOCX output is binary; use serialize_with_options".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let resolved = self.resolve_options(options)?;
        render_docx(doc, &resolved).map(|rendered| SerializedDocument::Binary(rendered.bytes))
    }
}
