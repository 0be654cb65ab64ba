//! OOXML package assembly: the zip container and its fixed parts.

use super::options::Metadata;
use super::xml::{escape_text, XML_DECLARATION};
use crate::error::FormatError;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CT_MAIN: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
const CT_SETTINGS: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// The parts that differ from one document to the next.
pub struct PackageParts {
    pub document: String,
    pub styles: String,
    pub numbering: String,
    /// Ask the word processor to refresh fields (a TOC field) on open.
    pub update_fields: bool,
    pub metadata: Metadata,
}

fn content_types_xml() -> String {
    format!(
        concat!(
            "{decl}\n",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="{main}"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="{styles}"/>"#,
            r#"<Override PartName="/word/numbering.xml" ContentType="{numbering}"/>"#,
            r#"<Override PartName="/word/settings.xml" ContentType="{settings}"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="{core}"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="{app}"/>"#,
            "</Types>"
        ),
        decl = XML_DECLARATION,
        main = CT_MAIN,
        styles = CT_STYLES,
        numbering = CT_NUMBERING,
        settings = CT_SETTINGS,
        core = CT_CORE,
        app = CT_APP,
    )
}

fn root_rels_xml() -> String {
    format!(
        concat!(
            "{decl}\n",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="{base}/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="{base}/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECLARATION,
        base = REL_BASE,
    )
}

fn document_rels_xml() -> String {
    format!(
        concat!(
            "{decl}\n",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="{base}/styles" Target="styles.xml"/>"#,
            r#"<Relationship Id="rId2" Type="{base}/numbering" Target="numbering.xml"/>"#,
            r#"<Relationship Id="rId3" Type="{base}/settings" Target="settings.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECLARATION,
        base = REL_BASE,
    )
}

fn settings_xml(update_fields: bool) -> String {
    format!(
        concat!(
            "{decl}\n",
            r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:defaultTabStop w:val="708"/><w:characterSpacingControl w:val="doNotCompress"/>"#,
            "{update}",
            r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
            "</w:settings>"
        ),
        decl = XML_DECLARATION,
        update = if update_fields {
            r#"<w:updateFields w:val="true"/>"#
        } else {
            ""
        },
    )
}

fn core_xml(metadata: &Metadata) -> String {
    let title = metadata
        .title
        .as_deref()
        .map(|t| format!("<dc:title>{}</dc:title>", escape_text(t)))
        .unwrap_or_default();
    let creator = metadata
        .author
        .as_deref()
        .map(|a| {
            let a = escape_text(a);
            format!("<dc:creator>{a}</dc:creator><cp:lastModifiedBy>{a}</cp:lastModifiedBy>")
        })
        .unwrap_or_default();
    format!(
        concat!(
            "{decl}\n",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "{title}{creator}",
            "</cp:coreProperties>"
        ),
        decl = XML_DECLARATION,
        title = title,
        creator = creator,
    )
}

fn app_xml() -> String {
    format!(
        concat!(
            "{decl}\n",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>repdoc</Application><AppVersion>{version}</AppVersion>",
            "</Properties>"
        ),
        decl = XML_DECLARATION,
        version = app_version(),
    )
}

/// `AppVersion` must look like `XX.YYYY`.
fn app_version() -> String {
    let major: u32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: u32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    format!("{major:02}.{minor:04}")
}

/// Zip the parts into a `.docx` byte buffer.
pub fn write_package(parts: &PackageParts) -> Result<Vec<u8>, FormatError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries: [(&str, String); 9] = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", root_rels_xml()),
        ("word/document.xml", parts.document.clone()),
        ("word/styles.xml", parts.styles.clone()),
        ("word/numbering.xml", parts.numbering.clone()),
        ("word/settings.xml", settings_xml(parts.update_fields)),
        ("word/_rels/document.xml.rels", document_rels_xml()),
        ("docProps/core.xml", core_xml(&parts.metadata)),
        ("docProps/app.xml", app_xml()),
    ];

    for (name, content) in &entries {
        zip.start_file(*name, opt)?;
        zip.write_all(content.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
