//! DOCX export tests
//!
//! Documents are rendered, unzipped and checked at the XML level.

use crate::support::{fixture, report_rules};
use proptest::prelude::*;
use repdoc_babel::formats::docx::{
    render_docx, DocxOptions, PageSize, TitleBlock, TitlePage, Toc, TocEntry, TocMode,
};
use repdoc_babel::formats::markdown::ScanRules;
use repdoc_babel::{convert_report, FormatRegistry, SerializedDocument};
use std::collections::HashMap;
use std::io::{Cursor, Read};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

fn body_paragraph_texts(document_xml: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(document_xml).unwrap();
    let body = doc
        .descendants()
        .find(|n| n.has_tag_name((W_NS, "body")))
        .unwrap();
    body.children()
        .filter(|n| n.has_tag_name((W_NS, "p")))
        .map(|p| {
            p.descendants()
                .filter(|n| n.has_tag_name((W_NS, "t")))
                .filter_map(|t| t.text())
                .collect::<String>()
        })
        .collect()
}

fn template_options() -> DocxOptions {
    DocxOptions {
        title_page: Some(TitlePage {
            blocks: vec![
                TitleBlock {
                    blank_before: 2,
                    text: "Университет\nКафедра".to_string(),
                    bold: true,
                    size_pt: 14.0,
                },
                TitleBlock {
                    blank_before: 3,
                    text: "Москва 2024".to_string(),
                    bold: false,
                    size_pt: 12.0,
                },
            ],
        }),
        toc: Some(Toc {
            page_label: Some("2".to_string()),
            entries: vec![
                TocEntry {
                    title: "Введение".to_string(),
                    page: 3,
                },
                TocEntry {
                    title: "Заключение".to_string(),
                    page: 9,
                },
            ],
            ..Toc::default()
        }),
        ..DocxOptions::default()
    }
}

#[test]
fn test_report_renders_one_paragraph_per_block() {
    let rendered = convert_report(&fixture("report.md"), &report_rules(), &DocxOptions::default())
        .unwrap();

    let texts = body_paragraph_texts(&part(&rendered.bytes, "word/document.xml"));
    assert_eq!(texts.len(), 21);
    assert_eq!(rendered.stats.paragraphs, 21);
    assert_eq!(rendered.stats.headings, 8);
    assert_eq!(rendered.stats.tables, 1);
    assert_eq!(rendered.stats.list_items, 7);
    assert_eq!(rendered.stats.code_blocks, 1);
    assert_eq!(rendered.stats.placeholders, 2);

    assert_eq!(texts[0], "Введение");
    assert_eq!(texts[4], "Программа решает три основные задачи:");
    assert!(texts.iter().any(|t| t.ends_with("доступен в репозитории.")));
}

#[test]
fn test_template_paragraphs_come_first() {
    let doc = repdoc_babel::parse_report("# Глава\n\nТекст\n", &ScanRules::default()).unwrap();
    let rendered = render_docx(&doc, &template_options()).unwrap();
    let texts = body_paragraph_texts(&part(&rendered.bytes, "word/document.xml"));

    // title page: 5 blanks + 2 blocks + page break; toc: label, blank, title, blank, 2 entries, page break
    assert_eq!(texts.len(), 8 + 7 + 2);
    assert_eq!(texts[2], "УниверситетКафедра");
    assert_eq!(texts[6], "Москва 2024");
    assert_eq!(texts[8], "2");
    assert_eq!(texts[10], "Оглавление");
    assert_eq!(texts[12], "Введение3");
    assert_eq!(texts[13], "Заключение9");
    assert_eq!(texts[15], "Глава");
    assert_eq!(texts[16], "Текст");

    let xml = part(&rendered.bytes, "word/document.xml");
    assert_eq!(xml.matches(r#"<w:br w:type="page"/>"#).count(), 2);
    assert!(xml.contains(r#"<w:tab w:val="right" w:pos="8504"/>"#));
}

#[test]
fn test_toc_field_mode() {
    let mut options = template_options();
    if let Some(toc) = options.toc.as_mut() {
        toc.mode = TocMode::Field;
    }
    let doc = repdoc_babel::parse_report("Текст\n", &ScanRules::default()).unwrap();
    let rendered = render_docx(&doc, &options).unwrap();

    let xml = part(&rendered.bytes, "word/document.xml");
    assert!(xml.contains(r#"w:fldCharType="begin""#));
    assert!(xml.contains(r#"TOC \o "1-3" \h \z \u"#));
    assert!(!xml.contains("Заключение"));
    assert!(part(&rendered.bytes, "word/settings.xml").contains("updateFields"));
}

#[test]
fn test_page_setup_and_styles() {
    let mut options = DocxOptions::default();
    options.page.size = PageSize::Letter;
    let doc = repdoc_babel::parse_report("Текст\n", &ScanRules::default()).unwrap();
    let rendered = render_docx(&doc, &options).unwrap();

    let xml = part(&rendered.bytes, "word/document.xml");
    assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    assert!(xml.contains(r#"w:top="1134" w:right="850" w:bottom="1134" w:left="1701""#));

    let styles = part(&rendered.bytes, "word/styles.xml");
    let styles_doc = roxmltree::Document::parse(&styles).unwrap();
    let style_ids: Vec<&str> = styles_doc
        .descendants()
        .filter(|n| n.has_tag_name((W_NS, "style")))
        .filter_map(|n| n.attribute((W_NS, "styleId")))
        .collect();
    for id in [
        "Normal",
        "Heading1",
        "Heading5",
        "ListBullet",
        "ListNumber",
        "NoSpacing",
        "LightGridAccent1",
    ] {
        assert!(style_ids.contains(&id), "missing style {id}");
    }
}

#[test]
fn test_numbered_lists_restart() {
    let doc = repdoc_babel::parse_report(
        "1. a\n2. b\n\nТекст\n\n1. c\n",
        &ScanRules::default(),
    )
    .unwrap();
    let rendered = render_docx(&doc, &DocxOptions::default()).unwrap();

    let xml = part(&rendered.bytes, "word/document.xml");
    assert_eq!(xml.matches(r#"<w:numId w:val="2"/>"#).count(), 2);
    assert_eq!(xml.matches(r#"<w:numId w:val="3"/>"#).count(), 1);

    let numbering = part(&rendered.bytes, "word/numbering.xml");
    assert!(numbering.contains(r#"<w:num w:numId="3">"#));
    assert!(numbering.contains("startOverride"));
}

#[test]
fn test_registry_serializes_binary_docx() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("# Title\n", "report-md").unwrap();

    let mut options = HashMap::new();
    options.insert("toc".to_string(), "false".to_string());
    let result = registry
        .serialize_with_options(&doc, "docx", &options)
        .unwrap();
    let SerializedDocument::Binary(bytes) = result else {
        panic!("docx must serialize to binary");
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("title.docx");
    std::fs::write(&path, &bytes).unwrap();
    let reread = std::fs::read(&path).unwrap();
    assert_eq!(
        body_paragraph_texts(&part(&reread, "word/document.xml")),
        vec!["Title".to_string()]
    );

    assert!(registry.serialize(&doc, "docx").is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rendered_paragraphs_match_content_lines(
        lines in prop::collection::vec("[a-zа-я]{1,10}|- [a-z]{1,6}|## [a-z]{1,6}", 0..12)
    ) {
        let source = lines.join("\n\n");
        let rendered = convert_report(&source, &ScanRules::default(), &DocxOptions::default())
            .unwrap();
        let texts = body_paragraph_texts(&part(&rendered.bytes, "word/document.xml"));
        prop_assert_eq!(texts.len(), lines.len());
        prop_assert_eq!(rendered.stats.paragraphs, lines.len());
    }
}
