//! `word/styles.xml` and `word/numbering.xml`.

use super::document::{BULLET_NUM_ID, HEADING_STYLE_LEVELS};
use super::options::{pt_to_half_points, DocxOptions};
use super::xml::{escape_text, W_NS, XML_DECLARATION};

fn fonts_element(font: &str) -> String {
    let font = escape_text(font);
    format!(r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#)
}

fn size_element(half_points: u32) -> String {
    format!(r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#)
}

fn heading_style(options: &DocxOptions, level: usize) -> String {
    let fonts = &options.fonts;
    let size = pt_to_half_points(fonts.heading_size_pt(level));
    let before = if level == 1 { 480 } else { 200 };
    format!(
        concat!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#,
            r#"<w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/>"#,
            r#"<w:uiPriority w:val="9"/><w:qFormat/>"#,
            r#"<w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="{before}" w:after="120"/>"#,
            r#"<w:outlineLvl w:val="{outline}"/></w:pPr>"#,
            r#"<w:rPr>{fonts}<w:b/><w:bCs/><w:color w:val="000000"/>{size}</w:rPr>"#,
            "</w:style>"
        ),
        level = level,
        before = before,
        outline = level - 1,
        fonts = fonts_element(fonts.heading_font()),
        size = size_element(size),
    )
}

fn table_style(options: &DocxOptions) -> String {
    let table = &options.table;
    let accent = escape_text(&table.accent_color);
    let border = |side: &str| {
        format!(r#"<w:{side} w:val="single" w:sz="8" w:space="0" w:color="{accent}"/>"#)
    };
    let borders: String = ["top", "left", "bottom", "right", "insideH", "insideV"]
        .iter()
        .map(|side| border(side))
        .collect();
    format!(
        concat!(
            r#"<w:style w:type="table" w:styleId="{id}">"#,
            r#"<w:name w:val="{name}"/><w:basedOn w:val="TableNormal"/><w:uiPriority w:val="62"/>"#,
            r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#,
            r#"<w:tblPr><w:tblStyleRowBandSize w:val="1"/><w:tblStyleColBandSize w:val="1"/>"#,
            r#"<w:tblBorders>{borders}</w:tblBorders></w:tblPr>"#,
            r#"<w:tblStylePr w:type="firstRow"><w:rPr><w:b/><w:bCs/></w:rPr>"#,
            r#"<w:tcPr><w:tcBorders><w:bottom w:val="single" w:sz="18" w:space="0" w:color="{accent}"/></w:tcBorders></w:tcPr>"#,
            "</w:tblStylePr>",
            "</w:style>"
        ),
        id = escape_text(&table.style_id()),
        name = escape_text(&table.style),
        borders = borders,
        accent = accent,
    )
}

/// The style sheet: document defaults, `Normal`, headings, list styles, `No Spacing` and the
/// table style.
pub fn styles_xml(options: &DocxOptions) -> String {
    let fonts = &options.fonts;
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:styles xmlns:w="{W_NS}">"#));

    xml.push_str(&format!(
        concat!(
            "<w:docDefaults><w:rPrDefault><w:rPr>{fonts}{size}",
            r#"<w:lang w:val="{lang}" w:eastAsia="en-US" w:bidi="ar-SA"/></w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
            "</w:docDefaults>"
        ),
        fonts = fonts_element(&fonts.body),
        size = size_element(pt_to_half_points(fonts.body_size_pt)),
        lang = escape_text(&fonts.language),
    ));

    xml.push_str(&format!(
        concat!(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
            r#"<w:name w:val="Normal"/><w:qFormat/><w:rPr>{fonts}{size}</w:rPr></w:style>"#
        ),
        fonts = fonts_element(&fonts.body),
        size = size_element(pt_to_half_points(fonts.body_size_pt)),
    ));

    for level in 1..=HEADING_STYLE_LEVELS {
        xml.push_str(&heading_style(options, level));
    }

    xml.push_str(&format!(
        concat!(
            r#"<w:style w:type="paragraph" w:styleId="ListBullet">"#,
            r#"<w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:uiPriority w:val="36"/>"#,
            r#"<w:pPr><w:numPr><w:numId w:val="{bullet}"/></w:numPr><w:contextualSpacing/></w:pPr>"#,
            "</w:style>",
            r#"<w:style w:type="paragraph" w:styleId="ListNumber">"#,
            r#"<w:name w:val="List Number"/><w:basedOn w:val="Normal"/><w:uiPriority w:val="36"/>"#,
            r#"<w:pPr><w:contextualSpacing/></w:pPr>"#,
            "</w:style>",
            r#"<w:style w:type="paragraph" w:styleId="NoSpacing">"#,
            r#"<w:name w:val="No Spacing"/><w:uiPriority w:val="1"/><w:qFormat/>"#,
            r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#,
            "</w:style>",
            r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal">"#,
            r#"<w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/><w:unhideWhenUsed/>"#,
            r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar>"#,
            r#"<w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/>"#,
            r#"<w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/>"#,
            "</w:tblCellMar></w:tblPr></w:style>"
        ),
        bullet = BULLET_NUM_ID,
    ));

    xml.push_str(&table_style(options));
    xml.push_str("</w:styles>");
    xml
}

fn abstract_num(id: u32, format: &str, text: &str) -> String {
    format!(
        concat!(
            r#"<w:abstractNum w:abstractNumId="{id}"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="{format}"/>"#,
            r#"<w:lvlText w:val="{text}"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#
        ),
        id = id,
        format = format,
        text = text,
    )
}

/// Numbering definitions: one shared bullet instance and one restarting decimal instance per
/// ordered list, numbered from `BULLET_NUM_ID + 1`.
pub fn numbering_xml(ordered_lists: u32) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:numbering xmlns:w="{W_NS}">"#));
    xml.push_str(&abstract_num(0, "bullet", "•"));
    xml.push_str(&abstract_num(1, "decimal", "%1."));
    xml.push_str(&format!(
        r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="0"/></w:num>"#
    ));
    for i in 1..=ordered_lists {
        xml.push_str(&format!(
            concat!(
                r#"<w:num w:numId="{id}"><w:abstractNumId w:val="1"/>"#,
                r#"<w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#
            ),
            id = BULLET_NUM_ID + i,
        ));
    }
    xml.push_str("</w:numbering>");
    xml
}
