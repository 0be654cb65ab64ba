//! WordprocessingML building blocks: escaping and property elements.
//!
//! Property elements must appear in schema order; [`ParagraphProps`] and [`RunProps`]
//! write the children they hold in that order so callers never have to care.

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape text content. Characters XML 1.0 cannot carry are dropped.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// `w:jc` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
}

impl Justification {
    fn as_str(self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProps {
    pub style: Option<String>,
    /// `(ilvl, numId)`
    pub numbering: Option<(u32, u32)>,
    /// Right-aligned tab stop position in twips.
    pub right_tab: Option<u32>,
    /// Space before and after in twips.
    pub spacing: Option<(u32, u32)>,
    /// Left and right indent in twips.
    pub indent: Option<(u32, u32)>,
    pub justification: Option<Justification>,
}

impl ParagraphProps {
    pub fn styled(style: &str) -> Self {
        Self {
            style: Some(style.to_string()),
            ..Self::default()
        }
    }

    pub fn aligned(justification: Justification) -> Self {
        Self {
            justification: Some(justification),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn write(&self, out: &mut String) {
        if self.is_empty() {
            return;
        }
        out.push_str("<w:pPr>");
        if let Some(style) = &self.style {
            out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_text(style)));
        }
        if let Some((ilvl, num_id)) = self.numbering {
            out.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="{ilvl}"/><w:numId w:val="{num_id}"/></w:numPr>"#
            ));
        }
        if let Some(pos) = self.right_tab {
            out.push_str(&format!(
                r#"<w:tabs><w:tab w:val="right" w:pos="{pos}"/></w:tabs>"#
            ));
        }
        if let Some((before, after)) = self.spacing {
            out.push_str(&format!(
                r#"<w:spacing w:before="{before}" w:after="{after}"/>"#
            ));
        }
        if let Some((left, right)) = self.indent {
            if right > 0 {
                out.push_str(&format!(r#"<w:ind w:left="{left}" w:right="{right}"/>"#));
            } else {
                out.push_str(&format!(r#"<w:ind w:left="{left}"/>"#));
            }
        }
        if let Some(jc) = self.justification {
            out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, jc.as_str()));
        }
        out.push_str("</w:pPr>");
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProps {
    pub font: Option<String>,
    pub bold: bool,
    pub italic: bool,
    /// `RRGGBB`
    pub color: Option<String>,
    pub size_half_points: Option<u32>,
}

impl RunProps {
    pub fn sized(font: &str, size_half_points: u32) -> Self {
        Self {
            font: Some(font.to_string()),
            size_half_points: Some(size_half_points),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn write(&self, out: &mut String) {
        if *self == Self::default() {
            return;
        }
        out.push_str("<w:rPr>");
        if let Some(font) = &self.font {
            let font = escape_text(font);
            out.push_str(&format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            ));
        }
        if self.bold {
            out.push_str("<w:b/>");
        }
        if self.italic {
            out.push_str("<w:i/>");
        }
        if let Some(color) = &self.color {
            out.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_text(color)));
        }
        if let Some(size) = self.size_half_points {
            out.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
        }
        out.push_str("</w:rPr>");
    }
}

/// Write one run. `\n` becomes `w:br` and `\t` becomes `w:tab`.
pub fn write_run(out: &mut String, text: &str, props: &RunProps) {
    out.push_str("<w:r>");
    props.write(out);
    let mut first_line = true;
    for line in text.split('\n') {
        if !first_line {
            out.push_str("<w:br/>");
        }
        first_line = false;
        let mut first_cell = true;
        for piece in line.split('\t') {
            if !first_cell {
                out.push_str("<w:tab/>");
            }
            first_cell = false;
            if !piece.is_empty() || (line.is_empty() && text.is_empty()) {
                out.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape_text(piece)
                ));
            }
        }
    }
    out.push_str("</w:r>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_text("bell\u{7}"), "bell");
        assert_eq!(escape_text("a\0b"), "ab");
    }

    #[test]
    fn test_paragraph_props_order() {
        let props = ParagraphProps {
            style: Some("NoSpacing".to_string()),
            spacing: Some((120, 120)),
            indent: Some((720, 0)),
            justification: Some(Justification::Center),
            ..ParagraphProps::default()
        };
        let mut out = String::new();
        props.write(&mut out);
        assert_eq!(
            out,
            r#"<w:pPr><w:pStyle w:val="NoSpacing"/><w:spacing w:before="120" w:after="120"/><w:ind w:left="720"/><w:jc w:val="center"/></w:pPr>"#
        );
    }

    #[test]
    fn test_empty_props_write_nothing() {
        let mut out = String::new();
        ParagraphProps::default().write(&mut out);
        RunProps::default().write(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_breaks_and_tabs() {
        let mut out = String::new();
        write_run(&mut out, "a\nb\tc", &RunProps::default());
        assert_eq!(
            out,
            r#"<w:r><w:t xml:space="preserve">a</w:t><w:br/><w:t xml:space="preserve">b</w:t><w:tab/><w:t xml:space="preserve">c</w:t></w:r>"#
        );
    }

    #[test]
    fn test_run_props() {
        let mut out = String::new();
        RunProps::sized("Times New Roman", 28)
            .bold(true)
            .italic(true)
            .color("808080")
            .write(&mut out);
        assert_eq!(
            out,
            r#"<w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:cs="Times New Roman"/><w:b/><w:i/><w:color w:val="808080"/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr>"#
        );
    }
}
