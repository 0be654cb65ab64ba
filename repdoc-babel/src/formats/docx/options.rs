//! Template settings of the DOCX writer.
//!
//! All lengths are kept in the units people write them in (cm, inches, points) and
//! converted to twips and half-points only when the XML is written.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 1 in = 2.54 cm = 1440 twips.
const TWIPS_PER_INCH: f64 = 1440.0;

pub fn cm_to_twips(cm: f32) -> u32 {
    (f64::from(cm) * TWIPS_PER_INCH / 2.54).round().max(0.0) as u32
}

pub fn inches_to_twips(inches: f32) -> u32 {
    (f64::from(inches) * TWIPS_PER_INCH).round().max(0.0) as u32
}

pub fn pt_to_twips(pt: f32) -> u32 {
    (f64::from(pt) * 20.0).round().max(0.0) as u32
}

pub fn pt_to_half_points(pt: f32) -> u32 {
    (f64::from(pt) * 2.0).round().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in twips.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "a4"),
            PageSize::Letter => write!(f, "letter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub top_cm: f32,
    pub bottom_cm: f32,
    pub left_cm: f32,
    pub right_cm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_cm: 2.0,
            bottom_cm: 2.0,
            left_cm: 3.0,
            right_cm: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageSetup {
    /// Width available to text, in twips.
    pub fn text_width(&self) -> u32 {
        let (width, _) = self.size.dimensions();
        width
            .saturating_sub(cm_to_twips(self.margins.left_cm))
            .saturating_sub(cm_to_twips(self.margins.right_cm))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fonts {
    pub body: String,
    pub body_size_pt: f32,
    pub code: String,
    pub code_size_pt: f32,
    /// Font of the heading styles. `None` keeps the body font.
    pub heading: Option<String>,
    /// Sizes of `Heading 1`, `Heading 2`, ...; the last one is reused for deeper levels.
    pub heading_sizes_pt: Vec<f32>,
    /// `w:lang` of the document defaults.
    pub language: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            body: "Times New Roman".to_string(),
            body_size_pt: 12.0,
            code: "Courier New".to_string(),
            code_size_pt: 10.0,
            heading: None,
            heading_sizes_pt: vec![16.0, 14.0, 13.0, 12.0, 12.0],
            language: "ru-RU".to_string(),
        }
    }
}

impl Fonts {
    pub fn heading_font(&self) -> &str {
        self.heading.as_deref().unwrap_or(&self.body)
    }

    pub fn heading_size_pt(&self, level: usize) -> f32 {
        let index = level.saturating_sub(1);
        self.heading_sizes_pt
            .get(index)
            .or_else(|| self.heading_sizes_pt.last())
            .copied()
            .unwrap_or(self.body_size_pt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CodeBlockStyle {
    pub indent_left_in: f32,
    #[serde(default)]
    pub indent_right_in: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
}

impl Default for CodeBlockStyle {
    fn default() -> Self {
        Self {
            indent_left_in: 0.5,
            indent_right_in: 0.0,
            space_before_pt: 6.0,
            space_after_pt: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableStyle {
    /// Display name of the table style; its style id is the name without spaces.
    pub style: String,
    pub header_size_pt: f32,
    pub body_size_pt: f32,
    pub header_bold: bool,
    /// Border and header shading colour, `RRGGBB`.
    pub accent_color: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            style: "Light Grid Accent 1".to_string(),
            header_size_pt: 12.0,
            body_size_pt: 11.0,
            header_bold: true,
            accent_color: "4F81BD".to_string(),
        }
    }
}

impl TableStyle {
    pub fn style_id(&self) -> String {
        style_id(&self.style)
    }
}

/// Style id for a display name: ASCII letters and digits only.
pub fn style_id(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceholderStyle {
    pub italic: bool,
    /// Text colour, `RRGGBB`.
    pub color: String,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            italic: true,
            color: "808080".to_string(),
        }
    }
}

/// One centered block of the title page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleBlock {
    /// Empty paragraphs written before the block.
    #[serde(default)]
    pub blank_before: usize,
    /// Block text; `\n` becomes a line break inside the paragraph.
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    pub size_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitlePage {
    pub blocks: Vec<TitleBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocMode {
    /// The configured entries with their page numbers.
    #[default]
    Static,
    /// A Word TOC field, filled in by the word processor.
    Field,
}

impl FromStr for TocMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(TocMode::Static),
            "field" => Ok(TocMode::Field),
            other => Err(format!("unknown toc mode '{other}' (expected static or field)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TocEntry {
    pub title: String,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toc {
    /// Right-aligned label above the title (the page number of the TOC page).
    pub page_label: Option<String>,
    pub title: String,
    pub title_size_pt: f32,
    pub mode: TocMode,
    pub entries: Vec<TocEntry>,
    /// Deepest heading level a TOC field collects.
    pub field_levels: usize,
    /// Text shown in the field until the word processor updates it.
    pub field_hint: String,
    pub tab_stop_cm: f32,
}

impl Default for Toc {
    fn default() -> Self {
        Self {
            page_label: None,
            title: "Оглавление".to_string(),
            title_size_pt: 14.0,
            mode: TocMode::Static,
            entries: Vec::new(),
            field_levels: 3,
            field_hint: "Обновите поле, чтобы построить оглавление".to_string(),
            tab_stop_cm: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Everything the DOCX writer needs besides the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocxOptions {
    pub page: PageSetup,
    pub fonts: Fonts,
    pub code: CodeBlockStyle,
    pub table: TableStyle,
    pub placeholder: PlaceholderStyle,
    pub title_page: Option<TitlePage>,
    pub toc: Option<Toc>,
    /// Emit bold/italic/code spans as formatted runs instead of stripping the markup.
    pub inline_formatting: bool,
    pub metadata: Metadata,
}
