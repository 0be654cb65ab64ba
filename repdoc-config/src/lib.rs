//! Shared configuration loader for the repdoc toolchain.
//!
//! `defaults/repdoc.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RepdocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use repdoc_babel::formats::docx::{
    CodeBlockStyle, DocxOptions, Fonts, Margins, Metadata, PageSetup, PageSize, PlaceholderStyle,
    TableStyle, TitleBlock, TitlePage, Toc, TocEntry, TocMode,
};
use repdoc_babel::formats::markdown::{HeadingRule, ScanRules};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/repdoc.default.toml");

/// The embedded default configuration, verbatim.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Top-level configuration consumed by repdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RepdocConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
    pub scan: ScanConfig,
    pub convert: ConvertConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

/// Mirrors the knobs of the report line scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub skip_prefixes: Vec<String>,
    pub placeholder_markers: Vec<String>,
    pub max_heading_level: usize,
    #[serde(default)]
    pub heading_rules: Vec<HeadingRule>,
}

impl From<ScanConfig> for ScanRules {
    fn from(config: ScanConfig) -> Self {
        ScanRules {
            skip_prefixes: config.skip_prefixes,
            heading_rules: config.heading_rules,
            placeholder_markers: config.placeholder_markers,
            max_heading_level: config.max_heading_level,
        }
    }
}

impl From<&ScanConfig> for ScanRules {
    fn from(config: &ScanConfig) -> Self {
        ScanRules {
            skip_prefixes: config.skip_prefixes.clone(),
            heading_rules: config.heading_rules.clone(),
            placeholder_markers: config.placeholder_markers.clone(),
            max_heading_level: config.max_heading_level,
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub docx: DocxConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    #[serde(default)]
    pub inline_formatting: bool,
    pub page: PageConfig,
    pub fonts: FontsConfig,
    pub code: CodeBlockStyle,
    pub table: TableStyle,
    pub placeholder: PlaceholderStyle,
    pub metadata: MetadataConfig,
    pub title_page: TitlePageConfig,
    pub toc: TocConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub size: PageSize,
    pub margins: Margins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    pub body: String,
    pub body_size_pt: f32,
    pub code: String,
    pub code_size_pt: f32,
    /// Empty keeps the body font.
    #[serde(default)]
    pub heading: String,
    pub heading_sizes_pt: Vec<f32>,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitlePageConfig {
    pub enabled: bool,
    #[serde(default)]
    pub blocks: Vec<TitleBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    pub enabled: bool,
    pub mode: TocMode,
    /// Empty means no label.
    #[serde(default)]
    pub page_label: String,
    pub title: String,
    pub title_size_pt: f32,
    pub tab_stop_cm: f32,
    pub field_levels: usize,
    pub field_hint: String,
    #[serde(default)]
    pub entries: Vec<TocEntry>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<&FontsConfig> for Fonts {
    fn from(config: &FontsConfig) -> Self {
        Fonts {
            body: config.body.clone(),
            body_size_pt: config.body_size_pt,
            code: config.code.clone(),
            code_size_pt: config.code_size_pt,
            heading: non_empty(&config.heading),
            heading_sizes_pt: config.heading_sizes_pt.clone(),
            language: config.language.clone(),
        }
    }
}

impl From<&TocConfig> for Toc {
    fn from(config: &TocConfig) -> Self {
        Toc {
            page_label: non_empty(&config.page_label),
            title: config.title.clone(),
            title_size_pt: config.title_size_pt,
            mode: config.mode,
            entries: config.entries.clone(),
            field_levels: config.field_levels,
            field_hint: config.field_hint.clone(),
            tab_stop_cm: config.tab_stop_cm,
        }
    }
}

impl From<&DocxConfig> for DocxOptions {
    fn from(config: &DocxConfig) -> Self {
        DocxOptions {
            page: PageSetup {
                size: config.page.size,
                margins: config.page.margins,
            },
            fonts: Fonts::from(&config.fonts),
            code: config.code,
            table: config.table.clone(),
            placeholder: config.placeholder.clone(),
            title_page: config.title_page.enabled.then(|| TitlePage {
                blocks: config.title_page.blocks.clone(),
            }),
            toc: config.toc.enabled.then(|| Toc::from(&config.toc)),
            inline_formatting: config.inline_formatting,
            metadata: Metadata {
                title: non_empty(&config.metadata.title),
                author: non_empty(&config.metadata.author),
            },
        }
    }
}

impl From<DocxConfig> for DocxOptions {
    fn from(config: DocxConfig) -> Self {
        DocxOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RepdocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RepdocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.input.path, "Пояснительная_записка_по_примеру.md");
        assert_eq!(config.output.path, "Пояснительная_записка_финальная.docx");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.convert.docx.page.size, PageSize::A4);
        assert_eq!(config.convert.docx.toc.mode, TocMode::Static);
        assert_eq!(config.convert.docx.toc.entries.len(), 30);
        assert_eq!(config.convert.docx.title_page.blocks.len(), 7);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.docx.page.size", "letter")
            .expect("override to apply")
            .set_override("convert.docx.toc.mode", "field")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.docx.page.size, PageSize::Letter);
        assert_eq!(config.convert.docx.toc.mode, TocMode::Field);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repdoc.toml");
        fs::write(
            &path,
            "[output]\npath = \"out.docx\"\n\n[convert.docx.title_page]\nenabled = false\n",
        )
        .unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.output.path, "out.docx");
        let options = DocxOptions::from(&config.convert.docx);
        assert!(options.title_page.is_none());
        assert!(options.toc.is_some());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/repdoc.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn optional_file_may_be_absent() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/repdoc.toml")
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn scan_config_converts_to_scan_rules() {
        let config = load_defaults().expect("defaults to deserialize");
        let rules: ScanRules = config.scan.into();
        assert_eq!(
            rules.skip_prefixes,
            vec!["# ПОЯСНИТЕЛЬНАЯ ЗАПИСКА", "## ОГЛАВЛЕНИЕ", "---"]
        );
        assert_eq!(rules.max_heading_level, 5);
        assert_eq!(rules.heading_rules.len(), 15);
        assert_eq!(rules.heading_rules[0].prefix, "## ВВЕДЕНИЕ");
        assert_eq!(rules.heading_rules[0].text.as_deref(), Some("Введение"));
        assert_eq!(rules.heading_rules[2].text, None);
        assert!(rules.placeholder_markers.contains(&"📸".to_string()));
    }

    #[test]
    fn docx_config_converts_to_report_template() {
        let config = load_defaults().expect("defaults to deserialize");
        let options = DocxOptions::from(&config.convert.docx);

        assert_eq!(options.page.margins.left_cm, 3.0);
        assert_eq!(options.fonts.body, "Times New Roman");
        assert_eq!(options.fonts.heading, None);
        assert_eq!(options.table.style, "Light Grid Accent 1");
        assert_eq!(options.placeholder.color, "808080");
        assert_eq!(
            options.metadata.title.as_deref(),
            Some("Пояснительная записка к курсовой работе")
        );
        assert_eq!(options.metadata.author, None);

        let title_page = options.title_page.expect("title page enabled");
        let blanks: usize = title_page.blocks.iter().map(|b| b.blank_before).sum();
        assert_eq!(blanks, 26);
        assert!(title_page.blocks[0].text.starts_with("Федеральное"));
        assert!(title_page.blocks[0].text.contains('\n'));

        let toc = options.toc.expect("toc enabled");
        assert_eq!(toc.page_label.as_deref(), Some("2"));
        assert_eq!(toc.entries[0].title, "Введение");
        assert_eq!(toc.entries[29].page, 46);
    }
}
