//! Report markdown format implementation
//!
//! This is the dialect the reports are written in: markdown-like, but read one
//! line at a time rather than as CommonMark. See [`scanner`] for the
//! classification rules. The format is read only.
//!
//! # Element Mapping Table
//!
//! | Line                          | IR node                 | Notes                                      |
//! |-------------------------------|-------------------------|--------------------------------------------|
//! | `#`.. + text                  | Heading                 | Level = `#` count, clamped; rules first     |
//! | `- x`, `− x`                  | List (unordered) item   | Adjacent items share one list              |
//! | `1. x`                        | List (ordered) item     | Must start at column 0                     |
//! | `\| a \| b \|` + `\|---\|`    | Table                   | Header + separator + pipe rows             |
//! | fenced block                  | Verbatim                | Language from the info string              |
//! | `---`                         | Break                   | Unless a skip prefix drops it              |
//! | `#` run without text          | (nothing)               |                                            |
//! | text with a marker            | Placeholder             | Markers checked on the stripped text       |
//! | anything else                 | Paragraph               |                                            |
//!
//! # Lossy Conversions
//!
//! - Blank lines are dropped, so paragraphs are always single lines.
//! - Heading text is kept literally; markup in it is not read.
//! - Skipped lines are gone, inside code blocks too.

pub mod parser;
pub mod scanner;

pub use scanner::{HeadingRule, LineKind, LineTrace, ScanRules};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for the report markdown dialect
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    rules: ScanRules,
}

impl MarkdownFormat {
    pub fn with_rules(rules: ScanRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScanRules {
        &self.rules
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "report-md"
    }

    fn description(&self) -> &str {
        "Line-oriented report markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_report(source, &self.rules)
    }
}
