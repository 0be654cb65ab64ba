//! Markdown parsing (report markdown → IR)
//!
//! Pipeline: source string → line scanner → IR document

use super::scanner::{scan, ScanRules};
use crate::error::FormatError;
use crate::ir::nodes::Document;
use tracing::debug;

/// Parse report markdown into an IR document
pub fn parse_report(source: &str, rules: &ScanRules) -> Result<Document, FormatError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let doc = scan(source, rules);
    debug!(blocks = doc.children.len(), "parsed report markdown");
    Ok(doc)
}
