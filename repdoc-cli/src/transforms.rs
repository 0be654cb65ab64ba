//! CLI-specific transforms
//!
//! `repdoc inspect <file> [transform]` shows what the report scanner makes of a file before
//! anything is rendered.
//!
//! - `ir-treeviz`: the IR as a tree with Unicode icons (default)
//! - `ir-json`: the IR as JSON
//! - `lines`: one row per source line with the kind the line was classified as
//!
//! ## Extra Parameters
//!
//! - `inlines`: when "true", `ir-treeviz` lists the inline spans under each block.
//!
//! Example: `repdoc inspect report.md ir-treeviz --extra-inlines`

use crate::error::CliError;
use repdoc_babel::formats::markdown::{scanner, ScanRules};
use repdoc_babel::formats::treeviz::to_treeviz_str_with_params;
use repdoc_babel::{parse_report, FormatError};
use std::collections::HashMap;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ir-treeviz", "ir-json", "lines"];

pub const DEFAULT_TRANSFORM: &str = "ir-treeviz";

/// Execute a named transform on report source with optional extra parameters
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("# Title", "ir-json", &ScanRules::default(), &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    rules: &ScanRules,
    extra_params: &HashMap<String, String>,
) -> Result<String, CliError> {
    match transform_name {
        "ir-treeviz" => {
            let doc = parse_report(source, rules)?;
            Ok(to_treeviz_str_with_params(&doc, extra_params)?)
        }
        "ir-json" => {
            reject_params(transform_name, extra_params)?;
            let doc = parse_report(source, rules)?;
            let mut json = serde_json::to_string_pretty(&doc).map_err(|e| {
                FormatError::SerializationError(format!("JSON serialization failed: {e}"))
            })?;
            json.push('\n');
            Ok(json)
        }
        "lines" => {
            reject_params(transform_name, extra_params)?;
            Ok(lines_table(source, rules))
        }
        other => Err(FormatError::NotSupported(format!("Unknown transform '{other}'")).into()),
    }
}

fn reject_params(
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<(), CliError> {
    match extra_params.keys().next() {
        Some(key) => Err(FormatError::NotSupported(format!(
            "Transform '{transform_name}' does not support parameter '{key}'"
        ))
        .into()),
        None => Ok(()),
    }
}

/// `<line number> <kind> | <source line>` for every line of the source.
fn lines_table(source: &str, rules: &ScanRules) -> String {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let source = source.strip_suffix('\n').unwrap_or(source);
    let lines: Vec<&str> = source.split('\n').collect();
    let mut output = String::new();
    for entry in scanner::trace(source, rules) {
        let text = lines
            .get(entry.line - 1)
            .map(|l| l.trim_end())
            .unwrap_or("");
        output.push_str(&format!("{:>4} {:<11} | {}\n", entry.line, entry.kind, text));
    }
    output
}
