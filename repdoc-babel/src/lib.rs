//! Report conversion for markdown-written academic reports
//!
//!     This crate reads a markdown-like report, builds a flat intermediate document (IR) and
//!     writes it out as a Word (`.docx`) document laid out with a fixed report template:
//!     title page, table of contents, headings, lists, tables and code blocks.
//!
//!     This is a pure lib, that is, it powers repdoc-cli but is shell agnostic: no code should
//!     suppose a shell environment, be it printing, env vars or exiting the process. Diagnostics
//!     go through `tracing` and the caller decides where they end up.
//!
//! Architecture
//!
//!     read → classify lines → IR → emit blocks → write
//!
//!     The report dialect turns into the IR (./ir/mod.rs), and the DOCX writer reads it.
//!     Inline markup and pipe tables live in ./common/mod.rs so that format code stays focused
//!     on its own data format.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # report dialect: line scanner
//!     │   ├── docx                # Word export: template, body, styles, package
//!     │   ├── treeviz             # IR tree visualization (inspect only)
//!     │   └── icons.rs
//!     ├── lib.rs
//!     ├── ir                      # Intermediate Representation
//!     └── common                  # inline markup and pipe tables
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <format>
//!         └── <testname>.rs
//!     fixtures
//!     └── report.md
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait: a name, file
//!     extensions, and parse() and/or serialize(). See ./format.rs.
//!
//!     - report-md: the report dialect, in only.
//!     - docx: out only, the one fixed template.
//!
//!     The tree visualization in ./formats/treeviz is a view of the IR for inspection, not a
//!     registered format.
//!
//! Library Choices
//!
//!     zip for the OOXML package, regex for the inline markup. The
//!     WordprocessingML itself is written by hand: the template is fixed and small, and the
//!     exact paragraph sequence is part of the contract.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod ir;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use registry::FormatRegistry;

use formats::docx::{DocxOptions, RenderedDocx};
use formats::markdown::ScanRules;

/// Parses report markdown into the IR.
pub fn parse_report(source: &str, rules: &ScanRules) -> Result<ir::nodes::Document, FormatError> {
    formats::markdown::parser::parse_report(source, rules)
}

/// Converts report markdown straight to a `.docx` package.
///
/// This is the whole pipeline in one call; the returned value carries the package bytes and
/// the statistics of what was written.
pub fn convert_report(
    source: &str,
    rules: &ScanRules,
    options: &DocxOptions,
) -> Result<RenderedDocx, FormatError> {
    let doc = parse_report(source, rules)?;
    formats::docx::render_docx(&doc, options)
}
