//! Report markdown format tests
//!
//! Parsing the report dialect into the IR and the one-block-per-line
//! property of the scanner.

mod import;
mod properties;
