//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the IR and the various representations.

pub mod docx;
pub mod icons;
pub mod markdown;
pub mod treeviz;

pub use docx::{DocxFormat, DocxOptions};
pub use markdown::MarkdownFormat;
