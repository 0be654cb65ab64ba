//! Format-agnostic helpers shared by the report scanner and the DOCX writer.

pub mod inline;
pub mod table;
