//! Intermediate Representation (IR) for report documents.
//!
//! Every input format is mapped onto this flat, format-agnostic document and
//! every output format is produced from it. Reports are flat by nature: a
//! heading does not own the blocks that follow it.

pub mod nodes;
pub mod stats;
