//! Library side of the `repdoc` binary: error type and inspect transforms.

pub mod error;
pub mod transforms;
