//! Format implementations
//!
//! Source formats (`markdown`, `adf`) parse into the canonical tree; output
//! formats (`json`, `treeviz`) serialize it.

pub mod adf;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use adf::AdfFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
