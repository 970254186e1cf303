// src/extractors/mod.rs
pub mod attribute;
pub mod output;
pub mod record;

// Re-export key extraction types for convenience
pub use attribute::{coerce, TypedAttribute, TypedValue};
pub use output::parse;
pub use record::{build, MetadataRecord};
