// src/pdfinfo/mod.rs
pub mod client;
pub mod models;

pub use models::{ExtractionEvent, ExtractionObserver, InputSource, ToolConfig};
