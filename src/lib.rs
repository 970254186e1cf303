// src/lib.rs
//! Reads PDF metadata by running `pdfinfo(1)` and parsing its `Key: Value` output
//! into a typed, ordered record.
pub mod extraction;
pub mod extractors;
pub mod pdfinfo;
pub mod storage;
pub mod utils;

pub use extraction::PdfInfo;
pub use extractors::{MetadataRecord, TypedAttribute, TypedValue};
pub use pdfinfo::{ExtractionEvent, ExtractionObserver, InputSource, ToolConfig};
pub use utils::error::{AppError, ExtractError, StorageError};
