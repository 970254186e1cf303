// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod raw_dump;

pub use error::{AppError, ExtractError, StorageError}; // Re-export error types for convenience
