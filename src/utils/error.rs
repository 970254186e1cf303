// src/utils/error.rs
use thiserror::Error;

// Errors raised while running pdfinfo and turning its output into a record
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No input specified")]
    NoInput,

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pdfinfo process I/O failed: {0}")]
    ProcessIo(#[from] std::io::Error), // stdin/stdout/stderr or wait failures

    #[error("File is not a PDF")]
    InvalidInput,
}

impl ExtractError {
    /// Launch failures belong to the same class as pipe errors on a running child.
    pub fn is_process_io(&self) -> bool {
        matches!(self, ExtractError::ProcessIo(_) | ExtractError::Launch { .. })
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
