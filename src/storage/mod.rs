// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::MetadataRecord;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a record as `<stem>_info.json`, wrapped with its source and a timestamp
    pub fn save_record(&self, record: &MetadataRecord, stem: &str, source: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_info.json", stem));

        let document = serde_json::json!({
            "source": source,
            "attribute_count": record.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
            "metadata": record,
        });

        let document_str = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, document_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{build, coerce};

    #[test]
    fn saves_record_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let record = build(vec![coerce("title", "basic"), coerce("pages", "3")]);

        let path = storage.save_record(&record, "basic", "basic.pdf").unwrap();
        assert_eq!(path, dir.path().join("out").join("basic_info.json"));

        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["source"], "basic.pdf");
        assert_eq!(saved["attribute_count"], 2);
        assert_eq!(saved["metadata"]["title"], "basic");
        assert_eq!(saved["metadata"]["pages"], 3);
        assert!(saved["extraction_timestamp"].is_string());
    }
}
