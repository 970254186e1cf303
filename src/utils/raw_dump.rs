// src/utils/raw_dump.rs
use crate::pdfinfo::models::ExtractionObserver;
use crate::utils::error::AppError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::Mutex;

/// Records everything pdfinfo printed during a run, for debugging odd output.
#[derive(Debug, Default)]
pub struct RawOutputDump {
    transcript: Mutex<String>,
    exit_code: Mutex<Option<i32>>,
}

impl RawOutputDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> String {
        self.transcript.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Saves the captured output plus a short trailer with the exit code.
    pub fn save(&self, filename: &Path) -> Result<(), AppError> {
        if let Some(parent) = filename.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(filename)?;

        let transcript = self.transcript();
        let exit_code = self.exit_code.lock().ok().and_then(|c| *c);

        file.write_all(transcript.as_bytes())?;
        if !transcript.ends_with('\n') && !transcript.is_empty() {
            file.write_all(b"\n")?;
        }
        writeln!(file, "--- pdfinfo exit code: {:?} ({} bytes)", exit_code, transcript.len())?;

        tracing::info!("Saved raw pdfinfo output to {}", filename.display());
        Ok(())
    }
}

impl ExtractionObserver for RawOutputDump {
    fn on_data(&self, chunk: &str) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push_str(chunk);
        }
    }

    fn on_exit(&self, status: Option<ExitStatus>) {
        if let Ok(mut code) = self.exit_code.lock() {
            *code = status.and_then(|s| s.code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_transcript_with_trailer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug").join("raw.txt");

        let dump = RawOutputDump::new();
        dump.on_data("Title: basic\n");
        dump.on_data("Pages: 1");
        dump.save(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("Title: basic\nPages: 1\n"));
        assert!(saved.contains("--- pdfinfo exit code: None"));
    }
}
