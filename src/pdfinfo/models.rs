// src/pdfinfo/models.rs
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use tokio::io::AsyncRead;
use tokio::sync::mpsc::UnboundedSender;

/// Environment variable that overrides the pdfinfo binary location.
pub const PDFINFO_PATH_ENV: &str = "PDFINFO_PATH";
const DEFAULT_PDFINFO_PATH: &str = "pdfinfo";

/// Argument pdfinfo reads as "take the document from standard input".
pub const STDIN_MARKER: &str = "-";

/// Where the external tool lives. Resolved once and passed into every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub program: PathBuf,
}

impl ToolConfig {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self { program: program.into() }
    }

    /// Reads `PDFINFO_PATH`, falling back to `pdfinfo` on the search path.
    pub fn from_env() -> Self {
        match std::env::var_os(PDFINFO_PATH_ENV) {
            Some(path) if !path.is_empty() => {
                tracing::debug!("Using pdfinfo from {}: {:?}", PDFINFO_PATH_ENV, path);
                Self::new(path)
            }
            _ => Self::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PDFINFO_PATH)
    }
}

/// A document given either by location or as a live byte stream.
pub enum InputSource {
    Path(PathBuf),
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl InputSource {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        InputSource::Path(path.into())
    }

    pub fn stream<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        InputSource::Stream(Box::new(reader))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, InputSource::Stream(_))
    }

    /// The final argument handed to pdfinfo for this source.
    pub fn as_argument(&self) -> std::ffi::OsString {
        match self {
            InputSource::Path(path) => path.clone().into_os_string(),
            InputSource::Stream(_) => STDIN_MARKER.into(),
        }
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            InputSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Progress notifications from a single pdfinfo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    /// A raw stdout chunk, decoded lossily.
    Data(String),
    /// The process has exited. `None` when no status could be collected.
    Exit(Option<i32>),
    /// Output fully collected and parsed.
    Close,
}

/// Side channel for callers who want to watch a run as it happens.
///
/// Notifications are best-effort and never carry the extraction result.
pub trait ExtractionObserver: Send + Sync {
    fn on_data(&self, _chunk: &str) {}

    fn on_exit(&self, _status: Option<ExitStatus>) {}

    fn on_close(&self) {}
}

impl ExtractionObserver for UnboundedSender<ExtractionEvent> {
    fn on_data(&self, chunk: &str) {
        let _ = self.send(ExtractionEvent::Data(chunk.to_string()));
    }

    fn on_exit(&self, status: Option<ExitStatus>) {
        let _ = self.send(ExtractionEvent::Exit(status.and_then(|s| s.code())));
    }

    fn on_close(&self) {
        let _ = self.send(ExtractionEvent::Close);
    }
}

/// Fans notifications out to every subscribed observer.
impl<T: ExtractionObserver> ExtractionObserver for [T] {
    fn on_data(&self, chunk: &str) {
        self.iter().for_each(|o| o.on_data(chunk));
    }

    fn on_exit(&self, status: Option<ExitStatus>) {
        self.iter().for_each(|o| o.on_exit(status));
    }

    fn on_close(&self) {
        self.iter().for_each(|o| o.on_close());
    }
}

impl<T: ExtractionObserver + ?Sized> ExtractionObserver for std::sync::Arc<T> {
    fn on_data(&self, chunk: &str) {
        (**self).on_data(chunk)
    }

    fn on_exit(&self, status: Option<ExitStatus>) {
        (**self).on_exit(status)
    }

    fn on_close(&self) {
        (**self).on_close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_sources_use_stdin_marker() {
        let stream = InputSource::stream(tokio::io::empty());
        assert!(stream.is_stream());
        assert_eq!(stream.as_argument(), "-");

        let path = InputSource::path("/tmp/report.pdf");
        assert!(!path.is_stream());
        assert_eq!(path.as_argument(), "/tmp/report.pdf");
    }

    #[test]
    fn default_config_uses_pdfinfo_on_path() {
        assert_eq!(ToolConfig::default().program, PathBuf::from("pdfinfo"));
    }

    #[test]
    fn channel_observer_forwards_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.on_data("Pages: 1\n");
        tx.on_close();

        assert_eq!(rx.try_recv().unwrap(), ExtractionEvent::Data("Pages: 1\n".to_string()));
        assert_eq!(rx.try_recv().unwrap(), ExtractionEvent::Close);
    }
}
