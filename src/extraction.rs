// src/extraction.rs
use crate::extractors::MetadataRecord;
use crate::pdfinfo::client;
use crate::pdfinfo::models::{ExtractionObserver, InputSource, ToolConfig};
use crate::utils::error::ExtractError;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A configured pdfinfo extraction.
///
/// ```no_run
/// # async fn demo() -> Result<(), pdfinfo_extractor::ExtractError> {
/// use pdfinfo_extractor::{InputSource, PdfInfo};
///
/// let mut pdf = PdfInfo::new(InputSource::path("report.pdf"));
/// let meta = pdf.extract().await?;
/// println!("{:?}", meta.get("pages"));
/// # Ok(())
/// # }
/// ```
pub struct PdfInfo {
    input: Option<InputSource>,
    options: Vec<String>,
    config: ToolConfig,
    strict_errors: bool,
    observers: Vec<Arc<dyn ExtractionObserver>>,
}

impl PdfInfo {
    pub fn new(input: InputSource) -> Self {
        Self {
            input: Some(input),
            ..Self::default()
        }
    }

    /// Extra pdfinfo arguments, placed before the input argument.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: ToolConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn strict_errors(&self) -> bool {
        self.strict_errors
    }

    /// When off, output pdfinfo could not make sense of yields an empty record
    /// instead of [`ExtractError::InvalidInput`].
    pub fn set_strict_errors(&mut self, strict: bool) -> &mut Self {
        self.strict_errors = strict;
        self
    }

    /// Registers an observer for raw output chunks and lifecycle events.
    pub fn subscribe<O>(&mut self, observer: O) -> &mut Self
    where
        O: ExtractionObserver + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Runs pdfinfo and returns the parsed record.
    ///
    /// A stream input is consumed by the first call; calling again afterwards
    /// fails with [`ExtractError::NoInput`].
    pub async fn extract(&mut self) -> Result<MetadataRecord, ExtractError> {
        let input = match &self.input {
            Some(InputSource::Path(path)) => Some(InputSource::Path(path.clone())),
            Some(InputSource::Stream(_)) => self.input.take(),
            None => None,
        };

        tracing::info!("Extracting PDF info from {:?}", input);

        match client::run(&self.config, &self.options, input, &self.observers[..]).await? {
            Some(record) => {
                tracing::info!("Extracted {} attributes", record.len());
                Ok(record)
            }
            None if self.strict_errors => {
                tracing::warn!("pdfinfo produced no output, input is not a PDF");
                Err(ExtractError::InvalidInput)
            }
            None => {
                tracing::debug!("pdfinfo produced no output, returning empty record");
                Ok(MetadataRecord::new())
            }
        }
    }

    /// Alias for [`PdfInfo::extract`].
    pub async fn info(&mut self) -> Result<MetadataRecord, ExtractError> {
        self.extract().await
    }

    /// Starts the extraction on the runtime and returns immediately.
    ///
    /// `callback` runs exactly once with either the record or the error.
    pub fn spawn_extract<F>(mut self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<MetadataRecord, ExtractError>) + Send + 'static,
    {
        tokio::spawn(async move {
            let outcome = self.extract().await;
            callback(outcome);
        })
    }
}

impl Default for PdfInfo {
    /// A handle with no input; extracting from it fails with `NoInput`.
    /// The tool honours `PDFINFO_PATH` unless replaced with [`PdfInfo::with_config`].
    fn default() -> Self {
        Self {
            input: None,
            options: Vec::new(),
            config: ToolConfig::from_env(),
            strict_errors: true,
            observers: Vec::new(),
        }
    }
}

impl std::fmt::Debug for PdfInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfInfo")
            .field("input", &self.input)
            .field("options", &self.options)
            .field("config", &self.config)
            .field("strict_errors", &self.strict_errors)
            .field("observers", &self.observers.len())
            .finish()
    }
}
