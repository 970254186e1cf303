// src/main.rs
use clap::Parser;
use pdfinfo_extractor::pdfinfo::models::STDIN_MARKER;
use pdfinfo_extractor::storage::StorageManager;
use pdfinfo_extractor::utils::{self, raw_dump::RawOutputDump, AppError};
use pdfinfo_extractor::{InputSource, PdfInfo, StorageError, ToolConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command Line Interface for extracting PDF metadata through pdfinfo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF file to inspect, or "-" to read the document from stdin
    input: String,

    /// Extra argument passed to pdfinfo before the input (repeatable)
    #[arg(short = 'o', long = "opt", allow_hyphen_values = true)]
    options: Vec<String>,

    /// Return an empty record instead of failing when the input is not a PDF
    #[arg(long)]
    lenient: bool,

    /// Location of the pdfinfo binary (default: $PDFINFO_PATH, then "pdfinfo")
    #[arg(long)]
    pdfinfo_path: Option<PathBuf>,

    /// Directory to save the record as JSON (optional)
    #[arg(long)]
    output_dir: Option<String>,

    /// Debug mode - verbose logs and pdfinfo's raw output saved under <output-dir>/debug
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    if args.debug && args.output_dir.is_none() {
        return Err(AppError::Config("--debug requires --output-dir".to_string()));
    }

    // 3. Resolve the tool once and build the extraction
    let config = match &args.pdfinfo_path {
        Some(path) => ToolConfig::new(path),
        None => ToolConfig::from_env(),
    };
    let (input, stem) = if args.input == STDIN_MARKER {
        (InputSource::stream(tokio::io::stdin()), "stdin".to_string())
    } else {
        let stem = Path::new(&args.input)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        (InputSource::path(&args.input), stem)
    };

    let mut pdf = PdfInfo::new(input)
        .with_config(config)
        .with_options(args.options.iter().cloned());
    pdf.set_strict_errors(!args.lenient);

    let dump = Arc::new(RawOutputDump::new());
    if args.debug {
        pdf.subscribe(Arc::clone(&dump));
    }

    // 4. Run pdfinfo
    let record = pdf.extract().await;

    // Save the raw transcript before reporting failures, it is most useful then
    if let (true, Some(dir)) = (args.debug, &args.output_dir) {
        let dump_path = Path::new(dir).join("debug").join(format!("{}_raw.txt", stem));
        if let Err(e) = dump.save(&dump_path) {
            tracing::warn!("Failed to save raw output: {}", e);
        }
    }

    let record = record?;

    // 5. Persist and print
    if let Some(dir) = &args.output_dir {
        let storage = StorageManager::new(dir)?;
        let path = storage.save_record(&record, &stem, &args.input)?;
        tracing::info!("Saved record to: {}", path.display());
    }

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    println!("{}", json);

    tracing::info!("Processing finished. {} attributes", record.len());
    Ok(())
}
