use folio_core::cascade::Orchestrator;
use folio_core::config::builtin;
use folio_core::config::schema::PipelineConfig;
use folio_core::error::FolioError;
use folio_core::extraction::{has_pdf_extension, read_metadata};
use std::path::PathBuf;

use crate::output;

pub struct ExtractOptions {
    pub input_file: PathBuf,
    pub backend: Option<String>,
    pub preset: Option<String>,
    pub config: Option<PathBuf>,
    pub output_format: String,
    pub output_file: Option<PathBuf>,
    pub metadata: bool,
    pub attempts: bool,
}

/// Returns whether extraction succeeded; the result is printed either way.
pub fn run(opts: ExtractOptions) -> Result<bool, FolioError> {
    if !has_pdf_extension(&opts.input_file.to_string_lossy()) {
        return Err(FolioError::NotPdf(opts.input_file.display().to_string()));
    }

    let config = resolve_config(opts.preset.as_deref(), opts.config.as_ref())?;
    let pdf_bytes = std::fs::read(&opts.input_file)?;
    let orchestrator = Orchestrator::new(config)?;

    let result = match opts.backend.as_deref() {
        Some(name) => orchestrator.extract_with(&pdf_bytes, name)?,
        None => orchestrator.extract(&pdf_bytes),
    };

    let metadata = if opts.metadata {
        match read_metadata(&pdf_bytes) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "metadata unavailable");
                None
            }
        }
    } else {
        None
    };

    let rendered = match opts.output_format.as_str() {
        "json" => output::json::render(&result, metadata.as_ref())?,
        _ => output::text::render(&result),
    };
    let summary = output::text::summary(&result, metadata.as_ref(), opts.attempts);

    match opts.output_file {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            eprint!("{summary}");
            eprintln!("Written to {}", path.display());
        }
        None => {
            if !rendered.is_empty() {
                println!("{rendered}");
            }
            eprint!("{summary}");
        }
    }

    Ok(result.success)
}

fn resolve_config(preset: Option<&str>, file: Option<&PathBuf>) -> Result<PipelineConfig, FolioError> {
    match (preset, file) {
        (_, Some(path)) => folio_core::config::load_config(path),
        (Some(name), None) => builtin::load_preset(name),
        (None, None) => builtin::load_preset("default"),
    }
}
