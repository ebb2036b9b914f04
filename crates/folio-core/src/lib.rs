pub mod cascade;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod quality;
pub mod trace;

use cascade::{ExtractionResult, Orchestrator};
use config::schema::PipelineConfig;
use error::FolioError;

/// Main API entry point: extract the best available text from a PDF.
///
/// Builds the configured backend cascade and runs it once. Callers that
/// extract many documents should build an [`Orchestrator`] once and reuse it.
pub fn extract_text(pdf_bytes: &[u8], config: &PipelineConfig) -> Result<ExtractionResult, FolioError> {
    let orchestrator = Orchestrator::new(config.clone())?;
    Ok(orchestrator.extract(pdf_bytes))
}
