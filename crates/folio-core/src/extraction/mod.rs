pub mod lopdf;
pub mod pdf_extract;
pub mod pdftotext;

use crate::error::FolioError;
use crate::model::Page;
use std::sync::Arc;
use std::time::Duration;

pub use self::lopdf::{read_metadata, LopdfExtractor};
pub use self::pdf_extract::PdfExtractExtractor;
pub use self::pdftotext::PdftotextExtractor;

/// Backend names in default priority order: the two richer parsers first,
/// the minimal lopdf reader last.
pub const BACKENDS: &[&str] = &["pdftotext", "pdf-extract", "lopdf"];

/// Whether a file name carries the `.pdf` extension, in any case.
pub fn has_pdf_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract raw text from PDF bytes, returning one Page per document page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FolioError>;

    /// Name of this extraction backend (reported as the extraction method).
    fn backend_name(&self) -> &str;

    /// Whether the backend can run on this machine at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Construct a backend by its registered name.
pub fn backend_by_name(name: &str, timeout: Duration) -> Result<Arc<dyn PdfExtractor>, FolioError> {
    match name {
        "pdftotext" => Ok(Arc::new(PdftotextExtractor::with_timeout(timeout))),
        "pdf-extract" => Ok(Arc::new(PdfExtractExtractor::new())),
        "lopdf" => Ok(Arc::new(LopdfExtractor::new())),
        other => Err(FolioError::UnknownBackend(other.to_string())),
    }
}
