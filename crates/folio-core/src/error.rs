use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("{backend} extraction failed: {reason}")]
    Backend { backend: String, reason: String },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{backend} did not finish within {seconds}s")]
    Timeout { backend: String, seconds: u64 },

    #[error("{backend} panicked while parsing the document")]
    BackendPanicked { backend: String },

    #[error("{backend} returned page {page_number} out of order (previous page {previous})")]
    PageOrder {
        backend: String,
        page_number: usize,
        previous: usize,
    },

    #[error("unknown backend '{0}'. Available: pdftotext, pdf-extract, lopdf")]
    UnknownBackend(String),

    #[error("not a PDF file: {0}")]
    NotPdf(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("failed to read document metadata: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
