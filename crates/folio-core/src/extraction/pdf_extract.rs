use crate::error::FolioError;
use crate::extraction::PdfExtractor;
use crate::model::Page;
use std::panic::{self, AssertUnwindSafe};

/// In-process backend built on the `pdf-extract` crate.
///
/// `pdf-extract` panics on some malformed inputs instead of returning an
/// error, so every call goes through `catch_unwind`.
pub struct PdfExtractExtractor;

impl PdfExtractExtractor {
    pub fn new() -> Self {
        PdfExtractExtractor
    }
}

impl Default for PdfExtractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdfExtractExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FolioError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            ::pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages
                .into_iter()
                .enumerate()
                .map(|(i, text)| Page::new(i + 1, text))
                .collect()),
            Ok(Err(e)) => Err(FolioError::Backend {
                backend: self.backend_name().to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(FolioError::BackendPanicked {
                backend: self.backend_name().to_string(),
            }),
        }
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_input_is_an_error_not_a_panic() {
        let result = PdfExtractExtractor::new().extract_pages(b"definitely not a pdf");
        assert!(result.is_err());
    }
}
