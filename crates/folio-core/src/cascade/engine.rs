use crate::cascade::outcome::{ExtractionAttempt, ExtractionResult};
use crate::cleanup::{dedupe, normalize, suppress};
use crate::config::schema::PipelineConfig;
use crate::config::validate_config;
use crate::error::FolioError;
use crate::extraction::{backend_by_name, PdfExtractor};
use crate::model::{Page, PageSet};
use crate::quality::{validate, QualityVerdict};
use crate::trace::AttemptTrace;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Runs backends best-first and returns the first text that passes validation.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
pub struct Orchestrator {
    backends: Vec<Arc<dyn PdfExtractor>>,
    config: PipelineConfig,
    timeout: Duration,
}

impl Orchestrator {
    /// Build the configured backends in the configured order.
    pub fn new(config: PipelineConfig) -> Result<Self, FolioError> {
        validate_config(&config)?;
        let timeout = config.backend_timeout();
        let backends = config
            .backends
            .iter()
            .map(|name| backend_by_name(name, timeout))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_backends(backends, config))
    }

    /// Use caller-supplied backends; `config.backends` is ignored.
    pub fn with_backends(backends: Vec<Arc<dyn PdfExtractor>>, config: PipelineConfig) -> Self {
        let timeout = config.backend_timeout();
        Orchestrator {
            backends,
            config,
            timeout,
        }
    }

    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backends(&self) -> &[Arc<dyn PdfExtractor>] {
        &self.backends
    }

    /// Try each backend in order until one produces acceptable text.
    ///
    /// Backend failures and quality rejections are logged and recorded in the
    /// result's attempts; only running out of backends is reported as a failure.
    pub fn extract(&self, document: &[u8]) -> ExtractionResult {
        let document: Arc<[u8]> = Arc::from(document);
        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let name = backend.backend_name();
            let attempt = match self.attempt(backend, &document) {
                Ok(attempt) => attempt,
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "backend failed, falling back");
                    attempts.push(AttemptTrace::failed(name, &e));
                    continue;
                }
            };

            let assembled_chars = attempt.assembled_text.chars().count();
            if assembled_chars <= self.config.min_assembled_chars {
                tracing::debug!(backend = name, assembled_chars, "backend produced no text");
                attempts.push(trace_for(&attempt, None));
                continue;
            }

            let verdict = validate(&attempt.assembled_text, &self.config.quality);
            attempts.push(trace_for(&attempt, Some(verdict)));
            if !verdict.accepted {
                tracing::warn!(backend = name, reason = %verdict.reason, "extraction quality issue");
                continue;
            }

            tracing::info!(
                backend = name,
                pages = attempt.pages.len(),
                assembled_chars,
                "extraction accepted"
            );
            let text = suppress(&attempt.assembled_text, &self.config.repetition);
            return ExtractionResult::succeeded(text, name, verdict.reason, attempts);
        }

        tracing::warn!(tried = attempts.len(), "all backends exhausted");
        ExtractionResult::exhausted(attempts)
    }

    /// Run exactly one named backend, bypassing the cascade.
    ///
    /// The quality verdict is reported but does not gate success: any
    /// non-empty text is returned.
    pub fn extract_with(&self, document: &[u8], backend_name: &str) -> Result<ExtractionResult, FolioError> {
        let backend = match self.backends.iter().find(|b| b.backend_name() == backend_name) {
            Some(backend) => Arc::clone(backend),
            None => backend_by_name(backend_name, self.timeout)?,
        };
        let document: Arc<[u8]> = Arc::from(document);
        let name = backend.backend_name();

        let attempt = match self.attempt(&backend, &document) {
            Ok(attempt) => attempt,
            Err(e) => {
                tracing::warn!(backend = name, error = %e, "forced backend failed");
                let reason = e.to_string();
                let attempts = vec![AttemptTrace::failed(name, &e)];
                return Ok(ExtractionResult::failed(name, reason, None, attempts));
            }
        };

        if attempt.assembled_text.is_empty() {
            let attempts = vec![trace_for(&attempt, None)];
            return Ok(ExtractionResult::failed(
                name,
                "could not extract text from PDF",
                None,
                attempts,
            ));
        }

        let verdict = validate(&attempt.assembled_text, &self.config.quality);
        if !verdict.accepted {
            tracing::warn!(backend = name, reason = %verdict.reason, "forced backend returned low-quality text");
        }
        let attempts = vec![trace_for(&attempt, Some(verdict))];
        let text = suppress(&attempt.assembled_text, &self.config.repetition);
        Ok(ExtractionResult::succeeded(text, name, verdict.reason, attempts))
    }

    /// Extract, normalize, dedupe and assemble with one backend.
    fn attempt(
        &self,
        backend: &Arc<dyn PdfExtractor>,
        document: &Arc<[u8]>,
    ) -> Result<ExtractionAttempt, FolioError> {
        let name = backend.backend_name();
        let raw_pages = self.invoke(backend, document)?;
        let mut pages = PageSet::from_pages(name, raw_pages)?;
        let pages_extracted = pages.len();

        for page in pages.pages_mut() {
            page.cleaned_text = normalize(&page.raw_text);
        }
        let pages = dedupe(pages, self.config.dedupe.signature_prefix_chars);
        let assembled_text = assemble(&pages);

        Ok(ExtractionAttempt {
            backend_name: name.to_string(),
            pages_extracted,
            pages,
            assembled_text,
        })
    }

    /// Call the backend on a worker thread and give up after the timeout.
    ///
    /// A timed-out worker is left to finish on its own; its result is dropped.
    /// Subprocess backends are killed by their own timeout, but the in-process
    /// ones (pdf-extract, lopdf) cannot be interrupted and hold their thread
    /// until they return. Callers that accept untrusted input should bound how
    /// many extractions they start.
    fn invoke(
        &self,
        backend: &Arc<dyn PdfExtractor>,
        document: &Arc<[u8]>,
    ) -> Result<Vec<Page>, FolioError> {
        let name = backend.backend_name().to_string();
        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(backend);
        let bytes = Arc::clone(document);

        thread::Builder::new()
            .name(format!("folio-{name}"))
            .spawn(move || {
                let _ = tx.send(worker.extract_pages(&bytes));
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(FolioError::Timeout {
                backend: name,
                seconds: self.timeout.as_secs(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(FolioError::BackendPanicked { backend: name }),
        }
    }
}

/// Join pages as `--- Page N ---` blocks separated by blank lines.
pub fn assemble(pages: &PageSet) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&format!("--- Page {} ---\n", page.page_number));
        text.push_str(page.cleaned_text.trim());
        text.push_str("\n\n");
    }
    text.trim().to_string()
}

fn trace_for(attempt: &ExtractionAttempt, verdict: Option<QualityVerdict>) -> AttemptTrace {
    AttemptTrace::completed(
        &attempt.backend_name,
        attempt.pages_extracted,
        attempt.pages.len(),
        attempt.assembled_text.chars().count(),
        verdict,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(number: usize, text: &str) -> Page {
        Page {
            page_number: number,
            raw_text: text.to_string(),
            cleaned_text: text.to_string(),
        }
    }

    #[test]
    fn test_assemble_marks_pages() {
        let pages = PageSet::from_pages(
            "mock",
            vec![cleaned(1, "First page text\n"), cleaned(3, "  Third page text")],
        )
        .unwrap();
        assert_eq!(
            assemble(&pages),
            "--- Page 1 ---\nFirst page text\n\n--- Page 3 ---\nThird page text"
        );
    }

    #[test]
    fn test_assemble_empty_set() {
        assert_eq!(assemble(&PageSet::default()), "");
    }

    #[test]
    fn test_new_builds_configured_order() {
        let config = PipelineConfig {
            backends: vec!["lopdf".into(), "pdf-extract".into()],
            ..PipelineConfig::default()
        };
        let orchestrator = Orchestrator::new(config).unwrap();
        let names: Vec<&str> = orchestrator
            .backends()
            .iter()
            .map(|b| b.backend_name())
            .collect();
        assert_eq!(names, vec!["lopdf", "pdf-extract"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PipelineConfig {
            backends: vec![],
            ..PipelineConfig::default()
        };
        assert!(Orchestrator::new(config).is_err());
    }
}
