use crate::model::{PageSet, TextStats};
use crate::quality::QualityReason;
use crate::trace::AttemptTrace;
use serde::{Deserialize, Serialize};

/// Failure reason reported when every backend was rejected or failed.
pub const EXHAUSTED_REASON: &str = "no backend produced quality text";

/// Method name reported when no backend succeeded.
pub const NO_BACKEND: &str = "none";

/// One backend's output after normalization, deduplication and assembly.
#[derive(Debug, Clone)]
pub struct ExtractionAttempt {
    pub backend_name: String,
    /// Pages the backend returned, before any were dropped.
    pub pages_extracted: usize,
    pub pages: PageSet,
    pub assembled_text: String,
}

/// What a caller gets back from an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    /// Backend that produced `text`, or `"none"`.
    pub backend_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Verdict of the attempt that produced `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReason>,
    /// Every backend tried, in order.
    pub attempts: Vec<AttemptTrace>,
}

impl ExtractionResult {
    pub(crate) fn succeeded(
        text: String,
        backend_name: &str,
        quality: QualityReason,
        attempts: Vec<AttemptTrace>,
    ) -> Self {
        ExtractionResult {
            text,
            backend_name: backend_name.to_string(),
            success: true,
            failure_reason: None,
            quality: Some(quality),
            attempts,
        }
    }

    pub(crate) fn failed(
        backend_name: &str,
        reason: impl Into<String>,
        quality: Option<QualityReason>,
        attempts: Vec<AttemptTrace>,
    ) -> Self {
        ExtractionResult {
            text: String::new(),
            backend_name: backend_name.to_string(),
            success: false,
            failure_reason: Some(reason.into()),
            quality,
            attempts,
        }
    }

    pub(crate) fn exhausted(attempts: Vec<AttemptTrace>) -> Self {
        Self::failed(NO_BACKEND, EXHAUSTED_REASON, None, attempts)
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text)
    }
}
