//! Per-backend diagnostics collected while the cascade runs.
//!
//! Callers only ever see the final text and method, but the trace records why
//! each earlier backend was passed over.

use crate::error::FolioError;
use crate::quality::{QualityReason, QualityVerdict};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Text passed validation and was returned.
    Accepted,
    /// Text was produced but failed validation.
    Rejected,
    /// Nothing worth validating came back.
    Empty,
    /// The backend errored, panicked or timed out.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptTrace {
    pub backend: String,
    pub outcome: AttemptOutcome,
    pub pages_extracted: usize,
    pub pages_kept: usize,
    pub assembled_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<QualityReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AttemptTrace {
    pub(crate) fn failed(backend: &str, error: &FolioError) -> Self {
        AttemptTrace {
            backend: backend.to_string(),
            outcome: AttemptOutcome::Failed,
            pages_extracted: 0,
            pages_kept: 0,
            assembled_chars: 0,
            reason: None,
            error: Some(error.to_string()),
        }
    }

    pub(crate) fn completed(
        backend: &str,
        pages_extracted: usize,
        pages_kept: usize,
        assembled_chars: usize,
        verdict: Option<QualityVerdict>,
    ) -> Self {
        let outcome = match verdict {
            None => AttemptOutcome::Empty,
            Some(v) if v.accepted => AttemptOutcome::Accepted,
            Some(_) => AttemptOutcome::Rejected,
        };
        AttemptTrace {
            backend: backend.to_string(),
            outcome,
            pages_extracted,
            pages_kept,
            assembled_chars,
            reason: verdict.map(|v| v.reason),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_follows_verdict() {
        let rejected = QualityVerdict {
            accepted: false,
            reason: QualityReason::LowAlphabeticRatio,
        };
        let trace = AttemptTrace::completed("lopdf", 3, 2, 120, Some(rejected));
        assert_eq!(trace.outcome, AttemptOutcome::Rejected);
        assert_eq!(trace.reason, Some(QualityReason::LowAlphabeticRatio));

        let empty = AttemptTrace::completed("lopdf", 3, 0, 0, None);
        assert_eq!(empty.outcome, AttemptOutcome::Empty);
    }

    #[test]
    fn test_failed_trace_serializes_error() {
        let trace = AttemptTrace::failed("pdftotext", &FolioError::PdftotextNotFound);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert!(json["error"].as_str().unwrap().contains("pdftotext not found"));
        assert!(json.get("reason").is_none());
    }
}
