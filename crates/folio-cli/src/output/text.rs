use folio_core::cascade::ExtractionResult;
use folio_core::model::DocumentMetadata;
use folio_core::trace::AttemptTrace;
use std::fmt::Write;

/// The extracted text itself, or nothing when extraction failed.
pub fn render(result: &ExtractionResult) -> String {
    result.text.clone()
}

/// Human-readable summary for stderr.
pub fn summary(result: &ExtractionResult, metadata: Option<&DocumentMetadata>, show_attempts: bool) -> String {
    let mut out = String::new();

    if result.success {
        let stats = result.stats();
        let quality = result
            .quality
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".into());
        writeln!(
            out,
            "Extracted with {}: {} chars, {} words, {} lines ({})",
            result.backend_name, stats.char_count, stats.word_count, stats.line_count, quality
        )
        .ok();
    } else {
        writeln!(
            out,
            "Extraction failed: {}",
            result.failure_reason.as_deref().unwrap_or("unknown error")
        )
        .ok();
    }

    if let Some(m) = metadata {
        out.push_str(&format_metadata(m));
    }
    if show_attempts {
        out.push_str(&format_attempts(&result.attempts));
    }
    out
}

fn format_metadata(m: &DocumentMetadata) -> String {
    let mut out = String::from("\nDocument:\n");
    writeln!(out, "  {:<18} {}", "Pages", m.page_count).ok();
    let fields = [
        ("Title", &m.title),
        ("Author", &m.author),
        ("Subject", &m.subject),
        ("Creator", &m.creator),
        ("Producer", &m.producer),
        ("Created", &m.creation_date),
        ("Modified", &m.modification_date),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            writeln!(out, "  {:<18} {}", label, value).ok();
        }
    }
    out
}

fn format_attempts(attempts: &[AttemptTrace]) -> String {
    let mut out = String::from("\nAttempts:\n");
    if attempts.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    writeln!(
        out,
        "  {:<12} {:<9} {:>6} {:>6} {:>8}  Detail",
        "Backend", "Outcome", "Pages", "Kept", "Chars"
    )
    .ok();
    writeln!(out, "  {}", "-".repeat(60)).ok();
    for a in attempts {
        let outcome = serde_json::to_value(a.outcome)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let detail = match (&a.error, a.reason) {
            (Some(e), _) => e.clone(),
            (None, Some(r)) => r.to_string(),
            (None, None) => String::new(),
        };
        writeln!(
            out,
            "  {:<12} {:<9} {:>6} {:>6} {:>8}  {}",
            a.backend, outcome, a.pages_extracted, a.pages_kept, a.assembled_chars, detail
        )
        .ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_result() -> ExtractionResult {
        serde_json::from_value(serde_json::json!({
            "text": "",
            "backend_name": "none",
            "success": false,
            "failure_reason": "no backend produced quality text",
            "attempts": [
                {
                    "backend": "pdftotext",
                    "outcome": "failed",
                    "pages_extracted": 0,
                    "pages_kept": 0,
                    "assembled_chars": 0,
                    "error": "pdftotext did not finish within 30s"
                },
                {
                    "backend": "lopdf",
                    "outcome": "rejected",
                    "pages_extracted": 2,
                    "pages_kept": 1,
                    "assembled_chars": 48,
                    "reason": "low_alphabetic_ratio"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_failed_summary_names_reason() {
        let s = summary(&failed_result(), None, false);
        assert_eq!(s, "Extraction failed: no backend produced quality text\n");
        assert_eq!(render(&failed_result()), "");
    }

    #[test]
    fn test_attempts_table() {
        let s = summary(&failed_result(), None, true);
        assert!(s.contains("Attempts:"));
        assert!(s.contains("did not finish within 30s"));
        assert!(s.contains("rejected"));
        assert!(s.contains("Too few alphabetic characters"));
    }

    #[test]
    fn test_metadata_skips_empty_fields() {
        let m = DocumentMetadata {
            page_count: 4,
            author: "J. Doe".into(),
            ..DocumentMetadata::default()
        };
        let s = format_metadata(&m);
        assert!(s.contains("Pages"));
        assert!(s.contains("J. Doe"));
        assert!(!s.contains("Title"));
    }
}
