use crate::model::PageSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Number of leading characters hashed into a page signature.
pub const DEFAULT_SIGNATURE_PREFIX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupePolicy {
    pub signature_prefix_chars: usize,
}

impl Default for DedupePolicy {
    fn default() -> Self {
        DedupePolicy {
            signature_prefix_chars: DEFAULT_SIGNATURE_PREFIX_CHARS,
        }
    }
}

/// SHA-256 of the first `prefix_chars` characters of the trimmed page text.
pub fn page_signature(cleaned_text: &str, prefix_chars: usize) -> [u8; 32] {
    let trimmed = cleaned_text.trim();
    let end = trimmed
        .char_indices()
        .nth(prefix_chars)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    Sha256::digest(trimmed[..end].as_bytes()).into()
}

/// Drop empty pages and pages whose signature repeats an earlier page.
///
/// Surviving pages keep their relative order. Near-identical pages that differ
/// only after the signature prefix are treated as duplicates; pages that differ
/// inside the prefix are kept even if they are otherwise the same.
pub fn dedupe(mut pages: PageSet, prefix_chars: usize) -> PageSet {
    let mut seen: HashSet<[u8; 32]> = HashSet::new();

    pages.retain(|page| {
        if page.cleaned_text.trim().is_empty() {
            tracing::debug!(page = page.page_number, "dropping empty page");
            return false;
        }
        let signature = page_signature(&page.cleaned_text, prefix_chars);
        if seen.insert(signature) {
            true
        } else {
            tracing::info!(page = page.page_number, "skipping duplicate page");
            false
        }
    });

    pages
}
