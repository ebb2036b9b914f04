use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Thresholds for collapsing header/footer/watermark lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepetitionPolicy {
    /// A line must occur at least this many times to be collapsed.
    pub min_repetitions: usize,
    /// Lines whose trimmed length is at or below this are never collapsed.
    pub min_line_chars: usize,
    /// How many occurrences of a collapsed line survive.
    pub keep_occurrences: usize,
}

impl Default for RepetitionPolicy {
    fn default() -> Self {
        RepetitionPolicy {
            min_repetitions: 3,
            min_line_chars: 10,
            keep_occurrences: 2,
        }
    }
}

/// Remove excess copies of lines that recur across the whole text.
///
/// Only the first `keep_occurrences` copies of a repetitive line are emitted;
/// every other line passes through untouched.
pub fn suppress(text: &str, policy: &RepetitionPolicy) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            *counts.entry(trimmed).or_default() += 1;
        }
    }

    let is_repetitive = |trimmed: &str| {
        counts.get(trimmed).copied().unwrap_or(0) >= policy.min_repetitions
            && trimmed.chars().count() > policy.min_line_chars
    };

    if !counts.keys().any(|line| is_repetitive(*line)) {
        return text.to_string();
    }

    let mut emitted: HashMap<&str, usize> = HashMap::new();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    for line in &lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() && is_repetitive(trimmed) {
            let seen = emitted.entry(trimmed).or_default();
            *seen += 1;
            if *seen > policy.keep_occurrences {
                tracing::debug!(line = %preview(trimmed), "removing repetitive content");
                continue;
            }
        }
        kept.push(line);
    }

    kept.join("\n")
}

fn preview(line: &str) -> String {
    line.chars().take(50).collect()
}
