use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Acceptance thresholds for assembled document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityPolicy {
    /// Minimum trimmed length in characters.
    pub min_chars: usize,
    /// The repetition check only applies above this many non-empty lines.
    pub repetition_min_lines: usize,
    /// Reject when the most frequent line exceeds this share of all lines.
    pub repetition_max_share: f64,
    /// Reject when alphabetic characters make up less than this share of the text.
    pub min_alpha_ratio: f64,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        QualityPolicy {
            min_chars: 10,
            repetition_min_lines: 10,
            repetition_max_share: 0.5,
            min_alpha_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityReason {
    TooShort,
    ExcessiveRepetition,
    LowAlphabeticRatio,
    Ok,
}

impl fmt::Display for QualityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityReason::TooShort => write!(f, "Text too short"),
            QualityReason::ExcessiveRepetition => write!(f, "Excessive repetition detected"),
            QualityReason::LowAlphabeticRatio => write!(f, "Too few alphabetic characters"),
            QualityReason::Ok => write!(f, "Quality OK"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub accepted: bool,
    pub reason: QualityReason,
}

impl QualityVerdict {
    fn reject(reason: QualityReason) -> Self {
        QualityVerdict {
            accepted: false,
            reason,
        }
    }

    fn accept() -> Self {
        QualityVerdict {
            accepted: true,
            reason: QualityReason::Ok,
        }
    }
}

/// Decide whether assembled text is worth returning. The first failing rule wins.
pub fn validate(text: &str, policy: &QualityPolicy) -> QualityVerdict {
    if text.trim().chars().count() < policy.min_chars {
        return QualityVerdict::reject(QualityReason::TooShort);
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() > policy.repetition_min_lines {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for line in &lines {
            *counts.entry(*line).or_default() += 1;
        }
        let most_common = counts.values().copied().max().unwrap_or(0);
        if most_common as f64 > lines.len() as f64 * policy.repetition_max_share {
            return QualityVerdict::reject(QualityReason::ExcessiveRepetition);
        }
    }

    let total = text.chars().count();
    let alphabetic = text.chars().filter(|c| c.is_alphabetic()).count();
    if total > 0 && (alphabetic as f64) / (total as f64) < policy.min_alpha_ratio {
        return QualityVerdict::reject(QualityReason::LowAlphabeticRatio);
    }

    QualityVerdict::accept()
}
