use crate::cleanup::dedupe::DedupePolicy;
use crate::cleanup::repetition::RepetitionPolicy;
use crate::extraction::BACKENDS;
use crate::quality::QualityPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the extraction cascade can be tuned with.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backends to try, best first.
    pub backends: Vec<String>,
    /// Per-backend wall clock limit.
    pub backend_timeout_secs: u64,
    /// Assembled text at or below this length skips validation entirely.
    pub min_assembled_chars: usize,
    pub quality: QualityPolicy,
    pub dedupe: DedupePolicy,
    pub repetition: RepetitionPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            name: None,
            description: None,
            backends: BACKENDS.iter().map(|s| s.to_string()).collect(),
            backend_timeout_secs: 30,
            min_assembled_chars: 10,
            quality: QualityPolicy::default(),
            dedupe: DedupePolicy::default(),
            repetition: RepetitionPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}
