pub mod builtin;
pub mod schema;

use crate::error::FolioError;
use crate::extraction::BACKENDS;
use schema::PipelineConfig;
use std::collections::HashSet;
use std::path::Path;

/// Load a pipeline config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, FolioError> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a pipeline config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, FolioError> {
    let config: PipelineConfig = serde_json::from_str(json).map_err(|e| FolioError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a pipeline config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<PipelineConfig, FolioError> {
    let config: PipelineConfig = serde_json::from_str(json).map_err(FolioError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &PipelineConfig) -> Result<(), FolioError> {
    if config.backends.is_empty() {
        return Err(FolioError::ConfigInvalid("backends must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for name in &config.backends {
        if !BACKENDS.contains(&name.as_str()) {
            return Err(FolioError::ConfigInvalid(format!(
                "unknown backend '{}' (expected one of: {})",
                name,
                BACKENDS.join(", ")
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(FolioError::ConfigInvalid(format!(
                "backend '{}' listed more than once",
                name
            )));
        }
    }

    if config.backend_timeout_secs == 0 {
        return Err(FolioError::ConfigInvalid(
            "backend_timeout_secs must be at least 1".into(),
        ));
    }

    let quality = &config.quality;
    for (field, value) in [
        ("quality.repetition_max_share", quality.repetition_max_share),
        ("quality.min_alpha_ratio", quality.min_alpha_ratio),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(FolioError::ConfigInvalid(format!(
                "{field} must be between 0 and 1, got {value}"
            )));
        }
    }

    if config.dedupe.signature_prefix_chars == 0 {
        return Err(FolioError::ConfigInvalid(
            "dedupe.signature_prefix_chars must be at least 1".into(),
        ));
    }

    if config.repetition.min_repetitions < 2 {
        return Err(FolioError::ConfigInvalid(
            "repetition.min_repetitions must be at least 2".into(),
        ));
    }

    if config.repetition.keep_occurrences == 0 {
        return Err(FolioError::ConfigInvalid(
            "repetition.keep_occurrences must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = parse_config_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "backends": ["lopdf", "pdftotext"],
            "quality": { "min_alpha_ratio": 0.5 }
        }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.backends, vec!["lopdf", "pdftotext"]);
        assert_eq!(config.quality.min_alpha_ratio, 0.5);
        assert_eq!(config.quality.min_chars, 10);
        assert_eq!(config.repetition.min_repetitions, 3);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let json = r#"{ "backends": ["pymupdf"] }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(FolioError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_duplicate_backend_rejected() {
        let json = r#"{ "backends": ["lopdf", "lopdf"] }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_empty_backends_rejected() {
        assert!(parse_config_str(r#"{ "backends": [] }"#).is_err());
    }

    #[test]
    fn test_ratio_out_of_range_rejected() {
        let json = r#"{ "quality": { "min_alpha_ratio": 1.5 } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_config_str(r#"{ "backend_timeout_secs": 0 }"#).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse_config_str(r#"{ "backend": ["lopdf"] }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/folio.json")).unwrap_err();
        assert!(matches!(err, FolioError::ConfigLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/folio.json"));
    }
}
