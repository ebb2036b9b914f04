use crate::config::schema::PipelineConfig;
use crate::config::validate_config;
use crate::error::FolioError;

const DEFAULT_JSON: &str = include_str!("../../../../config/presets/default.json");
const STRICT_JSON: &str = include_str!("../../../../config/presets/strict.json");

/// Available predefined configs.
pub const PRESETS: &[&str] = &["default", "strict"];

/// Load a predefined config by name.
pub fn load_preset(name: &str) -> Result<PipelineConfig, FolioError> {
    let json = match name {
        "default" => DEFAULT_JSON,
        "strict" => STRICT_JSON,
        _ => {
            return Err(FolioError::ConfigInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let config: PipelineConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            let config = load_preset(name).unwrap();
            assert_eq!(config.name.as_deref(), Some(*name));
        }
    }

    #[test]
    fn test_default_preset_matches_builtin_defaults() {
        let preset = load_preset("default").unwrap();
        let defaults = PipelineConfig {
            name: preset.name.clone(),
            description: preset.description.clone(),
            ..PipelineConfig::default()
        };
        assert_eq!(preset, defaults);
    }

    #[test]
    fn test_strict_checks_short_documents_for_repetition() {
        let strict = load_preset("strict").unwrap();
        assert!(strict.quality.repetition_min_lines < 10);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
