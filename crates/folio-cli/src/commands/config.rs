use folio_core::config::builtin;
use folio_core::config::schema::PipelineConfig;
use folio_core::error::FolioError;
use std::path::Path;

pub fn presets() -> Result<(), FolioError> {
    println!("Available predefined configs:\n");
    for name in builtin::PRESETS {
        let config = builtin::load_preset(name)?;
        println!("  {:<8} backends: {}", name, config.backends.join(" > "));
        if let Some(ref desc) = config.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), FolioError> {
    let config = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), FolioError> {
    let config = folio_core::config::load_config(file)?;

    println!(
        "Config '{}' is valid.",
        config.name.as_deref().unwrap_or("(unnamed)")
    );
    println!("  Backends: {}", config.backends.join(" > "));
    println!("  Timeout per backend: {}s", config.backend_timeout_secs);
    println!(
        "  Quality: min {} chars, alphabetic ratio >= {}, repetition share <= {} above {} lines",
        config.quality.min_chars,
        config.quality.min_alpha_ratio,
        config.quality.repetition_max_share,
        config.quality.repetition_min_lines
    );

    let warnings = warnings_for(&config);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Settings that load fine but probably don't do what the author meant.
fn warnings_for(config: &PipelineConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.backends.len() == 1 {
        warnings.push(format!(
            "only '{}' is configured, so nothing can be tried if it fails",
            config.backends[0]
        ));
    }
    if config.min_assembled_chars > config.quality.min_chars {
        warnings.push(format!(
            "min_assembled_chars ({}) exceeds quality.min_chars ({}); short text is skipped before it is validated",
            config.min_assembled_chars, config.quality.min_chars
        ));
    }
    if config.repetition.min_line_chars == 0 {
        warnings.push("repetition.min_line_chars is 0; short lines such as list markers will be suppressed".into());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_no_warnings() {
        for name in builtin::PRESETS {
            let config = builtin::load_preset(name).unwrap();
            assert!(warnings_for(&config).is_empty(), "preset {name}");
        }
    }

    #[test]
    fn test_single_backend_warns() {
        let config = PipelineConfig {
            backends: vec!["lopdf".into()],
            ..PipelineConfig::default()
        };
        let warnings = warnings_for(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("lopdf"));
    }
}
