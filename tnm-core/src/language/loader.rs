//! Embedded language configurations with lazy, cached parsing

use super::config::LanguageConfig;
use crate::error::{CoreError, Result};
use std::sync::OnceLock;

static LANGUAGE_CONFIGS: OnceLock<std::result::Result<Vec<LanguageConfig>, String>> =
    OnceLock::new();

macro_rules! embed_language_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_configs() -> std::result::Result<Vec<LanguageConfig>, String> {
    let embedded_configs = [
        embed_language_config!("de", "../../configs/languages/german.toml"),
        embed_language_config!("en", "../../configs/languages/english.toml"),
    ];

    let mut configs = Vec::with_capacity(embedded_configs.len());
    for (code, toml_content) in embedded_configs {
        let config = LanguageConfig::from_toml_str(toml_content)
            .map_err(|e| format!("Failed to parse {code} config: {e}"))?;

        // Validate that the config code matches
        if config.metadata.code != code {
            return Err(format!(
                "Config code mismatch: expected {}, got {}",
                code, config.metadata.code
            ));
        }

        log::debug!("loaded embedded language config '{code}'");
        configs.push(config);
    }

    Ok(configs)
}

fn embedded() -> Result<&'static [LanguageConfig]> {
    LANGUAGE_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_deref()
        .map_err(|e| CoreError::Configuration(e.clone()))
}

/// Look up a built-in language by code, name or alias
pub fn get_language_config(name: &str) -> Result<&'static LanguageConfig> {
    embedded()?
        .iter()
        .find(|config| config.answers_to(name))
        .ok_or_else(|| CoreError::UnsupportedLanguage(name.to_string()))
}

/// Codes of all built-in languages
pub fn list_available_languages() -> Vec<&'static str> {
    embedded()
        .map(|configs| configs.iter().map(|c| c.metadata.code.as_str()).collect())
        .unwrap_or_default()
}
