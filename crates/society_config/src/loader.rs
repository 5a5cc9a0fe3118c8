//! Configuration file loading and validation.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::SocietyConfig;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "society.toml";

/// Loads and validates the configuration at `path`.
///
/// A missing file is not an error and yields the defaults.
pub fn load_config(path: &Path) -> Result<SocietyConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(SocietyConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses and validates a `society.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<SocietyConfig, ConfigError> {
    let config: SocietyConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &SocietyConfig) -> Result<(), ConfigError> {
    if config.cache.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "cache.dir must not be empty".to_string(),
        ));
    }
    if config.analysis.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.extensions must list at least one extension".to_string(),
        ));
    }
    for ext in &config.analysis.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "invalid extension '{ext}' (expected a name like \"rb\")"
            )));
        }
    }
    if config.report.format.is_empty() {
        return Err(ConfigError::ValidationError(
            "report.format must not be empty".to_string(),
        ));
    }
    Ok(())
}
