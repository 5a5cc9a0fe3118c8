//! Effective settings: `society.toml` values with CLI overrides applied.

use std::path::{Path, PathBuf};

use society_config::{load_config, ConfigError, SocietyConfig, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Settings every command works from.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Cache root directory.
    pub cache_dir: PathBuf,
    /// Source extensions used to expand directory arguments.
    pub extensions: Vec<String>,
    /// Report format name.
    pub format: String,
    /// Report output path, if configured.
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Loads the configuration named by `global` (or `society.toml` in the
    /// working directory) and applies the global overrides.
    pub fn resolve(global: &GlobalArgs) -> Result<Self, ConfigError> {
        let path = global
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let config = load_config(&path)?;
        log::debug!("configuration loaded from {}", path.display());
        Ok(Self::from_config(config, global.cache_dir.as_deref()))
    }

    fn from_config(config: SocietyConfig, cache_dir: Option<&Path>) -> Self {
        Self {
            cache_dir: cache_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(config.cache.dir)),
            extensions: config.analysis.extensions,
            format: config.report.format,
            output: config.report.output.map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(config: Option<PathBuf>, cache_dir: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            config,
            cache_dir,
        }
    }

    #[test]
    fn missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            Settings::resolve(&global(Some(dir.path().join("society.toml")), None)).unwrap();
        assert_eq!(settings.cache_dir, PathBuf::from("doc/society/cache"));
        assert_eq!(settings.extensions, vec!["rb"]);
        assert_eq!(settings.format, "html");
        assert!(settings.output.is_none());
    }

    #[test]
    fn file_values_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("society.toml");
        std::fs::write(
            &path,
            "[cache]\ndir = \"c\"\n[report]\nformat = \"json\"\noutput = \"g.json\"\n",
        )
        .unwrap();
        let settings = Settings::resolve(&global(Some(path), None)).unwrap();
        assert_eq!(settings.cache_dir, PathBuf::from("c"));
        assert_eq!(settings.format, "json");
        assert_eq!(settings.output, Some(PathBuf::from("g.json")));
    }

    #[test]
    fn cache_dir_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("society.toml");
        std::fs::write(&path, "[cache]\ndir = \"from-file\"\n").unwrap();
        let settings =
            Settings::resolve(&global(Some(path), Some(PathBuf::from("from-flag")))).unwrap();
        assert_eq!(settings.cache_dir, PathBuf::from("from-flag"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("society.toml");
        std::fs::write(&path, "[analysis]\nextensions = []\n").unwrap();
        assert!(Settings::resolve(&global(Some(path), None)).is_err());
    }
}
