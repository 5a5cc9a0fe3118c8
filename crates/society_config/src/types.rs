//! Configuration types deserialized from `society.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `society.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocietyConfig {
    /// Where per-file analysis results are kept.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Which files the analyzer consumes.
    #[serde(default)]
    pub analysis: AnalysisSettings,
    /// Report format and destination.
    #[serde(default)]
    pub report: ReportSettings,
}

/// The `[cache]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    /// Cache root directory.
    pub dir: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: society_cache::DEFAULT_CACHE_DIR.to_string(),
        }
    }
}

/// The `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Extensions, without the leading dot, picked up when a directory is
    /// given as input.
    pub extensions: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["rb".to_string()],
        }
    }
}

/// The `[report]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    /// Format name looked up in the report registry.
    pub format: String,
    /// Output path. When unset the renderer picks its own destination.
    pub output: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: "html".to_string(),
            output: None,
        }
    }
}
