//! Tractor configuration loader.

use std::path::Path;

use tractor_core::TractorConfig;

use crate::loaders::{LoadResult, read_file};

/// On-disk formats [`ConfigLoader`] understands, named by file extension.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfigFormat {
    Toml,
    Ron,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| anyhow::anyhow!("Config file {} has no extension", path.display()))?;
        extension
            .parse()
            .map_err(|_| anyhow::anyhow!("Unsupported config format: {}", extension))
    }
}

/// Loader for tractor configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file, choosing the parser by extension.
    ///
    /// Missing fields fall back to their defaults. Values that parse but are
    /// out of range (a negative radius, a zero interval) are accepted here and
    /// rejected later, with a warning, when the tractor is built.
    pub fn load(path: &Path) -> LoadResult<TractorConfig> {
        let format = ConfigFormat::from_path(path)?;
        let content = read_file(path)?;
        let config = Self::parse(&content, format)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!(path = %path.display(), ?format, "loaded tractor config");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<TractorConfig> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(TractorConfig::default());
        }
        Self::load(path)
    }

    /// Parse config text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> LoadResult<TractorConfig> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?,
            ConfigFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config RON: {}", e))?,
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config JSON: {}", e))?,
        };
        Ok(config)
    }
}
