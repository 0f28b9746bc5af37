//! Decision-core tuning loader.

use std::path::Path;

use game_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AiConfig`] from TOML files.
///
/// Every table and field is optional; anything left out keeps its default.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file.
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse tuning from TOML text.
    pub fn from_str(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Write tuning to a TOML file.
    pub fn save(path: &Path, config: &AiConfig) -> LoadResult<()> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config TOML: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
