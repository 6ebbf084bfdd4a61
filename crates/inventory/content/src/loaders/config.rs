//! Transaction configuration loader.

use std::path::Path;

use inventory_core::TransactionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for transaction configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`TransactionConfig::default`].
    pub fn load(path: &Path) -> LoadResult<TransactionConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;

        tracing::info!(
            path = %path.display(),
            max_actions = config.max_actions,
            "loaded transaction config"
        );
        Ok(config)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<TransactionConfig> {
        let config: TransactionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.max_actions > 0,
            "max_actions must allow at least one action"
        );
        Ok(config)
    }
}
