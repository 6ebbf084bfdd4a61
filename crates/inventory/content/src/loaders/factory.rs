//! Content factory for building engine inputs from data files.

use std::path::{Path, PathBuf};

use inventory_core::TransactionConfig;

use crate::loaders::{ConfigLoader, LoadResult, LoadedRecipes, RecipeLoader};

/// Content factory that loads all engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── recipes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load transaction configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<TransactionConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(TransactionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the recipe catalog from `recipes.ron`.
    pub fn load_recipes(&self) -> LoadResult<LoadedRecipes> {
        let path = self.data_dir.join("recipes.ron");
        RecipeLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
