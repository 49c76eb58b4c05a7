//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::{BestiarySnapshot, CatalogSnapshot, CombatConfig};

use crate::loaders::{
    BestiaryLoader, CatalogLoader, ConfigLoader, LoadResult, PartyFile, PartyLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// ├── bestiary.ron
/// └── party.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `config.toml`, falling back to defaults when absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load equipment, items and spells from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load enemy/guest templates and enemy groups from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<BestiarySnapshot> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    /// Load party, inventory and encounters from `party.ron`.
    pub fn load_party(&self) -> LoadResult<PartyFile> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
