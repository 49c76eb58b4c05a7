//! Equipment and consumable catalog loader.

use std::path::Path;

use combat_core::{
    ArmorDefinition, CatalogSnapshot, ItemDefinition, SpellDefinition, WeaponDefinition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files. Entries are listed, not keyed, so ids
/// appear once per record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub weapons: Vec<WeaponDefinition>,
    #[serde(default)]
    pub armor: Vec<ArmorDefinition>,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    #[serde(default)]
    pub spells: Vec<SpellDefinition>,
}

impl CatalogFile {
    /// Fails on duplicate ids within one section.
    pub fn into_snapshot(self) -> LoadResult<CatalogSnapshot> {
        ensure_unique("weapon", self.weapons.iter().map(|w| w.id.as_str()))?;
        ensure_unique("armor", self.armor.iter().map(|a| a.id.as_str()))?;
        ensure_unique("item", self.items.iter().map(|i| i.id.as_str()))?;
        ensure_unique("spell", self.spells.iter().map(|s| s.id.as_str()))?;

        let mut snapshot = CatalogSnapshot::new();
        for weapon in self.weapons {
            snapshot = snapshot.with_weapon(weapon);
        }
        for armor in self.armor {
            snapshot = snapshot.with_armor(armor);
        }
        for item in self.items {
            snapshot = snapshot.with_item(item);
        }
        for spell in self.spells {
            snapshot = snapshot.with_spell(spell);
        }
        Ok(snapshot)
    }
}

/// Loader for the catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CatalogSnapshot> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        file.into_snapshot()
    }
}

pub(crate) fn ensure_unique<'a>(
    section: &str,
    ids: impl Iterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("duplicate {} id '{}'", section, id);
        }
    }
    Ok(())
}
