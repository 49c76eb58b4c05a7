//! Party, inventory and encounter loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{EncounterDefinition, InventorySnapshot, PartySnapshot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Party file structure for RON files.
///
/// Stands in for the snapshots a game backend would hand over: the current
/// party, its inventory, and the encounters that can be started from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyFile {
    pub party: PartySnapshot,
    #[serde(default)]
    pub inventory: InventorySnapshot,
    #[serde(default)]
    pub encounters: BTreeMap<String, EncounterDefinition>,
}

impl PartyFile {
    pub fn encounter(&self, name: &str) -> LoadResult<&EncounterDefinition> {
        self.encounters
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown encounter '{}'", name))
    }
}

/// Loader for party data from RON files.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartyFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PartyFile> {
        let file: PartyFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        let mut indices: Vec<u32> = file.party.characters.iter().map(|c| c.index).collect();
        indices.sort_unstable();
        if indices.windows(2).any(|w| w[0] == w[1]) {
            anyhow::bail!("duplicate character index in party");
        }
        Ok(file)
    }
}
