//! Enemy and guest template loader.

use std::path::Path;

use combat_core::{BestiarySnapshot, EnemyGroup, EnemyTemplate, GuestTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::catalog::ensure_unique;
use crate::loaders::{LoadResult, read_file};

/// Bestiary structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestiaryFile {
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    pub guests: Vec<GuestTemplate>,
    #[serde(default)]
    pub groups: Vec<EnemyGroup>,
}

impl BestiaryFile {
    /// Fails on duplicate ids and on groups naming templates that do not exist.
    pub fn into_snapshot(self) -> LoadResult<BestiarySnapshot> {
        ensure_unique("enemy", self.enemies.iter().map(|e| e.id.as_str()))?;
        ensure_unique("guest", self.guests.iter().map(|g| g.speaker.as_str()))?;
        ensure_unique("group", self.groups.iter().map(|g| g.id.as_str()))?;

        for group in &self.groups {
            if let Some(member) = group
                .members
                .iter()
                .find(|m| !self.enemies.iter().any(|e| e.id == m.template))
            {
                anyhow::bail!(
                    "group '{}' references unknown enemy '{}'",
                    group.id,
                    member.template
                );
            }
        }

        let mut snapshot = BestiarySnapshot::new();
        for enemy in self.enemies {
            snapshot = snapshot.with_enemy(enemy);
        }
        for guest in self.guests {
            snapshot = snapshot.with_guest(guest);
        }
        for group in self.groups {
            snapshot = snapshot.with_group(group);
        }
        Ok(snapshot)
    }
}

/// Loader for the bestiary from RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<BestiarySnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BestiarySnapshot> {
        let file: BestiaryFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;
        file.into_snapshot()
    }
}
