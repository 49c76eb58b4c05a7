//! Host-facing summary of a finished encounter.

use crate::combatant::CombatantRef;
use crate::env::{InventorySnapshot, PartySnapshot};
use crate::event::CombatEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

impl CombatOutcome {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Post-combat state of one participating character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterResult {
    pub index: u32,
    pub hp: u32,
    pub mp: u32,
    /// Change relative to the pre-combat snapshot.
    pub hp_delta: i64,
    pub mp_delta: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyResult {
    pub reference: CombatantRef,
    pub template: String,
    pub defeated: bool,
}

/// Pre-combat snapshots handed back on defeat so the host can restore them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rollback {
    pub party: PartySnapshot,
    pub inventory: InventorySnapshot,
}

/// Everything the host needs once an encounter is over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub outcome: CombatOutcome,
    /// Copied from the encounter. Whether a defeat ends the game is up to the host.
    pub can_lose: bool,
    /// Reward id of the encounter, present on victory only.
    pub reward: Option<String>,
    pub rewards_granted: bool,
    pub characters: Vec<CharacterResult>,
    pub enemies: Vec<EnemyResult>,
    /// Inventory after combat, with consumed items removed.
    pub inventory: InventorySnapshot,
    pub events: Vec<CombatEvent>,
    /// Present on defeat only.
    pub rollback: Option<Rollback>,
}

impl CombatResult {
    pub fn is_victory(&self) -> bool {
        self.outcome == CombatOutcome::Victory
    }

    pub fn character(&self, index: u32) -> Option<&CharacterResult> {
        self.characters.iter().find(|c| c.index == index)
    }

    pub fn defeated_enemies(&self) -> impl Iterator<Item = &EnemyResult> {
        self.enemies.iter().filter(|e| e.defeated)
    }
}
