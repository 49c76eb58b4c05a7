//! Traits describing read-only encounter data.
//!
//! Oracles expose equipment/consumable definitions and enemy/guest templates.
//! The [`CombatEnv`] aggregate bundles them so the session can access
//! everything it needs without hard coupling to concrete implementations.
//! Snapshots handed in by the host (party, inventory, encounter) also live
//! here since they are inputs, never engine state.
mod bestiary;
mod catalog;
mod party;
mod rng;
mod snapshot;

pub use bestiary::{BestiaryOracle, EnemyGroup, EnemyTemplate, GroupMember, GuestTemplate};
pub use catalog::{
    ArmorDefinition, CatalogOracle, EffectEntry, EffectMeaning, ItemDefinition, SpellDefinition,
    WeaponDefinition,
};
pub use party::{CharacterSnapshot, EncounterDefinition, InventorySnapshot, PartySnapshot};
pub use rng::{PcgRng, RngOracle, ScriptedRng, shuffle};
pub use snapshot::{BestiarySnapshot, CatalogSnapshot};

/// Aggregates the read-only oracles required by the session.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    catalog: &'a dyn CatalogOracle,
    bestiary: &'a dyn BestiaryOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, bestiary: &'a dyn BestiaryOracle) -> Self {
        Self { catalog, bestiary }
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn bestiary(&self) -> &'a dyn BestiaryOracle {
        self.bestiary
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv").finish_non_exhaustive()
    }
}
