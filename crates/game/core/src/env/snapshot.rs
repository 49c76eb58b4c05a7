//! In-memory oracle implementations.
//!
//! Hosts that already hold content in memory (or that loaded it through
//! `combat-content`) wrap it in these snapshots and hand them to the engine.

use std::collections::BTreeMap;

use super::{
    ArmorDefinition, BestiaryOracle, CatalogOracle, EnemyGroup, EnemyTemplate, GuestTemplate,
    ItemDefinition, SpellDefinition, WeaponDefinition,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Catalog backed by id-keyed maps.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: BTreeMap<String, WeaponDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: BTreeMap<String, ArmorDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: BTreeMap<String, ItemDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: BTreeMap<String, SpellDefinition>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, weapon: WeaponDefinition) -> Self {
        self.weapons.insert(weapon.id.clone(), weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorDefinition) -> Self {
        self.armor.insert(armor.id.clone(), armor);
        self
    }

    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.insert(spell.id.clone(), spell);
        self
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn weapon(&self, id: &str) -> Option<WeaponDefinition> {
        self.weapons.get(id).cloned()
    }

    fn armor(&self, id: &str) -> Option<ArmorDefinition> {
        self.armor.get(id).cloned()
    }

    fn item(&self, id: &str) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }

    fn spell(&self, id: &str) -> Option<SpellDefinition> {
        self.spells.get(id).cloned()
    }
}

/// Bestiary backed by id-keyed maps.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestiarySnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub groups: BTreeMap<String, EnemyGroup>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: BTreeMap<String, EnemyTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guests: BTreeMap<String, GuestTemplate>,
}

impl BestiarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: EnemyGroup) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.enemies.insert(enemy.id.clone(), enemy);
        self
    }

    pub fn with_guest(mut self, guest: GuestTemplate) -> Self {
        self.guests.insert(guest.speaker.clone(), guest);
        self
    }
}

impl BestiaryOracle for BestiarySnapshot {
    fn group(&self, id: &str) -> Option<EnemyGroup> {
        self.groups.get(id).cloned()
    }

    fn enemy(&self, template: &str) -> Option<EnemyTemplate> {
        self.enemies.get(template).cloned()
    }

    fn guest(&self, speaker: &str) -> Option<GuestTemplate> {
        self.guests.get(speaker).cloned()
    }
}
