//! Per-kind profile construction.
//!
//! Each kind derives its attack spread and defense from a different source:
//! characters from their equipment, enemies and guests from their templates.

use crate::env::{CatalogOracle, CharacterSnapshot, EnemyTemplate, GuestTemplate};
use crate::threat::ThreatTable;

use super::{CombatantProfile, CombatantRef, CombatantRole};

impl CombatantProfile {
    /// Builds a character profile from its read-only stats and equipment.
    ///
    /// Variance comes from the equipped weapon and the armor's defense is added
    /// to the character's own. Unknown equipment ids contribute nothing.
    pub fn from_character(snapshot: &CharacterSnapshot, catalog: &dyn CatalogOracle) -> Self {
        let attack_variance = snapshot
            .weapon
            .as_deref()
            .and_then(|id| catalog.weapon(id))
            .map_or(0.0, |w| w.attack_variance);
        let armor_defense = snapshot
            .armor
            .as_deref()
            .and_then(|id| catalog.armor(id))
            .map_or(0, |a| a.defense);

        Self::new(
            CombatantRef::Character(snapshot.index),
            snapshot.hp,
            snapshot.max_hp,
            snapshot.mp,
            snapshot.max_mp,
            snapshot.attack,
            attack_variance,
            snapshot.defense.saturating_add(armor_defense),
            CombatantRole::Character {
                level: snapshot.level,
            },
        )
    }

    /// Builds a fresh enemy at full HP/MP with an empty threat table.
    pub fn from_enemy(id: impl Into<String>, template: &EnemyTemplate) -> Self {
        Self::new(
            CombatantRef::Enemy(id.into()),
            template.hp,
            template.hp,
            template.mp,
            template.mp,
            template.attack,
            template.attack_variance,
            template.defense,
            CombatantRole::Enemy {
                template: template.id.clone(),
                threat: ThreatTable::new(),
            },
        )
    }

    /// Builds a fresh guest at full HP/MP.
    pub fn from_guest(template: &GuestTemplate) -> Self {
        Self::new(
            CombatantRef::Guest(template.speaker.clone()),
            template.hp,
            template.hp,
            template.mp,
            template.mp,
            template.attack,
            template.attack_variance,
            template.defense,
            CombatantRole::Guest,
        )
    }
}
