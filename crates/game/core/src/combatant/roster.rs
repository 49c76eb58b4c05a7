//! The set of profiles taking part in one encounter.

use super::{CombatantKind, CombatantProfile, CombatantRef};

/// Owns every combatant profile of an encounter, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    profiles: Vec<CombatantProfile>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: CombatantProfile) {
        self.profiles.push(profile);
    }

    pub fn get(&self, reference: &CombatantRef) -> Option<&CombatantProfile> {
        self.profiles.iter().find(|p| p.reference() == reference)
    }

    pub fn get_mut(&mut self, reference: &CombatantRef) -> Option<&mut CombatantProfile> {
        self.profiles.iter_mut().find(|p| p.reference() == reference)
    }

    pub fn contains(&self, reference: &CombatantRef) -> bool {
        self.get(reference).is_some()
    }

    /// Unknown references count as dead.
    pub fn is_alive(&self, reference: &CombatantRef) -> bool {
        self.get(reference).is_some_and(CombatantProfile::is_alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatantProfile> {
        self.profiles.iter()
    }

    pub fn of_kind(&self, kind: CombatantKind) -> impl Iterator<Item = &CombatantProfile> {
        self.profiles
            .iter()
            .filter(move |p| p.reference().kind() == kind)
    }

    pub fn living_of_kind(&self, kind: CombatantKind) -> impl Iterator<Item = &CombatantProfile> {
        self.of_kind(kind).filter(|p| p.is_alive())
    }

    pub fn living_count(&self, kind: CombatantKind) -> usize {
        self.living_of_kind(kind).count()
    }

    /// True once every enemy is at 0 HP.
    pub fn all_enemies_defeated(&self) -> bool {
        self.of_kind(CombatantKind::Enemy).all(CombatantProfile::is_dead)
    }

    /// True once every participating character is at 0 HP. Guests do not count.
    pub fn all_characters_down(&self) -> bool {
        self.of_kind(CombatantKind::Character)
            .all(CombatantProfile::is_dead)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
