//! Snapshots handed in by the host at encounter start.
//!
//! The host owns persistence. These are plain values fetched before combat and
//! copied into the session; the session never writes back to them.

use std::collections::BTreeMap;

use crate::turn::TurnOrderPolicy;

/// Read-only stats of one player character at encounter start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub index: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<String>,
    pub level: u32,
    /// Unavailable characters sit the encounter out.
    #[cfg_attr(feature = "serde", serde(default = "available_by_default"))]
    pub available: bool,
}

#[cfg(feature = "serde")]
fn available_by_default() -> bool {
    true
}

impl CharacterSnapshot {
    /// A fresh character at full HP/MP with no equipment.
    pub fn new(index: u32, max_hp: u32, max_mp: u32, attack: u32, defense: u32) -> Self {
        Self {
            index,
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            attack,
            defense,
            weapon: None,
            armor: None,
            level: 1,
            available: true,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_mp(mut self, mp: u32) -> Self {
        self.mp = mp;
        self
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    pub fn with_armor(mut self, armor: impl Into<String>) -> Self {
        self.armor = Some(armor.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Party composition at encounter start. Either list may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: Vec<CharacterSnapshot>,
    /// Speaker ids of active guests, resolved through the bestiary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub guests: Vec<String>,
}

impl PartySnapshot {
    pub fn new(characters: Vec<CharacterSnapshot>) -> Self {
        Self {
            characters,
            guests: Vec::new(),
        }
    }

    pub fn with_guest(mut self, speaker: impl Into<String>) -> Self {
        self.guests.push(speaker.into());
        self
    }

    pub fn available_characters(&self) -> impl Iterator<Item = &CharacterSnapshot> {
        self.characters.iter().filter(|c| c.available)
    }
}

/// Remaining item counts keyed by item id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InventorySnapshot {
    counts: BTreeMap<String, u32>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: impl Into<String>, count: u32) -> Self {
        self.counts.insert(id.into(), count);
        self
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Removes one unit. Returns false (and changes nothing) when none remain.
    pub fn consume(&mut self, id: &str) -> bool {
        match self.counts.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

/// Everything needed to stage one encounter besides the party itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDefinition {
    /// Enemy group id, resolved through the bestiary.
    pub group: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn_order: TurnOrderPolicy,
    /// Surfaced in the result; does not prevent the Defeat transition.
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_lose: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<String>,
}

impl EncounterDefinition {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            turn_order: TurnOrderPolicy::default(),
            can_lose: false,
            reward: None,
        }
    }

    pub fn with_turn_order(mut self, policy: TurnOrderPolicy) -> Self {
        self.turn_order = policy;
        self
    }

    pub fn with_can_lose(mut self, can_lose: bool) -> Self {
        self.can_lose = can_lose;
        self
    }

    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = Some(reward.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_consume_stops_at_zero() {
        let mut inventory = InventorySnapshot::new().with_item("potion", 1);
        assert!(inventory.consume("potion"));
        assert_eq!(inventory.count("potion"), 0);
        assert!(!inventory.consume("potion"));
        assert!(!inventory.consume("ether"));
        assert_eq!(inventory.count("ether"), 0);
    }

    #[test]
    fn unavailable_characters_are_filtered() {
        let party = PartySnapshot::new(vec![
            CharacterSnapshot::new(0, 100, 20, 10, 2),
            CharacterSnapshot::new(1, 80, 40, 8, 1).unavailable(),
        ]);
        let ids: Vec<u32> = party.available_characters().map(|c| c.index).collect();
        assert_eq!(ids, vec![0]);
    }
}
