//! Temporary effect registry.
//!
//! Effects are duration-limited modifiers attached to one combatant. Decay
//! is keyed to the owner's own turns: [`EffectRegistry::tick`] only touches
//! effects owned by the combatant who just acted.

use crate::combatant::CombatantRef;

/// Types of temporary effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Flat bonus added to defense.
    Defense,
    /// Damage-over-time marker placed by external scripting.
    Poison,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A single active effect. `remaining_turns` is always > 0 while stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub owner: CombatantRef,
    pub kind: EffectKind,
    pub value: u32,
    pub remaining_turns: u32,
}

/// All active effects of one encounter.
///
/// Holds at most one effect per `(owner, kind)` pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRegistry {
    effects: Vec<Effect>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an effect, replacing any existing one of the same owner and kind.
    ///
    /// A zero duration removes the existing effect and stores nothing.
    pub fn upsert(&mut self, owner: &CombatantRef, kind: EffectKind, value: u32, duration: u32) {
        if duration == 0 {
            self.remove(owner, kind);
            return;
        }

        match self
            .effects
            .iter_mut()
            .find(|e| &e.owner == owner && e.kind == kind)
        {
            Some(existing) => {
                existing.value = value;
                existing.remaining_turns = duration;
            }
            None => self.effects.push(Effect {
                owner: owner.clone(),
                kind,
                value,
                remaining_turns: duration,
            }),
        }
    }

    /// Sum of matching active effect values, 0 if none.
    pub fn value_for(&self, owner: &CombatantRef, kind: EffectKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| &e.owner == owner && e.kind == kind)
            .fold(0u32, |acc, e| acc.saturating_add(e.value))
    }

    pub fn get(&self, owner: &CombatantRef, kind: EffectKind) -> Option<&Effect> {
        self.effects
            .iter()
            .find(|e| &e.owner == owner && e.kind == kind)
    }

    /// Decrements every effect owned by `just_acted` and drops the expired ones.
    pub fn tick(&mut self, just_acted: &CombatantRef) {
        for effect in self.effects.iter_mut().filter(|e| &e.owner == just_acted) {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
        }
        self.effects.retain(|e| e.remaining_turns > 0);
    }

    pub fn remove(&mut self, owner: &CombatantRef, kind: EffectKind) {
        self.effects
            .retain(|e| !(&e.owner == owner && e.kind == kind));
    }

    pub fn effects_of<'a>(&'a self, owner: &'a CombatantRef) -> impl Iterator<Item = &'a Effect> + 'a {
        self.effects.iter().filter(move |e| &e.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
