//! Player and AI actions.
//!
//! - `ActionType`: the four things a combatant can do on its turn
//! - `ActionCommand`: an action bound to an actor, a target and an optional catalog id
//! - `ActionResolver`: computes and applies the outcome of a command
//! - `ActionError`: synchronous rejections (no state change, no event)

mod error;
mod resolver;

pub use error::ActionError;
pub use resolver::ActionResolver;

use crate::combatant::CombatantRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    Attack,
    Item,
    Spell,
    Defend,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// True if the action references an item or spell id.
    pub const fn uses_catalog(&self) -> bool {
        matches!(self, Self::Item | Self::Spell)
    }
}

/// A fully specified action for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCommand {
    pub actor: CombatantRef,
    pub action: ActionType,
    pub target: CombatantRef,
    pub item_or_spell: Option<String>,
}

impl ActionCommand {
    pub fn attack(actor: CombatantRef, target: CombatantRef) -> Self {
        Self {
            actor,
            action: ActionType::Attack,
            target,
            item_or_spell: None,
        }
    }

    pub fn defend(actor: CombatantRef, target: CombatantRef) -> Self {
        Self {
            actor,
            action: ActionType::Defend,
            target,
            item_or_spell: None,
        }
    }

    pub fn item(actor: CombatantRef, target: CombatantRef, item: impl Into<String>) -> Self {
        Self {
            actor,
            action: ActionType::Item,
            target,
            item_or_spell: Some(item.into()),
        }
    }

    pub fn spell(actor: CombatantRef, target: CombatantRef, spell: impl Into<String>) -> Self {
        Self {
            actor,
            action: ActionType::Spell,
            target,
            item_or_spell: Some(spell.into()),
        }
    }
}
