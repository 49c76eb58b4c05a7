//! Combatant identity, runtime profile and the per-encounter roster.

mod builders;
mod profile;
mod reference;
mod roster;

pub use profile::{CombatantProfile, CombatantRole};
pub use reference::{CombatantKind, CombatantRef, Faction};
pub use roster::Roster;
