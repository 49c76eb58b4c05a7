//! Deterministic turn-based combat rules.
//!
//! `combat-core` owns the combatant model, action arithmetic, threat-based
//! targeting, temporary effects and the turn state machine. It performs no
//! I/O: encounter data arrives through the oracle traits in [`env`], and the
//! only output is the ordered [`CombatEvent`] log plus a [`CombatResult`].
//! All mutation flows through [`session::CombatSession`].
pub mod action;
pub mod combatant;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod event;
pub mod session;
pub mod targeting;
pub mod threat;
pub mod turn;

pub use action::{ActionCommand, ActionError, ActionResolver, ActionType};
pub use combatant::{CombatantKind, CombatantProfile, CombatantRef, CombatantRole, Faction, Roster};
pub use config::CombatConfig;
pub use effects::{Effect, EffectKind, EffectRegistry};
pub use env::{
    ArmorDefinition, BestiaryOracle, BestiarySnapshot, CatalogOracle, CatalogSnapshot,
    CharacterSnapshot, CombatEnv, EffectEntry, EffectMeaning, EncounterDefinition, EnemyGroup,
    EnemyTemplate, GroupMember, GuestTemplate, InventorySnapshot, ItemDefinition, PartySnapshot,
    PcgRng, RngOracle, ScriptedRng, SpellDefinition, WeaponDefinition,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::{CombatEvent, CombatLog, EventValue, EventValues};
pub use session::{
    CharacterResult, CombatOutcome, CombatPhase, CombatResult, CombatSession, EnemyResult,
    Rollback, SessionError,
};
pub use targeting::TargetingAi;
pub use threat::{ThreatEntry, ThreatTable};
pub use turn::{TurnOrderPolicy, TurnScheduler};
