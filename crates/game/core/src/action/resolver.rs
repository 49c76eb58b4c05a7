//! Action resolution.
//!
//! Resolution runs in two steps:
//! 1. Validate the command against the current encounter (fail fast, no mutation)
//! 2. Plan the outcome values, then apply them in table order
//!
//! A rejected command leaves the roster, the effect registry and the
//! inventory exactly as they were. An accepted one always yields an event,
//! even when a missing catalog entry makes it a no-op.

use crate::combatant::{CombatantProfile, CombatantRef, Roster};
use crate::config::CombatConfig;
use crate::effects::{EffectKind, EffectRegistry};
use crate::env::{CatalogOracle, EffectEntry, EffectMeaning, InventorySnapshot, RngOracle};
use crate::event::{CombatEvent, EventValue, EventValues};

use super::{ActionCommand, ActionError, ActionType};

/// Mutable view of an encounter used to resolve one command.
pub struct ActionResolver<'a, R: RngOracle + ?Sized> {
    roster: &'a mut Roster,
    effects: &'a mut EffectRegistry,
    inventory: &'a mut InventorySnapshot,
    catalog: &'a dyn CatalogOracle,
    rng: &'a mut R,
    config: &'a CombatConfig,
}

impl<'a, R: RngOracle + ?Sized> ActionResolver<'a, R> {
    pub fn new(
        roster: &'a mut Roster,
        effects: &'a mut EffectRegistry,
        inventory: &'a mut InventorySnapshot,
        catalog: &'a dyn CatalogOracle,
        rng: &'a mut R,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            roster,
            effects,
            inventory,
            catalog,
            rng,
            config,
        }
    }

    /// Resolves `command` and returns the event describing it, stamped with `timestamp`.
    ///
    /// Does not tick effects; the caller does that once the event is logged.
    pub fn resolve(
        &mut self,
        command: &ActionCommand,
        timestamp: u64,
    ) -> Result<CombatEvent, ActionError> {
        let actor = self
            .roster
            .get(&command.actor)
            .ok_or_else(|| ActionError::ActorNotFound(command.actor.clone()))?;
        if actor.is_dead() {
            return Err(ActionError::ActorDead(command.actor.clone()));
        }
        if !self.roster.contains(&command.target) {
            return Err(ActionError::TargetNotFound(command.target.clone()));
        }

        let values = match command.action {
            ActionType::Attack => self.attack(command)?,
            ActionType::Defend => self.defend(command)?,
            ActionType::Spell => self.spell(command)?,
            ActionType::Item => self.item(command)?,
        };

        tracing::debug!(
            "{} {} -> {} ({:?})",
            command.actor,
            command.action.as_str(),
            command.target,
            values.as_slice()
        );

        Ok(CombatEvent {
            action: command.action,
            source: command.actor.clone(),
            destination: command.target.clone(),
            timestamp,
            values,
            item_or_spell: command
                .item_or_spell
                .clone()
                .filter(|_| command.action.uses_catalog()),
        })
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn attack(&mut self, command: &ActionCommand) -> Result<EventValues, ActionError> {
        let target = self.living_target(command)?;
        if !command.actor.is_hostile_to(&command.target) {
            return Err(invalid_target(command));
        }
        let defense = target.get_defense(&*self.effects);

        let raw = self
            .roster
            .get(&command.actor)
            .ok_or_else(|| ActionError::ActorNotFound(command.actor.clone()))?
            .get_attack(&mut *self.rng);
        let amount = raw.saturating_sub(defense);

        self.target_mut(command)?
            .take_damage(Some(&command.actor), amount);

        let mut values = EventValues::new();
        values.push(EventValue::new(EffectMeaning::Damage, amount));
        Ok(values)
    }

    fn defend(&mut self, command: &ActionCommand) -> Result<EventValues, ActionError> {
        self.require_character(command)?;
        let target = self.living_target(command)?;
        if target.reference().faction() != command.actor.faction() {
            return Err(invalid_target(command));
        }

        let value = target.max_hp().div_ceil(2);
        let duration = self
            .config
            .defend_duration(command.actor == command.target);
        self.effects
            .upsert(&command.target, EffectKind::Defense, value, duration);

        Ok(EventValues::new())
    }

    fn spell(&mut self, command: &ActionCommand) -> Result<EventValues, ActionError> {
        self.require_character(command)?;
        let id = catalog_id(command)?;

        let Some(spell) = self.catalog.spell(id) else {
            tracing::warn!("unknown spell '{}' cast by {}, no effect", id, command.actor);
            return Ok(EventValues::new());
        };

        let actor = self.actor(command)?;
        if !actor.can_cast_spell(&spell) {
            return Err(ActionError::InsufficientMp {
                required: spell.mp_cost,
                available: actor.mp(),
            });
        }

        let values = self.plan(id, &spell.effects, command)?;
        if let Some(actor) = self.roster.get_mut(&command.actor) {
            actor.spend_mp(&spell);
        }
        self.apply(command, &values)?;
        Ok(values)
    }

    fn item(&mut self, command: &ActionCommand) -> Result<EventValues, ActionError> {
        self.require_character(command)?;
        let id = catalog_id(command)?;

        if self.inventory.count(id) == 0 {
            return Err(ActionError::ItemDepleted(id.to_owned()));
        }
        let Some(item) = self.catalog.item(id) else {
            tracing::warn!("unknown item '{}' used by {}, no effect", id, command.actor);
            return Ok(EventValues::new());
        };

        let values = self.plan(id, &item.effects, command)?;
        self.inventory.consume(id);
        self.apply(command, &values)?;
        Ok(values)
    }

    // ========================================================================
    // Effect planning
    // ========================================================================

    /// Computes the values a catalog effect list produces on the target.
    ///
    /// Entries that do not apply to the target's current state are skipped,
    /// and healing or revival never lands on a hostile target. If entries
    /// exist but none applies, the command is rejected: as an invalid target
    /// when only restorative entries were aimed at a foe.
    fn plan(
        &mut self,
        id: &str,
        entries: &[EffectEntry],
        command: &ActionCommand,
    ) -> Result<EventValues, ActionError> {
        let target = self.target(command)?.clone();
        let hostile = command.actor.is_hostile_to(&command.target);
        let mut values = EventValues::new();

        for entry in entries {
            if !applies_to(entry.meaning, &target, hostile) {
                continue;
            }
            let value = match entry.meaning {
                EffectMeaning::Revive => target.revive_amount(entry.value),
                EffectMeaning::Damage | EffectMeaning::Healing => self.spread(entry),
            };
            if values
                .try_push(EventValue::new(entry.meaning, value))
                .is_err()
            {
                tracing::warn!("'{}' has more effects than an event can carry", id);
                break;
            }
        }

        if !entries.is_empty() && values.is_empty() {
            if hostile && entries.iter().all(|e| e.meaning.is_restorative()) {
                return Err(invalid_target(command));
            }
            return Err(ActionError::NoEligibleEffect(
                id.to_owned(),
                command.target.clone(),
            ));
        }
        Ok(values)
    }

    /// `value` plus a uniform integer in `[-range, range]`, floored at 0.
    fn spread(&mut self, entry: &EffectEntry) -> u32 {
        match entry.range {
            Some(range) if range > 0 => {
                let offset = self.rng.index(range as usize * 2 + 1) as i64 - range as i64;
                (entry.value as i64 + offset).max(0) as u32
            }
            _ => entry.value,
        }
    }

    fn apply(&mut self, command: &ActionCommand, values: &[EventValue]) -> Result<(), ActionError> {
        let target = self.target_mut(command)?;
        for value in values {
            match value.meaning {
                EffectMeaning::Damage => target.take_damage(Some(&command.actor), value.value),
                EffectMeaning::Healing => target.take_healing(value.value),
                EffectMeaning::Revive => target.take_revive(value.value),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    fn actor(&self, command: &ActionCommand) -> Result<&CombatantProfile, ActionError> {
        self.roster
            .get(&command.actor)
            .ok_or_else(|| ActionError::ActorNotFound(command.actor.clone()))
    }

    fn target(&self, command: &ActionCommand) -> Result<&CombatantProfile, ActionError> {
        self.roster
            .get(&command.target)
            .ok_or_else(|| ActionError::TargetNotFound(command.target.clone()))
    }

    fn target_mut(&mut self, command: &ActionCommand) -> Result<&mut CombatantProfile, ActionError> {
        self.roster
            .get_mut(&command.target)
            .ok_or_else(|| ActionError::TargetNotFound(command.target.clone()))
    }

    fn living_target(&self, command: &ActionCommand) -> Result<&CombatantProfile, ActionError> {
        let target = self.target(command)?;
        if target.is_dead() {
            return Err(ActionError::TargetDead(command.target.clone()));
        }
        Ok(target)
    }

    fn require_character(&self, command: &ActionCommand) -> Result<(), ActionError> {
        if command.actor.is_character() {
            Ok(())
        } else {
            Err(ActionError::ActionNotAllowed {
                kind: command.actor.kind(),
                action: command.action,
            })
        }
    }
}

fn applies_to(meaning: EffectMeaning, target: &CombatantProfile, hostile: bool) -> bool {
    match meaning {
        EffectMeaning::Damage => target.is_alive(),
        EffectMeaning::Healing => !hostile && target.can_receive_healing(),
        EffectMeaning::Revive => !hostile && target.can_be_revived(),
    }
}

fn catalog_id(command: &ActionCommand) -> Result<&str, ActionError> {
    command
        .item_or_spell
        .as_deref()
        .ok_or(ActionError::MissingCatalogId(command.action))
}

fn invalid_target(command: &ActionCommand) -> ActionError {
    ActionError::InvalidTarget {
        actor: command.actor.clone(),
        target: command.target.clone(),
        action: command.action,
    }
}
