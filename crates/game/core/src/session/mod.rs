//! Encounter state machine.
//!
//! [`CombatSession`] owns every piece of mutable encounter state: profiles,
//! effects, the working inventory, the turn order and the event log. Hosts
//! drive it one action at a time with [`CombatSession::submit`] for player
//! characters and [`CombatSession::take_ai_turn`] for everyone else.
//!
//! ```text
//! AwaitingAction(active) --submit--> Resolving --+--> AwaitingAction(next)
//!          ^                                      +--> Over(Victory | Defeat)
//!          +------------- rejected ---------------+
//! ```

mod ai;
mod errors;
mod result;

pub use errors::SessionError;
pub use result::{CharacterResult, CombatOutcome, CombatResult, EnemyResult, Rollback};

use crate::action::{ActionCommand, ActionResolver};
use crate::combatant::{CombatantKind, CombatantProfile, CombatantRef, Roster};
use crate::config::CombatConfig;
use crate::effects::{EffectKind, EffectRegistry};
use crate::env::{CombatEnv, EncounterDefinition, InventorySnapshot, PartySnapshot, PcgRng, RngOracle};
use crate::error::ErrorContext;
use crate::event::{CombatEvent, CombatLog};
use crate::turn::TurnScheduler;

/// Where the encounter currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    /// Waiting for the active combatant's action.
    AwaitingAction(CombatantRef),
    /// An action is being applied.
    Resolving,
    /// Terminal.
    Over(CombatOutcome),
}

/// One encounter from start to victory or defeat.
#[derive(Debug)]
pub struct CombatSession<R: RngOracle = PcgRng> {
    encounter: EncounterDefinition,
    party: PartySnapshot,
    starting_inventory: InventorySnapshot,

    roster: Roster,
    effects: EffectRegistry,
    inventory: InventorySnapshot,
    scheduler: TurnScheduler,
    log: CombatLog,

    rng: R,
    config: CombatConfig,
    phase: CombatPhase,
    /// Accepted actions so far; stamps each event.
    sequence: u64,
    rewards_granted: bool,
}

impl<R: RngOracle> CombatSession<R> {
    /// Stages an encounter.
    ///
    /// Builds one profile per available character, per guest and per enemy
    /// group member, fixes the turn order and checks termination right away,
    /// so a party that starts wiped out yields a session that is already over.
    pub fn start(
        encounter: EncounterDefinition,
        party: PartySnapshot,
        inventory: InventorySnapshot,
        env: CombatEnv<'_>,
        mut rng: R,
        config: CombatConfig,
    ) -> Result<Self, SessionError> {
        let bestiary = env.bestiary();
        let group = bestiary
            .group(&encounter.group)
            .ok_or_else(|| SessionError::UnknownEnemyGroup(encounter.group.clone()))?;
        if group.members.is_empty() {
            return Err(SessionError::EmptyEnemyGroup(group.id));
        }

        let mut roster = Roster::new();
        for snapshot in party.available_characters() {
            admit(&mut roster, CombatantProfile::from_character(snapshot, env.catalog()))?;
        }
        if roster.is_empty() {
            return Err(SessionError::NoAvailableCharacters);
        }

        for speaker in &party.guests {
            let template = bestiary
                .guest(speaker)
                .ok_or_else(|| SessionError::UnknownGuestTemplate(speaker.clone()))?;
            admit(&mut roster, CombatantProfile::from_guest(&template))?;
        }

        for (id, member) in group.member_ids() {
            let template =
                bestiary
                    .enemy(&member.template)
                    .ok_or_else(|| SessionError::UnknownEnemyTemplate {
                        group: group.id.clone(),
                        template: member.template.clone(),
                    })?;
            admit(&mut roster, CombatantProfile::from_enemy(id, &template))?;
        }

        let scheduler = TurnScheduler::build(&roster, encounter.turn_order, &mut rng);

        tracing::info!(
            "combat start: group={} characters={} guests={} enemies={} order={}",
            encounter.group,
            roster.of_kind(CombatantKind::Character).count(),
            roster.of_kind(CombatantKind::Guest).count(),
            roster.of_kind(CombatantKind::Enemy).count(),
            encounter.turn_order.as_str()
        );

        let mut session = Self {
            encounter,
            party,
            starting_inventory: inventory.clone(),
            roster,
            effects: EffectRegistry::new(),
            inventory,
            scheduler,
            log: CombatLog::new(),
            rng,
            config,
            phase: CombatPhase::Resolving,
            sequence: 0,
            rewards_granted: false,
        };

        if let Some(outcome) = session.check_outcome() {
            session.finish(outcome);
        } else {
            let roster = &session.roster;
            let first = session.scheduler.start(|r| roster.is_alive(r)).cloned();
            match first {
                Some(first) => session.phase = CombatPhase::AwaitingAction(first),
                None => session.finish(CombatOutcome::Defeat),
            }
        }

        Ok(session)
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Resolves a command for the active combatant.
    ///
    /// Any combatant may be driven this way, including AI-controlled ones
    /// (scripted turns). A rejected command changes nothing and the same
    /// combatant stays active.
    pub fn submit(
        &mut self,
        env: CombatEnv<'_>,
        command: ActionCommand,
    ) -> Result<&CombatEvent, SessionError> {
        let active = self.awaiting()?.clone();
        if command.actor != active {
            return Err(SessionError::NotActiveCombatant {
                expected: active,
                actual: command.actor,
            });
        }
        self.resolve(env, command)
    }

    /// Lets the active enemy or guest act on its fixed policy.
    pub fn take_ai_turn(&mut self, env: CombatEnv<'_>) -> Result<&CombatEvent, SessionError> {
        let active = self.awaiting()?.clone();
        if !self.is_ai_controlled(&active) {
            return Err(SessionError::NotAiControlled(active));
        }

        let command = ai::choose_command(&self.roster, &self.config, &mut self.rng, &active)
            .ok_or_else(|| SessionError::NoTargetAvailable(active.clone()))?;
        self.resolve(env, command)
    }

    /// Places or replaces an effect on a combatant from outside the resolver,
    /// e.g. a scripted poison. A zero duration removes the effect.
    pub fn apply_effect(
        &mut self,
        owner: &CombatantRef,
        kind: EffectKind,
        value: u32,
        duration: u32,
    ) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::CombatOver);
        }
        if !self.roster.contains(owner) {
            return Err(SessionError::UnknownCombatant(owner.clone()));
        }
        self.effects.upsert(owner, kind, value, duration);
        Ok(())
    }

    /// Flags the rewards of a won encounter as handed out.
    ///
    /// Returns true only on the first call after a victory.
    pub fn mark_rewards_granted(&mut self) -> bool {
        if self.outcome() != Some(CombatOutcome::Victory) || self.rewards_granted {
            return false;
        }
        self.rewards_granted = true;
        true
    }

    fn awaiting(&self) -> Result<&CombatantRef, SessionError> {
        match &self.phase {
            CombatPhase::AwaitingAction(active) => Ok(active),
            CombatPhase::Over(_) => Err(SessionError::CombatOver),
            CombatPhase::Resolving => Err(SessionError::NotAwaitingAction),
        }
    }

    fn resolve(
        &mut self,
        env: CombatEnv<'_>,
        command: ActionCommand,
    ) -> Result<&CombatEvent, SessionError> {
        let previous = std::mem::replace(&mut self.phase, CombatPhase::Resolving);

        let resolved = ActionResolver::new(
            &mut self.roster,
            &mut self.effects,
            &mut self.inventory,
            env.catalog(),
            &mut self.rng,
            &self.config,
        )
        .resolve(&command, self.sequence);

        let event = match resolved {
            Ok(event) => event,
            Err(error) => {
                tracing::debug!("{} rejected: {}", command.actor, error);
                self.phase = previous;
                let context = ErrorContext::new(self.sequence).with_actor(command.actor);
                return Err(SessionError::action(error, context));
            }
        };

        self.sequence += 1;
        let index = self.log.push(event);
        self.effects.tick(&command.actor);
        self.advance();

        Ok(&self.log.events()[index])
    }

    fn advance(&mut self) {
        if let Some(outcome) = self.check_outcome() {
            self.finish(outcome);
            return;
        }

        let roster = &self.roster;
        let next = self.scheduler.advance(|r| roster.is_alive(r)).cloned();
        match next {
            Some(next) => {
                tracing::debug!("round {}: {}'s turn", self.scheduler.round(), next);
                self.phase = CombatPhase::AwaitingAction(next);
            }
            None => {
                tracing::warn!("no living combatant left to act");
                self.finish(CombatOutcome::Defeat);
            }
        }
    }

    /// Victory takes precedence when both sides fall in the same action.
    fn check_outcome(&self) -> Option<CombatOutcome> {
        if self.roster.all_enemies_defeated() {
            Some(CombatOutcome::Victory)
        } else if self.roster.all_characters_down() {
            Some(CombatOutcome::Defeat)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: CombatOutcome) {
        self.scheduler.stop();
        self.phase = CombatPhase::Over(outcome);
        tracing::info!(
            "combat over: {} after {} actions (can_lose={})",
            outcome.as_str(),
            self.sequence,
            self.encounter.can_lose
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn phase(&self) -> &CombatPhase {
        &self.phase
    }

    /// Combatant whose turn it is, if the encounter is still running.
    pub fn active(&self) -> Option<&CombatantRef> {
        match &self.phase {
            CombatPhase::AwaitingAction(active) => Some(active),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, CombatPhase::Over(_))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Enemies and guests act on their own; characters wait for the player.
    pub fn is_ai_controlled(&self, reference: &CombatantRef) -> bool {
        !reference.is_character()
    }

    pub fn encounter(&self) -> &EncounterDefinition {
        &self.encounter
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn turn_order(&self) -> &[CombatantRef] {
        self.scheduler.order()
    }

    pub fn events(&self) -> &[CombatEvent] {
        self.log.events()
    }

    /// Events appended since `cursor`; pass `events().len()` back as the next cursor.
    pub fn events_since(&self, cursor: usize) -> &[CombatEvent] {
        self.log.since(cursor)
    }

    pub fn profile(&self, reference: &CombatantRef) -> Option<&CombatantProfile> {
        self.roster.get(reference)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &CombatantProfile> {
        self.roster.iter()
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn inventory(&self) -> &InventorySnapshot {
        &self.inventory
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Summary for the host, available once the encounter is over.
    pub fn result(&self) -> Option<CombatResult> {
        let outcome = self.outcome()?;

        let characters = self
            .party
            .available_characters()
            .filter_map(|snapshot| {
                let profile = self.roster.get(&CombatantRef::Character(snapshot.index))?;
                Some(CharacterResult {
                    index: snapshot.index,
                    hp: profile.hp(),
                    mp: profile.mp(),
                    hp_delta: profile.hp() as i64 - snapshot.hp as i64,
                    mp_delta: profile.mp() as i64 - snapshot.mp as i64,
                })
            })
            .collect();

        let enemies = self
            .roster
            .of_kind(CombatantKind::Enemy)
            .map(|profile| EnemyResult {
                reference: profile.reference().clone(),
                template: profile.template().unwrap_or_default().to_owned(),
                defeated: profile.is_dead(),
            })
            .collect();

        let victory = outcome == CombatOutcome::Victory;
        Some(CombatResult {
            outcome,
            can_lose: self.encounter.can_lose,
            reward: self.encounter.reward.clone().filter(|_| victory),
            rewards_granted: self.rewards_granted,
            characters,
            enemies,
            inventory: self.inventory.clone(),
            events: self.log.events().to_vec(),
            rollback: (!victory).then(|| Rollback {
                party: self.party.clone(),
                inventory: self.starting_inventory.clone(),
            }),
        })
    }
}

/// Adds a profile to the roster, refusing a reference that is already taken.
fn admit(roster: &mut Roster, profile: CombatantProfile) -> Result<(), SessionError> {
    if roster.contains(profile.reference()) {
        return Err(SessionError::DuplicateCombatant(profile.reference().clone()));
    }
    roster.insert(profile);
    Ok(())
}
