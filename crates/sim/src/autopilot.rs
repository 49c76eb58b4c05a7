//! Stand-in for the player: picks an action for each character turn.
//!
//! Priorities, highest first:
//! 1. Revive a fallen character with an item
//! 2. Heal the most hurt ally below the threshold (item, then spell)
//! 3. Cast the strongest affordable damage spell at the sturdiest enemy
//! 4. Attack the weakest enemy

use combat_core::{
    ActionCommand, CatalogSnapshot, CombatEnv, CombatSession, CombatantProfile, CombatantRef,
    EffectMeaning, SessionError,
};

/// HP ratio under which an ally gets healed.
const HEAL_THRESHOLD: f64 = 0.4;

pub struct Autopilot<'a> {
    catalog: &'a CatalogSnapshot,
}

impl<'a> Autopilot<'a> {
    pub fn new(catalog: &'a CatalogSnapshot) -> Self {
        Self { catalog }
    }

    /// Plays one turn for `actor`. A rejected choice falls back to a plain attack.
    pub fn play(
        &self,
        session: &mut CombatSession,
        env: CombatEnv<'_>,
        actor: &CombatantRef,
    ) -> Result<(), SessionError> {
        let command = self.choose(session, actor);
        let fallback = self.attack(session, actor);

        match session.submit(env, command) {
            Ok(_) => Ok(()),
            Err(err) if err.action_error().is_some() => {
                tracing::debug!("autopilot choice rejected ({}), attacking instead", err);
                match fallback {
                    Some(command) => session.submit(env, command).map(|_| ()),
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    fn choose(&self, session: &CombatSession, actor: &CombatantRef) -> ActionCommand {
        self.revive(session, actor)
            .or_else(|| self.heal(session, actor))
            .or_else(|| self.nuke(session, actor))
            .or_else(|| self.attack(session, actor))
            .unwrap_or_else(|| ActionCommand::defend(actor.clone(), actor.clone()))
    }

    fn revive(&self, session: &CombatSession, actor: &CombatantRef) -> Option<ActionCommand> {
        let fallen = session
            .profiles()
            .find(|p| p.reference().is_character() && p.can_be_revived())?;
        let item = self.usable_item(session, EffectMeaning::Revive)?;
        Some(ActionCommand::item(
            actor.clone(),
            fallen.reference().clone(),
            item,
        ))
    }

    fn heal(&self, session: &CombatSession, actor: &CombatantRef) -> Option<ActionCommand> {
        let hurt = session
            .profiles()
            .filter(|p| !p.reference().is_enemy() && p.can_receive_healing())
            .filter(|p| ratio(p) < HEAL_THRESHOLD)
            .min_by(|a, b| ratio(a).total_cmp(&ratio(b)))?;
        let target = hurt.reference().clone();

        if let Some(item) = self.usable_item(session, EffectMeaning::Healing) {
            return Some(ActionCommand::item(actor.clone(), target, item));
        }
        let spell = self.castable_spell(session, actor, EffectMeaning::Healing)?;
        Some(ActionCommand::spell(actor.clone(), target, spell))
    }

    fn nuke(&self, session: &CombatSession, actor: &CombatantRef) -> Option<ActionCommand> {
        let spell = self.castable_spell(session, actor, EffectMeaning::Damage)?;
        let target = session
            .profiles()
            .filter(|p| p.reference().is_enemy() && p.is_alive())
            .max_by_key(|p| p.hp())?;
        Some(ActionCommand::spell(
            actor.clone(),
            target.reference().clone(),
            spell,
        ))
    }

    fn attack(&self, session: &CombatSession, actor: &CombatantRef) -> Option<ActionCommand> {
        let target = session
            .profiles()
            .filter(|p| p.reference().is_enemy() && p.is_alive())
            .min_by_key(|p| p.hp())?;
        Some(ActionCommand::attack(
            actor.clone(),
            target.reference().clone(),
        ))
    }

    /// First item in stock with an effect of the given meaning.
    fn usable_item(&self, session: &CombatSession, meaning: EffectMeaning) -> Option<String> {
        session
            .inventory()
            .iter()
            .filter(|(_, count)| *count > 0)
            .find(|(id, _)| {
                self.catalog
                    .items
                    .get(*id)
                    .is_some_and(|item| item.effects.iter().any(|e| e.meaning == meaning))
            })
            .map(|(id, _)| id.to_string())
    }

    /// Affordable spell with the largest total value of the given meaning.
    fn castable_spell(
        &self,
        session: &CombatSession,
        actor: &CombatantRef,
        meaning: EffectMeaning,
    ) -> Option<String> {
        let caster = session.profile(actor)?;
        self.catalog
            .spells
            .values()
            .filter(|spell| caster.can_cast_spell(spell))
            .filter_map(|spell| {
                let power: u32 = spell
                    .effects
                    .iter()
                    .filter(|e| e.meaning == meaning)
                    .map(|e| e.value)
                    .sum();
                (power > 0).then_some((power, spell.id.clone()))
            })
            .max_by_key(|(power, _)| *power)
            .map(|(_, id)| id)
    }
}

fn ratio(profile: &CombatantProfile) -> f64 {
    if profile.max_hp() == 0 {
        return 0.0;
    }
    profile.hp() as f64 / profile.max_hp() as f64
}
