//! Fixed action policy for AI-controlled combatants.
//!
//! Enemies and guests only ever attack. Characters never reach this module.

use crate::action::ActionCommand;
use crate::combatant::{CombatantRef, Roster};
use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::targeting::TargetingAi;

/// Picks the command for an AI-controlled `actor`, or `None` when nobody
/// can be targeted.
pub(super) fn choose_command<R: RngOracle + ?Sized>(
    roster: &Roster,
    config: &CombatConfig,
    rng: &mut R,
    actor: &CombatantRef,
) -> Option<ActionCommand> {
    let ai = TargetingAi::new(roster, config);

    let target = match actor {
        CombatantRef::Character(_) => return None,
        CombatantRef::Guest(_) => ai.guest_target()?,
        CombatantRef::Enemy(_) => match ai.enemy_target(actor, rng) {
            Some(target) if roster.is_alive(&target) => target,
            fallback => {
                tracing::warn!(
                    "{} threat pick {:?} is not a living target, picking at random",
                    actor,
                    fallback
                );
                ai.random_party_target(rng)?
            }
        },
    };

    Some(ActionCommand::attack(actor.clone(), target))
}
