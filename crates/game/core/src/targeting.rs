//! Target selection for AI-controlled combatants.
//!
//! Enemies weigh their targets by accumulated threat; guests always finish
//! off the weakest enemy. Both read the roster without mutating it.

use crate::combatant::{CombatantKind, CombatantProfile, CombatantRef, Roster};
use crate::config::CombatConfig;
use crate::env::RngOracle;

/// Read-only view of an encounter used to pick AI targets.
#[derive(Clone, Copy, Debug)]
pub struct TargetingAi<'a> {
    roster: &'a Roster,
    config: &'a CombatConfig,
}

impl<'a> TargetingAi<'a> {
    pub fn new(roster: &'a Roster, config: &'a CombatConfig) -> Self {
        Self { roster, config }
    }

    /// Chooses who `enemy` attacks.
    ///
    /// Without usable threat (no entries, or all zero) or with a single
    /// character left standing, the pick is random over living characters and
    /// guests. Otherwise the pick is threat-weighted and redrawn while it lands
    /// on a dead combatant, at most once per living party member. When every
    /// draw lands on the dead, the last draw is returned as is.
    pub fn enemy_target<R: RngOracle + ?Sized>(
        &self,
        enemy: &CombatantRef,
        rng: &mut R,
    ) -> Option<CombatantRef> {
        let threat = self.roster.get(enemy)?.threat()?;
        let living_characters = self.roster.living_count(CombatantKind::Character);
        let living_guests = self.roster.living_count(CombatantKind::Guest);

        if threat.total() == 0 || living_characters == 1 {
            return self.random_party_target(rng);
        }

        let attempts = (living_characters + living_guests).max(1);
        let mut last = None;
        for _ in 0..attempts {
            let Some(pick) = threat.pick(rng.next_unit()) else {
                break;
            };
            if self.roster.is_alive(pick) {
                return Some(pick.clone());
            }
            last = Some(pick.clone());
        }

        tracing::debug!(
            "{} exhausted {} threat draws on fallen targets, keeping {:?}",
            enemy,
            attempts,
            last
        );
        last
    }

    /// Uniform pick among living characters and living guests.
    ///
    /// When both pools have members, the guest pool is chosen with
    /// probability `guest_pool_chance`; otherwise the non-empty pool is used.
    pub fn random_party_target<R: RngOracle + ?Sized>(&self, rng: &mut R) -> Option<CombatantRef> {
        let characters: Vec<&CombatantRef> = self
            .roster
            .living_of_kind(CombatantKind::Character)
            .map(CombatantProfile::reference)
            .collect();
        let guests: Vec<&CombatantRef> = self
            .roster
            .living_of_kind(CombatantKind::Guest)
            .map(CombatantProfile::reference)
            .collect();

        let pool = match (characters.is_empty(), guests.is_empty()) {
            (true, true) => return None,
            (false, true) => &characters,
            (true, false) => &guests,
            (false, false) => {
                if rng.next_unit() < self.config.guest_pool_chance {
                    &guests
                } else {
                    &characters
                }
            }
        };

        pool.get(rng.index(pool.len())).map(|r| (*r).clone())
    }

    /// Living enemy with the lowest current HP; ties go to the first in roster order.
    pub fn guest_target(&self) -> Option<CombatantRef> {
        self.roster
            .living_of_kind(CombatantKind::Enemy)
            .min_by_key(|p| p.hp())
            .map(|p| p.reference().clone())
    }
}
