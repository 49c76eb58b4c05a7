//! Turn order.
//!
//! The order is fixed once at encounter start and traversed circularly.
//! Fallen combatants keep their slot but are skipped while they are down, so
//! a revived character acts again on its next pass.

use crate::combatant::{CombatantKind, CombatantProfile, CombatantRef, Roster};
use crate::env::{RngOracle, shuffle};

/// How the initial turn order is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOrderPolicy {
    /// Characters, then guests, then enemies.
    #[default]
    PlayerFirst,
    /// Enemies, then characters, then guests.
    EnemiesFirst,
    /// Every combatant shuffled once with the session RNG.
    Random,
}

impl TurnOrderPolicy {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Circular turn order with a cursor on the active combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnScheduler {
    order: Vec<CombatantRef>,
    cursor: usize,
    round: u32,
    stopped: bool,
}

impl TurnScheduler {
    /// Builds the order from the roster. Kinds keep their roster order within
    /// a block; only [`TurnOrderPolicy::Random`] draws from `rng`.
    pub fn build<R: RngOracle + ?Sized>(roster: &Roster, policy: TurnOrderPolicy, rng: &mut R) -> Self {
        let block = |kind: CombatantKind| {
            roster
                .of_kind(kind)
                .map(CombatantProfile::reference)
                .cloned()
                .collect::<Vec<_>>()
        };

        let order = match policy {
            TurnOrderPolicy::PlayerFirst => [
                block(CombatantKind::Character),
                block(CombatantKind::Guest),
                block(CombatantKind::Enemy),
            ]
            .concat(),
            TurnOrderPolicy::EnemiesFirst => [
                block(CombatantKind::Enemy),
                block(CombatantKind::Character),
                block(CombatantKind::Guest),
            ]
            .concat(),
            TurnOrderPolicy::Random => {
                let mut all: Vec<CombatantRef> =
                    roster.iter().map(|p| p.reference().clone()).collect();
                shuffle(rng, &mut all);
                all
            }
        };

        Self::from_order(order)
    }

    /// Uses an explicit order as given.
    pub fn from_order(order: Vec<CombatantRef>) -> Self {
        Self {
            order,
            cursor: 0,
            round: 1,
            stopped: false,
        }
    }

    /// Places the cursor on the first living combatant.
    ///
    /// Returns `None` (and stops) when nobody in the order is alive.
    pub fn start(&mut self, is_alive: impl Fn(&CombatantRef) -> bool) -> Option<&CombatantRef> {
        self.cursor = 0;
        self.round = 1;
        self.stopped = false;
        match self.order.iter().position(|r| is_alive(r)) {
            Some(index) => {
                self.cursor = index;
                self.order.get(index)
            }
            None => {
                self.stopped = true;
                None
            }
        }
    }

    /// Moves to the next living combatant after the active one, wrapping
    /// around. The active combatant itself is the last candidate.
    pub fn advance(&mut self, is_alive: impl Fn(&CombatantRef) -> bool) -> Option<&CombatantRef> {
        if self.stopped || self.order.is_empty() {
            return None;
        }

        let len = self.order.len();
        for step in 1..=len {
            let index = (self.cursor + step) % len;
            if is_alive(&self.order[index]) {
                if index <= self.cursor {
                    self.round += 1;
                }
                self.cursor = index;
                return self.order.get(index);
            }
        }

        self.stopped = true;
        None
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The combatant whose turn it is, unless the scheduler stopped.
    pub fn active(&self) -> Option<&CombatantRef> {
        if self.stopped {
            return None;
        }
        self.order.get(self.cursor)
    }

    /// Completed passes over the order, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn order(&self) -> &[CombatantRef] {
        &self.order
    }
}
