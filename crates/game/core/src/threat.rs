//! Per-enemy threat bookkeeping.
//!
//! Every attacker that damages an enemy gets an entry in that enemy's table.
//! Entries grow additively and are never removed during an encounter; the
//! accumulated values weight the enemy's future target draws.

use crate::combatant::CombatantRef;

/// How much one attacker has provoked one enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatEntry {
    pub attacker: CombatantRef,
    pub accumulated: u64,
}

/// Threat entries of a single enemy, in first-provoked order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatTable {
    entries: Vec<ThreatEntry>,
}

impl ThreatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the attacker's entry, creating it if absent.
    ///
    /// A zero amount still registers the attacker.
    pub fn add(&mut self, attacker: &CombatantRef, amount: u64) {
        match self.entries.iter_mut().find(|e| &e.attacker == attacker) {
            Some(entry) => entry.accumulated = entry.accumulated.saturating_add(amount),
            None => self.entries.push(ThreatEntry {
                attacker: attacker.clone(),
                accumulated: amount,
            }),
        }
    }

    pub fn get(&self, attacker: &CombatantRef) -> u64 {
        self.entries
            .iter()
            .find(|e| &e.attacker == attacker)
            .map_or(0, |e| e.accumulated)
    }

    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.accumulated))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ThreatEntry] {
        &self.entries
    }

    /// Cumulative probability partition over the entries.
    ///
    /// Entries are ordered by ascending weight (ties keep insertion order) and
    /// each bound is the inclusive running sum of `accumulated / total`, so the
    /// last bound is 1.0 up to rounding. Entry `i` owns `[bound[i-1], bound[i])`,
    /// which is exactly `accumulated[i] / total` of the unit interval.
    ///
    /// Returns an empty partition when the total is zero.
    pub fn partition(&self) -> Vec<(&CombatantRef, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut weighted: Vec<(&CombatantRef, f64)> = self
            .entries
            .iter()
            .map(|e| (&e.attacker, e.accumulated as f64 / total as f64))
            .collect();
        weighted.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut running = 0.0;
        weighted
            .into_iter()
            .map(|(attacker, weight)| {
                running += weight;
                (attacker, running)
            })
            .collect()
    }

    /// Picks the entry whose partition slot contains `r ∈ [0, 1)`.
    ///
    /// Falls back to the heaviest entry if rounding leaves `r` past the last
    /// bound. Returns `None` when there is no threat to weigh.
    pub fn pick(&self, r: f64) -> Option<&CombatantRef> {
        let partition = self.partition();
        partition
            .iter()
            .find(|(_, bound)| *bound > r)
            .or_else(|| partition.last())
            .map(|(attacker, _)| *attacker)
    }
}
