//! Runtime combat stats shared by characters, guests and enemies.
//!
//! Shared behavior is implemented once on [`CombatantProfile`]; the only
//! per-kind parts are construction (see `builders.rs`) and the data carried
//! by [`CombatantRole`].

use crate::effects::{EffectKind, EffectRegistry};
use crate::env::{RngOracle, SpellDefinition};
use crate::threat::ThreatTable;

use super::CombatantRef;

/// Kind-specific data of a combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantRole {
    Character { level: u32 },
    Enemy { template: String, threat: ThreatTable },
    Guest,
}

/// Mutable per-encounter state of one combatant.
///
/// Invariants: `hp <= max_hp`, `mp <= max_mp`. Out-of-range inputs to the
/// mutating operations are clamped, never rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantProfile {
    reference: CombatantRef,
    hp: u32,
    max_hp: u32,
    mp: u32,
    max_mp: u32,
    attack: u32,
    attack_variance: f64,
    defense: u32,
    role: CombatantRole,
}

impl CombatantProfile {
    /// Builds a profile, clamping current values to their maximums.
    ///
    /// Negative or non-finite variance is treated as 0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reference: CombatantRef,
        hp: u32,
        max_hp: u32,
        mp: u32,
        max_mp: u32,
        attack: u32,
        attack_variance: f64,
        defense: u32,
        role: CombatantRole,
    ) -> Self {
        let attack_variance = if attack_variance.is_finite() {
            attack_variance.max(0.0)
        } else {
            0.0
        };
        Self {
            reference,
            hp: hp.min(max_hp),
            max_hp,
            mp: mp.min(max_mp),
            max_mp,
            attack,
            attack_variance,
            defense,
            role,
        }
    }

    pub fn reference(&self) -> &CombatantRef {
        &self.reference
    }

    pub fn role(&self) -> &CombatantRole {
        &self.role
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    pub fn max_mp(&self) -> u32 {
        self.max_mp
    }

    pub fn base_attack(&self) -> u32 {
        self.attack
    }

    pub fn attack_variance(&self) -> f64 {
        self.attack_variance
    }

    pub fn base_defense(&self) -> u32 {
        self.defense
    }

    /// Characters only.
    pub fn level(&self) -> Option<u32> {
        match &self.role {
            CombatantRole::Character { level } => Some(*level),
            _ => None,
        }
    }

    /// Enemies only.
    pub fn threat(&self) -> Option<&ThreatTable> {
        match &self.role {
            CombatantRole::Enemy { threat, .. } => Some(threat),
            _ => None,
        }
    }

    /// Enemy template id, enemies only.
    pub fn template(&self) -> Option<&str> {
        match &self.role {
            CombatantRole::Enemy { template, .. } => Some(template),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Rolls
    // ------------------------------------------------------------------------

    /// Rolls an attack: `attack + floor(uniform(-attack, attack) * variance)`.
    ///
    /// Re-rolled on every call, never negative.
    pub fn get_attack<R: RngOracle + ?Sized>(&self, rng: &mut R) -> u32 {
        let base = self.attack as f64;
        let spread = (rng.range_f64(-base, base) * self.attack_variance).floor();
        (base + spread).max(0.0) as u32
    }

    /// Base defense plus the active Defense effect, if any.
    pub fn get_defense(&self, effects: &EffectRegistry) -> u32 {
        self.defense
            .saturating_add(effects.value_for(&self.reference, EffectKind::Defense))
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Lowers HP (floored at 0). Damage from a known source raises an enemy's
    /// threat toward that source, even when the amount is 0.
    pub fn take_damage(&mut self, source: Option<&CombatantRef>, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        if let (Some(source), CombatantRole::Enemy { threat, .. }) = (source, &mut self.role) {
            threat.add(source, amount as u64);
        }
    }

    /// Raises HP up to `max_hp`. Dead combatants cannot be healed.
    pub fn take_healing(&mut self, amount: u32) {
        if self.is_dead() {
            return;
        }
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Brings a dead combatant back with `amount` HP. No-op while alive.
    pub fn take_revive(&mut self, amount: u32) {
        if !self.is_dead() {
            return;
        }
        self.hp = amount.min(self.max_hp);
    }

    /// `ceil(percentage / 100 * max_hp)`, the amount passed to [`Self::take_revive`].
    pub fn revive_amount(&self, percentage: u32) -> u32 {
        let scaled = percentage as u64 * self.max_hp as u64;
        scaled.div_ceil(100).min(u32::MAX as u64) as u32
    }

    pub fn can_receive_healing(&self) -> bool {
        self.hp > 0 && self.hp < self.max_hp
    }

    pub fn can_be_revived(&self) -> bool {
        self.hp == 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn can_cast_spell(&self, spell: &SpellDefinition) -> bool {
        self.mp >= spell.mp_cost
    }

    pub fn spend_mp(&mut self, spell: &SpellDefinition) {
        self.mp = self.mp.saturating_sub(spell.mp_cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    fn profile(hp: u32, max_hp: u32) -> CombatantProfile {
        CombatantProfile::new(
            CombatantRef::Character(0),
            hp,
            max_hp,
            10,
            10,
            10,
            0.2,
            3,
            CombatantRole::Character { level: 1 },
        )
    }

    fn enemy(hp: u32) -> CombatantProfile {
        CombatantProfile::new(
            CombatantRef::enemy("slime"),
            hp,
            hp,
            0,
            0,
            5,
            0.0,
            0,
            CombatantRole::Enemy {
                template: "slime".into(),
                threat: ThreatTable::new(),
            },
        )
    }

    #[test]
    fn construction_clamps_to_maximums() {
        let p = profile(150, 100);
        assert_eq!(p.hp(), 100);
        assert_eq!(p.level(), Some(1));
        assert!(p.threat().is_none());
    }

    #[test]
    fn attack_roll_stays_within_variance() {
        let p = profile(100, 100);
        let mut rng = PcgRng::new(5);
        for _ in 0..5_000 {
            let roll = p.get_attack(&mut rng);
            assert!((8..=12).contains(&roll), "roll {roll} out of range");
        }
    }

    #[test]
    fn attack_roll_extremes() {
        let p = profile(100, 100);
        assert_eq!(p.get_attack(&mut ScriptedRng::constant(0.0)), 8);
        assert_eq!(p.get_attack(&mut ScriptedRng::constant(0.5)), 10);
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut p = profile(30, 100);
        p.take_damage(None, 500);
        assert_eq!(p.hp(), 0);
        assert!(p.is_dead());
    }

    #[test]
    fn damage_from_source_feeds_enemy_threat() {
        let mut e = enemy(50);
        let hero = CombatantRef::Character(0);
        e.take_damage(Some(&hero), 12);
        e.take_damage(Some(&hero), 0);
        e.take_damage(None, 5);

        assert_eq!(e.hp(), 33);
        let threat = e.threat().map(|t| t.get(&hero));
        assert_eq!(threat, Some(12));
        assert_eq!(e.threat().map(|t| t.len()), Some(1));
    }

    #[test]
    fn healing_requires_living_target() {
        let mut p = profile(0, 100);
        assert!(!p.can_receive_healing());
        p.take_healing(20);
        assert_eq!(p.hp(), 0);

        let mut p = profile(90, 100);
        p.take_healing(20);
        assert_eq!(p.hp(), 100);
        assert!(!p.can_receive_healing());
    }

    #[test]
    fn revive_requires_dead_target() {
        let mut p = profile(40, 100);
        assert!(!p.can_be_revived());
        p.take_revive(50);
        assert_eq!(p.hp(), 40);

        let mut p = profile(0, 100);
        assert!(p.can_be_revived());
        let amount = p.revive_amount(25);
        assert_eq!(amount, 25);
        p.take_revive(amount);
        assert_eq!(p.hp(), 25);
    }

    #[test]
    fn revive_amount_rounds_up() {
        let p = profile(0, 33);
        assert_eq!(p.revive_amount(50), 17);
        assert_eq!(p.revive_amount(0), 0);
        assert_eq!(p.revive_amount(100), 33);
    }

    #[test]
    fn spell_mp_checks() {
        let mut p = profile(100, 100);
        let spell = SpellDefinition {
            id: "fire".into(),
            mp_cost: 6,
            effects: Vec::new(),
        };
        assert!(p.can_cast_spell(&spell));
        p.spend_mp(&spell);
        assert_eq!(p.mp(), 4);
        assert!(!p.can_cast_spell(&spell));
        p.spend_mp(&spell);
        assert_eq!(p.mp(), 0);
    }

    #[test]
    fn defense_includes_active_effect() {
        let p = profile(100, 100);
        let mut effects = EffectRegistry::new();
        assert_eq!(p.get_defense(&effects), 3);
        effects.upsert(p.reference(), EffectKind::Defense, 50, 2);
        assert_eq!(p.get_defense(&effects), 53);
    }
}
