/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Turns a Defend buff lasts when placed on another combatant.
    pub defend_turns: u32,
    /// Extra turns added when a combatant defends itself. Its own end-of-turn
    /// tick consumes one of them.
    pub self_defend_extra_turns: u32,
    /// Chance of drawing from the guest pool when an enemy picks a random
    /// target and both characters and guests are alive.
    pub guest_pool_chance: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of values a single event can carry (one per meaning).
    pub const MAX_EVENT_VALUES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DEFEND_TURNS: u32 = 2;
    pub const DEFAULT_SELF_DEFEND_EXTRA_TURNS: u32 = 1;
    pub const DEFAULT_GUEST_POOL_CHANCE: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            defend_turns: Self::DEFAULT_DEFEND_TURNS,
            self_defend_extra_turns: Self::DEFAULT_SELF_DEFEND_EXTRA_TURNS,
            guest_pool_chance: Self::DEFAULT_GUEST_POOL_CHANCE,
        }
    }

    /// Duration of a Defend buff, depending on whether the actor shields itself.
    pub fn defend_duration(&self, self_target: bool) -> u32 {
        if self_target {
            self.defend_turns + self.self_defend_extra_turns
        } else {
            self.defend_turns
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
