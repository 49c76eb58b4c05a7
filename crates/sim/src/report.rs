//! Plain-text rendering of events and results for the log.

use combat_core::{ActionType, CombatEvent, CombatResult, EffectMeaning};

pub fn describe(event: &CombatEvent) -> String {
    let what = match (&event.action, event.item_or_spell.as_deref()) {
        (ActionType::Attack, _) => "attacks".to_string(),
        (ActionType::Defend, _) => "shields".to_string(),
        (ActionType::Item, Some(id)) => format!("uses {} on", id),
        (ActionType::Spell, Some(id)) => format!("casts {} on", id),
        (action, None) => format!("{} on", action.as_str()),
    };

    let mut line = format!(
        "[{:>3}] {} {} {}",
        event.timestamp, event.source, what, event.destination
    );
    if event.values.is_empty() && event.action != ActionType::Defend {
        line.push_str(" (no effect)");
    }
    for value in &event.values {
        let verb = match value.meaning {
            EffectMeaning::Damage => "damage",
            EffectMeaning::Healing => "healed",
            EffectMeaning::Revive => "revived with",
        };
        line.push_str(&format!(", {} {}", verb, value.value));
    }
    line
}

pub fn summarize(result: &CombatResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} after {} actions",
        result.outcome.as_str(),
        result.events.len()
    )];

    for c in &result.characters {
        lines.push(format!(
            "  character#{}: hp {} ({:+}), mp {} ({:+})",
            c.index, c.hp, c.hp_delta, c.mp, c.mp_delta
        ));
    }
    for e in &result.enemies {
        let state = if e.defeated { "defeated" } else { "standing" };
        lines.push(format!("  {} [{}]: {}", e.reference, e.template, state));
    }
    for (id, count) in result.inventory.iter() {
        lines.push(format!("  {} x{}", id, count));
    }
    if let Some(reward) = &result.reward {
        lines.push(format!("  reward: {}", reward));
    }
    if result.rollback.is_some() {
        lines.push(format!("  party restored (can_lose={})", result.can_lose));
    }
    lines
}
