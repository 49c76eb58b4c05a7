//! Append-only combat event log.
//!
//! The log is the only channel to the presentation layer. Events are appended
//! in resolution order and never mutated afterwards; consumers keep their own
//! cursor and read with [`CombatLog::since`].

use arrayvec::ArrayVec;

use crate::action::ActionType;
use crate::combatant::CombatantRef;
use crate::config::CombatConfig;
use crate::env::EffectMeaning;

/// One numeric outcome carried by an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventValue {
    pub meaning: EffectMeaning,
    pub value: u32,
}

impl EventValue {
    pub const fn new(meaning: EffectMeaning, value: u32) -> Self {
        Self { meaning, value }
    }
}

pub type EventValues = ArrayVec<EventValue, { CombatConfig::MAX_EVENT_VALUES }>;

/// Immutable record of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub action: ActionType,
    pub source: CombatantRef,
    pub destination: CombatantRef,
    /// Session action sequence number at resolution time.
    pub timestamp: u64,
    /// Values as planned before clamping, so replaying them on the pre-event
    /// target reproduces the post-event state.
    pub values: EventValues,
    pub item_or_spell: Option<String>,
}

impl CombatEvent {
    /// Sum of all values with the given meaning.
    pub fn total(&self, meaning: EffectMeaning) -> u32 {
        self.values
            .iter()
            .filter(|v| v.meaning == meaning)
            .fold(0u32, |acc, v| acc.saturating_add(v.value))
    }

    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }
}

/// Ordered, append-only list of events for one encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its position in the log.
    pub(crate) fn push(&mut self, event: CombatEvent) -> usize {
        self.events.push(event);
        self.events.len() - 1
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Events appended at or after `cursor`. A cursor past the end yields nothing.
    pub fn since(&self, cursor: usize) -> &[CombatEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&CombatEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(timestamp: u64, damage: u32) -> CombatEvent {
        let mut values = EventValues::new();
        values.push(EventValue::new(EffectMeaning::Damage, damage));
        CombatEvent {
            action: ActionType::Attack,
            source: CombatantRef::Character(0),
            destination: CombatantRef::enemy("slime"),
            timestamp,
            values,
            item_or_spell: None,
        }
    }

    #[test]
    fn cursor_reads_only_new_events() {
        let mut log = CombatLog::new();
        log.push(attack(0, 4));
        log.push(attack(1, 6));

        assert_eq!(log.since(0).len(), 2);
        assert_eq!(log.since(1)[0].timestamp, 1);
        assert!(log.since(2).is_empty());
        assert!(log.since(10).is_empty());

        log.push(attack(2, 1));
        assert_eq!(log.since(2).len(), 1);
        assert_eq!(log.last().map(|e| e.timestamp), Some(2));
    }

    #[test]
    fn totals_by_meaning() {
        let mut event = attack(0, 4);
        event
            .values
            .push(EventValue::new(EffectMeaning::Damage, 3));
        event
            .values
            .push(EventValue::new(EffectMeaning::Healing, 9));
        assert_eq!(event.total(EffectMeaning::Damage), 7);
        assert_eq!(event.total(EffectMeaning::Healing), 9);
        assert_eq!(event.total(EffectMeaning::Revive), 0);
    }
}
