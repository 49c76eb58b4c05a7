//! Combatant identity.

use core::fmt;

/// Kind tag of a combatant, without kind-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatantKind {
    Character,
    Enemy,
    Guest,
}

impl CombatantKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Side of the encounter this kind fights on.
    pub const fn faction(&self) -> Faction {
        match self {
            Self::Character | Self::Guest => Faction::Party,
            Self::Enemy => Faction::Hostile,
        }
    }
}

/// The two sides of an encounter. Guests fight alongside characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Party,
    Hostile,
}

impl Faction {
    pub const fn opposing(&self) -> Faction {
        match self {
            Self::Party => Self::Hostile,
            Self::Hostile => Self::Party,
        }
    }
}

/// Stable reference to a combatant within one encounter.
///
/// Two references are equal iff both kind and id match.
/// - `Character` carries the player-character index.
/// - `Enemy` carries a unique id that disambiguates repeated templates in a group.
/// - `Guest` carries the guest's speaker identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantRef {
    Character(u32),
    Enemy(String),
    Guest(String),
}

impl CombatantRef {
    pub fn enemy(id: impl Into<String>) -> Self {
        Self::Enemy(id.into())
    }

    pub fn guest(speaker: impl Into<String>) -> Self {
        Self::Guest(speaker.into())
    }

    pub const fn kind(&self) -> CombatantKind {
        match self {
            Self::Character(_) => CombatantKind::Character,
            Self::Enemy(_) => CombatantKind::Enemy,
            Self::Guest(_) => CombatantKind::Guest,
        }
    }

    pub const fn faction(&self) -> Faction {
        self.kind().faction()
    }

    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Character(_))
    }

    pub const fn is_enemy(&self) -> bool {
        matches!(self, Self::Enemy(_))
    }

    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }

    /// True if `other` fights on the opposite side.
    pub fn is_hostile_to(&self, other: &CombatantRef) -> bool {
        self.faction() != other.faction()
    }
}

impl fmt::Display for CombatantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(index) => write!(f, "character#{index}"),
            Self::Enemy(id) => write!(f, "enemy:{id}"),
            Self::Guest(speaker) => write!(f, "guest:{speaker}"),
        }
    }
}
