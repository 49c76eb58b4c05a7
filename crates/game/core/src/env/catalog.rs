//! Catalog oracle: weapons, armor, items and spells referenced by id.

/// What an effect entry does to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectMeaning {
    Damage,
    Healing,
    /// `value` is a percentage of the target's max HP.
    Revive,
}

impl EffectMeaning {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Healing and revival; these only ever target allies.
    pub fn is_restorative(&self) -> bool {
        matches!(self, Self::Healing | Self::Revive)
    }
}

/// One row of an item or spell effect table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEntry {
    pub meaning: EffectMeaning,
    pub value: u32,
    /// Optional symmetric spread: the rolled value lies in `[value - range, value + range]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: Option<u32>,
}

impl EffectEntry {
    pub const fn new(meaning: EffectMeaning, value: u32) -> Self {
        Self {
            meaning,
            value,
            range: None,
        }
    }

    pub const fn damage(value: u32) -> Self {
        Self::new(EffectMeaning::Damage, value)
    }

    pub const fn healing(value: u32) -> Self {
        Self::new(EffectMeaning::Healing, value)
    }

    pub const fn revive(percentage: u32) -> Self {
        Self::new(EffectMeaning::Revive, percentage)
    }

    pub const fn with_range(mut self, range: u32) -> Self {
        self.range = Some(range);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDefinition {
    pub id: String,
    /// Fraction of the wielder's attack used as random spread.
    pub attack_variance: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorDefinition {
    pub id: String,
    pub defense: u32,
}

/// Consumable item. Remaining counts live in the inventory, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub effects: Vec<EffectEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: String,
    pub mp_cost: u32,
    pub effects: Vec<EffectEntry>,
}

/// Read-only lookup of equipment and consumable definitions.
pub trait CatalogOracle: Send + Sync {
    fn weapon(&self, id: &str) -> Option<WeaponDefinition>;
    fn armor(&self, id: &str) -> Option<ArmorDefinition>;
    fn item(&self, id: &str) -> Option<ItemDefinition>;
    fn spell(&self, id: &str) -> Option<SpellDefinition>;
}
