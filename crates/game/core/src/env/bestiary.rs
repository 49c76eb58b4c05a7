//! Bestiary oracle: enemy groups, enemy templates and guest templates.

/// Immutable stat block an enemy profile is built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_variance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
}

/// Immutable stat block for an allied guest, keyed by speaker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuestTemplate {
    pub speaker: String,
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_variance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
}

/// One slot of an enemy group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupMember {
    pub template: String,
    /// Explicit unique id for this occurrence. When absent, the template id is
    /// used and repeats get a `#n` suffix.
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: Option<String>,
}

impl GroupMember {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            brand: None,
        }
    }

    pub fn branded(template: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            brand: Some(brand.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyGroup {
    pub id: String,
    pub members: Vec<GroupMember>,
}

impl EnemyGroup {
    /// Unique enemy ids for every member, in group order.
    ///
    /// `[slime, slime, bat]` becomes `[slime, slime#2, bat]`. Generated ids
    /// never take a name used as a brand elsewhere in the group, so
    /// `[imp, brute as imp]` becomes `[imp#2, imp]`. Two members branded
    /// alike still collide.
    pub fn member_ids(&self) -> Vec<(String, &GroupMember)> {
        let brands: Vec<&str> = self
            .members
            .iter()
            .filter_map(|m| m.brand.as_deref())
            .collect();
        let mut counters: Vec<(&str, u32)> = Vec::new();
        self.members
            .iter()
            .map(|member| {
                if let Some(brand) = &member.brand {
                    return (brand.clone(), member);
                }
                let slot = match counters.iter().position(|(t, _)| *t == member.template) {
                    Some(slot) => slot,
                    None => {
                        counters.push((member.template.as_str(), 0));
                        counters.len() - 1
                    }
                };
                let id = loop {
                    counters[slot].1 += 1;
                    let id = match counters[slot].1 {
                        1 => member.template.clone(),
                        n => format!("{}#{}", member.template, n),
                    };
                    if !brands.contains(&id.as_str()) {
                        break id;
                    }
                };
                (id, member)
            })
            .collect()
    }
}

/// Read-only lookup of encounter participants that are not player characters.
pub trait BestiaryOracle: Send + Sync {
    fn group(&self, id: &str) -> Option<EnemyGroup>;
    fn enemy(&self, template: &str) -> Option<EnemyTemplate>;
    fn guest(&self, speaker: &str) -> Option<GuestTemplate>;
}
