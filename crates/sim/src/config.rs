//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless simulation configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub encounter: String,
    /// Hard stop for encounters that never resolve.
    pub max_actions: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/game/content/data"),
            seed: 0,
            encounter: "slime_pit".to_string(),
            max_actions: 500,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `COMBAT_SEED` - RNG seed (default: 0)
    /// - `COMBAT_ENCOUNTER` - Encounter name from `party.ron` (default: `slime_pit`)
    /// - `COMBAT_MAX_ACTIONS` - Action limit (default: 500)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("COMBAT_SEED") {
            config.seed = seed;
        }
        if let Ok(encounter) = env::var("COMBAT_ENCOUNTER") {
            config.encounter = encounter;
        }
        if let Some(limit) = read_env::<usize>("COMBAT_MAX_ACTIONS") {
            config.max_actions = limit.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
