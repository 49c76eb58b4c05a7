//! Headless combat simulator.
//!
//! Loads content from a data directory, stages one encounter and plays it to
//! the end: enemies and guests follow their fixed policy, characters are
//! driven by a simple autopilot. Every event is logged as it happens.
//!
//! ```bash
//! COMBAT_ENCOUNTER=goblin_camp COMBAT_SEED=7 RUST_LOG=debug cargo run -p combat-sim
//! ```

mod autopilot;
mod config;
mod report;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{CombatEnv, CombatSession, PcgRng};

use autopilot::Autopilot;
use config::SimConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        "data={} encounter={} seed={}",
        config.data_dir.display(),
        config.encounter,
        config.seed
    );

    let factory = ContentFactory::new(&config.data_dir);
    let catalog = factory.load_catalog().context("loading catalog")?;
    let bestiary = factory.load_bestiary().context("loading bestiary")?;
    let party = factory.load_party().context("loading party")?;
    let combat_config = factory.load_config().context("loading config")?;
    let encounter = party.encounter(&config.encounter)?.clone();

    let env = CombatEnv::new(&catalog, &bestiary);
    let mut session = CombatSession::start(
        encounter,
        party.party.clone(),
        party.inventory.clone(),
        env,
        PcgRng::new(config.seed),
        combat_config,
    )?;

    let autopilot = Autopilot::new(&catalog);
    let mut cursor = 0;
    for _ in 0..config.max_actions {
        let Some(active) = session.active().cloned() else {
            break;
        };

        if session.is_ai_controlled(&active) {
            session.take_ai_turn(env)?;
        } else {
            autopilot.play(&mut session, env, &active)?;
        }

        for event in session.events_since(cursor) {
            tracing::info!("{}", report::describe(event));
        }
        cursor = session.events().len();
    }

    match session.result() {
        Some(result) => {
            for line in report::summarize(&result) {
                tracing::info!("{}", line);
            }
            if result.is_victory() && session.mark_rewards_granted() {
                tracing::info!("rewards marked as granted");
            }
        }
        None => tracing::warn!(
            "stopped after {} actions without an outcome",
            config.max_actions
        ),
    }

    Ok(())
}
