//! Arena Sim - A headless driver for arena_core sessions
//!
//! This binary shows:
//! - Building a session from the built-in catalog or custom TOML files
//! - Driving ticks in real time or as fast as possible
//! - Spending attribute and skill points between ticks
//! - Printing the combat log and a final snapshot

use arena_core::config::{self, Catalog, ConfigError, GameConstants};
use arena_core::prelude::*;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "arena-sim")]
#[command(about = "Run an idle arena session and print its combat log")]
struct Cli {
    /// Archetype id from the catalog (warrior, mage, rogue)
    #[arg(long)]
    archetype: Option<String>,

    /// Maximum number of ticks to run
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// RNG seed for reproducible loot rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Wait one tick period between ticks instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Stats to raise with attribute points, used round-robin
    #[arg(long = "spend", value_name = "STAT")]
    spend: Vec<String>,

    /// Skills to learn as points allow, as `id` or `id:active`
    #[arg(long = "learn", value_name = "SKILL")]
    learn: Vec<String>,

    /// Game constants TOML overriding the defaults
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Skill and archetype catalog TOML replacing the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player choices applied between ticks
struct Plan {
    spend: Vec<Stat>,
    next_spend: usize,
    learn: VecDeque<(String, SkillKind)>,
}

impl Plan {
    fn from_cli(cli: &Cli) -> Result<Self, SimError> {
        let spend = cli
            .spend
            .iter()
            .map(|s| s.parse::<Stat>())
            .collect::<Result<Vec<_>, _>>()?;
        let learn = cli
            .learn
            .iter()
            .map(|s| parse_skill(s))
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Plan {
            spend,
            next_spend: 0,
            learn,
        })
    }

    fn apply(&mut self, manager: &mut CombatManager) {
        while manager.hero().attribute_points() > 0 && !self.spend.is_empty() {
            let stat = self.spend[self.next_spend % self.spend.len()];
            self.next_spend += 1;
            if manager.spend_attribute_point(stat.name()).is_err() {
                break;
            }
        }

        while let Some((id, kind)) = self.learn.front() {
            match manager.learn_skill(id, *kind) {
                Ok(_) => {
                    self.learn.pop_front();
                }
                // Wait for more points
                Err(ActionError::NotEnoughSkillPoints { .. }) => break,
                Err(_) => {
                    self.learn.pop_front();
                }
            }
        }
    }
}

fn parse_skill(spec: &str) -> Result<(String, SkillKind), ActionError> {
    match spec.split_once(':') {
        Some((id, kind)) => Ok((id.to_string(), kind.parse()?)),
        None => Ok((spec.to_string(), SkillKind::Passive)),
    }
}

fn build_manager(cli: &Cli) -> Result<CombatManager, SimError> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let constants = match &cli.constants {
        Some(path) => config::load_constants(path)?,
        None => GameConstants::default(),
    };
    let catalog = Arc::new(catalog);
    let archetype = cli.archetype.as_deref();

    let manager = match cli.seed {
        Some(seed) => {
            CombatManager::with_rng(catalog, constants, archetype, ChaCha8Rng::seed_from_u64(seed))?
        }
        None => CombatManager::new(catalog, constants, archetype)?,
    };
    Ok(manager)
}

/// Tick until the source runs dry or the hero falls, printing new events as they land
fn drive(manager: &mut CombatManager, plan: &mut Plan, source: &mut impl TickSource, quiet: bool) {
    let mut cursor = 0;
    print_new(manager, &mut cursor, quiet);

    plan.apply(manager);
    while manager.is_running() && source.next_tick() {
        manager.tick();
        plan.apply(manager);
        print_new(manager, &mut cursor, quiet);
    }
    print_new(manager, &mut cursor, quiet);
}

fn print_new(manager: &CombatManager, cursor: &mut u64, quiet: bool) {
    for event in manager.events().take_new(cursor) {
        if !quiet {
            println!("{}", event);
        }
    }
}

fn print_summary(manager: &CombatManager) {
    let hero = manager.hero();
    let stats = hero.stats();
    let session = manager.session_stats();

    println!();
    println!("=== {} after {} ticks ===", manager.state(), session.ticks_executed);
    println!(
        "Hero: level {} ({}/{} XP), {} attribute / {} skill points",
        hero.level(),
        hero.xp().floor(),
        hero.xp_to_next_level(),
        hero.attribute_points(),
        hero.skill_points()
    );
    println!(
        "  Health {:.0}/{:.0}  Stamina {:.0}/{:.0}  Str {} Int {} Agi {} Def {}",
        stats.health,
        stats.max_health,
        stats.stamina,
        stats.max_stamina,
        stats.strength,
        stats.intelligence,
        stats.agility,
        stats.defense
    );
    if let Some(enemy) = manager.current_enemy() {
        println!(
            "Enemy: tier {} with {:.0}/{:.0} health",
            enemy.tier(),
            enemy.stats().health,
            enemy.stats().max_health
        );
    }
    println!(
        "Enemies: {} spawned, {} defeated. Damage: {:.0} dealt, {:.0} taken",
        session.enemies_spawned, session.enemies_defeated, session.damage_dealt, session.damage_taken
    );
    for rarity in Rarity::all() {
        let count = session.loot_count(*rarity);
        if count > 0 {
            println!("  {:<10} x{}", rarity.name(), count);
        }
    }
}

fn print_json(manager: &CombatManager) -> Result<(), SimError> {
    let report = serde_json::json!({
        "state": manager.state(),
        "elapsed_ms": manager.elapsed_ms(),
        "hero": manager.hero().snapshot(),
        "enemy": manager.enemy_snapshot(),
        "session": manager.session_stats(),
        "events": manager.events().iter().collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut plan = Plan::from_cli(&cli)?;
    let mut manager = build_manager(&cli)?;
    tracing::debug!(
        target: "arena::sim",
        ticks = cli.ticks,
        realtime = cli.realtime,
        seed = ?cli.seed,
        "session ready"
    );

    manager.start_auto_combat()?;
    if cli.realtime {
        let period = manager.constants().arena.tick_period_ms;
        let mut source = FixedInterval::from_millis(period).with_limit(cli.ticks);
        drive(&mut manager, &mut plan, &mut source, cli.json);
    } else {
        drive(&mut manager, &mut plan, &mut StepTicker::new(cli.ticks), cli.json);
    }
    manager.stop_auto_combat();

    if cli.json {
        print_json(&manager)
    } else {
        print_summary(&manager);
        Ok(())
    }
}
