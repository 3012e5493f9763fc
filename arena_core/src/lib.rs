//! arena_core - Simulation core for an idle arena combat game
//!
//! This library provides:
//! - StatBlock: Numeric attributes owned by a hero or enemy
//! - Combatant: The attack / take-damage contract shared by both sides
//! - Hero: Leveling, attribute and skill point economy
//! - Enemy: Tier-scaled opponents
//! - LootTable: Weighted rarity rolls with stat modifiers
//! - CombatManager: The fixed-tick arena loop and its event log

pub mod arena;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod loot;
pub mod prelude;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use arena::{
    ArenaState, CombatEvent, CombatManager, EventLog, FixedInterval, LoggedEvent, StepTicker,
    TickOutcome, TickSource,
};
pub use combat::{AttackResult, DamageTaken};
pub use config::{Catalog, ConfigError, GameConstants};
pub use entity::{Combatant, Enemy, Hero};
pub use error::{ActionError, ErrorKind};
pub use loot::{LootItem, LootTable, Rarity};
pub use stat_block::StatBlock;
pub use types::{CombatantKind, EquipmentSlot, SkillKind, Stat};
