//! Prelude module for convenient imports
//!
//! ```rust
//! use arena_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::StatBlock;
pub use crate::types::{CombatantKind, EquipmentSlot, SkillKind, Stat};

// Combatants
pub use crate::entity::{Combatant, Enemy, EnemySnapshot, Hero, HeroSnapshot};

// Combat
pub use crate::combat::{AttackResult, DamageTaken};

// Arena loop
pub use crate::arena::{
    ArenaState, CombatEvent, CombatManager, FixedInterval, StepTicker, TickOutcome, TickSource,
};

// Loot
pub use crate::loot::{LootItem, LootTable, Rarity};

// Config and errors
pub use crate::config::{Catalog, GameConstants};
pub use crate::error::{ActionError, ErrorKind};
