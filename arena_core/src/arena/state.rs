//! Arena state, per-tick outcomes and session counters

use crate::combat::AttackResult;
use crate::entity::{EnemySnapshot, XpGain};
use crate::loot::{LootItem, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where the arena state machine currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaState {
    /// Auto-combat is off
    Idle,
    /// Auto-combat is on and the next tick will spawn an enemy
    ArenaEmpty,
    /// Auto-combat is on and a living enemy is present
    InCombat,
    /// The hero is down. Terminal for this session.
    HeroDown,
}

impl fmt::Display for ArenaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArenaState::Idle => "idle",
            ArenaState::ArenaEmpty => "arena empty",
            ArenaState::InCombat => "in combat",
            ArenaState::HeroDown => "hero down",
        };
        f.write_str(name)
    }
}

/// What happened during one round of combat
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Enemy spawned at the start of this tick
    pub spawned: Option<EnemySnapshot>,
    /// `None` when the hero was out of stamina
    pub hero_attack: Option<AttackResult>,
    /// `None` when the enemy died first
    pub enemy_attack: Option<AttackResult>,
}

/// Result of a single call to [`CombatManager::tick`](super::CombatManager::tick)
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Auto-combat is off; nothing happened
    Halted,
    /// Both sides are still standing
    Fought(RoundReport),
    EnemyDefeated {
        round: RoundReport,
        loot: LootItem,
        xp: XpGain,
    },
    /// Auto-combat has been stopped
    HeroDefeated(RoundReport),
}

impl TickOutcome {
    pub fn round(&self) -> Option<&RoundReport> {
        match self {
            TickOutcome::Halted => None,
            TickOutcome::Fought(round)
            | TickOutcome::HeroDefeated(round)
            | TickOutcome::EnemyDefeated { round, .. } => Some(round),
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, TickOutcome::Halted)
    }
}

/// Running totals for the current session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks_executed: u64,
    pub enemies_spawned: u64,
    pub enemies_defeated: u64,
    pub hero_attacks: u64,
    pub out_of_stamina: u64,
    /// Post-defense damage the hero dealt
    pub damage_dealt: f64,
    /// Post-defense damage the hero took
    pub damage_taken: f64,
    pub loot_by_rarity: BTreeMap<Rarity, u64>,
}

impl SessionStats {
    pub fn loot_count(&self, rarity: Rarity) -> u64 {
        self.loot_by_rarity.get(&rarity).copied().unwrap_or(0)
    }

    pub fn total_loot(&self) -> u64 {
        self.loot_by_rarity.values().sum()
    }

    pub(crate) fn record_loot(&mut self, rarity: Rarity) {
        *self.loot_by_rarity.entry(rarity).or_insert(0) += 1;
    }
}
