//! Game constants configuration

use super::ConfigError;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub hero: HeroConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub enemy: EnemyConstants,
    #[serde(default)]
    pub loot: LootConstants,
    #[serde(default)]
    pub arena: ArenaConstants,
}

impl GameConstants {
    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.loot.validate()?;
        if self.arena.tick_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "arena.tick_period_ms must be greater than zero".to_string(),
            ));
        }
        if self.arena.log_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "arena.log_capacity must be greater than zero".to_string(),
            ));
        }
        if self.progression.initial_xp_to_next_level == 0 || self.progression.xp_growth < 1.0 {
            return Err(ConfigError::ValidationError(
                "progression thresholds must start above zero and never shrink".to_string(),
            ));
        }
        if self.enemy.levels_per_tier == 0 {
            return Err(ConfigError::ValidationError(
                "enemy.levels_per_tier must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Starting stats and attack rules for the hero
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConstants {
    pub strength: f64,
    pub intelligence: f64,
    pub agility: f64,
    /// Starting health and max health
    pub max_health: f64,
    pub defense: f64,
    /// Starting stamina and max stamina
    pub max_stamina: f64,
    /// Stamina regenerated per second (carried on the stat block, not applied by combat)
    pub stamina_regen: f64,
    /// Stamina spent per basic attack
    pub attack_stamina_cost: f64,
    /// Raw attack damage = strength * this
    pub strength_damage_multiplier: f64,
}

impl Default for HeroConstants {
    fn default() -> Self {
        HeroConstants {
            strength: 10.0,
            intelligence: 10.0,
            agility: 10.0,
            max_health: 100.0,
            defense: 5.0,
            max_stamina: 100.0,
            stamina_regen: 1.0,
            attack_stamina_cost: 10.0,
            strength_damage_multiplier: 2.0,
        }
    }
}

/// Leveling curve and per-level grants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConstants {
    /// XP needed to go from level 1 to level 2
    pub initial_xp_to_next_level: u64,
    /// Threshold multiplier applied (then floored) on every level-up
    pub xp_growth: f64,
    pub attribute_points_per_level: u32,
    pub skill_points_per_level: u32,
    pub max_health_per_level: f64,
    pub max_stamina_per_level: f64,
    /// Added to str, int and agi on every level-up
    pub primary_stats_per_level: f64,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            initial_xp_to_next_level: 100,
            xp_growth: 1.5,
            attribute_points_per_level: 3,
            skill_points_per_level: 1,
            max_health_per_level: 10.0,
            max_stamina_per_level: 5.0,
            primary_stats_per_level: 1.0,
        }
    }
}

/// Enemy stat scaling. Every stat is `tier * base_per_tier * factor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConstants {
    pub base_per_tier: f64,
    pub health_factor: f64,
    pub damage_factor: f64,
    pub defense_factor: f64,
    pub xp_factor: f64,
    /// Hero levels per enemy tier step
    pub levels_per_tier: u32,
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            base_per_tier: 10.0,
            health_factor: 5.0,
            damage_factor: 2.0,
            defense_factor: 1.5,
            xp_factor: 3.0,
            levels_per_tier: 5,
        }
    }
}

/// Loot rarity and modifier rolls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConstants {
    /// Weights for Common, Uncommon, Rare, Epic, Legendary
    pub rarity_weights: Vec<f64>,
    /// Stats a modifier can land on
    pub stat_pool: Vec<Stat>,
    /// Modifier magnitude = ceil(roll * (rarity + 1) * tier * this)
    pub magnitude_per_tier: f64,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants {
            rarity_weights: vec![0.50, 0.30, 0.15, 0.04, 0.01],
            stat_pool: vec![
                Stat::Strength,
                Stat::Intelligence,
                Stat::Agility,
                Stat::MaxHealth,
                Stat::Defense,
            ],
            magnitude_per_tier: 2.0,
        }
    }
}

impl LootConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rarity_weights.len() != 5 {
            return Err(ConfigError::ValidationError(format!(
                "loot.rarity_weights needs 5 entries, got {}",
                self.rarity_weights.len()
            )));
        }
        if self.rarity_weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ConfigError::ValidationError(
                "loot.rarity_weights must be finite and non-negative".to_string(),
            ));
        }
        let total: f64 = self.rarity_weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::ValidationError(format!(
                "loot.rarity_weights must sum to 1, got {}",
                total
            )));
        }
        if self.stat_pool.is_empty() {
            return Err(ConfigError::ValidationError(
                "loot.stat_pool must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scheduler cadence and event retention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConstants {
    pub tick_period_ms: u64,
    /// Events kept in the display ring
    pub log_capacity: usize,
}

impl Default for ArenaConstants {
    fn default() -> Self {
        ArenaConstants {
            tick_period_ms: 1000,
            log_capacity: 20,
        }
    }
}
