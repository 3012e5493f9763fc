//! Loot - Rarity rolls and stat modifiers dropped by defeated enemies
//!
//! Loot is a value object only. Nothing here touches the hero.

mod rarity;

pub use rarity::Rarity;

use crate::config::LootConstants;
use crate::types::Stat;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single stat bonus on a loot item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: Stat,
    pub value: f64,
}

/// A rolled item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    /// Tier of the enemy that dropped it
    pub tier: u32,
    pub rarity: Rarity,
    /// One entry per distinct stat, in first-rolled order
    pub modifiers: Vec<StatModifier>,
}

impl LootItem {
    /// Add to an existing modifier for `stat`, or append a new one
    pub fn add_modifier(&mut self, stat: Stat, value: f64) {
        if let Some(entry) = self.modifiers.iter_mut().find(|m| m.stat == stat) {
            entry.value += value;
        } else {
            self.modifiers.push(StatModifier { stat, value });
        }
    }

    pub fn modifier(&self, stat: Stat) -> Option<f64> {
        self.modifiers.iter().find(|m| m.stat == stat).map(|m| m.value)
    }

    /// Sum of all modifier values
    pub fn total_bonus(&self) -> f64 {
        self.modifiers.iter().map(|m| m.value).sum()
    }
}

impl fmt::Display for LootItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {} {}", self.tier, self.rarity)?;
        let mods: Vec<String> = self
            .modifiers
            .iter()
            .map(|m| format!("{} +{}", m.stat, m.value))
            .collect();
        if !mods.is_empty() {
            write!(f, " ({})", mods.join(", "))?;
        }
        Ok(())
    }
}

/// Loot roller for one difficulty tier
#[derive(Debug, Clone)]
pub struct LootTable {
    tier: u32,
    rarity_weights: Vec<f64>,
    stat_pool: Vec<Stat>,
    magnitude_per_tier: f64,
}

impl LootTable {
    pub fn new(tier: u32, constants: &LootConstants) -> Self {
        LootTable {
            tier,
            rarity_weights: constants.rarity_weights.clone(),
            stat_pool: constants.stat_pool.clone(),
            magnitude_per_tier: constants.magnitude_per_tier,
        }
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Roll an item with the caller's RNG
    pub fn generate_with_rng(&self, rng: &mut impl Rng) -> LootItem {
        let rarity = self.roll_rarity(rng);
        let mut item = LootItem {
            tier: self.tier,
            rarity,
            modifiers: Vec::new(),
        };
        self.roll_modifiers(&mut item, rng);
        item
    }

    /// Weighted rarity roll
    ///
    /// Walks the cumulative weights and takes the first bucket whose running
    /// total reaches the roll. Falls back to Common if rounding leaves the
    /// roll above every bucket.
    pub fn roll_rarity(&self, rng: &mut impl Rng) -> Rarity {
        let roll: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (index, weight) in self.rarity_weights.iter().enumerate() {
            cumulative += weight;
            if roll <= cumulative {
                return Rarity::from_index(index).unwrap_or(Rarity::Common);
            }
        }
        Rarity::Common
    }

    // One roll per rarity step; repeats of a stat stack into one entry.
    fn roll_modifiers(&self, item: &mut LootItem, rng: &mut impl Rng) {
        let steps = item.rarity.modifier_count();
        for _ in 0..steps {
            let Some(stat) = self.stat_pool.choose(rng) else {
                return;
            };
            let roll: f64 = rng.gen();
            let value = (roll * steps as f64 * self.tier as f64 * self.magnitude_per_tier).ceil();
            item.add_modifier(*stat, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(tier: u32) -> LootTable {
        LootTable::new(tier, &LootConstants::default())
    }

    #[test]
    fn test_add_modifier_accumulates() {
        let mut item = LootItem {
            tier: 1,
            rarity: Rarity::Rare,
            modifiers: Vec::new(),
        };
        item.add_modifier(Stat::Strength, 2.0);
        item.add_modifier(Stat::Defense, 1.0);
        item.add_modifier(Stat::Strength, 3.0);

        assert_eq!(item.modifiers.len(), 2);
        assert_eq!(item.modifier(Stat::Strength), Some(5.0));
        assert!((item.total_bonus() - 6.0).abs() < f64::EPSILON);
        assert_eq!(item.modifiers[0].stat, Stat::Strength);
    }

    #[test]
    fn test_modifier_rolls_match_rarity() {
        let table = table(3);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let item = table.generate_with_rng(&mut rng);
            let steps = item.rarity.modifier_count() as f64;
            assert_eq!(item.tier, 3);
            assert!(!item.modifiers.is_empty());
            assert!(item.modifiers.len() <= item.rarity.modifier_count());

            // Every roll is at most (rarity + 1) * tier * 2, and there are rarity + 1 rolls
            let ceiling = steps * 3.0 * 2.0;
            assert!(item.total_bonus() <= ceiling * steps);
            for m in &item.modifiers {
                assert!(LootConstants::default().stat_pool.contains(&m.stat));
                assert!(m.value >= 0.0);
            }
        }
    }

    #[test]
    fn test_single_stat_pool_collapses_to_one_entry() {
        let constants = LootConstants {
            rarity_weights: vec![0.0, 0.0, 0.0, 0.0, 1.0],
            stat_pool: vec![Stat::Agility],
            ..LootConstants::default()
        };
        let table = LootTable::new(1, &constants);
        let mut rng = StdRng::seed_from_u64(11);

        let item = table.generate_with_rng(&mut rng);

        assert_eq!(item.rarity, Rarity::Legendary);
        assert_eq!(item.modifiers.len(), 1);
        assert_eq!(item.modifiers[0].stat, Stat::Agility);
    }

    #[test]
    fn test_one_roll_per_rarity_step() {
        // A constant RNG makes every f64 draw 0.5
        let mut rng = StepRng::new(1 << 63, 0);

        for rarity in Rarity::all() {
            let mut weights = vec![0.0; 5];
            weights[rarity.index()] = 1.0;
            let constants = LootConstants {
                rarity_weights: weights,
                stat_pool: vec![Stat::Defense],
                ..LootConstants::default()
            };
            let item = LootTable::new(3, &constants).generate_with_rng(&mut rng);

            // Each roll is ceil(0.5 * steps * 3 * 2) = steps * 3
            let steps = rarity.modifier_count() as f64;
            assert_eq!(item.rarity, *rarity);
            assert_eq!(item.modifier(Stat::Defense), Some(steps * steps * 3.0));
        }
    }

    #[test]
    fn test_rarity_distribution() {
        let table = table(1);
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 20_000;
        let mut counts = [0usize; 5];

        for _ in 0..draws {
            counts[table.roll_rarity(&mut rng).index()] += 1;
        }

        let expected = [0.50, 0.30, 0.15, 0.04, 0.01];
        for (count, weight) in counts.iter().zip(expected) {
            let observed = *count as f64 / draws as f64;
            assert!(
                (observed - weight).abs() < 0.015,
                "observed {} expected {}",
                observed,
                weight
            );
        }
    }

    #[test]
    fn test_display() {
        let item = LootItem {
            tier: 2,
            rarity: Rarity::Uncommon,
            modifiers: vec![
                StatModifier { stat: Stat::MaxHealth, value: 4.0 },
                StatModifier { stat: Stat::Intelligence, value: 1.0 },
            ],
        };
        assert_eq!(item.to_string(), "Tier 2 Uncommon (maxHealth +4, int +1)");
    }
}
