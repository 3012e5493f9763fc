//! StatBlock - Named numeric attributes owned by a hero or enemy

mod layout;

pub use layout::StatLayout;

use crate::config::{EnemyConstants, HeroConstants};
use crate::error::ActionError;
use crate::types::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete stat state for one combatant
///
/// Which stats exist depends on the [`StatLayout`]: heroes carry attributes and
/// stamina, enemies carry damage and an XP reward. Lookups of a stat outside the
/// layout fail rather than silently touching an unused field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    layout: StatLayout,

    // === Attributes ===
    pub strength: f64,
    pub intelligence: f64,
    pub agility: f64,

    // === Resources ===
    pub health: f64,
    pub max_health: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    /// Per second
    pub stamina_regen: f64,

    // === Combat ===
    pub defense: f64,
    pub damage: f64,
    pub xp_value: f64,
}

impl StatBlock {
    fn empty(layout: StatLayout) -> Self {
        StatBlock {
            layout,
            strength: 0.0,
            intelligence: 0.0,
            agility: 0.0,
            health: 0.0,
            max_health: 0.0,
            stamina: 0.0,
            max_stamina: 0.0,
            stamina_regen: 0.0,
            defense: 0.0,
            damage: 0.0,
            xp_value: 0.0,
        }
    }

    /// Starting block for a new hero, before archetype bonuses
    pub fn hero(base: &HeroConstants) -> Self {
        StatBlock {
            strength: base.strength,
            intelligence: base.intelligence,
            agility: base.agility,
            health: base.max_health,
            max_health: base.max_health,
            stamina: base.max_stamina,
            max_stamina: base.max_stamina,
            stamina_regen: base.stamina_regen,
            defense: base.defense,
            ..Self::empty(StatLayout::Hero)
        }
    }

    /// Block for an enemy of the given tier
    pub fn enemy(tier: u32, scaling: &EnemyConstants) -> Self {
        let base = tier as f64 * scaling.base_per_tier;
        StatBlock {
            health: base * scaling.health_factor,
            max_health: base * scaling.health_factor,
            damage: base * scaling.damage_factor,
            defense: base * scaling.defense_factor,
            xp_value: base * scaling.xp_factor,
            ..Self::empty(StatLayout::Enemy)
        }
    }

    pub fn layout(&self) -> StatLayout {
        self.layout
    }

    /// Whether this block carries `stat`
    pub fn has(&self, stat: Stat) -> bool {
        self.layout.contains(stat)
    }

    /// Read a stat, or `None` if this block does not carry it
    pub fn get(&self, stat: Stat) -> Option<f64> {
        if !self.has(stat) {
            return None;
        }
        Some(match stat {
            Stat::Strength => self.strength,
            Stat::Intelligence => self.intelligence,
            Stat::Agility => self.agility,
            Stat::Health => self.health,
            Stat::MaxHealth => self.max_health,
            Stat::Defense => self.defense,
            Stat::Stamina => self.stamina,
            Stat::MaxStamina => self.max_stamina,
            Stat::StaminaRegen => self.stamina_regen,
            Stat::Damage => self.damage,
            Stat::XpValue => self.xp_value,
        })
    }

    fn slot_mut(&mut self, stat: Stat) -> Option<&mut f64> {
        if !self.has(stat) {
            return None;
        }
        Some(match stat {
            Stat::Strength => &mut self.strength,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Agility => &mut self.agility,
            Stat::Health => &mut self.health,
            Stat::MaxHealth => &mut self.max_health,
            Stat::Defense => &mut self.defense,
            Stat::Stamina => &mut self.stamina,
            Stat::MaxStamina => &mut self.max_stamina,
            Stat::StaminaRegen => &mut self.stamina_regen,
            Stat::Damage => &mut self.damage,
            Stat::XpValue => &mut self.xp_value,
        })
    }

    /// Add `delta` to a stat without re-checking resource caps
    ///
    /// Used when applying a batch of bonuses whose order should not matter;
    /// call [`StatBlock::clamp_resources`] afterwards.
    pub(crate) fn add_unclamped(&mut self, stat: Stat, delta: f64) -> Result<f64, ActionError> {
        let slot = self
            .slot_mut(stat)
            .ok_or_else(|| ActionError::UnknownStat(stat.name().to_string()))?;
        *slot += delta;
        Ok(*slot)
    }

    /// Add `delta` to a stat, keeping current resources within their maxima.
    /// Returns the stat's new value.
    pub fn add(&mut self, stat: Stat, delta: f64) -> Result<f64, ActionError> {
        self.add_unclamped(stat, delta)?;
        self.clamp_resources();
        self.get(stat)
            .ok_or_else(|| ActionError::UnknownStat(stat.name().to_string()))
    }

    /// Add `delta` to the stat with catalog key `name`
    pub fn add_by_name(&mut self, name: &str, delta: f64) -> Result<f64, ActionError> {
        let stat = Stat::from_name(name)
            .filter(|s| self.has(*s))
            .ok_or_else(|| ActionError::UnknownStat(name.to_string()))?;
        self.add(stat, delta)
    }

    /// Clamp current health and stamina down to their maxima. Never raises them.
    pub fn clamp_resources(&mut self) {
        if self.health > self.max_health {
            self.health = self.max_health;
        }
        if self.stamina > self.max_stamina {
            self.stamina = self.max_stamina;
        }
    }

    /// Check if the owner is alive
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Refill health to max
    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    /// Refill stamina to max
    pub fn restore_stamina(&mut self) {
        self.stamina = self.max_stamina;
    }

    /// Spend stamina if enough is available. Leaves the block untouched otherwise.
    pub fn spend_stamina(&mut self, amount: f64) -> bool {
        if self.stamina < amount {
            return false;
        }
        self.stamina -= amount;
        true
    }

    /// Every stat this block carries with its current value
    pub fn entries(&self) -> BTreeMap<Stat, f64> {
        self.layout
            .stats()
            .iter()
            .filter_map(|s| self.get(*s).map(|v| (*s, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_block_defaults() {
        let block = StatBlock::hero(&HeroConstants::default());
        assert!((block.strength - 10.0).abs() < f64::EPSILON);
        assert!((block.health - 100.0).abs() < f64::EPSILON);
        assert!((block.max_stamina - 100.0).abs() < f64::EPSILON);
        assert!((block.defense - 5.0).abs() < f64::EPSILON);
        assert!((block.stamina_regen - 1.0).abs() < f64::EPSILON);
        assert!(block.has(Stat::Stamina));
        assert!(!block.has(Stat::Damage));
        assert_eq!(block.get(Stat::XpValue), None);
    }

    #[test]
    fn test_enemy_block_scales_with_tier() {
        let block = StatBlock::enemy(1, &EnemyConstants::default());
        assert!((block.health - 50.0).abs() < f64::EPSILON);
        assert!((block.max_health - 50.0).abs() < f64::EPSILON);
        assert!((block.damage - 20.0).abs() < f64::EPSILON);
        assert!((block.defense - 15.0).abs() < f64::EPSILON);
        assert!((block.xp_value - 30.0).abs() < f64::EPSILON);

        let block = StatBlock::enemy(3, &EnemyConstants::default());
        assert!((block.health - 150.0).abs() < f64::EPSILON);
        assert!((block.defense - 45.0).abs() < f64::EPSILON);
        assert!(!block.has(Stat::Strength));
    }

    #[test]
    fn test_add_clamps_current_to_max() {
        let mut block = StatBlock::hero(&HeroConstants::default());
        let health = block.add(Stat::Health, 50.0).unwrap();
        assert!((health - 100.0).abs() < f64::EPSILON);

        // Raising the max does not refill current
        block.add(Stat::MaxHealth, 20.0).unwrap();
        assert!((block.health - 100.0).abs() < f64::EPSILON);
        assert!((block.max_health - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_outside_layout_fails() {
        let mut block = StatBlock::hero(&HeroConstants::default());
        let before = block.clone();
        assert!(matches!(
            block.add(Stat::Damage, 5.0),
            Err(ActionError::UnknownStat(_))
        ));
        assert!(block.add_by_name("luck", 1.0).is_err());
        assert_eq!(block, before);
    }

    #[test]
    fn test_add_by_name() {
        let mut block = StatBlock::hero(&HeroConstants::default());
        let value = block.add_by_name("staminaRegen", 0.5).unwrap();
        assert!((value - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spend_stamina() {
        let mut block = StatBlock::hero(&HeroConstants::default());
        block.stamina = 15.0;
        assert!(block.spend_stamina(10.0));
        assert!((block.stamina - 5.0).abs() < f64::EPSILON);
        assert!(!block.spend_stamina(10.0));
        assert!((block.stamina - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entries_follow_layout() {
        let block = StatBlock::enemy(2, &EnemyConstants::default());
        let entries = block.entries();
        assert_eq!(entries.len(), 5);
        assert!((entries[&Stat::XpValue] - 60.0).abs() < f64::EPSILON);
        assert!(!entries.contains_key(&Stat::Stamina));
    }
}
