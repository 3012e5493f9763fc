//! Damage resolution - Apply a raw hit to a StatBlock

use super::result::DamageTaken;
use crate::stat_block::StatBlock;

/// Damage left after flat defense. Never negative, never more than `raw`.
pub fn mitigated_damage(raw: f64, defense: f64) -> f64 {
    (raw - defense).max(0.0).min(raw.max(0.0))
}

/// Resolve a raw hit against a defending stat block
///
/// Defense is subtracted flat from the hit; whatever remains comes off health.
/// Health is allowed to go below zero: the caller decides what "down" means.
pub fn resolve_damage(defender: &mut StatBlock, raw: f64) -> DamageTaken {
    let health_before = defender.health;
    let final_amount = mitigated_damage(raw, defender.defense);
    defender.health -= final_amount;

    DamageTaken {
        raw_amount: raw,
        mitigated_amount: raw - final_amount,
        final_amount,
        health_before,
        health_after: defender.health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyConstants, HeroConstants};
    use proptest::prelude::*;

    #[test]
    fn test_basic_damage() {
        let mut defender = StatBlock::enemy(1, &EnemyConstants::default());

        let result = resolve_damage(&mut defender, 20.0);

        assert!((result.final_amount - 5.0).abs() < f64::EPSILON);
        assert!((result.mitigated_amount - 15.0).abs() < f64::EPSILON);
        assert!((defender.health - 45.0).abs() < f64::EPSILON);
        assert!(result.still_alive());
    }

    #[test]
    fn test_defense_fully_negates() {
        let mut defender = StatBlock::hero(&HeroConstants::default());
        defender.defense = 50.0;

        let result = resolve_damage(&mut defender, 30.0);

        assert!(result.final_amount.abs() < f64::EPSILON);
        assert!((defender.health - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_killing_blow_leaves_negative_health() {
        let mut defender = StatBlock::hero(&HeroConstants::default());
        defender.health = 10.0;

        let result = resolve_damage(&mut defender, 40.0);

        assert!(result.is_killing_blow());
        assert!(!defender.is_alive());
        assert!((defender.health - -25.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_damage_is_bounded(raw in 0.0f64..10_000.0, defense in 0.0f64..10_000.0) {
            let mut defender = StatBlock::hero(&HeroConstants::default());
            defender.defense = defense;
            defender.health = 1_000_000.0;

            let result = resolve_damage(&mut defender, raw);
            let expected = (raw - defense).max(0.0);

            prop_assert!((result.final_amount - expected).abs() < 1e-9);
            prop_assert!(result.final_amount >= 0.0);
            prop_assert!(result.final_amount <= raw);
            prop_assert!((1_000_000.0 - defender.health - expected).abs() < 1e-6);
        }
    }
}
