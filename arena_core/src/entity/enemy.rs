//! Enemy - Disposable combatant generated from a tier

use super::Combatant;
use crate::combat::AttackResult;
use crate::config::EnemyConstants;
use crate::error::ActionError;
use crate::stat_block::StatBlock;
use crate::types::CombatantKind;
use serde::{Deserialize, Serialize};

/// An arena opponent. Its stats are a pure function of its tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    tier: u32,
    stats: StatBlock,
}

impl Enemy {
    /// Spawn an enemy at `tier` (tiers start at 1; 0 is treated as 1)
    pub fn spawn(tier: u32, scaling: &EnemyConstants) -> Self {
        let tier = tier.max(1);
        Enemy {
            tier,
            stats: StatBlock::enemy(tier, scaling),
        }
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn damage(&self) -> f64 {
        self.stats.damage
    }

    pub fn xp_value(&self) -> f64 {
        self.stats.xp_value
    }

    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            tier: self.tier,
            health: self.stats.health,
            max_health: self.stats.max_health,
            damage: self.stats.damage,
            defense: self.stats.defense,
            xp_value: self.stats.xp_value,
        }
    }
}

impl Combatant for Enemy {
    fn kind(&self) -> CombatantKind {
        CombatantKind::Enemy
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    /// Enemies always swing for their fixed damage
    fn attack(&mut self, target: &mut dyn Combatant) -> Result<AttackResult, ActionError> {
        let damage = target.take_damage(self.stats.damage);
        Ok(AttackResult {
            attacker: CombatantKind::Enemy,
            defender: target.kind(),
            stamina_spent: 0.0,
            damage,
        })
    }
}

/// Read-only view of an enemy for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub tier: u32,
    pub health: f64,
    pub max_health: f64,
    pub damage: f64,
    pub defense: f64,
    pub xp_value: f64,
}
