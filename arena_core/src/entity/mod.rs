//! Combatants - The hero and the enemies it fights

mod enemy;
mod hero;

pub use enemy::{Enemy, EnemySnapshot};
pub use hero::{
    CreationNote, EffectOutcome, Hero, HeroSnapshot, LearnedSkill, LevelUp, PointSpent, XpGain,
};

use crate::combat::{resolve_damage, AttackResult, DamageTaken};
use crate::error::ActionError;
use crate::stat_block::StatBlock;
use crate::types::CombatantKind;

/// Shared contract for anything that can fight in the arena
pub trait Combatant {
    fn kind(&self) -> CombatantKind;

    fn stats(&self) -> &StatBlock;

    fn stats_mut(&mut self) -> &mut StatBlock;

    /// Take a raw hit. Defense is subtracted flat; see [`resolve_damage`].
    fn take_damage(&mut self, amount: f64) -> DamageTaken {
        let taken = resolve_damage(self.stats_mut(), amount);
        tracing::trace!(
            target: "arena::combat",
            defender = %self.kind(),
            raw = taken.raw_amount,
            dealt = taken.final_amount,
            health = taken.health_after,
            "damage taken"
        );
        taken
    }

    /// Strike `target` once
    fn attack(&mut self, target: &mut dyn Combatant) -> Result<AttackResult, ActionError>;

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }
}
