//! Outcome of damage resolution and attacks

use crate::types::CombatantKind;
use serde::{Deserialize, Serialize};

/// Result of applying one blow to a stat block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageTaken {
    /// Damage before defense
    pub raw_amount: f64,
    /// Amount absorbed by defense
    pub mitigated_amount: f64,
    /// Damage actually subtracted from health
    pub final_amount: f64,
    pub health_before: f64,
    pub health_after: f64,
}

impl DamageTaken {
    /// Whether the defender still stands after this blow
    pub fn still_alive(&self) -> bool {
        self.health_after > 0.0
    }

    /// Whether this blow took the defender from alive to down
    pub fn is_killing_blow(&self) -> bool {
        self.health_before > 0.0 && !self.still_alive()
    }
}

/// A resolved attack from one combatant on another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub attacker: CombatantKind,
    pub defender: CombatantKind,
    /// Stamina the attacker paid
    pub stamina_spent: f64,
    pub damage: DamageTaken,
}

impl AttackResult {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} attacks for {} damage; {} takes {} ({} health left)",
            self.attacker,
            self.damage.raw_amount,
            self.defender,
            self.damage.final_amount,
            self.damage.health_after
        );
        if self.damage.is_killing_blow() {
            summary.push_str(", FATAL");
        }
        summary
    }
}
