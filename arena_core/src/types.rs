//! Core types shared across the arena simulation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

/// A named numeric attribute on a stat block
///
/// Names match the keys used by the catalog (`str`, `maxHealth`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "str")]
    Strength,
    #[serde(rename = "int")]
    Intelligence,
    #[serde(rename = "agi")]
    Agility,
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "maxHealth")]
    MaxHealth,
    #[serde(rename = "defense")]
    Defense,
    #[serde(rename = "stamina")]
    Stamina,
    #[serde(rename = "maxStamina")]
    MaxStamina,
    #[serde(rename = "staminaRegen")]
    StaminaRegen,
    /// Enemy only
    #[serde(rename = "damage")]
    Damage,
    /// Enemy only
    #[serde(rename = "xpValue")]
    XpValue,
}

impl Stat {
    /// Every stat, in display order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Strength,
            Stat::Intelligence,
            Stat::Agility,
            Stat::Health,
            Stat::MaxHealth,
            Stat::Defense,
            Stat::Stamina,
            Stat::MaxStamina,
            Stat::StaminaRegen,
            Stat::Damage,
            Stat::XpValue,
        ]
    }

    /// The three primary attributes that attribute points can raise
    pub fn primary() -> &'static [Stat] {
        &[Stat::Strength, Stat::Intelligence, Stat::Agility]
    }

    /// Catalog key for this stat
    pub fn name(self) -> &'static str {
        match self {
            Stat::Strength => "str",
            Stat::Intelligence => "int",
            Stat::Agility => "agi",
            Stat::Health => "health",
            Stat::MaxHealth => "maxHealth",
            Stat::Defense => "defense",
            Stat::Stamina => "stamina",
            Stat::MaxStamina => "maxStamina",
            Stat::StaminaRegen => "staminaRegen",
            Stat::Damage => "damage",
            Stat::XpValue => "xpValue",
        }
    }

    /// Look up a stat by catalog key
    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::all().iter().copied().find(|s| s.name() == name)
    }

    pub fn is_primary(self) -> bool {
        Stat::primary().contains(&self)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::from_name(s).ok_or_else(|| ActionError::UnknownStat(s.to_string()))
    }
}

/// Which skill catalog an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Passive,
    Active,
}

impl SkillKind {
    pub fn name(self) -> &'static str {
        match self {
            SkillKind::Passive => "passive",
            SkillKind::Active => "active",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkillKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passive" => Ok(SkillKind::Passive),
            "active" => Ok(SkillKind::Active),
            other => Err(ActionError::UnknownSkillKind(other.to_string())),
        }
    }
}

/// Equipment slot on the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[EquipmentSlot::Weapon, EquipmentSlot::Armor]
    }
}

/// Which side of the arena a combatant fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantKind {
    Hero,
    Enemy,
}

impl fmt::Display for CombatantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatantKind::Hero => f.write_str("Hero"),
            CombatantKind::Enemy => f.write_str("Enemy"),
        }
    }
}
