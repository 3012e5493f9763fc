//! Which stats a block carries

use crate::types::Stat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatLayout {
    Hero,
    Enemy,
}

impl StatLayout {
    pub fn stats(self) -> &'static [Stat] {
        match self {
            StatLayout::Hero => &[
                Stat::Strength,
                Stat::Intelligence,
                Stat::Agility,
                Stat::Health,
                Stat::MaxHealth,
                Stat::Defense,
                Stat::Stamina,
                Stat::MaxStamina,
                Stat::StaminaRegen,
            ],
            StatLayout::Enemy => &[
                Stat::Health,
                Stat::MaxHealth,
                Stat::Damage,
                Stat::Defense,
                Stat::XpValue,
            ],
        }
    }

    pub fn contains(self, stat: Stat) -> bool {
        self.stats().contains(&stat)
    }
}
