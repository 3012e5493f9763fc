//! Hero - The player's combatant: leveling, points, skills

use super::Combatant;
use crate::combat::AttackResult;
use crate::config::{Catalog, GameConstants, HeroConstants, ProgressionConstants, SkillDef};
use crate::error::ActionError;
use crate::loot::LootItem;
use crate::stat_block::StatBlock;
use crate::types::{CombatantKind, EquipmentSlot, SkillKind, Stat};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Something that happened while building a hero from an archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CreationNote {
    /// Archetype id not in the catalog; the hero starts un-bonused
    UnknownArchetype { id: String },
    ArchetypeChosen { id: String, name: String },
    BonusApplied { stat: Stat, delta: f64, value: f64 },
    /// Bonus names a stat the hero does not carry
    BonusIgnored { stat: String },
}

/// One level gained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub attribute_points: u32,
    pub skill_points: u32,
    pub xp_to_next_level: f64,
}

/// Result of awarding XP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpGain {
    pub amount: f64,
    /// XP after all level-ups
    pub xp: f64,
    pub xp_to_next_level: f64,
    pub level_ups: Vec<LevelUp>,
}

/// Result of spending an attribute point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSpent {
    pub stat: Stat,
    pub value: f64,
    pub points_left: u32,
}

/// What a passive skill did to the stat block when learned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectOutcome {
    Applied { stat: Stat, delta: f64, value: f64 },
    /// Effect names a stat the hero does not carry; nothing changed
    Ignored { stat: String },
}

/// Result of learning a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedSkill {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    pub skill_points_left: u32,
    pub effect: Option<EffectOutcome>,
}

/// The player-controlled combatant
#[derive(Debug, Clone)]
pub struct Hero {
    stats: StatBlock,
    archetype: Option<String>,
    level: u32,
    xp: f64,
    /// Always a whole number; kept as f64 so growth never saturates
    xp_to_next_level: f64,
    attribute_points: u32,
    skill_points: u32,
    learned_passive: BTreeMap<String, u32>,
    learned_active: BTreeMap<String, u32>,
    equipment: BTreeMap<EquipmentSlot, Option<LootItem>>,
    /// Active skill id -> tick time (ms) at which it is ready again
    cooldowns: HashMap<String, u64>,
    rules: HeroConstants,
    progression: ProgressionConstants,
    catalog: Arc<Catalog>,
}

impl Hero {
    /// Create a level-1 hero, applying the archetype's bonuses once
    ///
    /// An archetype id missing from the catalog is not an error: the hero is
    /// built without bonuses and the returned notes say why.
    pub fn new(
        catalog: Arc<Catalog>,
        constants: &GameConstants,
        archetype_id: Option<&str>,
    ) -> (Self, Vec<CreationNote>) {
        let mut hero = Hero {
            stats: StatBlock::hero(&constants.hero),
            archetype: None,
            level: 1,
            xp: 0.0,
            xp_to_next_level: constants.progression.initial_xp_to_next_level as f64,
            attribute_points: 0,
            skill_points: 0,
            learned_passive: BTreeMap::new(),
            learned_active: BTreeMap::new(),
            equipment: EquipmentSlot::all().iter().map(|s| (*s, None)).collect(),
            cooldowns: HashMap::new(),
            rules: constants.hero.clone(),
            progression: constants.progression.clone(),
            catalog,
        };

        let notes = match archetype_id {
            Some(id) => hero.apply_archetype(id),
            None => Vec::new(),
        };
        (hero, notes)
    }

    fn apply_archetype(&mut self, id: &str) -> Vec<CreationNote> {
        let catalog = Arc::clone(&self.catalog);
        let Some(archetype) = catalog.archetype(id) else {
            tracing::warn!(target: "arena::hero", archetype = id, "unknown archetype, using base stats");
            return vec![CreationNote::UnknownArchetype { id: id.to_string() }];
        };

        let mut notes = vec![CreationNote::ArchetypeChosen {
            id: archetype.id.clone(),
            name: archetype.name.clone(),
        }];

        // All bonuses land before clamping so health/maxHealth order is irrelevant
        for (name, delta) in &archetype.bonuses {
            match Stat::from_name(name).filter(|s| self.stats.has(*s)) {
                Some(stat) => {
                    if let Ok(value) = self.stats.add_unclamped(stat, *delta) {
                        notes.push(CreationNote::BonusApplied { stat, delta: *delta, value });
                    }
                }
                None => {
                    tracing::warn!(
                        target: "arena::hero",
                        archetype = %archetype.id,
                        stat = %name,
                        "archetype bonus for unknown stat ignored"
                    );
                    notes.push(CreationNote::BonusIgnored { stat: name.clone() });
                }
            }
        }
        self.stats.clamp_resources();
        self.archetype = Some(archetype.id.clone());
        notes
    }

    // === Accessors ===

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> f64 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> f64 {
        self.xp_to_next_level
    }

    pub fn attribute_points(&self) -> u32 {
        self.attribute_points
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn archetype(&self) -> Option<&str> {
        self.archetype.as_deref()
    }

    pub fn learned_passive_skills(&self) -> &BTreeMap<String, u32> {
        &self.learned_passive
    }

    pub fn learned_active_skills(&self) -> &BTreeMap<String, u32> {
        &self.learned_active
    }

    /// Learned level of a skill, if learned
    pub fn skill_level(&self, kind: SkillKind, id: &str) -> Option<u32> {
        self.learned(kind).get(id).copied()
    }

    /// Get a reference to the item equipped in a slot
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&LootItem> {
        self.equipment.get(&slot).and_then(Option::as_ref)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn learned(&self, kind: SkillKind) -> &BTreeMap<String, u32> {
        match kind {
            SkillKind::Passive => &self.learned_passive,
            SkillKind::Active => &self.learned_active,
        }
    }

    fn learned_mut(&mut self, kind: SkillKind) -> &mut BTreeMap<String, u32> {
        match kind {
            SkillKind::Passive => &mut self.learned_passive,
            SkillKind::Active => &mut self.learned_active,
        }
    }

    // === Progression ===

    /// Award XP, leveling up as many times as the total allows
    pub fn gain_xp(&mut self, amount: f64) -> XpGain {
        let mut level_ups = Vec::new();
        if amount.is_finite() && amount > 0.0 {
            self.xp += amount;
            while self.xp >= self.xp_to_next_level {
                level_ups.push(self.level_up());
            }
        }

        tracing::debug!(
            target: "arena::hero",
            amount,
            xp = self.xp,
            threshold = self.xp_to_next_level,
            levels = level_ups.len(),
            "xp gained"
        );

        XpGain {
            amount,
            xp: self.xp,
            xp_to_next_level: self.xp_to_next_level,
            level_ups,
        }
    }

    /// Advance one level unconditionally
    ///
    /// The current threshold is subtracted from XP (carrying any excess), the
    /// threshold grows, points are granted and health/stamina are refilled.
    pub fn level_up(&mut self) -> LevelUp {
        let rules = &self.progression;
        self.level += 1;
        self.xp -= self.xp_to_next_level;
        self.xp_to_next_level = (self.xp_to_next_level * rules.xp_growth).floor();
        self.attribute_points += rules.attribute_points_per_level;
        self.skill_points += rules.skill_points_per_level;

        self.stats.max_health += rules.max_health_per_level;
        self.stats.restore_health();
        self.stats.max_stamina += rules.max_stamina_per_level;
        self.stats.restore_stamina();
        self.stats.strength += rules.primary_stats_per_level;
        self.stats.intelligence += rules.primary_stats_per_level;
        self.stats.agility += rules.primary_stats_per_level;

        LevelUp {
            level: self.level,
            attribute_points: self.attribute_points,
            skill_points: self.skill_points,
            xp_to_next_level: self.xp_to_next_level,
        }
    }

    /// Spend one attribute point on str, int or agi
    pub fn spend_attribute_point(&mut self, stat: Stat) -> Result<PointSpent, ActionError> {
        if self.attribute_points == 0 {
            return Err(ActionError::NoAttributePoints);
        }
        if !stat.is_primary() {
            return Err(ActionError::NotAPrimaryStat(stat.name().to_string()));
        }

        let value = self.stats.add(stat, 1.0)?;
        self.attribute_points -= 1;
        Ok(PointSpent {
            stat,
            value,
            points_left: self.attribute_points,
        })
    }

    /// Learn a catalog skill at level 1
    ///
    /// Prerequisites listed in the catalog are not checked.
    pub fn learn_skill(&mut self, id: &str, kind: SkillKind) -> Result<LearnedSkill, ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let skill = catalog.skill(kind, id).ok_or_else(|| ActionError::UnknownSkill {
            id: id.to_string(),
            kind: kind.name().to_string(),
        })?;

        if self.learned(kind).contains_key(id) {
            return Err(ActionError::AlreadyLearned(skill.name().to_string()));
        }
        if self.skill_points < skill.cost() {
            return Err(ActionError::NotEnoughSkillPoints {
                name: skill.name().to_string(),
                needed: skill.cost(),
                available: self.skill_points,
            });
        }

        self.skill_points -= skill.cost();
        self.learned_mut(kind).insert(id.to_string(), 1);

        let effect = match skill {
            SkillDef::Passive(passive) => passive.effect.as_ref().map(|effect| {
                let applied = Stat::from_name(&effect.stat)
                    .filter(|stat| self.stats.has(*stat))
                    .and_then(|stat| self.stats.add(stat, effect.value).ok().map(|v| (stat, v)));
                match applied {
                    Some((stat, value)) => EffectOutcome::Applied {
                        stat,
                        delta: effect.value,
                        value,
                    },
                    None => {
                        tracing::warn!(
                            target: "arena::hero",
                            skill = %passive.id,
                            stat = %effect.stat,
                            "passive effect for unknown stat ignored"
                        );
                        EffectOutcome::Ignored {
                            stat: effect.stat.clone(),
                        }
                    }
                }
            }),
            SkillDef::Active(active) => {
                // Ready immediately; nothing casts active skills yet
                self.cooldowns.insert(active.id.clone(), 0);
                None
            }
        };

        Ok(LearnedSkill {
            id: skill.id().to_string(),
            name: skill.name().to_string(),
            kind,
            skill_points_left: self.skill_points,
            effect,
        })
    }

    // === Active skill cooldowns ===

    /// Milliseconds until a learned active skill is ready, or `None` if not learned
    pub fn cooldown_remaining(&self, id: &str, now_ms: u64) -> Option<u64> {
        self.cooldowns
            .get(id)
            .map(|expiry| expiry.saturating_sub(now_ms))
    }

    /// Whether a learned active skill is off cooldown at `now_ms`
    pub fn is_skill_ready(&self, id: &str, now_ms: u64) -> bool {
        self.cooldown_remaining(id, now_ms) == Some(0)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            archetype: self.archetype.clone(),
            level: self.level,
            xp: self.xp,
            xp_to_next_level: self.xp_to_next_level,
            attribute_points: self.attribute_points,
            skill_points: self.skill_points,
            stats: self.stats.entries(),
            learned_passive_skills: self.learned_passive.clone(),
            learned_active_skills: self.learned_active.clone(),
            equipment: self.equipment.clone(),
        }
    }
}

impl Combatant for Hero {
    fn kind(&self) -> CombatantKind {
        CombatantKind::Hero
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    /// Costs stamina; refused with no effect when the hero is too tired
    fn attack(&mut self, target: &mut dyn Combatant) -> Result<AttackResult, ActionError> {
        let cost = self.rules.attack_stamina_cost;
        if !self.stats.spend_stamina(cost) {
            return Err(ActionError::OutOfStamina {
                required: cost,
                available: self.stats.stamina,
            });
        }

        let raw = self.stats.strength * self.rules.strength_damage_multiplier;
        let damage = target.take_damage(raw);
        Ok(AttackResult {
            attacker: CombatantKind::Hero,
            defender: target.kind(),
            stamina_spent: cost,
            damage,
        })
    }
}

/// Read-only view of the hero for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSnapshot {
    pub archetype: Option<String>,
    pub level: u32,
    pub xp: f64,
    pub xp_to_next_level: f64,
    pub attribute_points: u32,
    pub skill_points: u32,
    pub stats: BTreeMap<Stat, f64>,
    pub learned_passive_skills: BTreeMap<String, u32>,
    pub learned_active_skills: BTreeMap<String, u32>,
    pub equipment: BTreeMap<EquipmentSlot, Option<LootItem>>,
}
