//! Skill and archetype catalog loading

use super::ConfigError;
use crate::types::SkillKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Stat bonus granted once when a passive skill is learned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveEffect {
    /// Catalog stat key; unknown keys are reported when the skill is learned
    pub stat: String,
    pub value: f64,
}

/// A passive skill definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassiveSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u32,
    /// Descriptive only: learning does not check these
    #[serde(default)]
    pub prereqs: Vec<String>,
    #[serde(default)]
    pub effect: Option<PassiveEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveEffectKind {
    Damage,
    Heal,
}

/// What an active skill would do when cast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    #[serde(rename = "type")]
    pub kind: ActiveEffectKind,
    pub multiplier: f64,
    /// Stat the multiplier scales from
    pub stat: String,
}

/// An active skill definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u32,
    pub stamina_cost: f64,
    pub cooldown_ms: u64,
    #[serde(default)]
    pub prereqs: Vec<String>,
    pub effect: ActiveEffect,
}

/// A starting-stat preset chosen at hero creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stat key -> delta
    #[serde(default)]
    pub bonuses: BTreeMap<String, f64>,
}

/// Borrowed view of a skill from either catalog
#[derive(Debug, Clone, Copy)]
pub enum SkillDef<'a> {
    Passive(&'a PassiveSkill),
    Active(&'a ActiveSkill),
}

impl<'a> SkillDef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            SkillDef::Passive(s) => &s.id,
            SkillDef::Active(s) => &s.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            SkillDef::Passive(s) => &s.name,
            SkillDef::Active(s) => &s.name,
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            SkillDef::Passive(s) => s.cost,
            SkillDef::Active(s) => s.cost,
        }
    }

    pub fn prereqs(&self) -> &'a [String] {
        match self {
            SkillDef::Passive(s) => &s.prereqs,
            SkillDef::Active(s) => &s.prereqs,
        }
    }

    pub fn kind(&self) -> SkillKind {
        match self {
            SkillDef::Passive(_) => SkillKind::Passive,
            SkillDef::Active(_) => SkillKind::Active,
        }
    }
}

/// On-disk layout of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    passive_skills: Vec<PassiveSkill>,
    #[serde(default)]
    active_skills: Vec<ActiveSkill>,
    #[serde(default)]
    archetypes: Vec<Archetype>,
}

/// Read-only skill and archetype tables
///
/// Built once and shared (typically behind an `Arc`) by every session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    passive: HashMap<String, PassiveSkill>,
    active: HashMap<String, ActiveSkill>,
    archetypes: HashMap<String, Archetype>,
}

impl Catalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(include_str!("../../config/catalog.toml"))
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: CatalogFile = super::load_toml(path)?;
        Self::from_file(file)
    }

    /// Load a catalog from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = super::parse_toml(content)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        let mut catalog = Catalog::default();

        for skill in file.passive_skills {
            if catalog.passive.contains_key(&skill.id) {
                return Err(duplicate("passive skill", &skill.id));
            }
            catalog.passive.insert(skill.id.clone(), skill);
        }

        for skill in file.active_skills {
            if catalog.active.contains_key(&skill.id) {
                return Err(duplicate("active skill", &skill.id));
            }
            if skill.stamina_cost < 0.0 || skill.effect.multiplier < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "active skill '{}' has a negative stamina cost or multiplier",
                    skill.id
                )));
            }
            catalog.active.insert(skill.id.clone(), skill);
        }

        for archetype in file.archetypes {
            if catalog.archetypes.contains_key(&archetype.id) {
                return Err(duplicate("archetype", &archetype.id));
            }
            catalog.archetypes.insert(archetype.id.clone(), archetype);
        }

        catalog.check_prereqs()?;
        Ok(catalog)
    }

    // Prerequisites must point inside their own catalog.
    fn check_prereqs(&self) -> Result<(), ConfigError> {
        for skill in self.passive.values() {
            if let Some(missing) = skill.prereqs.iter().find(|p| !self.passive.contains_key(*p)) {
                return Err(ConfigError::ValidationError(format!(
                    "passive skill '{}' lists unknown prerequisite '{}'",
                    skill.id, missing
                )));
            }
        }
        for skill in self.active.values() {
            if let Some(missing) = skill.prereqs.iter().find(|p| !self.active.contains_key(*p)) {
                return Err(ConfigError::ValidationError(format!(
                    "active skill '{}' lists unknown prerequisite '{}'",
                    skill.id, missing
                )));
            }
        }
        Ok(())
    }

    pub fn passive(&self, id: &str) -> Option<&PassiveSkill> {
        self.passive.get(id)
    }

    pub fn active(&self, id: &str) -> Option<&ActiveSkill> {
        self.active.get(id)
    }

    /// Look up a skill in the catalog for `kind`
    pub fn skill(&self, kind: SkillKind, id: &str) -> Option<SkillDef<'_>> {
        match kind {
            SkillKind::Passive => self.passive(id).map(SkillDef::Passive),
            SkillKind::Active => self.active(id).map(SkillDef::Active),
        }
    }

    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.get(id)
    }

    /// Passive skills sorted by id
    pub fn passive_skills(&self) -> Vec<&PassiveSkill> {
        let mut skills: Vec<_> = self.passive.values().collect();
        skills.sort_by(|a, b| a.id.cmp(&b.id));
        skills
    }

    /// Active skills sorted by id
    pub fn active_skills(&self) -> Vec<&ActiveSkill> {
        let mut skills: Vec<_> = self.active.values().collect();
        skills.sort_by(|a, b| a.id.cmp(&b.id));
        skills
    }

    /// Archetype ids sorted alphabetically
    pub fn archetype_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.archetypes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn duplicate(what: &str, id: &str) -> ConfigError {
    ConfigError::ValidationError(format!("duplicate {} id '{}'", what, id))
}
