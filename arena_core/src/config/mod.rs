//! Configuration - Skill/archetype catalog and tunable game constants
//!
//! Both are plain TOML. The catalog shipped with the crate is embedded at
//! compile time; constants default to the stock balance when no file is given.

mod catalog;
mod constants;

pub use catalog::{
    ActiveEffect, ActiveEffectKind, ActiveSkill, Archetype, Catalog, PassiveEffect, PassiveSkill,
    SkillDef,
};
pub use constants::{
    ArenaConstants, EnemyConstants, GameConstants, HeroConstants, LootConstants,
    ProgressionConstants,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid game data: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate game constants from a TOML file
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}
