//! Runtime action errors
//!
//! Every failure is recoverable by the caller: the operation is a no-op and the
//! error explains why. Configuration loading errors live in [`crate::config`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad class of an [`ActionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller named something that does not exist
    InvalidInput,
    /// The request was valid but a balance or gate was not met
    InsufficientResource,
    /// The hero is down; the session needs external intervention
    TerminalState,
}

/// Why a hero or arena operation was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("unknown stat '{0}'")]
    UnknownStat(String),
    #[error("stat '{0}' cannot receive attribute points")]
    NotAPrimaryStat(String),
    #[error("unknown {kind} skill '{id}'")]
    UnknownSkill { id: String, kind: String },
    #[error("unknown skill type '{0}'")]
    UnknownSkillKind(String),
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),
    #[error("no attribute points available")]
    NoAttributePoints,
    #[error("not enough skill points to learn '{name}': needs {needed}, has {available}")]
    NotEnoughSkillPoints {
        name: String,
        needed: u32,
        available: u32,
    },
    #[error("skill '{0}' already learned")]
    AlreadyLearned(String),
    #[error("out of stamina: needs {required}, has {available}")]
    OutOfStamina { required: f64, available: f64 },
    #[error("hero has been defeated")]
    HeroDefeated,
}

impl ActionError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::UnknownStat(_)
            | ActionError::NotAPrimaryStat(_)
            | ActionError::UnknownSkill { .. }
            | ActionError::UnknownSkillKind(_)
            | ActionError::UnknownArchetype(_) => ErrorKind::InvalidInput,
            ActionError::NoAttributePoints
            | ActionError::NotEnoughSkillPoints { .. }
            | ActionError::AlreadyLearned(_)
            | ActionError::OutOfStamina { .. } => ErrorKind::InsufficientResource,
            ActionError::HeroDefeated => ErrorKind::TerminalState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ActionError::UnknownStat("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(ActionError::UnknownArchetype("bard".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(ActionError::NoAttributePoints.kind(), ErrorKind::InsufficientResource);
        assert_eq!(
            ActionError::AlreadyLearned("power_strike".into()).kind(),
            ErrorKind::InsufficientResource
        );
        assert_eq!(ActionError::HeroDefeated.kind(), ErrorKind::TerminalState);
    }

    #[test]
    fn test_error_messages() {
        let err = ActionError::NotEnoughSkillPoints {
            name: "Might II".into(),
            needed: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "not enough skill points to learn 'Might II': needs 2, has 1"
        );
    }
}
