//! Combat events and the bounded display log

use crate::error::ErrorKind;
use crate::loot::LootItem;
use crate::types::{CombatantKind, SkillKind, Stat};
use serde::{Deserialize, Serialize};
use std::collections::{vec_deque, VecDeque};
use std::fmt;

/// Something the presentation layer may want to show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    /// Archetype display name, if one was applied
    HeroCreated { archetype: Option<String> },
    ArchetypeBonus { stat: Stat, delta: f64, value: f64 },
    AutoCombatStarted,
    AutoCombatStopped,
    EnemySpawned { tier: u32, health: f64 },
    Attack {
        attacker: CombatantKind,
        defender: CombatantKind,
        raw: f64,
        dealt: f64,
        remaining_health: f64,
    },
    OutOfStamina { required: f64, available: f64 },
    EnemyDefeated { tier: u32, loot: LootItem },
    XpGained { amount: f64, xp: f64, xp_to_next_level: f64 },
    LevelUp {
        level: u32,
        attribute_points: u32,
        skill_points: u32,
    },
    HeroDefeated { level: u32 },
    AttributeSpent { stat: Stat, value: f64, points_left: u32 },
    SkillLearned {
        id: String,
        name: String,
        kind: SkillKind,
        skill_points_left: u32,
    },
    PassiveApplied {
        skill: String,
        stat: Stat,
        delta: f64,
        value: f64,
    },
    Warning { kind: ErrorKind, message: String },
}

/// How loudly an event is mirrored to `tracing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl CombatEvent {
    pub fn severity(&self) -> Severity {
        match self {
            CombatEvent::OutOfStamina { .. } | CombatEvent::Warning { .. } => Severity::Warn,
            CombatEvent::HeroDefeated { .. } => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::HeroCreated { archetype: Some(name) } => {
                write!(f, "Hero created as {}", name)
            }
            CombatEvent::HeroCreated { archetype: None } => {
                write!(f, "Hero created with default stats")
            }
            CombatEvent::ArchetypeBonus { stat, delta, value } => {
                write!(f, "Archetype bonus: {} +{} (now {})", stat, delta, value)
            }
            CombatEvent::AutoCombatStarted => write!(f, "Auto-combat started"),
            CombatEvent::AutoCombatStopped => write!(f, "Auto-combat stopped"),
            CombatEvent::EnemySpawned { tier, health } => {
                write!(f, "New enemy spawned: tier {}, health {}", tier, health)
            }
            CombatEvent::Attack {
                attacker,
                defender,
                raw,
                dealt,
                remaining_health,
            } => write!(
                f,
                "{} attacks for {}; {} takes {} (health {})",
                attacker, raw, defender, dealt, remaining_health
            ),
            CombatEvent::OutOfStamina { required, available } => {
                write!(f, "Hero out of stamina ({}/{})", available, required)
            }
            CombatEvent::EnemyDefeated { loot, .. } => {
                write!(f, "Enemy defeated! Loot found: {}", loot)
            }
            CombatEvent::XpGained {
                amount,
                xp,
                xp_to_next_level,
            } => write!(
                f,
                "Gained {} XP ({}/{})",
                amount,
                xp.floor(),
                xp_to_next_level
            ),
            CombatEvent::LevelUp {
                level,
                attribute_points,
                skill_points,
            } => write!(
                f,
                "Level up! Reached level {} ({} attribute points, {} skill points)",
                level, attribute_points, skill_points
            ),
            CombatEvent::HeroDefeated { level } => {
                write!(f, "Hero has been defeated at level {}", level)
            }
            CombatEvent::AttributeSpent {
                stat,
                value,
                points_left,
            } => write!(
                f,
                "Raised {} to {} ({} attribute points left)",
                stat, value, points_left
            ),
            CombatEvent::SkillLearned {
                name,
                kind,
                skill_points_left,
                ..
            } => write!(
                f,
                "Learned {} skill \"{}\" ({} skill points left)",
                kind, name, skill_points_left
            ),
            CombatEvent::PassiveApplied {
                stat, delta, value, ..
            } => write!(f, "Passive effect applied: {} +{} (now {})", stat, delta, value),
            CombatEvent::Warning { message, .. } => write!(f, "WARN: {}", message),
        }
    }
}

/// An event stamped with its position in the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Starts at 1 and never repeats within a session
    pub seq: u64,
    /// Simulated time of the tick that produced it
    pub time_ms: u64,
    pub event: CombatEvent,
}

impl fmt::Display for LoggedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>7.1}s] {}", self.time_ms as f64 / 1000.0, self.event)
    }
}

/// Ring of the most recent events; the oldest entry is dropped when full
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
    next_seq: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        EventLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 1,
        }
    }

    /// Record an event and mirror it to `tracing`. Returns its sequence number.
    pub fn push(&mut self, time_ms: u64, event: CombatEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        match event.severity() {
            Severity::Info => tracing::info!(target: "arena::event", seq, time_ms, "{}", event),
            Severity::Warn => tracing::warn!(target: "arena::event", seq, time_ms, "{}", event),
            Severity::Error => tracing::error!(target: "arena::event", seq, time_ms, "{}", event),
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedEvent { seq, time_ms, event });
        seq
    }

    /// Retained events, oldest first
    pub fn iter(&self) -> vec_deque::Iter<'_, LoggedEvent> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LoggedEvent> {
        self.entries.back()
    }

    /// Retained events newer than `*cursor`, advancing the cursor past them
    ///
    /// Start with a cursor of 0. Events that fell out of the ring before being
    /// fetched are skipped.
    pub fn take_new(&self, cursor: &mut u64) -> Vec<LoggedEvent> {
        let fresh: Vec<LoggedEvent> = self
            .entries
            .iter()
            .filter(|e| e.seq > *cursor)
            .cloned()
            .collect();
        if let Some(last) = fresh.last() {
            *cursor = last.seq;
        }
        fresh
    }

    /// Remove and return every retained event
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events recorded over the whole session, including dropped ones
    pub fn total_recorded(&self) -> u64 {
        self.next_seq - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawned(tier: u32) -> CombatEvent {
        CombatEvent::EnemySpawned {
            tier,
            health: tier as f64 * 50.0,
        }
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut log = EventLog::new(3);
        for tier in 1..=5 {
            log.push(tier as u64 * 1000, spawned(tier));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.total_recorded(), 5);
        let seqs: Vec<u64> = log.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![3, 4, 5]);
        assert_eq!(log.latest().map(|e| e.time_ms), Some(5000));
    }

    #[test]
    fn test_iter_newest_first() {
        let mut log = EventLog::new(4);
        for tier in 1..=3 {
            log.push(0, spawned(tier));
        }

        let events = log.iter();
        assert_eq!(events.len(), 3);
        let newest: Vec<u64> = log.iter().rev().take(2).map(|e| e.seq).collect();
        assert_eq!(newest, vec![3, 2]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = EventLog::new(0);
        log.push(0, CombatEvent::AutoCombatStarted);
        log.push(0, CombatEvent::AutoCombatStopped);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.latest().map(|e| &e.event), Some(&CombatEvent::AutoCombatStopped));
    }

    #[test]
    fn test_take_new_advances_cursor() {
        let mut log = EventLog::new(20);
        let mut cursor = 0;
        log.push(0, spawned(1));
        log.push(0, spawned(2));

        assert_eq!(log.take_new(&mut cursor).len(), 2);
        assert_eq!(cursor, 2);
        assert!(log.take_new(&mut cursor).is_empty());

        log.push(1000, CombatEvent::AutoCombatStopped);
        let fresh = log.take_new(&mut cursor);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].event, CombatEvent::AutoCombatStopped);
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_drain_keeps_sequence() {
        let mut log = EventLog::new(4);
        log.push(0, spawned(1));
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
        assert_eq!(log.push(0, spawned(2)), 2);
    }

    #[test]
    fn test_display_lines() {
        let attack = CombatEvent::Attack {
            attacker: CombatantKind::Hero,
            defender: CombatantKind::Enemy,
            raw: 20.0,
            dealt: 5.0,
            remaining_health: 45.0,
        };
        assert_eq!(attack.to_string(), "Hero attacks for 20; Enemy takes 5 (health 45)");
        assert_eq!(
            CombatEvent::XpGained {
                amount: 30.0,
                xp: 30.5,
                xp_to_next_level: 100.0
            }
            .to_string(),
            "Gained 30 XP (30/100)"
        );
        assert_eq!(CombatEvent::HeroDefeated { level: 4 }.severity(), Severity::Error);
        assert_eq!(attack.severity(), Severity::Info);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(spawned(2)).unwrap();
        assert_eq!(json["type"], "enemy_spawned");
        assert_eq!(json["tier"], 2);
    }
}
