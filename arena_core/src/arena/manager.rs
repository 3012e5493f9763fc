//! CombatManager - The fixed-tick arena loop

use super::events::{CombatEvent, EventLog};
use super::scheduler::TickSource;
use super::state::{ArenaState, RoundReport, SessionStats, TickOutcome};
use crate::combat::AttackResult;
use crate::config::{Catalog, ConfigError, GameConstants};
use crate::entity::{
    Combatant, CreationNote, EffectOutcome, Enemy, EnemySnapshot, Hero, LearnedSkill, PointSpent,
    XpGain,
};
use crate::error::ActionError;
use crate::loot::{LootItem, LootTable};
use crate::types::{CombatantKind, SkillKind, Stat};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// One game session: a hero, the enemy it is fighting, and the event stream
///
/// Ticks and player actions both take `&mut self`, so a tick always runs to
/// completion before anything else touches the session.
pub struct CombatManager {
    hero: Hero,
    current_enemy: Option<Enemy>,
    running: bool,
    constants: GameConstants,
    events: EventLog,
    elapsed_ms: u64,
    stats: SessionStats,
    rng: Box<dyn RngCore + Send>,
}

impl CombatManager {
    /// Start a session with an entropy-seeded RNG
    ///
    /// An unknown archetype id is not an error; the hero starts with base
    /// stats and a warning event is recorded.
    pub fn new(
        catalog: Arc<Catalog>,
        constants: GameConstants,
        archetype: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(catalog, constants, archetype, StdRng::from_entropy())
    }

    /// Start a session with the built-in catalog and default constants
    pub fn with_defaults(archetype: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(Arc::new(Catalog::builtin()?), GameConstants::default(), archetype)
    }

    /// Start a session with a caller-supplied RNG (for deterministic runs)
    pub fn with_rng(
        catalog: Arc<Catalog>,
        constants: GameConstants,
        archetype: Option<&str>,
        rng: impl RngCore + Send + 'static,
    ) -> Result<Self, ConfigError> {
        constants.validate()?;

        let (hero, notes) = Hero::new(catalog, &constants, archetype);
        let mut manager = CombatManager {
            hero,
            current_enemy: None,
            running: false,
            events: EventLog::new(constants.arena.log_capacity),
            constants,
            elapsed_ms: 0,
            stats: SessionStats::default(),
            rng: Box::new(rng),
        };
        manager.record_creation(notes);
        Ok(manager)
    }

    fn record_creation(&mut self, notes: Vec<CreationNote>) {
        let mut archetype = None;
        for note in notes {
            match note {
                CreationNote::ArchetypeChosen { name, .. } => archetype = Some(name),
                CreationNote::BonusApplied { stat, delta, value } => {
                    self.log(CombatEvent::ArchetypeBonus { stat, delta, value });
                }
                CreationNote::UnknownArchetype { id } => {
                    self.warn(&ActionError::UnknownArchetype(id));
                }
                CreationNote::BonusIgnored { stat } => {
                    self.warn(&ActionError::UnknownStat(stat));
                }
            }
        }
        self.log(CombatEvent::HeroCreated { archetype });
    }

    // === Read access ===

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    /// The living enemy, if one is in the arena
    pub fn current_enemy(&self) -> Option<&Enemy> {
        self.current_enemy.as_ref()
    }

    pub fn enemy_snapshot(&self) -> Option<EnemySnapshot> {
        self.current_enemy.as_ref().map(Enemy::snapshot)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    pub fn session_stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Simulated time: one tick period per executed tick
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> ArenaState {
        if !self.hero.is_alive() {
            ArenaState::HeroDown
        } else if !self.running {
            ArenaState::Idle
        } else if self.current_enemy.as_ref().is_some_and(|e| e.is_alive()) {
            ArenaState::InCombat
        } else {
            ArenaState::ArenaEmpty
        }
    }

    /// Tier for the next spawn: one step per `levels_per_tier` hero levels
    pub fn current_tier(&self) -> u32 {
        let per_tier = self.constants.enemy.levels_per_tier.max(1);
        (self.hero.level() / per_tier + 1).max(1)
    }

    // === Scheduler control ===

    /// Turn on the tick loop. Calling it while already running does nothing.
    pub fn start_auto_combat(&mut self) -> Result<(), ActionError> {
        if !self.hero.is_alive() {
            let err = ActionError::HeroDefeated;
            self.warn(&err);
            return Err(err);
        }
        if !self.running {
            self.running = true;
            self.log(CombatEvent::AutoCombatStarted);
        }
        Ok(())
    }

    /// Turn off the tick loop. Safe to call when already stopped.
    pub fn stop_auto_combat(&mut self) {
        if self.running {
            self.running = false;
            self.log(CombatEvent::AutoCombatStopped);
        }
    }

    /// Drive ticks from `source` until it runs dry or auto-combat stops
    ///
    /// Returns the number of ticks executed.
    pub fn run(&mut self, source: &mut impl TickSource) -> u64 {
        let mut executed = 0;
        while self.running && source.next_tick() {
            if self.tick().is_halted() {
                break;
            }
            executed += 1;
        }
        executed
    }

    // === Tick ===

    /// Execute one tick: spawn if the arena is empty, then resolve a round
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Halted;
        }
        self.elapsed_ms += self.constants.arena.tick_period_ms;
        self.stats.ticks_executed += 1;

        let (mut enemy, spawned) = match self.current_enemy.take() {
            Some(enemy) if enemy.is_alive() => (enemy, None),
            _ => {
                let enemy = self.spawn_enemy();
                let snapshot = enemy.snapshot();
                (enemy, Some(snapshot))
            }
        };
        let mut round = RoundReport {
            spawned,
            hero_attack: None,
            enemy_attack: None,
        };

        match self.hero.attack(&mut enemy) {
            Ok(attack) => {
                self.record_attack(&attack);
                round.hero_attack = Some(attack);
                if !enemy.is_alive() {
                    // Defeated enemies do not counter-attack
                    let (loot, xp) = self.defeat_enemy(&enemy);
                    return TickOutcome::EnemyDefeated { round, loot, xp };
                }
            }
            Err(ActionError::OutOfStamina {
                required,
                available,
            }) => {
                self.stats.out_of_stamina += 1;
                self.log(CombatEvent::OutOfStamina {
                    required,
                    available,
                });
            }
            Err(err) => self.warn(&err),
        }

        if self.hero.is_alive() {
            match enemy.attack(&mut self.hero) {
                Ok(attack) => {
                    self.record_attack(&attack);
                    round.enemy_attack = Some(attack);
                }
                Err(err) => self.warn(&err),
            }
        }
        self.current_enemy = Some(enemy);

        if !self.hero.is_alive() {
            self.defeat_hero();
            return TickOutcome::HeroDefeated(round);
        }
        TickOutcome::Fought(round)
    }

    fn record_attack(&mut self, attack: &AttackResult) {
        match attack.attacker {
            CombatantKind::Hero => {
                self.stats.hero_attacks += 1;
                self.stats.damage_dealt += attack.damage.final_amount;
            }
            CombatantKind::Enemy => self.stats.damage_taken += attack.damage.final_amount,
        }
        self.log(CombatEvent::Attack {
            attacker: attack.attacker,
            defender: attack.defender,
            raw: attack.damage.raw_amount,
            dealt: attack.damage.final_amount,
            remaining_health: attack.damage.health_after,
        });
    }

    fn spawn_enemy(&mut self) -> Enemy {
        let enemy = Enemy::spawn(self.current_tier(), &self.constants.enemy);
        self.stats.enemies_spawned += 1;
        self.log(CombatEvent::EnemySpawned {
            tier: enemy.tier(),
            health: enemy.stats().health,
        });
        enemy
    }

    // Loot is rolled and recorded but never applied to the hero
    fn defeat_enemy(&mut self, enemy: &Enemy) -> (LootItem, XpGain) {
        let loot = LootTable::new(enemy.tier(), &self.constants.loot).generate_with_rng(&mut self.rng);
        self.stats.enemies_defeated += 1;
        self.stats.record_loot(loot.rarity);
        self.log(CombatEvent::EnemyDefeated {
            tier: enemy.tier(),
            loot: loot.clone(),
        });

        let xp = self.hero.gain_xp(enemy.xp_value());
        self.record_xp(&xp);
        (loot, xp)
    }

    fn defeat_hero(&mut self) {
        self.log(CombatEvent::HeroDefeated {
            level: self.hero.level(),
        });
        self.stop_auto_combat();
    }

    fn record_xp(&mut self, gain: &XpGain) {
        self.log(CombatEvent::XpGained {
            amount: gain.amount,
            xp: gain.xp,
            xp_to_next_level: gain.xp_to_next_level,
        });
        for level_up in &gain.level_ups {
            self.log(CombatEvent::LevelUp {
                level: level_up.level,
                attribute_points: level_up.attribute_points,
                skill_points: level_up.skill_points,
            });
        }
    }

    // === Player actions ===

    /// Spend an attribute point on a stat named by its catalog key
    ///
    /// An empty balance is reported before the name is looked at.
    pub fn spend_attribute_point(&mut self, stat: &str) -> Result<PointSpent, ActionError> {
        let result = if self.hero.attribute_points() == 0 {
            Err(ActionError::NoAttributePoints)
        } else {
            stat.parse::<Stat>().and_then(|stat| self.hero.spend_attribute_point(stat))
        };
        match &result {
            Ok(spent) => self.log(CombatEvent::AttributeSpent {
                stat: spent.stat,
                value: spent.value,
                points_left: spent.points_left,
            }),
            Err(err) => self.warn(err),
        }
        result
    }

    pub fn learn_skill(&mut self, id: &str, kind: SkillKind) -> Result<LearnedSkill, ActionError> {
        let result = self.hero.learn_skill(id, kind);
        match &result {
            Ok(learned) => {
                self.log(CombatEvent::SkillLearned {
                    id: learned.id.clone(),
                    name: learned.name.clone(),
                    kind: learned.kind,
                    skill_points_left: learned.skill_points_left,
                });
                match &learned.effect {
                    Some(EffectOutcome::Applied { stat, delta, value }) => {
                        self.log(CombatEvent::PassiveApplied {
                            skill: learned.id.clone(),
                            stat: *stat,
                            delta: *delta,
                            value: *value,
                        });
                    }
                    Some(EffectOutcome::Ignored { stat }) => {
                        self.warn(&ActionError::UnknownStat(stat.clone()));
                    }
                    None => {}
                }
            }
            Err(err) => self.warn(err),
        }
        result
    }

    /// Milliseconds until a learned active skill is ready, on the session clock
    pub fn cooldown_remaining(&self, skill_id: &str) -> Option<u64> {
        self.hero.cooldown_remaining(skill_id, self.elapsed_ms)
    }

    // === Event helpers ===

    fn log(&mut self, event: CombatEvent) {
        self.events.push(self.elapsed_ms, event);
    }

    fn warn(&mut self, err: &ActionError) {
        self.log(CombatEvent::Warning {
            kind: err.kind(),
            message: err.to_string(),
        });
    }
}
