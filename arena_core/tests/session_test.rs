//! Integration test: Create hero -> Fight -> Level up -> Spend points
//!
//! Drives whole sessions through the public API the way a front end would.

use arena_core::prelude::*;
use arena_core::entity::EffectOutcome;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print hero details
fn print_hero(hero: &Hero) {
    let stats = hero.stats();
    println!("  Level {} ({}/{} XP)", hero.level(), hero.xp(), hero.xp_to_next_level());
    println!("    Health: {:.0}/{:.0}", stats.health, stats.max_health);
    println!("    Stamina: {:.0}/{:.0}", stats.stamina, stats.max_stamina);
    println!(
        "    Str/Int/Agi: {}/{}/{}",
        stats.strength, stats.intelligence, stats.agility
    );
    println!(
        "    Points: {} attribute, {} skill",
        hero.attribute_points(),
        hero.skill_points()
    );
}

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

fn seeded_manager(constants: GameConstants, archetype: Option<&str>, seed: u64) -> CombatManager {
    CombatManager::with_rng(catalog(), constants, archetype, ChaCha8Rng::seed_from_u64(seed))
        .unwrap()
}

#[test]
fn test_first_exchange_against_tier_one() {
    separator("FIRST EXCHANGE");

    let (mut hero, _) = Hero::new(catalog(), &GameConstants::default(), None);
    let mut enemy = Enemy::spawn(1, &GameConstants::default().enemy);
    assert!((enemy.stats().health - 50.0).abs() < f64::EPSILON);
    assert!((enemy.damage() - 20.0).abs() < f64::EPSILON);
    assert!((enemy.stats().defense - 15.0).abs() < f64::EPSILON);

    let hit = hero.attack(&mut enemy).unwrap();
    println!("  {}", hit.summary());
    assert!((hit.damage.final_amount - 5.0).abs() < f64::EPSILON);
    assert!((enemy.stats().health - 45.0).abs() < f64::EPSILON);
    assert!((hero.stats().stamina - 90.0).abs() < f64::EPSILON);

    let counter = enemy.attack(&mut hero).unwrap();
    println!("  {}", counter.summary());
    assert!((counter.damage.final_amount - 15.0).abs() < f64::EPSILON);
    assert!((hero.stats().health - 85.0).abs() < f64::EPSILON);

    print_hero(&hero);
}

#[test]
fn test_large_xp_award_levels_twice() {
    separator("XP CASCADE");

    let (mut hero, _) = Hero::new(catalog(), &GameConstants::default(), None);
    let gain = hero.gain_xp(250.0);
    print_hero(&hero);

    assert_eq!(gain.level_ups.len(), 2);
    assert!((gain.level_ups[0].xp_to_next_level - 150.0).abs() < f64::EPSILON);
    assert_eq!(hero.level(), 3);
    assert!(hero.xp().abs() < f64::EPSILON);
    assert!((hero.xp_to_next_level() - 225.0).abs() < f64::EPSILON);
    assert_eq!(hero.attribute_points(), 6);
    assert_eq!(hero.skill_points(), 2);
}

#[test]
fn test_learn_passive_then_refuse_relearn() {
    separator("LEARN PASSIVE");

    let (mut hero, _) = Hero::new(catalog(), &GameConstants::default(), None);
    hero.gain_xp(100.0);
    assert_eq!(hero.skill_points(), 1);
    let strength = hero.stats().strength;

    let learned = hero
        .learn_skill("increased_strength_1", SkillKind::Passive)
        .unwrap();
    println!("  Learned {} ({:?})", learned.name, learned.effect);

    assert_eq!(hero.skill_points(), 0);
    assert!((hero.stats().strength - (strength + 5.0)).abs() < f64::EPSILON);
    assert_eq!(
        hero.learned_passive_skills().get("increased_strength_1"),
        Some(&1)
    );
    assert!(matches!(learned.effect, Some(EffectOutcome::Applied { .. })));

    let again = hero.learn_skill("increased_strength_1", SkillKind::Passive);
    assert!(matches!(again, Err(ActionError::AlreadyLearned(_))));
    assert_eq!(again.unwrap_err().kind(), ErrorKind::InsufficientResource);
    assert_eq!(hero.skill_points(), 0);
}

#[test]
fn test_spending_without_points_changes_nothing() {
    let (mut hero, _) = Hero::new(catalog(), &GameConstants::default(), Some("warrior"));
    let before = hero.stats().clone();

    for stat in Stat::primary() {
        assert_eq!(
            hero.spend_attribute_point(*stat),
            Err(ActionError::NoAttributePoints)
        );
    }
    assert_eq!(hero.stats(), &before);
}

#[test]
fn test_full_session_with_step_ticker() {
    separator("FULL SESSION");

    let mut manager = seeded_manager(GameConstants::default(), Some("warrior"), 99);
    manager.start_auto_combat().unwrap();

    let mut ticker = StepTicker::new(200);
    let executed = manager.run(&mut ticker);
    let stats = manager.session_stats().clone();

    println!("  Executed {} ticks, state {}", executed, manager.state());
    println!("  Defeated {} enemies", stats.enemies_defeated);
    for event in manager.events().iter() {
        println!("  {}", event);
    }
    print_hero(manager.hero());

    assert_eq!(stats.ticks_executed, executed);
    assert_eq!(manager.elapsed_ms(), executed * 1000);
    assert_eq!(stats.total_loot(), stats.enemies_defeated);
    assert!(stats.enemies_spawned >= stats.enemies_defeated);
    assert!(manager.events().len() <= 20);

    // A warrior beats the first tier-1 enemy before running dry of stamina
    assert!(stats.enemies_defeated >= 1);

    match manager.state() {
        ArenaState::HeroDown => {
            assert!(executed <= 200);
            assert!(!manager.is_running());
            assert!(manager.tick().is_halted());
        }
        state => {
            assert_eq!(executed, 200);
            assert_ne!(state, ArenaState::Idle);
        }
    }
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let run = |seed| {
        let mut constants = GameConstants::default();
        constants.hero.strength = 40.0;
        let mut manager = seeded_manager(constants, None, seed);
        manager.start_auto_combat().unwrap();
        manager.run(&mut StepTicker::new(50));
        let events: Vec<CombatEvent> = manager.events().iter().map(|e| e.event.clone()).collect();
        (manager.session_stats().clone(), events)
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn test_stop_prevents_further_ticks() {
    let mut manager = seeded_manager(GameConstants::default(), None, 1);
    manager.start_auto_combat().unwrap();
    manager.tick();

    manager.stop_auto_combat();
    manager.stop_auto_combat();

    let mut ticker = StepTicker::new(10);
    assert_eq!(manager.run(&mut ticker), 0);
    // The loop checks the flag before pulling a tick
    assert_eq!(ticker.remaining(), 10);
    assert!(manager.tick().is_halted());
    assert_eq!(manager.session_stats().ticks_executed, 1);
}

#[test]
fn test_renderer_cursor_sees_every_new_event() {
    let mut manager = seeded_manager(GameConstants::default(), Some("mage"), 5);
    let mut cursor = 0;
    let creation = manager.events().take_new(&mut cursor);
    assert!(matches!(
        creation.last().map(|e| &e.event),
        Some(CombatEvent::HeroCreated { .. })
    ));

    manager.start_auto_combat().unwrap();
    manager.tick();
    let fresh = manager.events().take_new(&mut cursor);

    assert_eq!(fresh[0].event, CombatEvent::AutoCombatStarted);
    assert!(matches!(fresh[1].event, CombatEvent::EnemySpawned { tier: 1, .. }));
    assert!(fresh.iter().skip(2).all(|e| e.time_ms == 1000));
    assert_eq!(cursor, manager.events().latest().unwrap().seq);
}

#[test]
fn test_loot_distribution_over_many_draws() {
    separator("LOOT DISTRIBUTION");

    let table = LootTable::new(2, &GameConstants::default().loot);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let draws = 20_000;
    let mut counts = [0u32; 5];

    for _ in 0..draws {
        let item = table.generate_with_rng(&mut rng);
        assert!(item.modifiers.len() <= item.rarity.index() + 1);
        counts[item.rarity.index()] += 1;
    }

    let weights = [0.50, 0.30, 0.15, 0.04, 0.01];
    for (rarity, (count, weight)) in Rarity::all().iter().zip(counts.iter().zip(weights)) {
        let observed = *count as f64 / draws as f64;
        println!("  {:<10} {:.4} (expected {:.2})", rarity.name(), observed, weight);
        assert!((observed - weight).abs() < 0.015);
    }
}
