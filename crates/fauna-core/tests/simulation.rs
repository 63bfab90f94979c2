//! End-to-end simulation tests
//!
//! Long runs over the public API, checking that the bounded-state
//! invariants hold at every observable boundary.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use fauna_core::{
    catalog, Creature, FieldBounds, SilentNarrator, SimConfig, SimulationEngine,
    StaticContextSource, TemplateNarrator,
};
use fauna_events::Position;

fn lore_context() -> StaticContextSource {
    StaticContextSource::new(
        vec![
            "Volta naps in tall grass".to_string(),
            "Umbra hoards shiny things".to_string(),
            "Fern follows the morning sun".to_string(),
        ],
        vec![
            "a sudden downpour".to_string(),
            "a stranger crosses the field".to_string(),
            "berries ripen all at once".to_string(),
        ],
    )
}

#[test]
fn test_invariants_hold_over_long_run() {
    let config = SimConfig::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let creatures = catalog::starter_roster(&config, &mut rng);
    let mut engine = SimulationEngine::new(
        creatures,
        Box::new(TemplateNarrator),
        Box::new(lore_context()),
        config.clone(),
        7,
    );

    for _ in 0..300 {
        let snapshot = engine.step();

        for creature in snapshot.creatures.values() {
            assert!((0..=100).contains(&creature.hp), "hp out of range");
            assert!((0..=100).contains(&creature.energy), "energy out of range");
            assert!(
                config.field.contains(creature.position),
                "creature off the field at tick {}",
                snapshot.tick
            );
            for (other, affinity) in &creature.relationships {
                assert!(
                    (-100..=100).contains(affinity),
                    "affinity toward {} out of range",
                    other
                );
            }
            assert!(creature.inventory.len() <= config.limits.inventory_capacity);
        }

        assert!(snapshot.items.len() <= config.items.max_on_field);
        for item in &snapshot.items {
            assert!(config.field.contains(item.position));
        }
        assert!(engine.event_count() <= config.limits.event_log_capacity);
    }
}

/// With a narrator that always fails, a forced battle between two fresh
/// creatures lands on the exact fixed outcome.
#[test]
fn test_battle_fallback_literal_outcome() {
    let mut config = SimConfig::default();
    config.items.spawn_probability = 0.0;
    config.interaction.battle_probability = 1.0;
    config.interaction.friendship_probability = 0.0;
    config.interaction.learn_probability = 0.0;
    config.interaction.random_event_probability = 0.0;

    let bounds = FieldBounds::default();
    let creatures = vec![
        Creature::new("a", "Volta", "stormtail", bounds).with_position(Position::new(5.0, 5.0)),
        Creature::new("b", "Umbra", "shadowpaw", bounds).with_position(Position::new(5.0, 5.0)),
    ];
    let mut engine = SimulationEngine::new(
        creatures,
        Box::new(SilentNarrator),
        Box::new(StaticContextSource::default()),
        config,
        99,
    );

    let snapshot = engine.step();

    let a = snapshot.creature("a").unwrap();
    let b = snapshot.creature("b").unwrap();
    assert_eq!(a.hp, 85);
    assert_eq!(b.hp, 85);
    assert_eq!(a.relationship("b"), -5);
    assert_eq!(b.relationship("a"), -5);
}

#[test]
fn test_event_log_lines_are_tick_stamped() {
    let mut config = SimConfig::default();
    config.items.spawn_probability = 1.0; // guarantee at least one log line
    config.interaction.random_event_probability = 0.0;

    let bounds = FieldBounds::default();
    let creatures = vec![
        Creature::new("a", "Volta", "stormtail", bounds).with_position(Position::new(0.0, 0.0)),
    ];
    let mut engine = SimulationEngine::new(
        creatures,
        Box::new(SilentNarrator),
        Box::new(StaticContextSource::default()),
        config,
        3,
    );

    engine.step();
    let recent = engine.recent_events(10);
    assert!(!recent.is_empty());
    assert!(recent[0].starts_with("[tick 1] "));
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let config = SimConfig::default();
    let mut rng = SmallRng::seed_from_u64(2);
    let creatures = catalog::starter_roster(&config, &mut rng);
    let mut engine = SimulationEngine::new(
        creatures,
        Box::new(TemplateNarrator),
        Box::new(lore_context()),
        config,
        11,
    );

    for _ in 0..20 {
        engine.step();
    }
    let snapshot = engine.state();
    let json = snapshot.to_json().unwrap();
    let parsed = fauna_events::StepSnapshot::from_json(&json).unwrap();
    assert_eq!(parsed, snapshot);
}
