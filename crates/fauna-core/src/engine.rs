//! The Tick State Machine
//!
//! `SimulationEngine::step` advances the whole world exactly one tick:
//! item spawn, pairwise interactions, individual behavior, pickups,
//! automatic item use, and the occasional world event, then returns a full
//! snapshot. Collaborator failures are recovered with fixed outcomes; a
//! tick never aborts.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use fauna_events::{Mood, Position, StepSnapshot};

use crate::catalog;
use crate::config::SimConfig;
use crate::creature::Creature;
use crate::item::{Item, ItemField};
use crate::log::EventLog;
use crate::narrate::{ContextSource, Narrator};

/// Distance and speed constants for the tick state machine.
pub mod tuning {
    /// Pair distance below which creatures interact directly.
    pub const INTERACT_DISTANCE: f32 = 1.5;
    /// Pair distance below which creatures notice each other.
    pub const AWARE_DISTANCE: f32 = 3.0;
    /// Damage range of a resolved battle round (inclusive).
    pub const BATTLE_DAMAGE_MIN: i32 = 10;
    pub const BATTLE_DAMAGE_MAX: i32 = 25;
    /// Flat damage both sides take when the narrator is unavailable.
    pub const FALLBACK_BATTLE_DAMAGE: i32 = 15;
    /// Relationship shift per battle (each side, toward the other).
    pub const BATTLE_RELATIONSHIP_SHIFT: i32 = -5;
    /// Relationship shift per friendly encounter.
    pub const FRIENDSHIP_RELATIONSHIP_SHIFT: i32 = 10;
    /// Hp restored by a friendly encounter (narrated path only).
    pub const FRIENDSHIP_HEAL: i32 = 5;
    /// Movement speed of a hostile approach at awareness range.
    pub const HOSTILE_APPROACH_SPEED: f32 = 0.2;
    /// Movement speed of an affectionate approach at awareness range.
    pub const FOND_APPROACH_SPEED: f32 = 0.15;
    /// Retreat speed of a tired creature at awareness range.
    pub const WEARY_RETREAT_SPEED: f32 = 0.1;
    /// Idle wandering speed.
    pub const WANDER_SPEED: f32 = 0.15;
    /// Pull speed of a random world event.
    pub const WORLD_EVENT_PULL_SPEED: f32 = 0.5;
    /// Relationship thresholds for hostile/friendly interaction branches.
    pub const HOSTILE_THRESHOLD: i32 = -30;
    pub const FRIENDLY_THRESHOLD: i32 = 30;
    /// Relationship threshold for an affectionate approach.
    pub const FOND_THRESHOLD: i32 = 50;
    /// Chance of actually learning once practice triggers.
    pub const PRACTICE_SUCCESS_PROBABILITY: f32 = 0.3;
}

use tuning::*;

/// Orchestrates one tick at a time over a fixed population of creatures.
///
/// The creature list keeps insertion order; pair enumeration is `i < j`
/// over that order, so runs with the same seed and deterministic
/// collaborators replay identically.
pub struct SimulationEngine {
    creatures: Vec<Creature>,
    items: ItemField,
    narrator: Box<dyn Narrator>,
    context: Box<dyn ContextSource>,
    config: SimConfig,
    tick: u64,
    log: EventLog,
    rng: SmallRng,
}

impl SimulationEngine {
    /// Builds an engine over `creatures` with a seeded random source.
    pub fn new(
        creatures: Vec<Creature>,
        narrator: Box<dyn Narrator>,
        context: Box<dyn ContextSource>,
        config: SimConfig,
        seed: u64,
    ) -> Self {
        let items = ItemField::new(
            config.field,
            config.items.spawn_probability,
            config.items.max_on_field,
        );
        let log = EventLog::new(config.limits.event_log_capacity);
        Self {
            creatures,
            items,
            narrator,
            context,
            config,
            tick: 0,
            log,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Finds a creature by key.
    pub fn creature(&self, key: &str) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.key() == key)
    }

    /// The most recent `n` event log lines, oldest of those first.
    pub fn recent_events(&self, n: usize) -> Vec<String> {
        self.log.recent(n)
    }

    pub fn event_count(&self) -> usize {
        self.log.len()
    }

    /// Places a specific item on the field (pre-seeded pickups, tests).
    pub fn place_item(&mut self, item: Item, position: Position) -> bool {
        self.items.place(item, position)
    }

    /// Removes every item from the field.
    pub fn reset_items(&mut self) {
        self.items.clear();
    }

    /// Advances the simulation one tick and returns the resulting snapshot.
    pub fn step(&mut self) -> StepSnapshot {
        self.tick += 1;
        let mut events: Vec<String> = Vec::new();

        // Item spawn.
        if let Some(item) = self.items.try_spawn(&mut self.rng) {
            tracing::debug!(tick = self.tick, item = %item.name, "item spawned");
            let line = format!("a {} appeared on the field", item.name);
            self.log.push(self.tick, line);
        }

        // Pairwise phase. Distances come from positions captured here, so
        // movement during the phase cannot reorder later outcomes.
        let phase_positions: Vec<Position> =
            self.creatures.iter().map(|c| c.position()).collect();
        let count = self.creatures.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let distance = phase_positions[i].distance_to(phase_positions[j]);
                if distance < INTERACT_DISTANCE {
                    if let Some(event) = self.resolve_interaction(i, j) {
                        events.push(event);
                    }
                } else if distance < AWARE_DISTANCE {
                    self.apply_awareness(i, j);
                }
            }
        }

        // Individual phase: behavior, then pickups, then automatic item use.
        for index in 0..count {
            self.run_individual_behavior(index);

            let position = self.creatures[index].position();
            if let Some(item) = self
                .items
                .check_pickup(position, self.config.items.pickup_distance)
            {
                self.resolve_pickup(index, item);
            }

            if let Some(summary) = self.creatures[index].auto_use_item() {
                let tick = self.tick;
                self.creatures[index].record_action(tick, &summary);
                self.log.push(tick, summary);
            }
        }

        // Random world event.
        if self.rng.gen::<f32>() < self.config.interaction.random_event_probability {
            if let Some(event) = self.trigger_world_event() {
                events.push(event);
            }
        }

        StepSnapshot {
            tick: self.tick,
            events,
            creatures: self
                .creatures
                .iter()
                .map(|c| (c.key().to_string(), c.snapshot()))
                .collect(),
            items: self.items.snapshot(),
        }
    }

    /// Current state without advancing the clock.
    pub fn state(&self) -> StepSnapshot {
        StepSnapshot {
            tick: self.tick,
            events: Vec::new(),
            creatures: self
                .creatures
                .iter()
                .map(|c| (c.key().to_string(), c.snapshot()))
                .collect(),
            items: self.items.snapshot(),
        }
    }

    /// Decides what happens between two creatures at interaction range.
    /// Exactly one branch is taken: hostile precedes friendly precedes
    /// neutral.
    fn resolve_interaction(&mut self, i: usize, j: usize) -> Option<String> {
        let rel_ij = self.creatures[i].relationship(self.creatures[j].key());
        let rel_ji = self.creatures[j].relationship(self.creatures[i].key());
        let battle_p = self.config.interaction.battle_probability;
        let friendship_p = self.config.interaction.friendship_probability;

        if rel_ij < HOSTILE_THRESHOLD || rel_ji < HOSTILE_THRESHOLD {
            if self.rng.gen::<f32>() < battle_p * 2.0 {
                return Some(self.resolve_battle(i, j));
            }
        } else if rel_ij > FRIENDLY_THRESHOLD || rel_ji > FRIENDLY_THRESHOLD {
            if self.rng.gen::<f32>() < friendship_p * 2.0 {
                return Some(self.resolve_friendship(i, j));
            }
        } else {
            let roll = self.rng.gen::<f32>();
            if roll < battle_p {
                return Some(self.resolve_battle(i, j));
            } else if roll < battle_p + friendship_p {
                return Some(self.resolve_friendship(i, j));
            }
        }
        None
    }

    fn resolve_battle(&mut self, i: usize, j: usize) -> String {
        let participants = [self.creatures[i].snapshot(), self.creatures[j].snapshot()];
        let query = format!("{} and {} battle", participants[0].name, participants[1].name);
        let context = self.context.query(&query, 3);
        let scenario = format!(
            "{} and {} are fighting",
            participants[0].name, participants[1].name
        );
        let narration = self.narrator.narrate(&participants, &scenario, &context);

        let tick = self.tick;
        let key_i = self.creatures[i].key().to_string();
        let key_j = self.creatures[j].key().to_string();

        match narration {
            Ok(text) => {
                let dealt_by_first = self.rng.gen_range(BATTLE_DAMAGE_MIN..=BATTLE_DAMAGE_MAX);
                let dealt_by_second = self.rng.gen_range(BATTLE_DAMAGE_MIN..=BATTLE_DAMAGE_MAX);
                let (first, second) = pair_mut(&mut self.creatures, i, j);
                first.take_damage(dealt_by_second);
                second.take_damage(dealt_by_first);
                first.shift_relationship(&key_j, BATTLE_RELATIONSHIP_SHIFT);
                second.shift_relationship(&key_i, BATTLE_RELATIONSHIP_SHIFT);
                first.record_action(tick, format!("fought {}", participants[1].name));
                second.record_action(tick, format!("fought {}", participants[0].name));
                self.log.push(
                    tick,
                    format!(
                        "{} and {} clashed",
                        participants[0].name, participants[1].name
                    ),
                );
                self.log.push(tick, text);
            }
            Err(error) => {
                tracing::warn!(tick, %error, "narrator failed, applying fixed battle outcome");
                let (first, second) = pair_mut(&mut self.creatures, i, j);
                first.take_damage(FALLBACK_BATTLE_DAMAGE);
                second.take_damage(FALLBACK_BATTLE_DAMAGE);
                first.shift_relationship(&key_j, BATTLE_RELATIONSHIP_SHIFT);
                second.shift_relationship(&key_i, BATTLE_RELATIONSHIP_SHIFT);
                first.record_action(tick, format!("fought {}", participants[1].name));
                second.record_action(tick, format!("fought {}", participants[0].name));
                self.log.push(
                    tick,
                    format!("{} and {} fought", participants[0].name, participants[1].name),
                );
            }
        }

        format!(
            "battle: {} vs {}",
            participants[0].name, participants[1].name
        )
    }

    fn resolve_friendship(&mut self, i: usize, j: usize) -> String {
        let participants = [self.creatures[i].snapshot(), self.creatures[j].snapshot()];
        let query = format!(
            "{} and {} friendship",
            participants[0].name, participants[1].name
        );
        let context = self.context.query(&query, 3);
        let scenario = format!(
            "{} and {} are getting along",
            participants[0].name, participants[1].name
        );
        let narration = self.narrator.narrate(&participants, &scenario, &context);

        let tick = self.tick;
        let key_i = self.creatures[i].key().to_string();
        let key_j = self.creatures[j].key().to_string();

        match narration {
            Ok(text) => {
                let (first, second) = pair_mut(&mut self.creatures, i, j);
                first.shift_relationship(&key_j, FRIENDSHIP_RELATIONSHIP_SHIFT);
                second.shift_relationship(&key_i, FRIENDSHIP_RELATIONSHIP_SHIFT);
                first.set_mood(Mood::Happy);
                second.set_mood(Mood::Happy);
                first.heal(FRIENDSHIP_HEAL);
                second.heal(FRIENDSHIP_HEAL);
                first.record_action(tick, format!("bonded with {}", participants[1].name));
                second.record_action(tick, format!("bonded with {}", participants[0].name));
                self.log.push(
                    tick,
                    format!(
                        "{} and {} grew closer",
                        participants[0].name, participants[1].name
                    ),
                );
                self.log.push(tick, text);
            }
            Err(error) => {
                tracing::warn!(tick, %error, "narrator failed, applying fixed friendship outcome");
                // No heal or mood change here; only the narrated path has them.
                let (first, second) = pair_mut(&mut self.creatures, i, j);
                first.shift_relationship(&key_j, FRIENDSHIP_RELATIONSHIP_SHIFT);
                second.shift_relationship(&key_i, FRIENDSHIP_RELATIONSHIP_SHIFT);
                first.record_action(tick, format!("bonded with {}", participants[1].name));
                second.record_action(tick, format!("bonded with {}", participants[0].name));
                self.log.push(
                    tick,
                    format!(
                        "{} and {} spent time together",
                        participants[0].name, participants[1].name
                    ),
                );
            }
        }

        format!(
            "friendship: {} & {}",
            participants[0].name, participants[1].name
        )
    }

    /// Awareness-range movement, applied from the lower-index creature's
    /// perspective only.
    fn apply_awareness(&mut self, i: usize, j: usize) {
        let affinity = self.creatures[i].relationship(self.creatures[j].key());
        let target = self.creatures[j].position();
        let viewer = &mut self.creatures[i];
        if affinity < HOSTILE_THRESHOLD {
            viewer.move_toward(target, HOSTILE_APPROACH_SPEED);
        } else if affinity > FOND_THRESHOLD {
            viewer.move_toward(target, FOND_APPROACH_SPEED);
        } else if viewer.mood() == Mood::Tired {
            viewer.move_away(target, WEARY_RETREAT_SPEED);
        }
    }

    /// Per-creature behavior: recover when drained or hurt, otherwise
    /// wander and occasionally practice an ability.
    fn run_individual_behavior(&mut self, index: usize) {
        let tick = self.tick;
        let learn_p = self.config.interaction.learn_probability;
        let creature = &mut self.creatures[index];

        if creature.energy() < 30 {
            creature.rest();
            if self.rng.gen::<f32>() < 0.1 {
                self.log.push(tick, format!("{} is resting", creature.name()));
            }
        } else if creature.hp() < 40 {
            creature.rest();
            if self.rng.gen::<f32>() < 0.15 {
                self.log
                    .push(tick, format!("{} is tending its wounds", creature.name()));
            }
        } else {
            creature.random_walk(&mut self.rng, WANDER_SPEED);
            if self.rng.gen::<f32>() < learn_p {
                self.practice_ability(index);
            }
        }
    }

    fn practice_ability(&mut self, index: usize) {
        if self.creatures[index].ability_count() >= self.config.limits.max_abilities {
            return;
        }
        let unknown: Vec<&str> = catalog::learnable_abilities(self.creatures[index].species())
            .iter()
            .copied()
            .filter(|ability| !self.creatures[index].knows_ability(ability))
            .collect();
        if unknown.is_empty() {
            return;
        }
        if self.rng.gen::<f32>() < PRACTICE_SUCCESS_PROBABILITY {
            if let Some(&ability) = unknown.choose(&mut self.rng) {
                let tick = self.tick;
                let creature = &mut self.creatures[index];
                creature.learn_ability(ability);
                creature.record_action(tick, format!("learned {}", ability));
                self.log
                    .push(tick, format!("{} learned {}", creature.name(), ability));
            }
        }
    }

    /// A found item goes into the inventory, or is eaten on the spot when
    /// the inventory is full. Either way it is never lost.
    fn resolve_pickup(&mut self, index: usize, item: Item) {
        let tick = self.tick;
        let item_name = item.name.clone();
        let creature = &mut self.creatures[index];
        if creature.add_item(item.clone()) {
            creature.record_action(tick, format!("picked up a {}", item_name));
            self.log.push(
                tick,
                format!("{} picked up a {}", creature.name(), item_name),
            );
        } else {
            let summary = item.apply(creature);
            creature.record_action(tick, &summary);
            self.log.push(tick, summary);
        }
    }

    /// Pulls a scenario from the context source and nudges two random
    /// creatures together. A no-op when no scenarios exist.
    fn trigger_world_event(&mut self) -> Option<String> {
        let scenarios = self.context.scenarios();
        let scenario = scenarios.choose(&mut self.rng)?.clone();
        let tick = self.tick;
        tracing::info!(tick, %scenario, "world event");
        self.log.push(tick, format!("world event: {}", scenario));

        let sample_size = self.creatures.len().min(2);
        let picked = rand::seq::index::sample(&mut self.rng, self.creatures.len(), sample_size);
        if picked.len() == 2 {
            let target = self.creatures[picked.index(1)].position();
            self.creatures[picked.index(0)].move_toward(target, WORLD_EVENT_PULL_SPEED);
        }

        Some(format!("world event: {}", scenario))
    }
}

/// Disjoint mutable access to two creatures by index. Requires `i < j`.
fn pair_mut(creatures: &mut [Creature], i: usize, j: usize) -> (&mut Creature, &mut Creature) {
    debug_assert!(i < j);
    let (head, tail) = creatures.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
