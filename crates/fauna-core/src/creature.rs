//! Creatures
//!
//! A creature owns its own movement, vitals, mood, abilities, relationships,
//! inventory, and action history. Every mutator clamps its result, so the
//! bounded-state invariants hold at each call boundary.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::Rng;

use fauna_events::{CreatureSnapshot, EffectKind, HeldItemSnapshot, Mood, Position, Rgb};

use crate::config::FieldBounds;
use crate::item::Item;
use crate::ring::RingBuffer;

/// Default inventory capacity.
pub const DEFAULT_INVENTORY_CAPACITY: usize = 3;
/// Default number of retained action-history entries.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
/// Ceiling for hp and energy.
pub const VITAL_MAX: i32 = 100;
/// Bounds for stored affinities.
pub const RELATIONSHIP_MIN: i32 = -100;
pub const RELATIONSHIP_MAX: i32 = 100;

/// One entry in a creature's action history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub tick: u64,
    pub action: String,
}

/// A simulated creature on the field.
#[derive(Debug, Clone)]
pub struct Creature {
    key: String,
    name: String,
    species: String,
    bounds: FieldBounds,
    position: Position,
    hp: i32,
    energy: i32,
    mood: Mood,
    base_color: Rgb,
    abilities: Vec<String>,
    relationships: HashMap<String, i32>,
    inventory: Vec<Item>,
    inventory_capacity: usize,
    history: RingBuffer<ActionRecord>,
}

impl Creature {
    /// Creates a creature at the field origin with full vitals.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
        bounds: FieldBounds,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            species: species.into(),
            bounds,
            position: Position::default(),
            hp: VITAL_MAX,
            energy: VITAL_MAX,
            mood: Mood::Normal,
            base_color: (0.5, 0.5, 0.5),
            abilities: Vec::new(),
            relationships: HashMap::new(),
            inventory: Vec::new(),
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            history: RingBuffer::new(DEFAULT_HISTORY_CAPACITY),
        }
    }

    /// Sets the starting position (clamped onto the field).
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = self.bounds.clamp(position);
        self
    }

    /// Sets the starting ability list.
    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the base render color.
    pub fn with_base_color(mut self, color: Rgb) -> Self {
        self.base_color = color;
        self
    }

    /// Overrides the inventory capacity.
    pub fn with_inventory_capacity(mut self, capacity: usize) -> Self {
        self.inventory_capacity = capacity;
        self
    }

    /// Overrides the action-history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = RingBuffer::new(capacity);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn knows_ability(&self, name: &str) -> bool {
        self.abilities.iter().any(|a| a == name)
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn inventory_capacity(&self) -> usize {
        self.inventory_capacity
    }

    /// Iterates the retained action history, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter()
    }

    // --- movement ---

    /// Translates the position, clamping each axis back onto the field.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position = self
            .bounds
            .clamp(Position::new(self.position.x + dx, self.position.y + dy));
    }

    /// Moves `speed` units toward `target`. Zero distance is a no-op
    /// (the direction is undefined).
    pub fn move_toward(&mut self, target: Position, speed: f32) {
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.0 {
            self.move_by(dx / dist * speed, dy / dist * speed);
        }
    }

    /// Moves `speed` units directly away from `target`. Zero distance is a
    /// no-op.
    pub fn move_away(&mut self, target: Position, speed: f32) {
        let dx = self.position.x - target.x;
        let dy = self.position.y - target.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.0 {
            self.move_by(dx / dist * speed, dy / dist * speed);
        }
    }

    /// Displaces by independent random deltas in `[-speed, speed]` per axis.
    pub fn random_walk(&mut self, rng: &mut SmallRng, speed: f32) {
        let dx = rng.gen_range(-speed..=speed);
        let dy = rng.gen_range(-speed..=speed);
        self.move_by(dx, dy);
    }

    /// Euclidean distance to another creature.
    pub fn distance_to(&self, other: &Creature) -> f32 {
        self.position.distance_to(other.position)
    }

    // --- vitals ---

    /// Applies damage. Hp floors at zero and the hit also costs 5 energy.
    /// The hp<30 check runs first: a badly hurt creature goes tired, not
    /// angry.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
        self.energy = (self.energy - 5).max(0);
        if self.hp < 30 {
            self.mood = Mood::Tired;
        } else if self.hp < 60 {
            self.mood = Mood::Angry;
        }
    }

    /// Restores hp, capped at 100. Returns the amount actually applied.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(VITAL_MAX);
        if self.hp > 70 {
            self.mood = Mood::Happy;
        }
        self.hp - before
    }

    /// Restores energy, capped at 100. Returns the amount actually applied.
    pub fn restore_energy(&mut self, amount: i32) -> i32 {
        let before = self.energy;
        self.energy = (self.energy + amount).min(VITAL_MAX);
        self.energy - before
    }

    /// One rest beat: +10 energy, +3 hp. A well-rested creature settles
    /// back to a normal mood.
    pub fn rest(&mut self) {
        self.energy = (self.energy + 10).min(VITAL_MAX);
        self.hp = (self.hp + 3).min(VITAL_MAX);
        if self.energy > 80 {
            self.mood = Mood::Normal;
        }
    }

    /// Mood-item transition: sour moods lift to happy, anything else to
    /// excited. Returns true when a sour mood was lifted.
    pub fn cheer(&mut self) -> bool {
        let was_sour = self.mood.is_sour();
        self.mood = if was_sour { Mood::Happy } else { Mood::Excited };
        was_sour
    }

    /// Engine-driven mood transitions (friendship outcomes and the like).
    pub(crate) fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    // --- abilities & relationships ---

    /// Adds `ability` if not already known. Learning is exciting.
    /// Returns whether anything was learned.
    pub fn learn_ability(&mut self, ability: impl Into<String>) -> bool {
        let ability = ability.into();
        if self.knows_ability(&ability) {
            return false;
        }
        self.abilities.push(ability);
        self.mood = Mood::Excited;
        true
    }

    /// Shifts the stored affinity toward `other_key` by `delta`, clamped to
    /// `[-100, 100]`. Creates the entry at 0 if absent.
    pub fn shift_relationship(&mut self, other_key: &str, delta: i32) {
        let entry = self.relationships.entry(other_key.to_string()).or_insert(0);
        *entry = (*entry + delta).clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
    }

    /// Stored affinity toward `other_key`; unknown creatures read as 0.
    pub fn relationship(&self, other_key: &str) -> i32 {
        self.relationships.get(other_key).copied().unwrap_or(0)
    }

    // --- inventory ---

    /// Appends an item if there is room. Never fails loudly.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.inventory.len() >= self.inventory_capacity {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Consumes the item at `index` and applies its effect. Out-of-range
    /// indexes are a quiet no-op.
    pub fn use_item(&mut self, index: usize) -> Option<String> {
        if index >= self.inventory.len() {
            return None;
        }
        let item = self.inventory.remove(index);
        Some(item.apply(self))
    }

    /// Uses at most one held item, by need: hp first, then energy, then
    /// mood. A rule whose vital condition holds but has no qualifying item
    /// falls through to the next rule.
    pub fn auto_use_item(&mut self) -> Option<String> {
        if self.hp <= 50 {
            if let Some(index) = self.first_item_of(&[EffectKind::Hp, EffectKind::Mixed]) {
                return self.use_item(index);
            }
        }
        if self.energy <= 30 {
            if let Some(index) = self.first_item_of(&[EffectKind::Energy, EffectKind::Mixed]) {
                return self.use_item(index);
            }
        }
        if self.mood.is_sour() {
            if let Some(index) = self.first_item_of(&[EffectKind::Mood]) {
                return self.use_item(index);
            }
        }
        None
    }

    fn first_item_of(&self, kinds: &[EffectKind]) -> Option<usize> {
        self.inventory
            .iter()
            .position(|item| kinds.contains(&item.kind))
    }

    // --- history & output ---

    /// Records an action in the bounded history.
    pub fn record_action(&mut self, tick: u64, action: impl Into<String>) {
        self.history.push(ActionRecord {
            tick,
            action: action.into(),
        });
    }

    /// Display color: the base color dimmed as hp drops, never below 30%
    /// brightness.
    pub fn display_color(&self) -> Rgb {
        let factor = (self.hp as f32 / VITAL_MAX as f32).max(0.3);
        (
            self.base_color.0 * factor,
            self.base_color.1 * factor,
            self.base_color.2 * factor,
        )
    }

    /// Complete serializable view of this creature. The only representation
    /// collaborators ever see.
    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            key: self.key.clone(),
            name: self.name.clone(),
            species: self.species.clone(),
            position: self.position,
            hp: self.hp,
            energy: self.energy,
            mood: self.mood,
            color: self.display_color(),
            abilities: self.abilities.clone(),
            relationships: self.relationships.clone(),
            inventory: self
                .inventory
                .iter()
                .map(|item| HeldItemSnapshot {
                    name: item.name.clone(),
                    kind: item.kind,
                })
                .collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_vitals(&mut self, hp: i32, energy: i32) {
        self.hp = hp;
        self.energy = energy;
    }
}
