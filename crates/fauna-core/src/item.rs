//! Items and the Field
//!
//! Items are one-shot consumables. While on the field they carry a
//! position; once picked up the position clears and the creature's
//! inventory owns them. Consuming an item destroys it.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use fauna_events::{EffectKind, FieldItemSnapshot, Position};

use crate::catalog;
use crate::config::FieldBounds;
use crate::creature::Creature;

/// Spawned items keep this margin from every field edge.
pub const SPAWN_MARGIN: f32 = 0.5;

/// A single consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Category tag (informational, e.g. "berry").
    pub category: String,
    pub kind: EffectKind,
    /// Effect magnitude; non-negative.
    pub value: i32,
    /// Set while the item lies on the field, cleared once held.
    pub position: Option<Position>,
}

impl Item {
    /// Creates an unplaced item.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        kind: EffectKind,
        value: i32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            kind,
            value,
            position: None,
        }
    }

    /// Applies the effect to `creature` and returns a human-readable
    /// summary. Callers drop the item afterwards; an applied item is spent.
    pub fn apply(&self, creature: &mut Creature) -> String {
        match self.kind {
            EffectKind::Hp => {
                let healed = creature.heal(self.value);
                format!("{} recovered {} HP", creature.name(), healed)
            }
            EffectKind::Energy => {
                let restored = creature.restore_energy(self.value);
                format!("{} recovered {} energy", creature.name(), restored)
            }
            EffectKind::Mood => {
                if creature.cheer() {
                    format!("{} is feeling better", creature.name())
                } else {
                    format!("{} perked up", creature.name())
                }
            }
            EffectKind::Mixed => {
                creature.heal(self.value / 2);
                creature.restore_energy(self.value / 2);
                format!("{} got its vigor back", creature.name())
            }
        }
    }
}

/// The set of items currently lying on the field.
///
/// Spawns are Bernoulli trials against `spawn_probability`, drawing
/// uniformly from the item catalog and placing inset from the edges.
/// Pickup scans in spawn order, so the earliest-spawned item wins ties.
#[derive(Debug, Clone)]
pub struct ItemField {
    on_field: Vec<Item>,
    bounds: FieldBounds,
    spawn_probability: f32,
    max_on_field: usize,
}

impl ItemField {
    pub fn new(bounds: FieldBounds, spawn_probability: f32, max_on_field: usize) -> Self {
        Self {
            on_field: Vec::new(),
            bounds,
            spawn_probability,
            max_on_field,
        }
    }

    /// One spawn attempt. A no-op when the field is at capacity or the
    /// Bernoulli trial fails. Returns the placed item on success.
    pub fn try_spawn(&mut self, rng: &mut SmallRng) -> Option<&Item> {
        if self.on_field.len() >= self.max_on_field {
            return None;
        }
        if rng.gen::<f32>() >= self.spawn_probability {
            return None;
        }

        let def = catalog::ITEM_CATALOG.choose(rng)?;
        let mut item = Item::new(def.name, def.category, def.kind, def.value);
        item.position = Some(Position::new(
            rng.gen_range(SPAWN_MARGIN..self.bounds.width - SPAWN_MARGIN),
            rng.gen_range(SPAWN_MARGIN..self.bounds.height - SPAWN_MARGIN),
        ));
        self.on_field.push(item);
        self.on_field.last()
    }

    /// Places a specific item at a position. Refused when at capacity.
    pub fn place(&mut self, mut item: Item, position: Position) -> bool {
        if self.on_field.len() >= self.max_on_field {
            return false;
        }
        item.position = Some(self.bounds.clamp(position));
        self.on_field.push(item);
        true
    }

    /// Returns and removes the first item (in spawn order) strictly within
    /// `pickup_distance` of `position`.
    pub fn check_pickup(&mut self, position: Position, pickup_distance: f32) -> Option<Item> {
        let index = self.on_field.iter().position(|item| {
            item.position
                .map_or(false, |p| p.distance_to(position) < pickup_distance)
        })?;
        let mut item = self.on_field.remove(index);
        item.position = None;
        Some(item)
    }

    /// Render view of the field, in spawn order.
    pub fn snapshot(&self) -> Vec<FieldItemSnapshot> {
        self.on_field
            .iter()
            .map(|item| FieldItemSnapshot {
                name: item.name.clone(),
                position: item.position.unwrap_or_default(),
                kind: item.kind,
                color: item.kind.color(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.on_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_field.is_empty()
    }

    /// Empties the field (used for resets).
    pub fn clear(&mut self) {
        self.on_field.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fauna_events::Mood;
    use rand::SeedableRng;

    fn test_creature() -> Creature {
        Creature::new("a", "Volta", "stormtail", FieldBounds::default())
    }

    fn field(spawn_probability: f32) -> ItemField {
        ItemField::new(FieldBounds::default(), spawn_probability, 5)
    }

    #[test]
    fn test_apply_hp_reports_clamped_delta() {
        let mut c = test_creature();
        c.take_damage(8); // hp 92
        let item = Item::new("amber berry", "berry", EffectKind::Hp, 40);
        let summary = item.apply(&mut c);
        assert_eq!(c.hp(), 100);
        assert!(summary.contains("recovered 8 HP"));
    }

    #[test]
    fn test_apply_energy() {
        let mut c = test_creature();
        c.take_damage(0); // energy 95
        let item = Item::new("azure berry", "berry", EffectKind::Energy, 30);
        let summary = item.apply(&mut c);
        assert_eq!(c.energy(), 100);
        assert!(summary.contains("recovered 5 energy"));
    }

    #[test]
    fn test_apply_mood_lifts_sour_moods() {
        let mut c = test_creature();
        c.take_damage(75); // tired
        let item = Item::new("velvet berry", "berry", EffectKind::Mood, 1);
        let summary = item.apply(&mut c);
        assert_eq!(c.mood(), Mood::Happy);
        assert!(summary.contains("feeling better"));
    }

    #[test]
    fn test_apply_mood_excites_otherwise() {
        let mut c = test_creature();
        let item = Item::new("velvet berry", "berry", EffectKind::Mood, 1);
        let summary = item.apply(&mut c);
        assert_eq!(c.mood(), Mood::Excited);
        assert!(summary.contains("perked up"));
    }

    #[test]
    fn test_apply_mixed_splits_with_floor_division() {
        let mut c = test_creature();
        c.take_damage(50); // hp 50, energy 95
        let item = Item::new("dusk berry", "berry", EffectKind::Mixed, 31);
        item.apply(&mut c);
        assert_eq!(c.hp(), 65); // +15, not +15.5
        assert_eq!(c.energy(), 100);
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut items = ItemField::new(FieldBounds::default(), 1.0, 2);
        assert!(items.try_spawn(&mut rng).is_some());
        assert!(items.try_spawn(&mut rng).is_some());
        assert!(items.try_spawn(&mut rng).is_none());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_spawn_positions_are_inset_from_edges() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut items = ItemField::new(FieldBounds::default(), 1.0, 100);
        for _ in 0..100 {
            items.try_spawn(&mut rng);
        }
        for snap in items.snapshot() {
            assert!((0.5..=9.5).contains(&snap.position.x));
            assert!((0.5..=9.5).contains(&snap.position.y));
        }
    }

    #[test]
    fn test_spawn_probability_zero_never_spawns() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut items = field(0.0);
        for _ in 0..200 {
            assert!(items.try_spawn(&mut rng).is_none());
        }
    }

    #[test]
    fn test_pickup_earliest_spawned_wins() {
        let mut items = field(0.0);
        let spot = Position::new(5.0, 5.0);
        items.place(Item::new("scarlet berry", "berry", EffectKind::Hp, 20), spot);
        items.place(Item::new("azure berry", "berry", EffectKind::Energy, 30), spot);

        let picked = items.check_pickup(spot, 0.6).unwrap();
        assert_eq!(picked.name, "scarlet berry");
        assert!(picked.position.is_none());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_pickup_out_of_range_leaves_field_alone() {
        let mut items = field(0.0);
        items.place(
            Item::new("dew berry", "berry", EffectKind::Hp, 15),
            Position::new(5.0, 5.0),
        );
        assert!(items.check_pickup(Position::new(0.0, 0.0), 0.6).is_none());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_clear_empties_the_field() {
        let mut items = field(0.0);
        items.place(
            Item::new("dew berry", "berry", EffectKind::Hp, 15),
            Position::new(1.0, 1.0),
        );
        items.clear();
        assert!(items.is_empty());
    }
}
