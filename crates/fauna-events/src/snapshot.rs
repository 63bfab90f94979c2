//! Snapshot Types
//!
//! Serialization structs for the engine's per-tick output.
//!
//! Snapshots capture the complete observable state of the simulation at a
//! point in time. They are the only representation collaborators (narrator,
//! renderer, telemetry) ever consume.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{EffectKind, Mood, Position, Rgb};

/// An item held in a creature's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldItemSnapshot {
    pub name: String,
    pub kind: EffectKind,
}

/// An item lying on the field, waiting to be picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldItemSnapshot {
    pub name: String,
    pub position: Position,
    pub kind: EffectKind,
    /// Render color; derived from the effect kind.
    pub color: Rgb,
}

/// Complete view of one creature's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    /// Stable key, unique within a simulation.
    pub key: String,
    pub name: String,
    pub species: String,
    pub position: Position,
    pub hp: i32,
    pub energy: i32,
    pub mood: Mood,
    /// Render color; the creature's base color dimmed as hp drops.
    pub color: Rgb,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<String>,
    /// Affinity toward other creatures by key; absent means 0.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub relationships: HashMap<String, i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inventory: Vec<HeldItemSnapshot>,
}

impl CreatureSnapshot {
    /// Creates a snapshot with full vitals and no history. Mostly useful
    /// for tests and fixtures; the engine builds the real ones.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            species: species.into(),
            position,
            hp: 100,
            energy: 100,
            mood: Mood::Normal,
            color: (0.5, 0.5, 0.5),
            abilities: Vec::new(),
            relationships: HashMap::new(),
            inventory: Vec::new(),
        }
    }

    /// Affinity toward `other`; unknown creatures read as 0.
    pub fn relationship(&self, other: &str) -> i32 {
        self.relationships.get(other).copied().unwrap_or(0)
    }
}

/// Full engine output for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// The tick this snapshot describes.
    pub tick: u64,
    /// Event lines produced during this tick, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    /// Per-creature state, keyed by creature key.
    pub creatures: HashMap<String, CreatureSnapshot>,
    /// Items currently on the field, in spawn order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FieldItemSnapshot>,
}

impl StepSnapshot {
    /// Creates an empty snapshot for the given tick.
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            events: Vec::new(),
            creatures: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// Finds a creature by key.
    pub fn creature(&self, key: &str) -> Option<&CreatureSnapshot> {
        self.creatures.get(key)
    }

    /// Serializes the snapshot to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
