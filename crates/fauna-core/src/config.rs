//! Configuration System
//!
//! Loads tuning parameters from a TOML file for easy adjustment without
//! recompiling. Out-of-range values (negative probabilities and the like)
//! are a caller error and are not validated here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use fauna_events::Position;

/// Default tuning file path
pub const DEFAULT_CONFIG_PATH: &str = "fauna.toml";

/// Rectangular field bounds.
///
/// Copied into each creature at construction so movement mutators can clamp
/// without reaching back into the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    /// Clamps a position onto the field.
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0.0, self.width),
            position.y.clamp(0.0, self.height),
        )
    }

    /// True if the position lies on the field (clamping would not move it).
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0.0
            && position.x <= self.width
            && position.y >= 0.0
            && position.y <= self.height
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
        }
    }
}

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub field: FieldBounds,
    pub items: ItemConfig,
    pub interaction: InteractionConfig,
    pub limits: LimitConfig,
}

/// Field item tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Per-tick Bernoulli spawn chance.
    pub spawn_probability: f32,
    /// Field capacity; spawning is a no-op at the cap.
    pub max_on_field: usize,
    /// Radius within which a creature collects an item.
    pub pickup_distance: f32,
}

/// Interaction and event probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub battle_probability: f32,
    pub friendship_probability: f32,
    pub learn_probability: f32,
    pub random_event_probability: f32,
}

/// Capacity limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub inventory_capacity: usize,
    pub max_abilities: usize,
    pub event_log_capacity: usize,
    pub action_history_capacity: usize,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load {}, using defaults", DEFAULT_CONFIG_PATH);
            Self::default()
        })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field: FieldBounds {
                width: 10.0,
                height: 10.0,
            },
            items: ItemConfig {
                spawn_probability: 0.03,
                max_on_field: 5,
                pickup_distance: 0.6,
            },
            interaction: InteractionConfig {
                battle_probability: 0.15,
                friendship_probability: 0.2,
                learn_probability: 0.1,
                random_event_probability: 0.1,
            },
            limits: LimitConfig {
                inventory_capacity: 3,
                max_abilities: 6,
                event_log_capacity: 200,
                action_history_capacity: 50,
            },
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
