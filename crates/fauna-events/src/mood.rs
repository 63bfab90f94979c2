//! Creature Moods
//!
//! Moods are derived from vitals and recent events by the engine; nothing
//! outside the defined transition rules sets them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Disposition of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Normal,
    Happy,
    Angry,
    Tired,
    Excited,
}

impl Mood {
    /// True for the moods a comfort item can lift.
    pub fn is_sour(self) -> bool {
        matches!(self, Mood::Angry | Mood::Tired)
    }

    /// Returns all mood variants.
    pub fn all() -> &'static [Mood] {
        &[
            Mood::Normal,
            Mood::Happy,
            Mood::Angry,
            Mood::Tired,
            Mood::Excited,
        ]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Normal => write!(f, "normal"),
            Mood::Happy => write!(f, "happy"),
            Mood::Angry => write!(f, "angry"),
            Mood::Tired => write!(f, "tired"),
            Mood::Excited => write!(f, "excited"),
        }
    }
}
