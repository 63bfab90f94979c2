//! Shared data types and serialization for the creature field simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for every other crate in the workspace.

pub mod effect;
pub mod mood;
pub mod position;
pub mod snapshot;

// Re-export the core value types
pub use effect::{EffectKind, Rgb};
pub use mood::Mood;
pub use position::Position;

// Re-export snapshot types
pub use snapshot::{CreatureSnapshot, FieldItemSnapshot, HeldItemSnapshot, StepSnapshot};
