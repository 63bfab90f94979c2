//! Core simulation logic: creatures, items, and the tick state machine.
//!
//! Public API for the simulation engine.

pub mod catalog;
pub mod config;
pub mod creature;
pub mod engine;
pub mod item;
pub mod log;
pub mod narrate;
pub mod ring;

pub use config::{ConfigError, FieldBounds, SimConfig};
pub use creature::{ActionRecord, Creature};
pub use engine::SimulationEngine;
pub use item::{Item, ItemField};
pub use log::EventLog;
pub use narrate::{
    ContextSource, NarrateError, Narrator, SilentNarrator, StaticContextSource, TemplateNarrator,
};
pub use ring::RingBuffer;
