//! Item Effect Kinds
//!
//! What a consumable does when used, plus the display metadata renderers
//! key off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color triple, each channel in `[0.0, 1.0]`. Rendering metadata only.
pub type Rgb = (f32, f32, f32);

/// What a consumable restores or changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Restores hit points.
    Hp,
    /// Restores energy.
    Energy,
    /// Lifts the holder's mood.
    Mood,
    /// Restores a little of both hp and energy.
    Mixed,
}

impl EffectKind {
    /// Render color for items of this kind.
    pub fn color(self) -> Rgb {
        match self {
            EffectKind::Hp => (1.0, 0.4, 0.4),
            EffectKind::Energy => (0.4, 0.8, 1.0),
            EffectKind::Mood => (1.0, 0.8, 0.4),
            EffectKind::Mixed => (0.8, 0.4, 1.0),
        }
    }

    /// Returns all effect kind variants.
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::Hp,
            EffectKind::Energy,
            EffectKind::Mood,
            EffectKind::Mixed,
        ]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Hp => write!(f, "hp"),
            EffectKind::Energy => write!(f, "energy"),
            EffectKind::Mood => write!(f, "mood"),
            EffectKind::Mixed => write!(f, "mixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&EffectKind::Hp).unwrap(), r#""hp""#);
        assert_eq!(
            serde_json::to_string(&EffectKind::Mixed).unwrap(),
            r#""mixed""#
        );
        assert_eq!(
            serde_json::from_str::<EffectKind>(r#""energy""#).unwrap(),
            EffectKind::Energy
        );
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors: Vec<Rgb> = EffectKind::all().iter().map(|k| k.color()).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
