//! Content Catalogs
//!
//! Fixed definitions the simulation draws from: spawnable forage, the
//! abilities each species can pick up through practice, and the default
//! starter roster.

use rand::rngs::SmallRng;
use rand::Rng;

use fauna_events::{EffectKind, Position, Rgb};

use crate::config::SimConfig;
use crate::creature::Creature;

/// A catalog entry for a spawnable item.
#[derive(Debug, Clone, Copy)]
pub struct ItemDef {
    pub name: &'static str,
    pub category: &'static str,
    pub kind: EffectKind,
    pub value: i32,
}

/// Everything the field can spawn.
pub const ITEM_CATALOG: &[ItemDef] = &[
    ItemDef {
        name: "scarlet berry",
        category: "berry",
        kind: EffectKind::Hp,
        value: 20,
    },
    ItemDef {
        name: "amber berry",
        category: "berry",
        kind: EffectKind::Hp,
        value: 40,
    },
    ItemDef {
        name: "azure berry",
        category: "berry",
        kind: EffectKind::Energy,
        value: 30,
    },
    ItemDef {
        name: "velvet berry",
        category: "berry",
        kind: EffectKind::Mood,
        value: 1,
    },
    ItemDef {
        name: "dusk berry",
        category: "berry",
        kind: EffectKind::Mixed,
        value: 30,
    },
    ItemDef {
        name: "ember berry",
        category: "berry",
        kind: EffectKind::Energy,
        value: 50,
    },
    ItemDef {
        name: "dew berry",
        category: "berry",
        kind: EffectKind::Hp,
        value: 15,
    },
];

/// Abilities a species can still pick up through practice. Species outside
/// the catalog learn nothing.
pub fn learnable_abilities(species: &str) -> &'static [&'static str] {
    match species {
        "stormtail" => &["thunder dive", "static burst", "gale spin"],
        "shadowpaw" => &["night slash", "feint", "silent step"],
        "leafkit" => &["seed volley", "sun drink", "vine lash"],
        _ => &[],
    }
}

/// Builds the default three-creature roster with random starting positions.
pub fn starter_roster(config: &SimConfig, rng: &mut SmallRng) -> Vec<Creature> {
    let defs: [(&str, &str, &str, Rgb, &[&str]); 3] = [
        (
            "volta",
            "Volta",
            "stormtail",
            (1.0, 0.9, 0.0),
            &["spark", "quick dash"],
        ),
        (
            "umbra",
            "Umbra",
            "shadowpaw",
            (0.7, 0.7, 0.7),
            &["scratch", "night eyes"],
        ),
        (
            "fern",
            "Fern",
            "leafkit",
            (0.2, 0.8, 0.3),
            &["leaf blade", "pounce"],
        ),
    ];

    defs.iter()
        .map(|&(key, name, species, color, abilities)| {
            let position = Position::new(
                rng.gen_range(0.0..=config.field.width),
                rng.gen_range(0.0..=config.field.height),
            );
            Creature::new(key, name, species, config.field)
                .with_position(position)
                .with_base_color(color)
                .with_abilities(abilities.iter().copied())
                .with_inventory_capacity(config.limits.inventory_capacity)
                .with_history_capacity(config.limits.action_history_capacity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_item_catalog_values_are_non_negative() {
        assert_eq!(ITEM_CATALOG.len(), 7);
        for def in ITEM_CATALOG {
            assert!(def.value >= 0, "{} has a negative value", def.name);
        }
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, a) in ITEM_CATALOG.iter().enumerate() {
            for b in ITEM_CATALOG.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_learnable_abilities_per_species() {
        assert_eq!(learnable_abilities("stormtail").len(), 3);
        assert_eq!(learnable_abilities("shadowpaw").len(), 3);
        assert_eq!(learnable_abilities("leafkit").len(), 3);
        assert!(learnable_abilities("unknown species").is_empty());
    }

    #[test]
    fn test_starter_roster() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let roster = starter_roster(&config, &mut rng);

        assert_eq!(roster.len(), 3);
        for creature in &roster {
            assert!(config.field.contains(creature.position()));
            assert_eq!(creature.hp(), 100);
            assert!(!creature.abilities().is_empty());
            assert_eq!(
                creature.inventory_capacity(),
                config.limits.inventory_capacity
            );
        }
        // Keys are distinct.
        assert_ne!(roster[0].key(), roster[1].key());
        assert_ne!(roster[1].key(), roster[2].key());
    }

    #[test]
    fn test_roster_is_deterministic_per_seed() {
        let config = SimConfig::default();
        let a = starter_roster(&config, &mut SmallRng::seed_from_u64(5));
        let b = starter_roster(&config, &mut SmallRng::seed_from_u64(5));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position(), y.position());
        }
    }
}
