//! Monster catalog loading

use super::ConfigError;
use crate::monster::{Catalog, MonsterKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for monster kind definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonstersConfig {
    pub monsters: Vec<MonsterKind>,
}

/// Load a monster catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let config: MonstersConfig = super::load_toml(path)?;
    Ok(Catalog::new(config.monsters)?)
}

/// Load a monster catalog from a TOML string
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let config: MonstersConfig = super::parse_toml(content)?;
    Ok(Catalog::new(config.monsters)?)
}

/// Get the bundled monster catalog
pub fn default_catalog() -> Catalog {
    let toml = include_str!("../../config/monsters.toml");
    parse_catalog(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::monster::MonsterError;
    use crate::stats::StatMode;

    #[test]
    fn test_parse_catalog() {
        let toml = r#"
[[monsters]]
name = "Sparkle"
description = "A tiny spark"
element = "Electric"
evolution = "Bolt"
can_be_spawned = true

[monsters.simple]
attack = 4
defense = 2
speed = 9
max_hp = 5

[monsters.complex]
attack = "4 level +"
defense = "2"
speed = "9 level 2 / +"
max_hp = "level 2 * 3 +"

[[monsters]]
name = "Bolt"
element = "Electric"

[monsters.simple]
attack = 7
defense = 3
speed = 12
max_hp = 9

[monsters.complex]
attack = "7"
defense = "3"
speed = "12"
max_hp = "9"
"#;

        let catalog = parse_catalog(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.spawnable_count(), 1);

        let bolt = catalog.get("Bolt").unwrap();
        assert!(!bolt.can_be_spawned);
        assert_eq!(bolt.evolution, None);
        assert_eq!(bolt.description, "");

        let sparkle = catalog.spawn("Sparkle", StatMode::Complex, 3).unwrap();
        assert_eq!(sparkle.element(), Element::Electric);
        assert_eq!(sparkle.attack_stat(), 7);
        assert_eq!(sparkle.speed(), 10);
        assert_eq!(sparkle.max_hp(), 9);
    }

    #[test]
    fn test_bad_formula_is_parse_error() {
        let toml = r#"
[[monsters]]
name = "Broken"
element = "Normal"
simple = { attack = 1, defense = 1, speed = 1, max_hp = 1 }
complex = { attack = "1 +", defense = "1", speed = "1", max_hp = "1" }
"#;
        assert!(matches!(parse_catalog(toml), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_evolution_is_catalog_error() {
        let toml = r#"
[[monsters]]
name = "Lonely"
element = "Normal"
evolution = "Nobody"
simple = { attack = 1, defense = 1, speed = 1, max_hp = 1 }
complex = { attack = "1", defense = "1", speed = "1", max_hp = "1" }
"#;
        assert!(matches!(
            parse_catalog(toml),
            Err(ConfigError::Catalog(MonsterError::UnknownEvolution { .. }))
        ));
    }

    #[test]
    fn test_default_catalog_loads_all() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 41, "Expected 41 monsters from config");
        assert_eq!(catalog.spawnable_count(), 27);
        assert_eq!(catalog.all()[0].name, "Flamikin");
        assert_eq!(catalog.all()[35].name, "Soundcobra");
        assert_eq!(catalog.all()[40].name, "Darkadder");

        let infernox = catalog.spawn("Infernox", StatMode::Simple, 1).unwrap();
        assert_eq!(infernox.to_string(), "LV.1 Infernox, 13/13 HP");
        assert_eq!(infernox.attack_stat(), 8);
        assert_eq!(infernox.defense(), 3);
        assert_eq!(infernox.speed(), 14);

        // Every evolution chain resolves
        for kind in catalog.all() {
            if let Some(target) = &kind.evolution {
                assert!(catalog.get(target).is_some(), "{} -> {}", kind.name, target);
            }
        }
    }
}
