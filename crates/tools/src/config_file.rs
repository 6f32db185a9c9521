//! TOML generator settings plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungen::GeneratorConfig;

pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(raw).context("Failed to parse TOML")?;
    Ok(config)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub size: Option<usize>,
    pub step_by_step: bool,
}

/// A seed given on the command line always wins and turns seeding on.
pub fn apply_overrides(mut config: GeneratorConfig, overrides: Overrides) -> GeneratorConfig {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
        config.use_seed = true;
    }
    if let Some(size) = overrides.size {
        config.dungeon_size = size;
    }
    config.step_by_step |= overrides.step_by_step;
    config
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use dungen::{CollisionPolicy, TileCatalog};
    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = r#"
dungeon_size = 9
tile_scale = 4.0
seed = 42
use_seed = true
collision_policy = "downgrade_to_single_cell"

[[tile_catalog]]
id = "cross"
exits = [true, true, true]

[[tile_catalog]]
id = "hall"
exits = [true, false, true]
width = 3
length = 3
"#;

    #[test]
    fn parses_full_config() {
        let config = parse_config(SAMPLE).expect("sample config should parse");
        assert_eq!(config.dungeon_size, 9);
        assert_eq!(config.tile_scale, 4.0);
        assert_eq!(config.fixed_seed().expect("seeded"), Some(42));
        assert_eq!(config.collision_policy, CollisionPolicy::DowngradeToSingleCell);
        assert_eq!(config.tile_catalog.len(), 2);
        assert!(!config.tile_catalog.get(0).is_large());
        assert!(config.tile_catalog.get(1).is_large());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = parse_config("dungeon_size = 15").expect("partial config should parse");
        assert_eq!(config.dungeon_size, 15);
        assert!(!config.use_seed);
        assert_eq!(config.tile_catalog, TileCatalog::standard());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");
        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.dungeon_size, 9);
    }

    #[test]
    fn unreadable_path_reports_the_path() {
        let err = load_config(Path::new("/definitely/not/here.toml")).expect_err("missing file");
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(parse_config("dungeon_size = \"big\"").is_err());
    }

    #[test]
    fn seed_override_enables_seeding() {
        let config = apply_overrides(
            GeneratorConfig::default(),
            Overrides { seed: Some(7), size: Some(21), step_by_step: true },
        );
        assert_eq!(config.fixed_seed().expect("seeded"), Some(7));
        assert_eq!(config.dungeon_size, 21);
        assert!(config.step_by_step);
    }
}
