//! Generator configuration, validation and seed resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::TileCatalog;
use crate::error::ConfigError;
use crate::grid::{Footprint, OccupancyGrid};
use crate::types::{Cell, Heading, Rotation};

/// Smallest grid that holds the root tile and the entrance cell south of it.
pub const MIN_DUNGEON_SIZE: usize = 3;

/// What to do when a large candidate collides with reserved cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The exit is spent and nothing is placed.
    #[default]
    Skip,
    /// Retry once with a single-cell kind when the connector cell itself is free.
    DowngradeToSingleCell,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub dungeon_size: usize,
    /// Passed through to the renderer; generation ignores it.
    pub tile_scale: f32,
    pub seed: Option<u64>,
    pub use_seed: bool,
    pub tile_catalog: TileCatalog,
    pub step_by_step: bool,
    pub collision_policy: CollisionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dungeon_size: 11,
            tile_scale: 1.0,
            seed: None,
            use_seed: false,
            tile_catalog: TileCatalog::standard(),
            step_by_step: false,
            collision_policy: CollisionPolicy::Skip,
        }
    }
}

impl GeneratorConfig {
    pub fn seeded(dungeon_size: usize, seed: u64, tile_catalog: TileCatalog) -> Self {
        Self { dungeon_size, seed: Some(seed), use_seed: true, tile_catalog, ..Self::default() }
    }

    pub fn root_cell(&self) -> Cell {
        let centre = (self.dungeon_size / 2) as i32;
        Cell::new(centre, centre)
    }

    /// Cell south of the root, reserved before expansion starts.
    pub fn entrance_cell(&self) -> Cell {
        self.root_cell().step(Heading::South, 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.dungeon_size < MIN_DUNGEON_SIZE {
            return Err(ConfigError::DungeonTooSmall { size: self.dungeon_size });
        }
        if self.use_seed && self.seed.is_none() {
            return Err(ConfigError::MissingSeed);
        }
        if !self.tile_scale.is_finite() || self.tile_scale <= 0.0 {
            return Err(ConfigError::InvalidTileScale { scale: self.tile_scale });
        }

        let mut seen = BTreeSet::new();
        for kind in self.tile_catalog.kinds() {
            if kind.width == 0 || kind.length == 0 {
                return Err(ConfigError::ZeroFootprint { id: kind.id.clone() });
            }
            if !seen.insert(kind.id.as_str()) {
                return Err(ConfigError::DuplicateKind { id: kind.id.clone() });
            }
            if kind.width as usize > self.dungeon_size || kind.length as usize > self.dungeon_size {
                return Err(ConfigError::KindTooLarge {
                    id: kind.id.clone(),
                    width: kind.width,
                    length: kind.length,
                    size: self.dungeon_size,
                });
            }
        }
        if self.root_kind_indices().is_empty() {
            return Err(ConfigError::NoRootKind { size: self.dungeon_size });
        }
        Ok(())
    }

    /// Catalog indices of the kinds that can be the root: unrotated at
    /// [`Self::root_cell`], inside the grid and clear of the entrance cell.
    pub fn root_kind_indices(&self) -> Vec<usize> {
        let grid = OccupancyGrid::new(self.dungeon_size);
        let root_cell = self.root_cell();
        let entrance = self.entrance_cell();
        self.tile_catalog
            .kinds()
            .iter()
            .enumerate()
            .filter(|(_, kind)| {
                let footprint = Footprint::new(root_cell, kind, Rotation::IDENTITY);
                grid.fits(&footprint) && !footprint.contains(entrance)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// The seed every run must use, or `None` when each run draws its own.
    pub fn fixed_seed(&self) -> Result<Option<u64>, ConfigError> {
        match (self.use_seed, self.seed) {
            (true, Some(seed)) => Ok(Some(seed)),
            (true, None) => Err(ConfigError::MissingSeed),
            (false, _) => Ok(None),
        }
    }
}
