pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod random;
pub mod tile;
pub mod types;

pub use catalog::{TileCatalog, TileKind};
pub use config::{CollisionPolicy, GeneratorConfig, MIN_DUNGEON_SIZE};
pub use error::ConfigError;
pub use generator::{DungeonGenerator, Phase, RunSeed, StepResult, generate};
pub use grid::{Footprint, OccupancyGrid};
pub use layout::{BorderExtent, GenerationEvent, Layout, Placement};
pub use random::RandomSource;
pub use tile::{TileId, TileInstance};
pub use types::*;
