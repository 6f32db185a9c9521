use thiserror::Error;

use crate::config::MIN_DUNGEON_SIZE;

/// Rejected generator configuration. Raised before any generation state exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tile catalog is empty")]
    EmptyCatalog,
    #[error("dungeon size {size} is below the minimum of {min}", min = MIN_DUNGEON_SIZE)]
    DungeonTooSmall { size: usize },
    #[error("use_seed is set but no seed was provided")]
    MissingSeed,
    #[error("tile scale must be a positive finite number, got {scale}")]
    InvalidTileScale { scale: f32 },
    #[error("tile kind `{id}` has a zero-sized footprint")]
    ZeroFootprint { id: String },
    #[error("tile kind `{id}` appears more than once in the catalog")]
    DuplicateKind { id: String },
    #[error("tile kind `{id}` ({width}x{length}) does not fit a {size}x{size} grid")]
    KindTooLarge { id: String, width: u32, length: u32, size: usize },
    #[error("no tile kind fits the centre of a {size}x{size} grid without covering the entrance")]
    NoRootKind { size: usize },
}
