//! Tile templates the generator draws from.

use serde::{Deserialize, Serialize};

use crate::types::LocalExit;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileKind {
    pub id: String,
    /// Indexed east, north, west in the unrotated frame.
    #[serde(default)]
    pub exits: [bool; 3],
    #[serde(default = "single_cell")]
    pub width: u32,
    #[serde(default = "single_cell")]
    pub length: u32,
}

fn single_cell() -> u32 {
    1
}

impl TileKind {
    pub fn new(id: impl Into<String>, exits: [bool; 3], width: u32, length: u32) -> Self {
        Self { id: id.into(), exits, width, length }
    }

    pub fn single(id: impl Into<String>, exits: [bool; 3]) -> Self {
        Self::new(id, exits, 1, 1)
    }

    pub fn is_large(&self) -> bool {
        u64::from(self.width) * u64::from(self.length) > 1
    }

    pub fn has_exit(&self, exit: LocalExit) -> bool {
        self.exits[usize::from(exit.index())]
    }

    pub fn exit_count(&self) -> u8 {
        self.exits.iter().filter(|&&open| open).count() as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCatalog {
    kinds: Vec<TileKind>,
}

impl TileCatalog {
    pub fn new(kinds: Vec<TileKind>) -> Self {
        Self { kinds }
    }

    /// Corridors, junctions, a dead end and one 3x3 hall.
    pub fn standard() -> Self {
        Self::new(vec![
            TileKind::single("corridor", [false, true, false]),
            TileKind::single("corner", [true, false, false]),
            TileKind::single("tee", [true, false, true]),
            TileKind::single("cross", [true, true, true]),
            TileKind::single("dead_end", [false, false, false]),
            TileKind::new("hall", [true, true, true], 3, 3),
        ])
    }

    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    pub fn get(&self, index: usize) -> &TileKind {
        &self.kinds[index]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Catalog indices of kinds covering exactly one cell.
    pub fn single_cell_indices(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| !kind.is_large())
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<Vec<TileKind>> for TileCatalog {
    fn from(kinds: Vec<TileKind>) -> Self {
        Self::new(kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_means_more_than_one_cell() {
        assert!(!TileKind::single("a", [true; 3]).is_large());
        assert!(TileKind::new("b", [true; 3], 1, 2).is_large());
        assert!(TileKind::new("c", [true; 3], 3, 3).is_large());
    }

    #[test]
    fn exit_lookup_follows_east_north_west_order() {
        let kind = TileKind::single("tee", [true, false, true]);
        assert!(kind.has_exit(LocalExit::East));
        assert!(!kind.has_exit(LocalExit::North));
        assert!(kind.has_exit(LocalExit::West));
        assert_eq!(kind.exit_count(), 2);
    }

    #[test]
    fn standard_catalog_has_single_cell_kinds_and_one_hall() {
        let catalog = TileCatalog::standard();
        assert_eq!(catalog.single_cell_indices(), vec![0, 1, 2, 3, 4]);
        assert!(catalog.get(5).is_large());
    }
}
