//! Output records handed to the renderer, the generation event log and a stable
//! fingerprint for determinism checks.

use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::types::{Cell, LocalExit};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: String,
    pub kind_index: usize,
    pub x: i32,
    pub z: i32,
    pub rotation_degrees: u16,
    /// Index of the parent record; `None` only for the root.
    pub parent: Option<usize>,
    /// Parent exit this tile hangs off.
    pub exit: Option<LocalExit>,
    pub footprint_min: Cell,
    pub footprint_max: Cell,
}

impl Placement {
    pub fn anchor(&self) -> Cell {
        Cell::new(self.x, self.z)
    }

    pub fn covers(&self, cell: Cell) -> bool {
        (self.footprint_min.x..=self.footprint_max.x).contains(&cell.x)
            && (self.footprint_min.z..=self.footprint_max.z).contains(&cell.z)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (min, max) = (self.footprint_min, self.footprint_max);
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| Cell::new(x, z)))
    }
}

/// Where the renderer should put the surrounding wall slab.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderExtent {
    pub centre: f32,
    pub side_cells: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub dungeon_size: usize,
    pub tile_scale: f32,
    pub seed: u64,
    /// Cell south of the root, reserved for the entrance.
    pub entrance: Cell,
    pub placements: Vec<Placement>,
    pub empty_cells: Vec<Cell>,
}

impl Layout {
    pub(crate) fn new(dungeon_size: usize, tile_scale: f32, seed: u64, entrance: Cell) -> Self {
        Self {
            dungeon_size,
            tile_scale,
            seed,
            entrance,
            placements: Vec::new(),
            empty_cells: Vec::new(),
        }
    }

    pub fn root(&self) -> Option<&Placement> {
        self.placements.first()
    }

    pub fn placement_covering(&self, cell: Cell) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.covers(cell))
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.placements.iter().map(|placement| placement.cells().count()).sum()
    }

    pub fn border(&self) -> BorderExtent {
        BorderExtent {
            centre: self.dungeon_size as f32 * self.tile_scale / 2.0 - 1.0,
            side_cells: self.dungeon_size,
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.dungeon_size as u32).to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend(self.entrance.x.to_le_bytes());
        bytes.extend(self.entrance.z.to_le_bytes());

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            bytes.extend((placement.kind_index as u32).to_le_bytes());
            bytes.extend(placement.x.to_le_bytes());
            bytes.extend(placement.z.to_le_bytes());
            bytes.extend(placement.rotation_degrees.to_le_bytes());
            bytes.extend(placement.parent.map_or(u32::MAX, |parent| parent as u32).to_le_bytes());
        }

        bytes.extend((self.empty_cells.len() as u32).to_le_bytes());
        for cell in &self.empty_cells {
            bytes.extend(cell.x.to_le_bytes());
            bytes.extend(cell.z.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.canonical_bytes());
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    Seeded { seed: u64, generated: bool },
    RootPlaced { placement: usize, cell: Cell },
    EntranceReserved { cell: Cell },
    TilePlaced { placement: usize, parent: usize, exit: LocalExit },
    TileDowngraded { placement: usize, rejected_kind: usize },
    ExitOutOfRange { placement: usize, exit: LocalExit, target: Cell, marked_empty: bool },
    ExitBlocked { placement: usize, exit: LocalExit, target: Cell },
    TileRetired { placement: usize },
    FillCompleted { empty_cells: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: i32, z: i32, min: Cell, max: Cell) -> Placement {
        Placement {
            kind: "probe".to_string(),
            kind_index: 0,
            x,
            z,
            rotation_degrees: 0,
            parent: None,
            exit: None,
            footprint_min: min,
            footprint_max: max,
        }
    }

    #[test]
    fn placement_cells_cover_the_footprint_rectangle() {
        let hall = record(4, 4, Cell::new(3, 3), Cell::new(5, 5));
        assert_eq!(hall.cells().count(), 9);
        assert!(hall.covers(Cell::new(5, 3)));
        assert!(!hall.covers(Cell::new(6, 4)));
        assert_eq!(hall.anchor(), Cell::new(4, 4));
    }

    #[test]
    fn border_follows_size_and_scale() {
        let layout = Layout::new(10, 2.0, 0, Cell::new(5, 4));
        let border = layout.border();
        assert_eq!(border.centre, 9.0);
        assert_eq!(border.side_cells, 10);
    }

    #[test]
    fn fingerprint_tracks_record_changes() {
        let mut layout = Layout::new(5, 1.0, 42, Cell::new(2, 1));
        layout.placements.push(record(2, 2, Cell::new(2, 2), Cell::new(2, 2)));
        let baseline = layout.fingerprint();
        assert_eq!(baseline, layout.clone().fingerprint());

        layout.empty_cells.push(Cell::new(-1, -1));
        assert_ne!(baseline, layout.fingerprint());
    }

    #[test]
    fn layout_survives_json() {
        let mut layout = Layout::new(5, 1.5, 7, Cell::new(2, 1));
        layout.placements.push(record(2, 2, Cell::new(2, 2), Cell::new(2, 2)));
        layout.empty_cells.push(Cell::new(0, 0));
        let json = serde_json::to_string(&layout).expect("serialize");
        let decoded: Layout = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, layout);
    }
}
