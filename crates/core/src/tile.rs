//! Placed tiles and their one-shot exit selection.

use slotmap::new_key_type;

use crate::catalog::TileKind;
use crate::grid::Footprint;
use crate::random::RandomSource;
use crate::types::{LocalExit, Rotation};

new_key_type! {
    pub struct TileId;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileInstance {
    pub kind_index: usize,
    pub footprint: Footprint,
    pub rotation: Rotation,
    /// Position of this tile's record in the placement log.
    pub placement: usize,
    remaining_exits: [bool; 3],
    spawns_available: u8,
}

impl TileInstance {
    pub fn new(
        kind_index: usize,
        kind: &TileKind,
        footprint: Footprint,
        rotation: Rotation,
        placement: usize,
    ) -> Self {
        Self {
            kind_index,
            footprint,
            rotation,
            placement,
            remaining_exits: kind.exits,
            spawns_available: kind.exit_count(),
        }
    }

    pub fn spawns_available(&self) -> u8 {
        self.spawns_available
    }

    pub fn remaining_exits(&self) -> [bool; 3] {
        self.remaining_exits
    }

    /// Draws one of the still-open exits uniformly and consumes it. Returns `None`
    /// without touching the random stream once every exit has been tried.
    pub fn next_exit(&mut self, random: &mut RandomSource) -> Option<LocalExit> {
        if self.spawns_available == 0 {
            return None;
        }
        let open: Vec<LocalExit> =
            LocalExit::ALL.into_iter().filter(|exit| self.is_open(*exit)).collect();
        let exit = open[random.below(open.len())];
        self.remaining_exits[usize::from(exit.index())] = false;
        self.spawns_available -= 1;
        Some(exit)
    }

    fn is_open(&self, exit: LocalExit) -> bool {
        self.remaining_exits[usize::from(exit.index())]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::types::Cell;

    fn instance(exits: [bool; 3]) -> TileInstance {
        let kind = TileKind::single("probe", exits);
        let footprint = Footprint::new(Cell::new(1, 1), &kind, Rotation::IDENTITY);
        TileInstance::new(0, &kind, footprint, Rotation::IDENTITY, 0)
    }

    #[test]
    fn every_open_exit_is_returned_exactly_once() {
        for seed in 0..64 {
            let mut random = RandomSource::new(seed);
            let mut tile = instance([true, true, true]);
            let mut seen = BTreeSet::new();
            while let Some(exit) = tile.next_exit(&mut random) {
                assert!(seen.insert(exit), "exit {exit:?} returned twice for seed {seed}");
            }
            assert_eq!(seen.len(), 3);
            assert_eq!(tile.spawns_available(), 0);
            assert_eq!(tile.remaining_exits(), [false; 3]);
        }
    }

    #[test]
    fn closed_exits_are_never_chosen() {
        for seed in 0..64 {
            let mut random = RandomSource::new(seed);
            let mut tile = instance([true, false, true]);
            let first = tile.next_exit(&mut random);
            let second = tile.next_exit(&mut random);
            assert_ne!(first, Some(LocalExit::North));
            assert_ne!(second, Some(LocalExit::North));
            assert_eq!(tile.next_exit(&mut random), None);
        }
    }

    #[test]
    fn exhausted_tile_does_not_consume_randomness() {
        let mut tile = instance([false, false, false]);
        let mut random = RandomSource::new(5);
        let mut untouched = RandomSource::new(5);
        assert_eq!(tile.next_exit(&mut random), None);
        assert_eq!(random.below(1_000_000), untouched.below(1_000_000));
    }

    #[test]
    fn single_open_exit_is_forced() {
        let mut tile = instance([false, true, false]);
        let mut random = RandomSource::new(99);
        assert_eq!(tile.next_exit(&mut random), Some(LocalExit::North));
        assert_eq!(tile.spawns_available(), 0);
    }
}
