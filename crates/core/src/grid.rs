//! Bounded occupancy map and rotated tile footprints.

use crate::catalog::TileKind;
use crate::types::{Cell, Heading, Rotation};

/// Axis-aligned rectangle of cells covered by a tile. Extents are already swapped
/// for odd rotations; even extents lean toward the positive axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub anchor: Cell,
    pub extent_x: i32,
    pub extent_z: i32,
}

impl Footprint {
    pub fn new(anchor: Cell, kind: &TileKind, rotation: Rotation) -> Self {
        let (extent_x, extent_z) = oriented_extents(kind, rotation);
        Self { anchor, extent_x, extent_z }
    }

    /// Footprint of `kind` anchored so that it covers `connector`, the first cell
    /// past the parent along `heading`.
    pub fn covering_connector(
        connector: Cell,
        heading: Heading,
        kind: &TileKind,
        rotation: Rotation,
    ) -> Self {
        let (extent_x, extent_z) = oriented_extents(kind, rotation);
        let back = reach(extent_x, extent_z, heading.opposite());
        Self { anchor: connector.step(heading, back), extent_x, extent_z }
    }

    pub fn min(&self) -> Cell {
        Cell::new(
            self.anchor.x - (self.extent_x - 1) / 2,
            self.anchor.z - (self.extent_z - 1) / 2,
        )
    }

    pub fn max(&self) -> Cell {
        Cell::new(self.anchor.x + self.extent_x / 2, self.anchor.z + self.extent_z / 2)
    }

    /// Cells between the anchor and the footprint edge along `heading`.
    pub fn reach(&self, heading: Heading) -> i32 {
        reach(self.extent_x, self.extent_z, heading)
    }

    /// First cell outside the footprint when leaving the anchor along `heading`.
    pub fn outer_cell(&self, heading: Heading) -> Cell {
        self.anchor.step(heading, self.reach(heading) + 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let (min, max) = (self.min(), self.max());
        (min.x..=max.x).contains(&cell.x) && (min.z..=max.z).contains(&cell.z)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (min, max) = (self.min(), self.max());
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| Cell::new(x, z)))
    }

    pub fn area(&self) -> usize {
        (self.extent_x * self.extent_z) as usize
    }
}

fn oriented_extents(kind: &TileKind, rotation: Rotation) -> (i32, i32) {
    let (width, length) = (kind.width as i32, kind.length as i32);
    if rotation.is_odd() { (length, width) } else { (width, length) }
}

fn reach(extent_x: i32, extent_z: i32, heading: Heading) -> i32 {
    match heading {
        Heading::East => extent_x / 2,
        Heading::West => (extent_x - 1) / 2,
        Heading::North => extent_z / 2,
        Heading::South => (extent_z - 1) / 2,
    }
}

/// `size` x `size` map of reserved cells. A reserved cell stays reserved until the
/// grid is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![false; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && (cell.x as usize) < self.size && (cell.z as usize) < self.size
    }

    /// Out-of-range cells are never occupied.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.cells[self.index(cell)]
    }

    pub fn fits(&self, footprint: &Footprint) -> bool {
        self.in_bounds(footprint.min()) && self.in_bounds(footprint.max())
    }

    /// Whether every footprint cell is unreserved. Call after [`Self::fits`].
    pub fn is_free(&self, footprint: &Footprint) -> bool {
        footprint.cells().all(|cell| !self.cells[self.index(cell)])
    }

    pub fn reserve(&mut self, cell: Cell) {
        assert!(self.in_bounds(cell), "reserve outside grid: {cell:?} (size {})", self.size);
        let index = self.index(cell);
        self.cells[index] = true;
    }

    pub fn reserve_footprint(&mut self, footprint: &Footprint) {
        for cell in footprint.cells() {
            self.reserve(cell);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        (cell.z as usize) * self.size + (cell.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall(width: u32, length: u32) -> TileKind {
        TileKind::new("hall", [true; 3], width, length)
    }

    #[test]
    fn odd_extents_are_centred_on_the_anchor() {
        let footprint = Footprint::new(Cell::new(5, 5), &hall(3, 3), Rotation::IDENTITY);
        assert_eq!(footprint.min(), Cell::new(4, 4));
        assert_eq!(footprint.max(), Cell::new(6, 6));
        assert_eq!(footprint.cells().count(), 9);
        assert_eq!(footprint.area(), 9);
    }

    #[test]
    fn odd_rotation_swaps_width_and_length() {
        let kind = hall(1, 3);
        let upright = Footprint::new(Cell::new(5, 5), &kind, Rotation::IDENTITY);
        let turned = Footprint::new(Cell::new(5, 5), &kind, Rotation::from_quarter_turns(1));
        assert_eq!((upright.extent_x, upright.extent_z), (1, 3));
        assert_eq!((turned.extent_x, turned.extent_z), (3, 1));
        assert_eq!(turned.min(), Cell::new(4, 5));
        assert_eq!(turned.max(), Cell::new(6, 5));
    }

    #[test]
    fn even_extents_lean_positive() {
        let footprint = Footprint::new(Cell::new(2, 2), &hall(2, 2), Rotation::IDENTITY);
        assert_eq!(footprint.min(), Cell::new(2, 2));
        assert_eq!(footprint.max(), Cell::new(3, 3));
        assert_eq!(footprint.reach(Heading::East), 1);
        assert_eq!(footprint.reach(Heading::West), 0);
    }

    #[test]
    fn outer_cell_clears_a_large_parent() {
        let footprint = Footprint::new(Cell::new(5, 5), &hall(3, 3), Rotation::IDENTITY);
        assert_eq!(footprint.outer_cell(Heading::North), Cell::new(5, 7));
        let single = Footprint::new(Cell::new(5, 5), &hall(1, 1), Rotation::IDENTITY);
        assert_eq!(single.outer_cell(Heading::West), Cell::new(4, 5));
    }

    #[test]
    fn large_child_is_pushed_one_step_past_the_connector() {
        let connector = Cell::new(5, 7);
        let footprint =
            Footprint::covering_connector(connector, Heading::North, &hall(3, 3), Rotation::IDENTITY);
        assert_eq!(footprint.anchor, Cell::new(5, 8));
        assert!(footprint.contains(connector));
        assert!(!footprint.contains(Cell::new(5, 6)));
    }

    #[test]
    fn single_child_sits_on_the_connector() {
        let connector = Cell::new(3, 3);
        let footprint =
            Footprint::covering_connector(connector, Heading::East, &hall(1, 1), Rotation::IDENTITY);
        assert_eq!(footprint.anchor, connector);
    }

    #[test]
    fn occupancy_reports_out_of_range_as_free_and_not_fitting() {
        let mut grid = OccupancyGrid::new(5);
        assert!(!grid.is_occupied(Cell::new(-1, 0)));
        assert!(!grid.is_occupied(Cell::new(5, 0)));
        grid.reserve(Cell::new(2, 1));
        assert!(grid.is_occupied(Cell::new(2, 1)));
        assert_eq!(grid.occupied_count(), 1);

        let edge = Footprint::new(Cell::new(0, 2), &hall(3, 3), Rotation::IDENTITY);
        assert!(!grid.fits(&edge));
        let inside = Footprint::new(Cell::new(2, 2), &hall(3, 3), Rotation::IDENTITY);
        assert!(grid.fits(&inside));
        assert!(!grid.is_free(&inside));
    }

    #[test]
    #[should_panic(expected = "reserve outside grid")]
    fn reserving_outside_the_grid_is_fatal() {
        let mut grid = OccupancyGrid::new(3);
        grid.reserve(Cell::new(3, 0));
    }
}
