//! Integer grid coordinates plus the heading and rotation arithmetic shared by
//! the grid, tile and generator modules.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn step(self, heading: Heading, distance: i32) -> Self {
        let (dx, dz) = heading.delta();
        Self { x: self.x + dx * distance, z: self.z + dz * distance }
    }

    /// World-space `(x, z)` for a renderer placing assets `scale` units apart.
    pub fn to_world(self, scale: f32) -> (f32, f32) {
        (self.x as f32 * scale, self.z as f32 * scale)
    }
}

/// Absolute grid direction. `x` grows to the east, `z` grows to the north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::East, Heading::North, Heading::West, Heading::South];

    pub fn from_index(index: u8) -> Self {
        Self::ALL[usize::from(index % 4)]
    }

    pub fn index(self) -> u8 {
        match self {
            Heading::East => 0,
            Heading::North => 1,
            Heading::West => 2,
            Heading::South => 3,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::East => (1, 0),
            Heading::North => (0, 1),
            Heading::West => (-1, 0),
            Heading::South => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }
}

/// Exit slot in a tile's unrotated frame. South is the incoming connector and
/// never an exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LocalExit {
    East,
    North,
    West,
}

impl LocalExit {
    pub const ALL: [LocalExit; 3] = [LocalExit::East, LocalExit::North, LocalExit::West];

    pub fn index(self) -> u8 {
        match self {
            LocalExit::East => 0,
            LocalExit::North => 1,
            LocalExit::West => 2,
        }
    }
}

/// Quarter turns applied to a tile, in the host's yaw convention: one turn maps
/// the local east exit onto absolute south.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rotation(u8);

impl Rotation {
    pub const IDENTITY: Rotation = Rotation(0);

    pub fn from_quarter_turns(turns: i32) -> Self {
        Self(turns.rem_euclid(4) as u8)
    }

    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    pub fn degrees(self) -> u16 {
        u16::from(self.0) * 90
    }

    pub fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }

    /// Absolute heading of `exit` on a tile with this rotation.
    pub fn heading_of(self, exit: LocalExit) -> Heading {
        Heading::from_index((exit.index() + 4 - self.0) % 4)
    }

    /// Rotation of a tile attached through `exit`, chosen so that its south
    /// connector faces back toward the parent.
    pub fn child_through(self, exit: LocalExit) -> Self {
        Self::from_quarter_turns(i32::from(self.0) + 1 - i32::from(exit.index()))
    }
}
