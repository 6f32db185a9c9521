//! Text preview of a finished layout, north at the top.

use dungen::{Cell, Layout};

pub const ROOT: char = '#';
pub const TILE: char = '+';
pub const ENTRANCE: char = 'E';
pub const EMPTY: char = '.';
pub const UNMARKED: char = ' ';

pub fn render(layout: &Layout) -> String {
    let size = layout.dungeon_size as i32;
    let mut out = String::new();
    for z in (-1..=size).rev() {
        for x in -1..=size {
            out.push(glyph(layout, Cell::new(x, z)));
        }
        out.push('\n');
    }
    out
}

fn glyph(layout: &Layout, cell: Cell) -> char {
    match layout.placements.iter().position(|placement| placement.covers(cell)) {
        Some(0) => ROOT,
        Some(_) => TILE,
        None if cell == layout.entrance => ENTRANCE,
        None if layout.empty_cells.contains(&cell) => EMPTY,
        None => UNMARKED,
    }
}

#[cfg(test)]
mod tests {
    use dungen::{GeneratorConfig, TileCatalog, TileKind, generate};

    use super::*;

    #[test]
    fn corridor_renders_as_a_vertical_line() {
        let catalog = TileCatalog::new(vec![TileKind::single("corridor", [false, true, false])]);
        let layout = generate(GeneratorConfig::seeded(5, 1, catalog)).expect("valid config");
        let rendered = render(&layout);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.chars().count() == 7));
        // Rows run from z = 5 down to z = -1, columns from x = -1.
        let at = |x: i32, z: i32| rows[(5 - z) as usize].chars().nth((x + 1) as usize);
        assert_eq!(at(2, 2), Some(ROOT));
        assert_eq!(at(2, 3), Some(TILE));
        assert_eq!(at(2, 4), Some(TILE));
        assert_eq!(at(2, 5), Some(EMPTY));
        assert_eq!(at(2, 1), Some(ENTRANCE));
        assert_eq!(at(-1, -1), Some(EMPTY));
        assert_eq!(at(4, 4), Some(UNMARKED));
    }
}
