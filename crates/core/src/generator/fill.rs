//! Closing sweep that marks every unreserved cell, plus one cell of margin on the
//! low side, as empty.

use super::*;

impl Run {
    pub(super) fn fill(&mut self) -> Vec<Cell> {
        let size = self.grid.size() as i32;
        let mut emitted = Vec::new();
        for x in -1..size - 1 {
            for z in -1..size - 1 {
                let cell = Cell::new(x, z);
                if !self.grid.is_occupied(cell) && self.mark_empty(cell) {
                    emitted.push(cell);
                }
            }
        }
        self.events.push(GenerationEvent::FillCompleted { empty_cells: emitted.len() });
        self.phase = Phase::Complete;
        emitted
    }
}
