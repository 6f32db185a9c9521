//! One iteration of the frontier loop: draw an exit from the top tile, try to
//! attach a random kind behind it, or retire the tile once it has no exits left.

use super::*;
use crate::config::CollisionPolicy;
use crate::types::Heading;

impl Run {
    pub(super) fn expand_once(&mut self, config: &GeneratorConfig) -> StepResult {
        let Some(&top) = self.frontier.last() else {
            return StepResult::default();
        };
        let tile = &mut self.tiles[top];
        let exit = tile.next_exit(&mut self.random);
        let (parent, footprint, rotation) = (tile.placement, tile.footprint, tile.rotation);
        let exhausted = tile.spawns_available() == 0;

        let Some(exit) = exit else {
            if exhausted {
                self.frontier.pop();
                self.tiles.remove(top);
                self.popped += 1;
                self.events.push(GenerationEvent::TileRetired { placement: parent });
            }
            return StepResult::default();
        };

        let heading = rotation.heading_of(exit);
        let attempt = Attempt {
            parent,
            exit,
            heading,
            target: footprint.outer_cell(heading),
            rotation: rotation.child_through(exit),
        };
        self.attach(config, attempt)
    }

    fn attach(&mut self, config: &GeneratorConfig, attempt: Attempt) -> StepResult {
        let catalog = &config.tile_catalog;
        let kind_index = self.random.below(catalog.len());
        let kind = catalog.get(kind_index);
        let footprint =
            Footprint::covering_connector(attempt.target, attempt.heading, kind, attempt.rotation);

        if !self.grid.fits(&footprint) {
            let marked_empty = !self.grid.in_bounds(attempt.target) && self.mark_empty(attempt.target);
            self.events.push(GenerationEvent::ExitOutOfRange {
                placement: attempt.parent,
                exit: attempt.exit,
                target: attempt.target,
                marked_empty,
            });
            let empty_cells = if marked_empty { vec![attempt.target] } else { Vec::new() };
            return StepResult { placed: None, empty_cells, done: false };
        }

        if !self.grid.is_free(&footprint) {
            let downgrade = config.collision_policy == CollisionPolicy::DowngradeToSingleCell
                && kind.is_large()
                && !self.grid.is_occupied(attempt.target);
            if downgrade && let Some(placed) = self.downgrade(catalog, &attempt, kind_index) {
                return StepResult { placed: Some(placed), ..StepResult::default() };
            }
            self.events.push(GenerationEvent::ExitBlocked {
                placement: attempt.parent,
                exit: attempt.exit,
                target: attempt.target,
            });
            return StepResult::default();
        }

        let placed = self.push_placed(catalog, &attempt, kind_index, footprint);
        StepResult { placed: Some(placed), ..StepResult::default() }
    }

    /// Swaps a blocked large candidate for a single-cell kind on the connector.
    fn downgrade(
        &mut self,
        catalog: &TileCatalog,
        attempt: &Attempt,
        rejected_kind: usize,
    ) -> Option<Placement> {
        let singles = catalog.single_cell_indices();
        if singles.is_empty() {
            return None;
        }
        let kind_index = singles[self.random.below(singles.len())];
        let footprint = Footprint::new(attempt.target, catalog.get(kind_index), attempt.rotation);
        let placed = self.push_placed(catalog, attempt, kind_index, footprint);
        let placement = self.layout.placements.len() - 1;
        self.events.push(GenerationEvent::TileDowngraded { placement, rejected_kind });
        Some(placed)
    }

    fn push_placed(
        &mut self,
        catalog: &TileCatalog,
        attempt: &Attempt,
        kind_index: usize,
        footprint: Footprint,
    ) -> Placement {
        let placed = self.push_tile(
            catalog,
            kind_index,
            footprint,
            attempt.rotation,
            Some((attempt.parent, attempt.exit)),
        );
        self.events.push(GenerationEvent::TilePlaced {
            placement: self.layout.placements.len() - 1,
            parent: attempt.parent,
            exit: attempt.exit,
        });
        placed
    }
}

struct Attempt {
    parent: usize,
    exit: LocalExit,
    heading: Heading,
    target: Cell,
    rotation: Rotation,
}
