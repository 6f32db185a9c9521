//! Depth-first tile placement: seeding, root placement, frontier expansion and
//! the closing fill pass. All run state lives in one [`Run`] owned by the
//! generator, so a reset is simply dropping it.

use std::collections::BTreeSet;

use slotmap::SlotMap;

use crate::catalog::TileCatalog;
use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::grid::{Footprint, OccupancyGrid};
use crate::layout::{GenerationEvent, Layout, Placement};
use crate::random::RandomSource;
use crate::tile::{TileId, TileInstance};
use crate::types::{Cell, LocalExit, Rotation};

mod expand;
mod fill;


/// Run lifecycle. `Seeded`, `RootPlaced` and `Filling` are passed through inside
/// a single call (the one that begins the run, or the one that fills), so
/// [`DungeonGenerator::phase`] only reports `Uninitialized`, `Expanding` and
/// `Complete`. The event log records every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Seeded,
    RootPlaced,
    Expanding,
    Filling,
    Complete,
}

/// Seed a run was started with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSeed {
    pub value: u64,
    /// Drawn from runtime entropy because the configuration fixed none.
    pub generated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepResult {
    pub placed: Option<Placement>,
    /// Empty markers emitted by this step, in emission order.
    pub empty_cells: Vec<Cell>,
    pub done: bool,
}

impl StepResult {
    fn finished(empty_cells: Vec<Cell>) -> Self {
        Self { placed: None, empty_cells, done: true }
    }
}

pub struct DungeonGenerator {
    config: GeneratorConfig,
    fixed_seed: Option<u64>,
    run: Option<Run>,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fixed_seed = config.fixed_seed()?;
        Ok(Self { config, fixed_seed, run: None })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.run.as_ref().map_or(Phase::Uninitialized, |run| run.phase)
    }

    /// Seeds the run and places the root. Batch configurations also expand and
    /// fill to completion. Calling it on a started run does nothing.
    pub fn start(&mut self) {
        if self.run.is_some() {
            return;
        }
        let step_by_step = self.config.step_by_step;
        let config = &self.config;
        let run = self.run.insert(Run::begin(config, self.fixed_seed));
        if !step_by_step {
            run.finish(config);
        }
    }

    /// Advances one expansion iteration. The first call on a fresh generator
    /// places the root; once the frontier drains, the next call runs the fill
    /// pass and reports `done`.
    pub fn step(&mut self) -> StepResult {
        let config = &self.config;
        if let Some(run) = self.run.as_mut() {
            return run.step(config);
        }
        let run = self.run.insert(Run::begin(config, self.fixed_seed));
        StepResult { placed: run.layout.root().cloned(), ..StepResult::default() }
    }

    pub fn run_to_completion(&mut self) -> &Layout {
        let config = &self.config;
        let fixed_seed = self.fixed_seed;
        let run = self.run.get_or_insert_with(|| Run::begin(config, fixed_seed));
        run.finish(config);
        &run.layout
    }

    /// Forgets every tile, record and event and returns to `Uninitialized`.
    pub fn reset(&mut self) {
        self.run = None;
    }

    pub fn regenerate(&mut self) {
        self.reset();
        self.start();
    }

    pub fn seed(&self) -> Option<RunSeed> {
        self.run.as_ref().map(|run| run.seed)
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.run.as_ref().map(|run| &run.layout)
    }

    pub fn events(&self) -> &[GenerationEvent] {
        match &self.run {
            Some(run) => &run.events,
            None => &[],
        }
    }

    pub fn grid(&self) -> Option<&OccupancyGrid> {
        self.run.as_ref().map(|run| &run.grid)
    }

    /// Placement indices of the frontier, root first.
    pub fn frontier(&self) -> Vec<usize> {
        self.run.as_ref().map_or_else(Vec::new, |run| {
            run.frontier.iter().map(|&id| run.tiles[id].placement).collect()
        })
    }

    /// Tiles pushed onto and popped off the frontier so far.
    pub fn stack_counts(&self) -> (usize, usize) {
        self.run.as_ref().map_or((0, 0), |run| (run.pushed, run.popped))
    }
}

/// Generates a complete layout in one call, ignoring `step_by_step`.
pub fn generate(config: GeneratorConfig) -> Result<Layout, ConfigError> {
    let mut generator = DungeonGenerator::new(config)?;
    Ok(generator.run_to_completion().clone())
}

struct Run {
    phase: Phase,
    seed: RunSeed,
    random: RandomSource,
    grid: OccupancyGrid,
    tiles: SlotMap<TileId, TileInstance>,
    frontier: Vec<TileId>,
    marked_empty: BTreeSet<Cell>,
    layout: Layout,
    events: Vec<GenerationEvent>,
    pushed: usize,
    popped: usize,
}

impl Run {
    fn begin(config: &GeneratorConfig, fixed_seed: Option<u64>) -> Self {
        let random = match fixed_seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        };
        let seed = RunSeed { value: random.seed(), generated: fixed_seed.is_none() };
        let root_cell = config.root_cell();
        let entrance = config.entrance_cell();

        let mut run = Self {
            phase: Phase::Expanding,
            seed,
            random,
            grid: OccupancyGrid::new(config.dungeon_size),
            tiles: SlotMap::with_key(),
            frontier: Vec::new(),
            marked_empty: BTreeSet::new(),
            layout: Layout::new(config.dungeon_size, config.tile_scale, seed.value, entrance),
            events: vec![GenerationEvent::Seeded { seed: seed.value, generated: seed.generated }],
            pushed: 0,
            popped: 0,
        };

        // Validation guarantees at least one candidate.
        let catalog = &config.tile_catalog;
        let candidates = config.root_kind_indices();
        let kind_index = candidates[run.random.below(candidates.len())];
        let footprint = Footprint::new(root_cell, catalog.get(kind_index), Rotation::IDENTITY);
        let root = run.push_tile(catalog, kind_index, footprint, Rotation::IDENTITY, None);
        run.events.push(GenerationEvent::RootPlaced { placement: 0, cell: root.anchor() });

        debug_assert!(!run.grid.is_occupied(entrance), "root footprint covers the entrance");
        run.grid.reserve(entrance);
        run.events.push(GenerationEvent::EntranceReserved { cell: entrance });
        run
    }

    fn step(&mut self, config: &GeneratorConfig) -> StepResult {
        if self.phase == Phase::Complete {
            return StepResult::finished(Vec::new());
        }
        if self.frontier.is_empty() {
            return StepResult::finished(self.fill());
        }
        self.expand_once(config)
    }

    fn finish(&mut self, config: &GeneratorConfig) {
        while !self.step(config).done {}
    }

    /// Reserves the footprint, records the placement and pushes the new tile.
    fn push_tile(
        &mut self,
        catalog: &TileCatalog,
        kind_index: usize,
        footprint: Footprint,
        rotation: Rotation,
        parent: Option<(usize, LocalExit)>,
    ) -> Placement {
        let kind = catalog.get(kind_index);
        self.grid.reserve_footprint(&footprint);

        let placement_index = self.layout.placements.len();
        let placement = Placement {
            kind: kind.id.clone(),
            kind_index,
            x: footprint.anchor.x,
            z: footprint.anchor.z,
            rotation_degrees: rotation.degrees(),
            parent: parent.map(|(index, _)| index),
            exit: parent.map(|(_, exit)| exit),
            footprint_min: footprint.min(),
            footprint_max: footprint.max(),
        };
        self.layout.placements.push(placement.clone());

        let id =
            self.tiles.insert(TileInstance::new(kind_index, kind, footprint, rotation, placement_index));
        self.frontier.push(id);
        self.pushed += 1;
        placement
    }

    /// Records an empty marker unless the cell already has one.
    fn mark_empty(&mut self, cell: Cell) -> bool {
        if !self.marked_empty.insert(cell) {
            return false;
        }
        self.layout.empty_cells.push(cell);
        true
    }
}
