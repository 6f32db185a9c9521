use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use dungen::{
    Cell, CollisionPolicy, DungeonGenerator, GeneratorConfig, Layout, Phase, RandomSource,
    TileCatalog, TileKind,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    /// Largest grid side to try
    #[arg(long, default_value_t = 32)]
    max_size: usize,
}

fn random_catalog(rng: &mut RandomSource) -> TileCatalog {
    let count = 1 + rng.below(6);
    let kinds = (0..count)
        .map(|index| {
            let exits = [rng.chance(0.7), rng.chance(0.7), rng.chance(0.7)];
            let (width, length) =
                if rng.chance(0.25) { (1 + rng.below(3) as u32, 1 + rng.below(3) as u32) } else { (1, 1) };
            TileKind::new(format!("kind_{index}"), exits, width, length)
        })
        .collect();
    TileCatalog::new(kinds)
}

fn check_invariants(layout: &Layout, generator: &DungeonGenerator) -> Result<()> {
    let mut covered = BTreeSet::new();
    for placement in &layout.placements {
        for cell in placement.cells() {
            if !covered.insert(cell) {
                bail!("Invariant failed: footprints overlap at {cell:?}");
            }
        }
    }

    let (pushed, popped) = generator.stack_counts();
    if pushed != popped || pushed != layout.placements.len() {
        bail!("Invariant failed: pushed {pushed} popped {popped}");
    }
    if !generator.frontier().is_empty() || generator.phase() != Phase::Complete {
        bail!("Invariant failed: run not complete");
    }

    if covered.contains(&layout.entrance) {
        bail!("Invariant failed: a tile covers the entrance {:?}", layout.entrance);
    }

    let marked: BTreeSet<Cell> = layout.empty_cells.iter().copied().collect();
    if marked.len() != layout.empty_cells.len() {
        bail!("Invariant failed: duplicate empty markers");
    }
    let size = layout.dungeon_size as i32;
    for x in -1..size - 1 {
        for z in -1..size - 1 {
            let cell = Cell::new(x, z);
            let accounted = usize::from(covered.contains(&cell))
                + usize::from(marked.contains(&cell))
                + usize::from(cell == layout.entrance);
            if accounted != 1 {
                bail!("Invariant failed: cell {cell:?} is not accounted for exactly once");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = RandomSource::new(args.seed);
    let mut rejected = 0;
    let mut placements = 0;

    for run in 0..args.runs {
        let size = 3 + rng.below(args.max_size.saturating_sub(2).max(1));
        let config = GeneratorConfig {
            collision_policy: if rng.chance(0.5) {
                CollisionPolicy::DowngradeToSingleCell
            } else {
                CollisionPolicy::Skip
            },
            ..GeneratorConfig::seeded(size, rng.below(usize::MAX) as u64, random_catalog(&mut rng))
        };

        let Ok(mut generator) = DungeonGenerator::new(config) else {
            rejected += 1;
            continue;
        };
        let layout = generator.run_to_completion().clone();
        placements += layout.placements.len();
        if let Err(err) = check_invariants(&layout, &generator) {
            bail!("run {run} (layout seed {}, size {size}): {err}", layout.seed);
        }
    }

    println!(
        "Fuzzing completed successfully: {} runs, {rejected} rejected configs, {placements} placements.",
        args.runs
    );
    Ok(())
}
