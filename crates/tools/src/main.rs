use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungen::{DungeonGenerator, GeneratorConfig, Layout, StepResult};

mod ascii;
mod config_file;

use config_file::{Overrides, apply_overrides, load_config};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Summary,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with generator settings and the tile catalog
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fixed seed; implies use_seed = true
    #[arg(short, long)]
    seed: Option<u64>,
    /// Grid side length in cells
    #[arg(long)]
    size: Option<usize>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Advance one expansion iteration per line read from stdin
    #[arg(long)]
    step: bool,
    /// Print the generation event log after the layout
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    let config = apply_overrides(
        base,
        Overrides { seed: args.seed, size: args.size, step_by_step: args.step },
    );
    let mut generator =
        DungeonGenerator::new(config).context("Generator configuration was rejected")?;

    if generator.config().step_by_step {
        run_interactive(&mut generator)?;
    } else {
        generator.start();
    }

    let layout = generator.layout().context("Generator produced no layout")?;
    print_layout(layout, args.format)?;

    if args.trace {
        for event in generator.events() {
            println!("{event:?}");
        }
    }
    Ok(())
}

fn run_interactive(generator: &mut DungeonGenerator) -> Result<()> {
    generator.start();
    if let Some(root) = generator.layout().and_then(Layout::root) {
        println!("root {} at ({}, {})", root.kind, root.x, root.z);
    }
    println!("Press Enter to advance one step.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        line.context("Failed to read from stdin")?;
        let result = generator.step();
        report_step(&result, generator.frontier().len());
        if result.done {
            break;
        }
    }
    // stdin closed early: finish the run so the layout is complete.
    generator.run_to_completion();
    Ok(())
}

fn report_step(result: &StepResult, depth: usize) {
    match &result.placed {
        Some(placed) => println!(
            "placed {} at ({}, {}) rotated {} (depth {depth})",
            placed.kind, placed.x, placed.z, placed.rotation_degrees
        ),
        None if result.done => println!("filled {} empty cells, done", result.empty_cells.len()),
        None if !result.empty_cells.is_empty() => {
            println!("dead end, {} empty marker(s) (depth {depth})", result.empty_cells.len())
        }
        None => println!("no placement (depth {depth})"),
    }
}

fn print_layout(layout: &Layout, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Ascii => {
            print!("{}", ascii::render(layout));
            println!("seed {}", layout.seed);
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(layout).context("Failed to serialize layout")?;
            println!("{json}");
        }
        OutputFormat::Summary => {
            let border = layout.border();
            println!("Seed: {}", layout.seed);
            println!("Placements: {}", layout.placements.len());
            println!("Occupied cells: {}", layout.occupied_cell_count());
            println!("Empty markers: {}", layout.empty_cells.len());
            println!("Border centre: {} side: {}", border.centre, border.side_cells);
            println!("Fingerprint: 0x{:016x}", layout.fingerprint());
        }
    }
    Ok(())
}
