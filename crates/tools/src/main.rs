use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use maze_core::mapgen::progression::{STARTING_LEVEL, maze_dimensions, time_limit_secs};
use maze_core::mapgen::runtime_seed;
use maze_core::{CollectibleKind, MazeConfigFile, MazeGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, default_value_t = STARTING_LEVEL)]
    level: u32,
    /// Overrides the level's width
    #[arg(long)]
    width: Option<usize>,
    /// Overrides the level's height
    #[arg(long)]
    height: Option<usize>,
    /// Path to a maze config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the whole maze as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.level == 0 {
        bail!("levels start at {STARTING_LEVEL}");
    }

    let config = match &args.config {
        Some(path) => MazeConfigFile::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => MazeConfigFile::default(),
    };

    let seed = args.seed.unwrap_or_else(runtime_seed);
    let (level_width, level_height) = maze_dimensions(args.level);
    let width = args.width.unwrap_or(level_width);
    let height = args.height.unwrap_or(level_height);
    info!(seed, level = args.level, width, height, "generating maze");

    let maze = MazeGenerator::with_config(seed, config.generation).generate(width, height, args.level);

    if args.json {
        let json = serde_json::to_string_pretty(&maze).context("Failed to serialize maze")?;
        println!("{json}");
        return Ok(());
    }

    println!("Seed: {seed}");
    println!("Level: {} ({}x{})", maze.level(), maze.width(), maze.height());
    println!("Entry: ({}, {})", maze.entry().x, maze.entry().y);
    println!("Exit: ({}, {})", maze.exit().x, maze.exit().y);
    println!("Time limit: {}s", time_limit_secs(maze.level()));
    for kind in CollectibleKind::ALL {
        let count = maze.collectibles().iter().filter(|item| item.kind == kind).count();
        println!("Collectibles {kind:?}: {count} x {} pts", kind.points());
    }
    println!("Time fragments: {}", maze.time_fragments().len());
    for enemy in maze.patrol_enemies() {
        println!(
            "Patrol {}: ({}, {}) -> ({}, {}) at {:.2} cells/s",
            enemy.id, enemy.start.x, enemy.start.y, enemy.end.x, enemy.end.y, enemy.speed
        );
    }
    println!("Fingerprint: {:016x}", maze.fingerprint());

    Ok(())
}
