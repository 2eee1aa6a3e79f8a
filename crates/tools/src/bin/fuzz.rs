use std::collections::BTreeSet;
use std::io;

use anyhow::{Result, ensure};
use clap::Parser;
use maze_core::mapgen::progression::{collectible_count, patrol_enemy_count, time_fragment_count};
use maze_core::mapgen::solver::distance_map;
use maze_core::{Direction, Maze, MazeGenerator, MazeRun, RunError, RunStatus, enemy_position};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of run seeds to sweep, starting at `seed`
    #[arg(short, long, default_value_t = 200)]
    runs: u64,
    #[arg(short, long, default_value_t = 12)]
    max_level: u32,
    /// Random moves per session
    #[arg(long, default_value_t = 500)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn check_layout(maze: &Maze, seed: u64) -> Result<()> {
    let grid = maze.grid();
    let level = maze.level();
    ensure!(
        grid.passage_count() + 1 == grid.len(),
        "Invariant failed: not a spanning tree (seed {seed}, level {level})"
    );

    let distances = distance_map(grid, maze.entry());
    ensure!(
        distances.iter().all(Option::is_some),
        "Invariant failed: unreachable cell (seed {seed}, level {level})"
    );
    let farthest = distances.iter().flatten().max().copied();
    let exit_index = maze.exit().y as usize * grid.width() + maze.exit().x as usize;
    ensure!(
        distances[exit_index] == farthest,
        "Invariant failed: exit is not a farthest cell (seed {seed}, level {level})"
    );

    let mut occupied = BTreeSet::from([maze.entry(), maze.exit()]);
    for pos in maze
        .collectibles()
        .iter()
        .map(|item| item.pos)
        .chain(maze.time_fragments().iter().map(|fragment| fragment.pos))
    {
        ensure!(occupied.insert(pos), "Invariant failed: shared cell {pos:?} (seed {seed})");
    }
    ensure!(maze.collectibles().len() <= collectible_count(level), "Invariant failed: collectible quota");
    ensure!(maze.time_fragments().len() <= time_fragment_count(level), "Invariant failed: fragment quota");
    ensure!(maze.patrol_enemies().len() <= patrol_enemy_count(level), "Invariant failed: patrol quota");

    for enemy in maze.patrol_enemies() {
        let pose = enemy_position(enemy, 0.0);
        ensure!(
            pose.x == f64::from(enemy.start.x) && pose.y == f64::from(enemy.start.y),
            "Invariant failed: patrol {} does not start at its start cell",
            enemy.id
        );
    }
    Ok(())
}

fn drive_session(maze: Maze, rng: &mut ChaCha8Rng, steps: u32) -> Result<RunStatus> {
    let mut run = MazeRun::new(maze);
    for _ in 0..steps {
        let direction = choose(rng, &Direction::ALL);
        let before = run.player();
        match run.try_move(direction) {
            Ok(_) => {
                ensure!(
                    run.maze().can_move(before.x, before.y, direction),
                    "Invariant failed: moved through a wall"
                )
            }
            Err(RunError::Blocked { .. }) => {
                ensure!(run.player() == before, "Invariant failed: blocked move changed position")
            }
            Err(RunError::Finished(_)) => break,
        }
        run.advance(0.1);
        ensure!(run.maze().grid().in_bounds(run.player()), "Invariant failed: player left the grid");
        ensure!(run.lives() <= run.rules().lives, "Invariant failed: lives grew");
    }
    Ok(run.status())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!(seed = args.seed, runs = args.runs, max_level = args.max_level, "starting fuzz harness");
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut escaped = 0_u64;
    let mut sessions = 0_u64;
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let generator = MazeGenerator::new(seed);
        for level in 1..=args.max_level {
            let maze = generator.generate_level(level);
            check_layout(&maze, seed)?;
            let status = drive_session(maze, &mut rng, args.steps)?;
            debug!(seed, level, ?status, "session finished");
            sessions += 1;
            escaped += u64::from(status == RunStatus::Escaped);
        }
    }

    println!("Fuzzing completed successfully: {sessions} sessions, {escaped} escaped.");
    Ok(())
}
