use maze_core::{Direction, MazeGenerator, MazeRun, RunError, RunStatus};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn run_fuzz_session(map_seed: u64, input_seed: u64, level: u32, max_steps: u32) -> Result<(), String> {
    let maze = MazeGenerator::new(map_seed).generate_level(level);
    let mut run = MazeRun::new(maze);
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);

    for _ in 0..max_steps {
        if run.status() != RunStatus::InProgress {
            break;
        }
        let direction = choose(&mut rng, &Direction::ALL);
        let before = run.player();
        match run.try_move(direction) {
            Ok(_) => {
                if !run.maze().can_move(before.x, before.y, direction) {
                    return Err(format!("Invariant failed: moved through a wall on map_seed {map_seed}"));
                }
            }
            Err(RunError::Blocked { .. }) => {
                if run.player() != before {
                    return Err(format!("Invariant failed: blocked move changed position on map_seed {map_seed}"));
                }
            }
            Err(RunError::Finished(_)) => break,
        }
        run.advance(0.1);

        if !run.maze().grid().in_bounds(run.player()) {
            return Err(format!("Invariant failed: player left the grid on map_seed {map_seed}"));
        }
        if run.collected_count() > run.maze().collectibles().len() {
            return Err(format!("Invariant failed: collected more than placed on map_seed {map_seed}"));
        }
        let earned: u32 = run
            .maze()
            .collectibles()
            .iter()
            .filter(|item| run.is_collected(item.pos))
            .map(|item| item.points())
            .sum();
        if earned != run.score() {
            return Err(format!("Invariant failed: score drifted from pickups on map_seed {map_seed}"));
        }
        if run.lives() > run.rules().lives {
            return Err(format!("Invariant failed: lives grew on map_seed {map_seed}"));
        }
    }

    Ok(())
}

#[test]
fn test_fuzz_maze_sessions() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(32));
    let inputs = (any::<u64>(), any::<u64>(), 1_u32..=12);

    runner
        .run(&inputs, |(map_seed, input_seed, level)| {
            run_fuzz_session(map_seed, input_seed, level, 2_000).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random sessions should preserve invariants");
}
