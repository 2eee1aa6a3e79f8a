use maze_core::mapgen::solver::distance_map;
use maze_core::{Direction, Maze, MazeGenerator, MazeRun, RunEvent, RunRules, RunStatus};

/// Directions along the unique passage from entry to exit.
fn route_to_exit(maze: &Maze) -> Vec<Direction> {
    let grid = maze.grid();
    let from_exit = distance_map(grid, maze.exit());
    let distance_at = |x: i32, y: i32| from_exit[(y as usize) * grid.width() + x as usize];

    let mut route = Vec::new();
    let mut pos = maze.entry();
    while pos != maze.exit() {
        let here = distance_at(pos.x, pos.y).expect("every cell reachable");
        let direction = Direction::ALL
            .into_iter()
            .find(|&direction| {
                let next = pos.step(direction);
                maze.can_move(pos.x, pos.y, direction)
                    && distance_at(next.x, next.y) == Some(here - 1)
            })
            .expect("a tree always has a downhill neighbour");
        route.push(direction);
        pos = pos.step(direction);
    }
    route
}

#[test]
fn test_smoke_run_walks_the_solution_to_the_exit() {
    // Patrol-free level so the walk cannot be interrupted.
    let maze = MazeGenerator::new(12_345).generate_level(1);
    let route = route_to_exit(&maze);
    let mut run = MazeRun::new(maze);

    let mut escaped = false;
    for direction in route {
        let events = run.try_move(direction).expect("solution route is open");
        escaped |= events.contains(&RunEvent::Escaped);
    }

    assert!(escaped);
    assert_eq!(run.status(), RunStatus::Escaped);
    assert_eq!(run.player(), run.maze().exit());
}

#[test]
fn test_smoke_time_runs_out_when_standing_still() {
    let maze = MazeGenerator::new(99).generate_level(3);
    let rules = RunRules { lives: 1, catch_radius: 0.01, ..RunRules::default() };
    let mut run = MazeRun::with_rules(maze, rules);
    let mut last = Vec::new();
    for _ in 0..1_000 {
        if run.status() != RunStatus::InProgress {
            break;
        }
        last = run.advance(0.25);
    }
    assert_ne!(run.status(), RunStatus::InProgress);
    assert!(last.contains(&RunEvent::TimedOut) || last.contains(&RunEvent::Caught));
}
