//! Caller-side state of one attempt at a maze: player cell, pickups, timer, and lives.
//!
//! The generated [`Maze`] stays immutable; everything that changes while playing lives here.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigLoadError;
use crate::mapgen::Maze;
use crate::mapgen::progression::{TIME_FRAGMENT_BONUS_SECS, time_limit_secs};
use crate::motion::enemy_position;
use crate::types::{CollectibleKind, Direction, EnemyPose, Pos};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRules {
    pub fragment_bonus_secs: f64,
    pub lives: u8,
    /// Distance in cells under which a patrol catches the player.
    pub catch_radius: f64,
    /// Invulnerability after a hit.
    pub hit_grace_secs: f64,
}

impl Default for RunRules {
    fn default() -> Self {
        Self {
            fragment_bonus_secs: TIME_FRAGMENT_BONUS_SECS,
            lives: 3,
            catch_radius: 0.6,
            hit_grace_secs: 1.5,
        }
    }
}

impl RunRules {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let invalid = |field: &'static str, message: &str| -> Result<(), ConfigLoadError> {
            Err(ConfigLoadError::Invalid { field, message: message.to_string() })
        };
        if !self.fragment_bonus_secs.is_finite() || self.fragment_bonus_secs < 0.0 {
            return invalid("rules.fragment_bonus_secs", "must be a non-negative number");
        }
        if self.lives == 0 {
            return invalid("rules.lives", "must be at least 1");
        }
        if !self.catch_radius.is_finite() || self.catch_radius <= 0.0 {
            return invalid("rules.catch_radius", "must be a positive number");
        }
        if !self.hit_grace_secs.is_finite() || self.hit_grace_secs < 0.0 {
            return invalid("rules.hit_grace_secs", "must be a non-negative number");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    InProgress,
    Escaped,
    TimedOut,
    Caught,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Moved { to: Pos },
    CollectiblePicked { pos: Pos, kind: CollectibleKind, points: u32 },
    TimeBonus { pos: Pos, seconds: f64 },
    Hit { enemy_id: u32, lives_left: u8 },
    Escaped,
    TimedOut,
    Caught,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// A wall blocks `direction` from `from`.
    Blocked { from: Pos, direction: Direction },
    /// The run already ended.
    Finished(RunStatus),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked { from, direction } => {
                write!(f, "cannot move {direction:?} from ({}, {})", from.x, from.y)
            }
            Self::Finished(status) => write!(f, "run already finished: {status:?}"),
        }
    }
}

impl Error for RunError {}

#[derive(Clone, Debug)]
pub struct MazeRun {
    maze: Maze,
    rules: RunRules,
    player: Pos,
    collected: BTreeSet<Pos>,
    fragments_taken: BTreeSet<Pos>,
    score: u32,
    remaining_secs: f64,
    elapsed_secs: f64,
    lives: u8,
    grace_until: f64,
    status: RunStatus,
}

impl MazeRun {
    pub fn new(maze: Maze) -> Self {
        Self::with_rules(maze, RunRules::default())
    }

    pub fn with_rules(maze: Maze, rules: RunRules) -> Self {
        let remaining_secs = time_limit_secs(maze.level());
        Self {
            player: maze.entry(),
            lives: rules.lives.max(1),
            maze,
            rules,
            collected: BTreeSet::new(),
            fragments_taken: BTreeSet::new(),
            score: 0,
            remaining_secs,
            elapsed_secs: 0.0,
            grace_until: 0.0,
            status: RunStatus::InProgress,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn rules(&self) -> &RunRules {
        &self.rules
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_collected(&self, pos: Pos) -> bool {
        self.collected.contains(&pos) || self.fragments_taken.contains(&pos)
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn enemy_poses(&self) -> Vec<(u32, EnemyPose)> {
        self.maze
            .patrol_enemies()
            .iter()
            .map(|enemy| (enemy.id, enemy_position(enemy, self.elapsed_secs)))
            .collect()
    }

    /// Steps the player one cell if the maze allows it, collecting whatever lies there.
    pub fn try_move(&mut self, direction: Direction) -> Result<Vec<RunEvent>, RunError> {
        if self.status != RunStatus::InProgress {
            return Err(RunError::Finished(self.status));
        }
        if !self.maze.can_move(self.player.x, self.player.y, direction) {
            return Err(RunError::Blocked { from: self.player, direction });
        }

        self.player = self.player.step(direction);
        let mut events = vec![RunEvent::Moved { to: self.player }];
        self.collect_at_player(&mut events);

        if self.player == self.maze.exit() {
            self.status = RunStatus::Escaped;
            events.push(RunEvent::Escaped);
            debug!(score = self.score, elapsed = self.elapsed_secs, "maze escaped");
            return Ok(events);
        }

        self.check_patrols(&mut events);
        Ok(events)
    }

    /// Advances the clock by `dt` seconds and resolves patrol contact.
    pub fn advance(&mut self, dt: f64) -> Vec<RunEvent> {
        let mut events = Vec::new();
        if self.status != RunStatus::InProgress || !dt.is_finite() || dt <= 0.0 {
            return events;
        }

        self.elapsed_secs += dt;
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.status = RunStatus::TimedOut;
            events.push(RunEvent::TimedOut);
            debug!(score = self.score, "maze timer expired");
            return events;
        }

        self.check_patrols(&mut events);
        events
    }

    fn collect_at_player(&mut self, events: &mut Vec<RunEvent>) {
        let pos = self.player;
        if let Some(item) = self.maze.collectibles().iter().find(|item| item.pos == pos)
            && self.collected.insert(pos)
        {
            self.score += item.points();
            events.push(RunEvent::CollectiblePicked { pos, kind: item.kind, points: item.points() });
        }
        if self.maze.time_fragments().iter().any(|fragment| fragment.pos == pos)
            && self.fragments_taken.insert(pos)
        {
            self.remaining_secs += self.rules.fragment_bonus_secs;
            events.push(RunEvent::TimeBonus { pos, seconds: self.rules.fragment_bonus_secs });
        }
    }

    fn check_patrols(&mut self, events: &mut Vec<RunEvent>) {
        if self.elapsed_secs < self.grace_until {
            return;
        }
        let player_x = f64::from(self.player.x);
        let player_y = f64::from(self.player.y);
        let catcher = self.maze.patrol_enemies().iter().find(|enemy| {
            let pose = enemy_position(enemy, self.elapsed_secs);
            (pose.x - player_x).hypot(pose.y - player_y) < self.rules.catch_radius
        });
        let Some(enemy_id) = catcher.map(|enemy| enemy.id) else {
            return;
        };

        self.lives = self.lives.saturating_sub(1);
        events.push(RunEvent::Hit { enemy_id, lives_left: self.lives });
        if self.lives == 0 {
            self.status = RunStatus::Caught;
            events.push(RunEvent::Caught);
            debug!(enemy_id, score = self.score, "player caught");
            return;
        }
        self.player = self.maze.entry();
        self.grace_until = self.elapsed_secs + self.rules.hit_grace_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::{Collectible, Grid, PatrolEnemy, TimeFragment};

    /// 5x2 serpentine: top row left to right, down at the end, bottom row back to the left.
    fn serpentine(patrol_enemies: Vec<PatrolEnemy>) -> Maze {
        let mut grid = Grid::new(5, 2);
        for x in 0..4 {
            grid.carve(Pos::new(x, 0), Direction::Right);
            grid.carve(Pos::new(x, 1), Direction::Right);
        }
        grid.carve(Pos::new(4, 0), Direction::Down);
        Maze {
            level: 1,
            grid,
            entry: Pos::new(0, 0),
            exit: Pos::new(0, 1),
            collectibles: vec![Collectible { pos: Pos::new(2, 0), kind: CollectibleKind::Kuran }],
            time_fragments: vec![TimeFragment { pos: Pos::new(3, 0) }],
            patrol_enemies,
        }
    }

    #[test]
    fn walls_block_moves_without_changing_state() {
        let mut run = MazeRun::new(serpentine(Vec::new()));
        let error = run.try_move(Direction::Down).expect_err("wall below entry");
        assert_eq!(error, RunError::Blocked { from: Pos::new(0, 0), direction: Direction::Down });
        assert_eq!(run.player(), Pos::new(0, 0));
        assert_eq!(error.to_string(), "cannot move Down from (0, 0)");
    }

    #[test]
    fn pickups_score_once_and_extend_the_timer() {
        let mut run = MazeRun::new(serpentine(Vec::new()));
        let start_time = run.remaining_secs();
        run.try_move(Direction::Right).expect("open");
        let events = run.try_move(Direction::Right).expect("open");
        assert!(events.contains(&RunEvent::CollectiblePicked {
            pos: Pos::new(2, 0),
            kind: CollectibleKind::Kuran,
            points: 100,
        }));
        assert_eq!(run.score(), 100);

        let events = run.try_move(Direction::Right).expect("open");
        assert!(events.contains(&RunEvent::TimeBonus { pos: Pos::new(3, 0), seconds: 10.0 }));
        assert_eq!(run.remaining_secs(), start_time + 10.0);

        run.try_move(Direction::Left).expect("open");
        let events = run.try_move(Direction::Left).expect("open");
        assert_eq!(events, vec![RunEvent::Moved { to: Pos::new(1, 0) }]);
        assert_eq!(run.score(), 100);
        assert!(run.is_collected(Pos::new(2, 0)));
    }

    #[test]
    fn reaching_the_exit_finishes_the_run() {
        let mut run = MazeRun::new(serpentine(Vec::new()));
        for direction in [Direction::Right; 4] {
            run.try_move(direction).expect("open");
        }
        run.try_move(Direction::Down).expect("open");
        for _ in 0..3 {
            run.try_move(Direction::Left).expect("open");
        }
        let events = run.try_move(Direction::Left).expect("open");
        assert_eq!(events.last(), Some(&RunEvent::Escaped));
        assert_eq!(run.status(), RunStatus::Escaped);
        assert_eq!(run.try_move(Direction::Right), Err(RunError::Finished(RunStatus::Escaped)));
        assert!(run.advance(1.0).is_empty());
    }

    #[test]
    fn timer_expiry_ends_the_run() {
        let mut run = MazeRun::new(serpentine(Vec::new()));
        assert!(run.advance(89.0).is_empty());
        assert_eq!(run.advance(2.0), vec![RunEvent::TimedOut]);
        assert_eq!(run.status(), RunStatus::TimedOut);
        assert_eq!(run.remaining_secs(), 0.0);
    }

    #[test]
    fn patrol_contact_costs_a_life_and_resets_to_entry() {
        // Patrol walks the bottom row from (4,1) to (1,1) and back, one cell per second.
        let patrol =
            PatrolEnemy { id: 7, start: Pos::new(4, 1), end: Pos::new(1, 1), speed: 1.0 };
        let rules = RunRules { lives: 2, ..RunRules::default() };
        let mut run = MazeRun::with_rules(serpentine(vec![patrol]), rules);
        for _ in 0..4 {
            run.try_move(Direction::Right).expect("open");
        }
        let events = run.try_move(Direction::Down).expect("open");
        assert_eq!(events.last(), Some(&RunEvent::Hit { enemy_id: 7, lives_left: 1 }));
        assert_eq!(run.player(), Pos::new(0, 0));

        // Grace window keeps the player safe right after the hit.
        assert!(run.advance(0.5).is_empty());
        for _ in 0..4 {
            run.try_move(Direction::Right).expect("open");
        }
        run.try_move(Direction::Down).expect("open");

        // At 1.5 s the patrol is at x=2.5, at 5.5 s it is back at x=3.5 next to the player.
        assert!(run.advance(1.0).is_empty());
        let events = run.advance(4.0);
        assert_eq!(
            events,
            vec![RunEvent::Hit { enemy_id: 7, lives_left: 0 }, RunEvent::Caught]
        );
        assert_eq!(run.status(), RunStatus::Caught);
    }

    #[test]
    fn rules_validation_rejects_nonsense() {
        assert!(RunRules::default().validate().is_ok());
        let no_lives = RunRules { lives: 0, ..RunRules::default() };
        assert!(matches!(
            no_lives.validate(),
            Err(ConfigLoadError::Invalid { field: "rules.lives", .. })
        ));
        let bad_radius = RunRules { catch_radius: f64::NAN, ..RunRules::default() };
        assert!(bad_radius.validate().is_err());
    }
}
