//! Level progression rules: maze size, pickup quotas, patrol counts, and timers.

pub const STARTING_LEVEL: u32 = 1;

pub const MAX_TIME_FRAGMENTS: usize = 2;
pub const MAX_COLLECTIBLES: usize = 8;
pub const MAX_PATROL_ENEMIES: usize = 3;

/// Seconds added to the timer by each time fragment.
pub const TIME_FRAGMENT_BONUS_SECS: f64 = 10.0;

const BASE_WIDTH: usize = 5;
const BASE_HEIGHT: usize = 7;
const MAX_WIDTH: usize = 9;
const MAX_HEIGHT: usize = 13;

const BASE_TIME_LIMIT_SECS: f64 = 90.0;
const MIN_TIME_LIMIT_SECS: f64 = 45.0;
const TIME_LIMIT_STEP_SECS: f64 = 5.0;

pub fn time_fragment_count(level: u32) -> usize {
    (1 + (level / 3) as usize).min(MAX_TIME_FRAGMENTS)
}

pub fn collectible_count(level: u32) -> usize {
    (4 + level as usize).min(MAX_COLLECTIBLES)
}

pub fn patrol_enemy_count(level: u32) -> usize {
    ((level.saturating_sub(1) / 2) as usize).min(MAX_PATROL_ENEMIES)
}

/// `(width, height)` in cells, growing one step every second level.
pub fn maze_dimensions(level: u32) -> (usize, usize) {
    let growth = level_slot(level) / 2;
    ((BASE_WIDTH + growth).min(MAX_WIDTH), (BASE_HEIGHT + growth).min(MAX_HEIGHT))
}

pub fn time_limit_secs(level: u32) -> f64 {
    let reduction = TIME_LIMIT_STEP_SECS * level_slot(level) as f64;
    (BASE_TIME_LIMIT_SECS - reduction).max(MIN_TIME_LIMIT_SECS)
}

fn level_slot(level: u32) -> usize {
    level.saturating_sub(STARTING_LEVEL) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickup_quotas_grow_then_cap() {
        assert_eq!(time_fragment_count(1), 1);
        assert_eq!(time_fragment_count(3), 2);
        assert_eq!(time_fragment_count(30), 2);
        assert_eq!(collectible_count(1), 5);
        assert_eq!(collectible_count(4), 8);
        assert_eq!(collectible_count(40), 8);
    }

    #[test]
    fn patrols_start_on_level_three_and_cap_at_three() {
        assert_eq!(patrol_enemy_count(0), 0);
        assert_eq!(patrol_enemy_count(1), 0);
        assert_eq!(patrol_enemy_count(2), 0);
        assert_eq!(patrol_enemy_count(3), 1);
        assert_eq!(patrol_enemy_count(5), 2);
        assert_eq!(patrol_enemy_count(7), 3);
        assert_eq!(patrol_enemy_count(99), 3);
    }

    #[test]
    fn dimensions_and_timer_are_bounded() {
        assert_eq!(maze_dimensions(1), (5, 7));
        assert_eq!(maze_dimensions(3), (6, 8));
        assert_eq!(maze_dimensions(100), (9, 13));
        assert_eq!(time_limit_secs(1), 90.0);
        assert_eq!(time_limit_secs(4), 75.0);
        assert_eq!(time_limit_secs(50), 45.0);
    }
}
