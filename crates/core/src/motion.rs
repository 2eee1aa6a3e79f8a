//! Time-based ping-pong motion for patrol enemies.
//!
//! Positions are derived from the enemy and the elapsed time alone, so callers can sample
//! them every frame without keeping any per-enemy state.

use crate::mapgen::PatrolEnemy;
use crate::types::{EnemyPose, Heading};

/// Seconds for one full start -> end -> start cycle, `None` for a patrol that cannot move.
pub fn cycle_time(enemy: &PatrolEnemy) -> Option<f64> {
    let distance = enemy.length();
    if distance <= 0.0 || !enemy.speed.is_finite() || enemy.speed <= 0.0 {
        return None;
    }
    let one_way = distance / enemy.speed;
    one_way.is_finite().then_some(2.0 * one_way)
}

/// Pose of `enemy` after `time` seconds. Negative times wrap around the cycle.
pub fn enemy_position(enemy: &PatrolEnemy, time: f64) -> EnemyPose {
    let start = (f64::from(enemy.start.x), f64::from(enemy.start.y));
    let Some(cycle) = cycle_time(enemy) else {
        return EnemyPose { x: start.0, y: start.1, direction: Heading::Forward };
    };
    if !time.is_finite() {
        return EnemyPose { x: start.0, y: start.1, direction: Heading::Forward };
    }

    let phase = time.rem_euclid(cycle) / cycle;
    let (progress, direction) = if phase < 0.5 {
        (phase * 2.0, Heading::Forward)
    } else {
        (1.0 - (phase - 0.5) * 2.0, Heading::Backward)
    };

    let end = (f64::from(enemy.end.x), f64::from(enemy.end.y));
    EnemyPose {
        x: start.0 + (end.0 - start.0) * progress,
        y: start.1 + (end.1 - start.1) * progress,
        direction,
    }
}
