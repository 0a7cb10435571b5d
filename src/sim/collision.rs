//! Movement and collision rules for the player and the ball
//!
//! Everything here is discrete: one call moves an entity at most one cell.

use thiserror::Error;

use super::blocks::BlockKind;
use super::direction::Direction;
use super::grid::EMPTY;
use super::level::Level;
use super::state::GameEvent;
use crate::consts::BIRD_SCORE;

/// Why the player could not move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid direction index {0}")]
    InvalidDirection(i32),
    #[error("cell ({x}, {y}) is occupied")]
    Collision { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is outside the level")]
    OutOfBounds { x: i32, y: i32 },
}

/// What happened to the ball during one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStep {
    /// Bounced off the border; position unchanged
    Reflected,
    /// Moved one cell
    Moved,
    /// Moved onto a trap that took the last life
    Fatal,
}

/// Move the player one cell
///
/// Occupancy is checked before bounds. Cells outside the grid read as
/// unoccupied, so leaving the level reports [`MoveError::OutOfBounds`].
pub fn move_player(level: &mut Level, direction: Direction) -> Result<(), MoveError> {
    let target = level.player + direction.offset();

    if level.grid.is_occupied(target) {
        return Err(MoveError::Collision {
            x: target.x,
            y: target.y,
        });
    }

    if !level.in_bounds(target) {
        return Err(MoveError::OutOfBounds {
            x: target.x,
            y: target.y,
        });
    }

    level.player = target;
    Ok(())
}

/// [`move_player`] for a raw direction index (0 = Up, 1 = Down, 2 = Left, 3 = Right)
pub fn move_player_index(level: &mut Level, index: i32) -> Result<(), MoveError> {
    let direction = Direction::from_index(index).ok_or(MoveError::InvalidDirection(index))?;
    move_player(level, direction)
}

/// Advance the ball one cell along its current direction
pub fn advance_ball(level: &mut Level) -> BallStep {
    let target = level.ball + level.ball_direction.offset();

    if !level.in_bounds(target) {
        level.ball_direction = level.ball_direction.opposite();
        level.events.push(GameEvent::BallReflected {
            dir: level.ball_direction,
        });
        log::debug!("Ball reflected at {:?}, now {:?}", level.ball, level.ball_direction);
        return BallStep::Reflected;
    }

    match level.blocks.strike(target) {
        Some(BlockKind::Breakable) => {
            level.grid.set(target, EMPTY);
            level.events.push(GameEvent::BlockBroken { pos: target });
            log::debug!("Block broken at {:?}", target);
        }
        Some(BlockKind::Trapped) => {
            level.lives = level.lives.saturating_sub(1);
            level.events.push(GameEvent::TrapTriggered {
                pos: target,
                lives_left: level.lives,
            });
            log::debug!("Trap at {:?}, {} lives left", target, level.lives);
            if level.lives == 0 {
                level.ball = target;
                return BallStep::Fatal;
            }
        }
        // Pushable and destroyed blocks let the ball through untouched
        Some(BlockKind::Pushable) | Some(BlockKind::Empty) | None => {}
    }

    if level.birds.collect(target) {
        level.score += BIRD_SCORE;
        level.events.push(GameEvent::BirdCollected {
            pos: target,
            score: level.score,
        });
        log::debug!("Bird collected at {:?}, score {}", target, level.score);

        if level.birds.all_collected() {
            level.time_left = 0;
            level.events.push(GameEvent::LevelCleared);
        }
    }

    level.ball = target;
    BallStep::Moved
}
