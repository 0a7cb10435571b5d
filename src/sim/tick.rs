//! One discrete game turn
//!
//! Fixed order: player intent, ball, clock, then win/loss evaluation.

use super::collision::{BallStep, advance_ball, move_player};
use super::direction::Direction;
use super::level::Level;
use super::state::{GameEvent, GamePhase, TurnOutcome};

/// Input for a single turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction the player asked for; `None` keeps Snoopy still
    pub intent: Option<Direction>,
}

impl TickInput {
    pub fn moving(dir: Direction) -> Self {
        Self { intent: Some(dir) }
    }
}

/// Advance the level by one turn
pub fn tick(level: &mut Level, input: &TickInput) -> TurnOutcome {
    // Finished levels don't tick
    if let Some(outcome) = terminal_outcome(level.phase) {
        return outcome;
    }

    level.events.clear();

    if let Some(dir) = input.intent {
        if let Err(err) = move_player(level, dir) {
            log::debug!("Player can't go {} from {:?}: {}", dir.as_str(), level.player, err);
            level.events.push(GameEvent::PlayerBlocked { dir });
        }
    }

    if advance_ball(level) == BallStep::Fatal {
        log::info!("Game over: last life lost, score {}", level.score);
        level.phase = GamePhase::GameOver;
        return TurnOutcome::GameOver;
    }

    level.time_left = level.time_left.saturating_sub(1);

    let outcome = evaluate(level);
    level.phase = outcome.into();
    match outcome {
        TurnOutcome::Continue => {}
        TurnOutcome::LevelComplete => log::info!("Level complete, score {}", level.score),
        TurnOutcome::GameOver => log::info!("Game over, score {}", level.score),
        TurnOutcome::TimeUp => log::info!(
            "Time up with {} birds left, score {}",
            level.birds.active_count(),
            level.score
        ),
    }
    outcome
}

/// Completion and failure checks, in priority order
pub fn evaluate(level: &Level) -> TurnOutcome {
    if level.birds.all_collected() {
        TurnOutcome::LevelComplete
    } else if level.lives == 0 {
        TurnOutcome::GameOver
    } else if level.time_left == 0 {
        TurnOutcome::TimeUp
    } else {
        TurnOutcome::Continue
    }
}

fn terminal_outcome(phase: GamePhase) -> Option<TurnOutcome> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::LevelComplete => Some(TurnOutcome::LevelComplete),
        GamePhase::GameOver => Some(TurnOutcome::GameOver),
        // A quit session is treated like running out of time
        GamePhase::TimeUp | GamePhase::Quit => Some(TurnOutcome::TimeUp),
    }
}
