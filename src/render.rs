//! Text rendering of a level
//!
//! The grid only holds the static layout, so entities are overlaid here.

use glam::IVec2;

use crate::sim::{BlockKind, GameEvent, Level, TurnOutcome, symbols};

/// Frame border symbol
pub const BORDER: char = '#';

/// Character shown for one cell
///
/// Priority: player, ball, bird, block, empty.
pub fn cell_char(level: &Level, pos: IVec2) -> char {
    if pos == level.player {
        return symbols::PLAYER;
    }
    if pos == level.ball {
        return symbols::BALL;
    }
    if level.birds.is_active_at(pos) {
        return symbols::BIRD;
    }
    match level.blocks.kind_at(pos) {
        Some(BlockKind::Pushable) => symbols::PUSHABLE,
        Some(BlockKind::Trapped) => symbols::TRAPPED,
        // Breakable blocks keep whatever symbol the level used
        Some(BlockKind::Breakable) => level.grid.cell(pos).unwrap_or(symbols::BREAKABLE),
        Some(BlockKind::Empty) | None => symbols::EMPTY,
    }
}

/// Full frame: bordered grid plus an optional status line
pub fn frame(level: &Level, show_hud: bool) -> String {
    let edge: String = std::iter::repeat_n(BORDER, level.width + 2).collect();
    let mut out = String::with_capacity((level.width + 3) * (level.height + 3));

    out.push_str(&edge);
    out.push('\n');
    for y in 0..level.height {
        out.push(BORDER);
        for x in 0..level.width {
            out.push(cell_char(level, IVec2::new(x as i32, y as i32)));
        }
        out.push(BORDER);
        out.push('\n');
    }
    out.push_str(&edge);
    out.push('\n');

    if show_hud {
        out.push_str(&hud(level));
        out.push('\n');
    }
    out
}

/// Status line with the session counters
pub fn hud(level: &Level) -> String {
    format!(
        "Time: {} | Score: {} | Lives: {} | Birds: {} | Snoopy: ({}, {})",
        level.time_left,
        level.score,
        level.lives,
        level.birds.active_count(),
        level.player.x,
        level.player.y
    )
}

/// Short message for an event, if it deserves one
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::TrapTriggered { lives_left, .. } => {
            Some(format!("The ball hit a trap! Lives left: {lives_left}"))
        }
        GameEvent::BirdCollected { score, .. } => Some(format!("Bird caught! Score: {score}")),
        GameEvent::LevelCleared => Some("All birds caught!".to_string()),
        GameEvent::PlayerBlocked { .. }
        | GameEvent::BallReflected { .. }
        | GameEvent::BlockBroken { .. } => None,
    }
}

/// End-of-level message
pub fn outcome_message(outcome: TurnOutcome) -> &'static str {
    match outcome {
        TurnOutcome::Continue => "",
        TurnOutcome::LevelComplete => "Congratulations! Level complete!",
        TurnOutcome::GameOver => "Game over! You lost all your lives.",
        TurnOutcome::TimeUp => "Time's up!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_overlay_priority() {
        let mut level = Level::parse("4 1\nS*O#\n").unwrap();
        assert_eq!(cell_char(&level, IVec2::new(0, 0)), 'S');
        assert_eq!(cell_char(&level, IVec2::new(1, 0)), '*');
        assert_eq!(cell_char(&level, IVec2::new(2, 0)), 'O');
        assert_eq!(cell_char(&level, IVec2::new(3, 0)), '#');

        // Player drawn over the ball when they share a cell
        level.ball = level.player;
        assert_eq!(cell_char(&level, IVec2::new(0, 0)), 'S');
        assert_eq!(cell_char(&level, IVec2::new(1, 0)), ' ');
    }

    #[test]
    fn test_broken_block_renders_empty() {
        let mut level = Level::parse("4 2\n*X O\nS   \n").unwrap();
        assert_eq!(cell_char(&level, IVec2::new(1, 0)), 'X');
        tick(&mut level, &TickInput::default());
        tick(&mut level, &TickInput::default());
        assert_eq!(level.ball, IVec2::new(2, 0));
        assert_eq!(cell_char(&level, IVec2::new(1, 0)), ' ');
    }

    #[test]
    fn test_frame_layout() {
        let level = Level::parse("3 2\n*PT\nS O\n").unwrap();
        let expected = "\
#####
#*PT#
#S O#
#####
Time: 120 | Score: 0 | Lives: 3 | Birds: 1 | Snoopy: (0, 1)
";
        assert_eq!(frame(&level, true), expected);
        assert!(!frame(&level, false).contains("Time"));
    }

    #[test]
    fn test_hud_tracks_player_position() {
        let mut level = Level::parse("3 2\n* O\nS  \n").unwrap();
        tick(&mut level, &TickInput::moving(crate::Direction::Right));
        assert_eq!(
            hud(&level),
            "Time: 119 | Score: 0 | Lives: 3 | Birds: 1 | Snoopy: (1, 1)"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            event_message(&GameEvent::TrapTriggered {
                pos: IVec2::ZERO,
                lives_left: 1
            })
            .as_deref(),
            Some("The ball hit a trap! Lives left: 1")
        );
        assert!(event_message(&GameEvent::BlockBroken { pos: IVec2::ZERO }).is_none());
        assert_eq!(outcome_message(TurnOutcome::TimeUp), "Time's up!");
    }
}
