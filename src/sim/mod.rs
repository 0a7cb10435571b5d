//! Deterministic turn simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One discrete turn per `tick`
//! - Seeded RNG only (level generation)
//! - Stable iteration order (row-major)
//! - No terminal or platform dependencies

pub mod blocks;
pub mod collision;
pub mod direction;
pub mod generate;
pub mod grid;
pub mod level;
pub mod state;
pub mod tick;

pub use blocks::{Block, BlockKind, BlockRegistry};
pub use collision::{BallStep, MoveError, advance_ball, move_player, move_player_index};
pub use direction::Direction;
pub use generate::generate_level;
pub use grid::Grid;
pub use level::{Level, symbols};
pub use state::{BirdSlots, GameEvent, GamePhase, TurnOutcome};
pub use tick::{TickInput, evaluate, tick};
